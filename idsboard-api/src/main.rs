mod api;
use poem_openapi::OpenApiService;

pub fn main() {
    let api_service = OpenApiService::new(
        api::get(),
        "IDS Dashboard API",
        env!("CARGO_PKG_VERSION"),
    );

    println!("{}", api_service.spec());
}
