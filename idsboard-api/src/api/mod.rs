use poem_openapi::OpenApi;

pub mod alerts;
pub mod analyze;
pub mod blocks;
pub mod health;
pub mod info;

pub fn get() -> impl OpenApi {
    (
        info::Api,
        health::Api,
        blocks::Api,
        alerts::Api,
        analyze::Api,
    )
}
