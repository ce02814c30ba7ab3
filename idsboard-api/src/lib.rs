mod api;

use std::net::SocketAddr;

use anyhow::{Context, Result};
use idsboard_common::framework_error_response;
use idsboard_core::Services;
use poem::listener::TcpListener;
use poem::middleware::Cors;
use poem::{Endpoint, EndpointExt, Response, Route, Server};
use poem_openapi::OpenApiService;
use tracing::*;

pub struct ApiServer {
    services: Services,
}

async fn render_error(err: poem::Error) -> Response {
    framework_error_response(err)
}

/// Builds the HTTP application: every endpoint, JSON error bodies, wide-open
/// CORS and the shared services.
pub fn make_app(services: Services) -> impl Endpoint {
    let api_service = OpenApiService::new(
        api::get(),
        "IDS Dashboard API",
        env!("CARGO_PKG_VERSION"),
    );

    Route::new()
        .nest("/", api_service)
        .catch_all_error(render_error)
        .with(Cors::new().allow_credentials(true))
        .data(services)
}

impl ApiServer {
    pub fn new(services: &Services) -> Self {
        ApiServer {
            services: services.clone(),
        }
    }

    pub async fn run(self, address: SocketAddr) -> Result<()> {
        let app = make_app(self.services);

        info!(?address, "Listening");
        Server::new(TcpListener::bind(address))
            .run(app)
            .await
            .context("Failed to start the API server")
    }
}
