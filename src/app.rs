use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{cars, health};
use crate::service::CarService;

/// The full HTTP surface, shared by the binary and the tests.
pub fn build_router(service: CarService) -> Router {
    cars::router()
        .merge(health::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(service)
}
