use std::sync::Arc;

use axum::{routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;
use service::customer::service::CustomerService;
use service::customer::store::CustomerStore;

pub mod customers;

/// Shared handler state: the customer service over whichever storage backend
/// was selected at startup.
#[derive(Clone)]
pub struct AppState {
    pub customers: Arc<CustomerService<dyn CustomerStore>>,
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK")))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: health, customer API, swagger.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let api = Router::new()
        .route(
            "/api/v1/customers",
            get(customers::list).post(customers::register),
        )
        .route(
            "/api/v1/customers/:id",
            get(customers::get)
                .put(customers::update)
                .delete(customers::delete),
        );

    Router::new()
        .route("/health", get(health))
        .merge(api)
        .merge(crate::openapi::swagger_router())
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
