use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use carelink_core::health::healthz;
use carelink_core::middleware::request_id_layer;

use crate::handlers::{health::health, login::login, register::register, resource};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/health", get(health))
        // Issuance (administrator)
        .route("/resource/{resource_type}", post(resource::issue_code))
        .route(
            "/resource/{resource_type}/{resource_id}",
            get(resource::get_resource),
        )
        // Registration and login
        .route("/register", post(register))
        .route("/login", post(login))
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
