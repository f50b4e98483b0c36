use anyhow::Context as _;
use axum::{extract::State, http::StatusCode};

use crate::domain::repository::ResourceLinker as _;
use crate::error::IdentityServiceError;
use crate::state::AppState;

/// Deep health check: the service itself, its database, and — transitively —
/// the external clinical-data server.
pub async fn health(State(state): State<AppState>) -> Result<StatusCode, IdentityServiceError> {
    state.db.ping().await.context("database ping")?;
    state.linker.ping().await?;
    Ok(StatusCode::OK)
}
