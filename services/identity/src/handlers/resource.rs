use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::repository::ResourceLinker as _;
use crate::domain::types::{AccountRole, ResourceType};
use crate::error::IdentityServiceError;
use crate::state::AppState;
use crate::usecase::issue::{IssueCodeInput, IssueCodeUseCase};
use crate::usecase::token::{TokenInfo, verify_session_token};

/// Require a valid administrator bearer token.
fn require_admin(headers: &HeaderMap, secret: &str) -> Result<TokenInfo, IdentityServiceError> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or(IdentityServiceError::TokenInvalid)?;
    let info = verify_session_token(token, secret)?;
    if info.role != AccountRole::Administrator {
        return Err(IdentityServiceError::Forbidden);
    }
    Ok(info)
}

fn parse_resource_type(raw: &str) -> Result<ResourceType, IdentityServiceError> {
    raw.parse()
        .map_err(|_| IdentityServiceError::InvalidResourceType)
}

// ── POST /resource/{type} ─────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct IssueCodeQuery {
    pub email: String,
    pub ttl_secs: Option<i64>,
}

#[derive(Serialize)]
pub struct IssueCodeResponse {
    pub resource_id: String,
    pub code: String,
    pub expires_at: DateTime<Utc>,
}

pub async fn issue_code(
    State(state): State<AppState>,
    Path(resource_type): Path<String>,
    Query(query): Query<IssueCodeQuery>,
    headers: HeaderMap,
    Json(attributes): Json<serde_json::Value>,
) -> Result<(StatusCode, Json<IssueCodeResponse>), IdentityServiceError> {
    require_admin(&headers, &state.jwt_secret)?;
    let resource_type = parse_resource_type(&resource_type)?;

    let usecase = IssueCodeUseCase {
        accounts: state.account_repo(),
        codes: state.access_code_repo(),
        linker: state.linker.clone(),
        default_ttl_secs: state.code_ttl_secs,
        max_ttl_secs: state.code_ttl_max_secs,
    };

    let out = usecase
        .execute(IssueCodeInput {
            resource_type,
            attributes,
            email: query.email,
            ttl_secs: query.ttl_secs,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(IssueCodeResponse {
            resource_id: out.resource_id,
            code: out.code,
            expires_at: out.expires_at,
        }),
    ))
}

// ── GET /resource/{type}/{id} ─────────────────────────────────────────────────

pub async fn get_resource(
    State(state): State<AppState>,
    Path((resource_type, resource_id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, IdentityServiceError> {
    require_admin(&headers, &state.jwt_secret)?;
    let resource_type = parse_resource_type(&resource_type)?;

    let attributes = state
        .linker
        .get(resource_type, &resource_id)
        .await?
        .ok_or(IdentityServiceError::ResourceNotFound)?;
    Ok(Json(attributes))
}
