use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::IdentityServiceError;
use crate::state::AppState;
use crate::usecase::register::{RedeemInput, RedeemUseCase};

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub code: String,
    pub name: String,
}

#[derive(Serialize)]
pub struct RegisterResponse {
    pub account_id: Uuid,
}

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), IdentityServiceError> {
    let usecase = RedeemUseCase {
        accounts: state.account_repo(),
        codes: state.access_code_repo(),
        policy: state.password_policy,
    };

    let account_id = usecase
        .execute(RedeemInput {
            code: body.code,
            email: body.email,
            password: body.password,
            name: body.name,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(RegisterResponse { account_id })))
}
