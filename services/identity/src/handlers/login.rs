use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::types::AccountRole;
use crate::error::IdentityServiceError;
use crate::state::AppState;
use crate::usecase::login::{AuthenticateInput, AuthenticateUseCase};

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginAccount {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: AccountRole,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub access_token_exp: u64,
    pub account: LoginAccount,
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, IdentityServiceError> {
    let usecase = AuthenticateUseCase {
        accounts: state.account_repo(),
        jwt_secret: state.jwt_secret.clone(),
    };

    let out = usecase
        .execute(AuthenticateInput {
            email: body.email,
            password: body.password,
        })
        .await?;

    Ok(Json(LoginResponse {
        access_token: out.token,
        access_token_exp: out.token_exp,
        account: LoginAccount {
            id: out.account.id,
            email: out.account.email,
            name: out.account.name,
            role: out.account.role,
        },
    }))
}
