use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Identity service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum IdentityServiceError {
    #[error("invalid email")]
    InvalidEmail,
    #[error("invalid resource type")]
    InvalidResourceType,
    #[error("invalid ttl")]
    InvalidTtl,
    #[error("password does not meet policy")]
    WeakPassword,
    #[error("access code not found")]
    CodeNotFound,
    #[error("access code expired")]
    CodeExpired,
    #[error("access code already consumed")]
    CodeAlreadyConsumed,
    #[error("email does not match access code")]
    EmailMismatch,
    #[error("account creation failed after code consumption")]
    AccountCreationFailed,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("token expired")]
    TokenExpired,
    #[error("invalid token")]
    TokenInvalid,
    #[error("forbidden")]
    Forbidden,
    #[error("resource creation failed")]
    ResourceCreationFailed,
    #[error("resource not found")]
    ResourceNotFound,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl IdentityServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidResourceType => "INVALID_RESOURCE_TYPE",
            Self::InvalidTtl => "INVALID_TTL",
            Self::WeakPassword => "WEAK_PASSWORD",
            Self::CodeNotFound => "CODE_NOT_FOUND",
            Self::CodeExpired => "CODE_EXPIRED",
            Self::CodeAlreadyConsumed => "CODE_ALREADY_CONSUMED",
            Self::EmailMismatch => "EMAIL_MISMATCH",
            Self::AccountCreationFailed => "ACCOUNT_CREATION_FAILED",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::TokenInvalid => "TOKEN_INVALID",
            Self::Forbidden => "FORBIDDEN",
            Self::ResourceCreationFailed => "RESOURCE_CREATION_FAILED",
            Self::ResourceNotFound => "RESOURCE_NOT_FOUND",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for IdentityServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidEmail
            | Self::InvalidResourceType
            | Self::InvalidTtl
            | Self::WeakPassword => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials | Self::TokenExpired | Self::TokenInvalid => {
                StatusCode::UNAUTHORIZED
            }
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::CodeNotFound | Self::ResourceNotFound => StatusCode::NOT_FOUND,
            Self::CodeAlreadyConsumed | Self::EmailMismatch => StatusCode::CONFLICT,
            Self::CodeExpired => StatusCode::GONE,
            Self::ResourceCreationFailed => StatusCode::BAD_GATEWAY,
            Self::AccountCreationFailed | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Log 500s only — tower-http TraceLayer already records method/uri/status for all
        // requests. 4xx are expected client errors; logging them here would be noise.
        // AccountCreationFailed is the post-consume inconsistency: the code is burned
        // but no account exists, so an operator has to reconcile by hand.
        match &self {
            Self::Internal(e) => {
                tracing::error!(error = %e, kind = "INTERNAL", "internal error");
            }
            Self::AccountCreationFailed => {
                tracing::error!(
                    kind = "ACCOUNT_CREATION_FAILED",
                    "account creation failed after code consumption; manual reconciliation required"
                );
            }
            _ => {}
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
