use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use crate::domain::types::{Account, AccountRole, SESSION_TOKEN_TTL_SECS};
use crate::error::IdentityServiceError;

/// JWT claims for session tokens.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub role: u8,
    pub exp: u64,
}

/// Identity extracted from a validated session token.
#[derive(Debug, Clone)]
pub struct TokenInfo {
    pub account_id: Uuid,
    pub role: AccountRole,
    pub exp: u64,
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before UNIX epoch")
        .as_secs()
}

/// Issue an HS256 session token for an authenticated account.
pub fn issue_session_token(
    account: &Account,
    secret: &str,
) -> Result<(String, u64), IdentityServiceError> {
    let exp = now_secs() + SESSION_TOKEN_TTL_SECS;
    let claims = SessionClaims {
        sub: account.id.to_string(),
        role: account.role.as_u8(),
        exp,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| IdentityServiceError::Internal(e.into()))?;
    Ok((token, exp))
}

/// Validate a session token and return its embedded identity.
///
/// Repeated calls on the same unexpired token return identical claims.
pub fn verify_session_token(
    token: &str,
    secret: &str,
) -> Result<TokenInfo, IdentityServiceError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => IdentityServiceError::TokenExpired,
        _ => IdentityServiceError::TokenInvalid,
    })?;

    let account_id = data
        .claims
        .sub
        .parse::<Uuid>()
        .map_err(|_| IdentityServiceError::TokenInvalid)?;
    let role =
        AccountRole::from_u8(data.claims.role).ok_or(IdentityServiceError::TokenInvalid)?;

    Ok(TokenInfo {
        account_id,
        role,
        exp: data.claims.exp,
    })
}
