use anyhow::Context as _;
use uuid::Uuid;

use crate::domain::repository::AccountRepository;
use crate::domain::types::{AccountRole, AccountStatus};
use crate::error::IdentityServiceError;
use crate::password;
use crate::usecase::token::issue_session_token;

pub struct AuthenticateInput {
    pub email: String,
    pub password: String,
}

/// Non-sensitive account summary returned alongside the session token.
#[derive(Debug)]
pub struct AccountSummary {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: AccountRole,
}

#[derive(Debug)]
pub struct AuthenticateOutput {
    pub token: String,
    pub token_exp: u64,
    pub account: AccountSummary,
}

pub struct AuthenticateUseCase<A: AccountRepository> {
    pub accounts: A,
    pub jwt_secret: String,
}

impl<A: AccountRepository> AuthenticateUseCase<A> {
    /// Verify credentials and issue a session token.
    ///
    /// Unknown email, wrong password, and non-active status all return the
    /// same `InvalidCredentials`; a miss still burns a hash verification so
    /// response timing does not reveal whether the account exists.
    pub async fn execute(
        &self,
        input: AuthenticateInput,
    ) -> Result<AuthenticateOutput, IdentityServiceError> {
        let Some(account) = self.accounts.find_by_email(&input.email).await? else {
            let _ = password::verify_bounded(
                input.password,
                password::dummy_hash().to_owned(),
                password::HASH_TIMEOUT,
            )
            .await;
            return Err(IdentityServiceError::InvalidCredentials);
        };

        let password_ok = password::verify_bounded(
            input.password,
            account.password_hash.clone(),
            password::HASH_TIMEOUT,
        )
        .await
        .context("verify password at login")?;

        if !password_ok || account.status != AccountStatus::Active {
            return Err(IdentityServiceError::InvalidCredentials);
        }

        let (token, token_exp) = issue_session_token(&account, &self.jwt_secret)?;

        Ok(AuthenticateOutput {
            token,
            token_exp,
            account: AccountSummary {
                id: account.id,
                email: account.email,
                name: account.name,
                role: account.role,
            },
        })
    }
}
