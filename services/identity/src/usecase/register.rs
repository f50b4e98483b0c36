use anyhow::Context as _;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::{AccessCodeRepository, AccountRepository, ConsumeOutcome};
use crate::domain::types::{
    Account, AccountStatus, CodeState, PasswordPolicy, ResourceLink, validate_email,
};
use crate::error::IdentityServiceError;
use crate::password;

pub struct RedeemInput {
    pub code: String,
    pub email: String,
    pub password: String,
    pub name: String,
}

pub struct RedeemUseCase<A, C>
where
    A: AccountRepository,
    C: AccessCodeRepository,
{
    pub accounts: A,
    pub codes: C,
    pub policy: PasswordPolicy,
}

impl<A, C> RedeemUseCase<A, C>
where
    A: AccountRepository,
    C: AccessCodeRepository,
{
    /// Redeem an access code into a new linked account. Returns the account id.
    pub async fn execute(&self, input: RedeemInput) -> Result<Uuid, IdentityServiceError> {
        // 1. Pure validation, before any store mutation.
        if !self.policy.check(&input.password) {
            return Err(IdentityServiceError::WeakPassword);
        }
        if !validate_email(&input.email) {
            return Err(IdentityServiceError::InvalidEmail);
        }

        // 2. Load and classify the code. Email mismatch is checked here so a
        //    wrong registrant leaves the code active for its rightful owner.
        let code = self
            .codes
            .find_by_value(&input.code)
            .await?
            .ok_or(IdentityServiceError::CodeNotFound)?;
        match code.state(Utc::now()) {
            CodeState::Consumed => return Err(IdentityServiceError::CodeAlreadyConsumed),
            CodeState::Expired => return Err(IdentityServiceError::CodeExpired),
            CodeState::Active => {}
        }
        if !code.email.eq_ignore_ascii_case(&input.email) {
            return Err(IdentityServiceError::EmailMismatch);
        }

        // 3. The email must not already own an account, whatever its status or
        //    casing. Checked before consumption so a conflicting registration
        //    does not burn the code. The lower(email) unique index backstops
        //    races that slip past this read.
        if self.accounts.find_by_email(&input.email).await?.is_some() {
            return Err(IdentityServiceError::InvalidEmail);
        }

        // 4. Atomic check-and-consume. The store guarantees exactly one of N
        //    concurrent callers gets Consumed for a given code value.
        let consumed = match self.codes.consume(&input.code).await? {
            ConsumeOutcome::Consumed(code) => code,
            ConsumeOutcome::NotFound => return Err(IdentityServiceError::CodeNotFound),
            ConsumeOutcome::Expired => return Err(IdentityServiceError::CodeExpired),
            ConsumeOutcome::AlreadyConsumed => {
                return Err(IdentityServiceError::CodeAlreadyConsumed);
            }
        };

        // 5. Hash off the async threads, then create the linked account.
        let password_hash = password::hash_bounded(input.password, password::HASH_TIMEOUT)
            .await
            .context("hash password for registration")?;

        let now = Utc::now();
        let account = Account {
            id: Uuid::now_v7(),
            email: input.email,
            name: input.name,
            password_hash,
            role: consumed.resource_type.default_role(),
            status: AccountStatus::Active,
            resource_link: Some(ResourceLink {
                resource_type: consumed.resource_type,
                resource_id: consumed.resource_id.clone(),
            }),
            created_at: now,
            updated_at: now,
        };

        // The code is not rolled back on failure: a burned code beats
        // re-enabling a potentially intercepted one. Operators reconcile by
        // issuing a fresh code.
        if let Err(e) = self.accounts.create(&account).await {
            tracing::error!(
                error = %e,
                code_id = %consumed.id,
                resource_type = %consumed.resource_type,
                resource_id = %consumed.resource_id,
                "account creation failed after code consumption"
            );
            return Err(IdentityServiceError::AccountCreationFailed);
        }

        tracing::info!(
            account_id = %account.id,
            resource_type = %consumed.resource_type,
            resource_id = %consumed.resource_id,
            "registered account via access code"
        );

        Ok(account.id)
    }
}
