use chrono::{DateTime, Duration, Utc};
use rand::RngExt;
use uuid::Uuid;

use crate::domain::repository::{AccessCodeRepository, AccountRepository, ResourceLinker};
use crate::domain::types::{AccessCode, AccountStatus, CODE_LEN, ResourceType, validate_email};
use crate::error::IdentityServiceError;

/// Charset for generating random access codes (uppercase alphanumeric).
const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

fn generate_code() -> String {
    let mut rng = rand::rng();
    (0..CODE_LEN)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}

pub struct IssueCodeInput {
    pub resource_type: ResourceType,
    /// Opaque payload forwarded verbatim to the clinical-data server.
    pub attributes: serde_json::Value,
    pub email: String,
    pub ttl_secs: Option<i64>,
}

#[derive(Debug)]
pub struct IssueCodeOutput {
    pub resource_id: String,
    pub code: String,
    pub expires_at: DateTime<Utc>,
}

pub struct IssueCodeUseCase<A, C, L>
where
    A: AccountRepository,
    C: AccessCodeRepository,
    L: ResourceLinker,
{
    pub accounts: A,
    pub codes: C,
    pub linker: L,
    pub default_ttl_secs: i64,
    pub max_ttl_secs: i64,
}

impl<A, C, L> IssueCodeUseCase<A, C, L>
where
    A: AccountRepository,
    C: AccessCodeRepository,
    L: ResourceLinker,
{
    pub async fn execute(
        &self,
        input: IssueCodeInput,
    ) -> Result<IssueCodeOutput, IdentityServiceError> {
        // 1. Validate target email: syntax, and not already an active login.
        if !validate_email(&input.email) {
            return Err(IdentityServiceError::InvalidEmail);
        }
        if let Some(existing) = self.accounts.find_by_email(&input.email).await? {
            if existing.status == AccountStatus::Active {
                return Err(IdentityServiceError::InvalidEmail);
            }
        }

        // 2. Validate TTL against configured bounds. Rejected, not clamped.
        let ttl_secs = input.ttl_secs.unwrap_or(self.default_ttl_secs);
        if ttl_secs <= 0 || ttl_secs > self.max_ttl_secs {
            return Err(IdentityServiceError::InvalidTtl);
        }

        // 3. Create the clinical resource first. The two writes are not one
        //    transaction, so any failure must land here — never after the
        //    code row exists, or the code would point at nothing.
        let resource_id = self
            .linker
            .create(input.resource_type, &input.attributes)
            .await?;

        // 4. Persist the access code in state active.
        let now = Utc::now();
        let code = AccessCode {
            id: Uuid::now_v7(),
            code: generate_code(),
            resource_type: input.resource_type,
            resource_id: resource_id.clone(),
            email: input.email,
            issued_at: now,
            expires_at: now + Duration::seconds(ttl_secs),
            consumed_at: None,
        };
        self.codes.insert(&code).await?;

        tracing::info!(
            resource_type = %input.resource_type,
            resource_id = %resource_id,
            expires_at = %code.expires_at,
            "issued access code"
        );

        Ok(IssueCodeOutput {
            resource_id,
            code: code.code,
            expires_at: code.expires_at,
        })
    }
}
