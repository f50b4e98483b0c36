#![allow(async_fn_in_trait)]

use uuid::Uuid;

use crate::domain::types::{AccessCode, Account, AccountStatus, ResourceType};
use crate::error::IdentityServiceError;

/// Result of the atomic check-and-consume on an access code.
///
/// For a given code value, at most one caller ever observes `Consumed`; all
/// concurrent losers see `AlreadyConsumed` (or `Expired` at the boundary).
#[derive(Debug, Clone)]
pub enum ConsumeOutcome {
    Consumed(AccessCode),
    NotFound,
    Expired,
    AlreadyConsumed,
}

/// Repository for login accounts. Sole owner of the Account lifecycle.
pub trait AccountRepository: Send + Sync {
    /// Case-insensitive email lookup; stored casing is preserved.
    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Account>, IdentityServiceError>;

    async fn create(&self, account: &Account) -> Result<(), IdentityServiceError>;

    /// Operator tooling: disable or reactivate an account.
    async fn update_status(
        &self,
        id: Uuid,
        status: AccountStatus,
    ) -> Result<(), IdentityServiceError>;
}

/// Repository for one-time access codes. Sole owner of the code lifecycle;
/// `consume` is the only way a code leaves the active state.
pub trait AccessCodeRepository: Send + Sync {
    async fn insert(&self, code: &AccessCode) -> Result<(), IdentityServiceError>;

    async fn find_by_value(
        &self,
        code: &str,
    ) -> Result<Option<AccessCode>, IdentityServiceError>;

    /// Atomic check-and-consume: load, verify active, mark consumed — one
    /// indivisible unit with respect to concurrent callers of the same value.
    async fn consume(&self, code: &str) -> Result<ConsumeOutcome, IdentityServiceError>;

    /// Delete never-consumed codes expired for longer than `retention`.
    /// Returns the number of rows removed.
    async fn sweep_expired(
        &self,
        retention: chrono::Duration,
    ) -> Result<u64, IdentityServiceError>;
}

/// Port to the external clinical-data server. Used by issuance (create) and
/// operator reads — never by redemption.
pub trait ResourceLinker: Send + Sync {
    /// Create a resource from opaque attributes, returning its identifier.
    async fn create(
        &self,
        resource_type: ResourceType,
        attributes: &serde_json::Value,
    ) -> Result<String, IdentityServiceError>;

    /// Fetch a resource by identifier. `Ok(None)` when the server reports 404.
    async fn get(
        &self,
        resource_type: ResourceType,
        resource_id: &str,
    ) -> Result<Option<serde_json::Value>, IdentityServiceError>;

    /// Liveness of the clinical-data server (metadata endpoint).
    async fn ping(&self) -> Result<(), IdentityServiceError>;
}
