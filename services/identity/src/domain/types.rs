use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account permission level.
///
/// Wire format: `u8` (0 = ClinicalSubject, 1 = ClinicalProvider, 2 = Administrator).
/// Ordering follows privilege level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountRole {
    ClinicalSubject = 0,
    ClinicalProvider = 1,
    Administrator = 2,
}

impl AccountRole {
    /// Convert from `u8` wire value. Returns `None` for unknown values.
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::ClinicalSubject),
            1 => Some(Self::ClinicalProvider),
            2 => Some(Self::Administrator),
            _ => None,
        }
    }

    /// Convert to `u8` wire value.
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl PartialOrd for AccountRole {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AccountRole {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.as_u8().cmp(&other.as_u8())
    }
}

/// Account lifecycle status. Only `Active` accounts can log in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    Pending = 0,
    Active = 1,
    Disabled = 2,
}

impl AccountStatus {
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::Pending),
            1 => Some(Self::Active),
            2 => Some(Self::Disabled),
            _ => None,
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

/// Clinical resource kinds the service can provision identity for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceType {
    Patient,
    Practitioner,
}

impl ResourceType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Patient => "Patient",
            Self::Practitioner => "Practitioner",
        }
    }

    /// Role granted to the account created by redeeming a code for this resource.
    pub fn default_role(self) -> AccountRole {
        match self {
            Self::Patient => AccountRole::ClinicalSubject,
            Self::Practitioner => AccountRole::ClinicalProvider,
        }
    }
}

impl std::str::FromStr for ResourceType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Patient" => Ok(Self::Patient),
            "Practitioner" => Ok(Self::Practitioner),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Weak reference to a record in the external clinical-data server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLink {
    pub resource_type: ResourceType,
    pub resource_id: String,
}

/// Login account. Present iff created via code redemption or by an operator;
/// the resource link is absent for operator-created administrator accounts.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    /// Argon2id PHC string. Never logged or serialized.
    pub password_hash: String,
    pub role: AccountRole,
    pub status: AccountStatus,
    pub resource_link: Option<ResourceLink>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Derived access-code state. Consumed is sticky: a code consumed one tick
/// before expiry stays consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeState {
    Active,
    Expired,
    Consumed,
}

/// One-time access code binding a clinical resource and a target email.
#[derive(Debug, Clone)]
pub struct AccessCode {
    pub id: Uuid,
    pub code: String,
    pub resource_type: ResourceType,
    pub resource_id: String,
    pub email: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub consumed_at: Option<DateTime<Utc>>,
}

impl AccessCode {
    pub fn state(&self, now: DateTime<Utc>) -> CodeState {
        if self.consumed_at.is_some() {
            CodeState::Consumed
        } else if now >= self.expires_at {
            CodeState::Expired
        } else {
            CodeState::Active
        }
    }
}

/// Minimum-strength password policy, checked before any store mutation.
#[derive(Debug, Clone, Copy)]
pub struct PasswordPolicy {
    pub min_len: usize,
}

impl PasswordPolicy {
    /// Length floor plus at least one letter and one digit.
    pub fn check(&self, password: &str) -> bool {
        password.chars().count() >= self.min_len
            && password.chars().any(|c| c.is_ascii_alphabetic())
            && password.chars().any(|c| c.is_ascii_digit())
    }
}

/// Syntactic email check: one `@`, non-empty local part, dotted domain.
/// Deliverability is out of scope; the code itself proves mailbox control.
pub fn validate_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.chars().any(char::is_whitespace)
}

/// Access code length in characters (36-symbol alphabet, ~165 bits).
pub const CODE_LEN: usize = 32;

/// Session token time-to-live in seconds.
pub const SESSION_TOKEN_TTL_SECS: u64 = 3600;

/// Never-consumed expired codes older than this many days are swept.
/// Consumed codes are audit tombstones and are never deleted.
pub const CODE_SWEEP_RETENTION_DAYS: i64 = 30;
