use sea_orm::DatabaseConnection;

use crate::domain::types::PasswordPolicy;
use crate::infra::db::{DbAccessCodeRepository, DbAccountRepository};
use crate::infra::fhir::HttpResourceLinker;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub linker: HttpResourceLinker,
    pub jwt_secret: String,
    pub code_ttl_secs: i64,
    pub code_ttl_max_secs: i64,
    pub password_policy: PasswordPolicy,
}

impl AppState {
    pub fn account_repo(&self) -> DbAccountRepository {
        DbAccountRepository {
            db: self.db.clone(),
        }
    }

    pub fn access_code_repo(&self) -> DbAccessCodeRepository {
        DbAccessCodeRepository {
            db: self.db.clone(),
        }
    }
}
