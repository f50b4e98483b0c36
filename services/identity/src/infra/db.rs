use anyhow::Context as _;
use chrono::Utc;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
};
use uuid::Uuid;

use carelink_identity_schema::{access_codes, accounts};

use crate::domain::repository::{AccessCodeRepository, AccountRepository, ConsumeOutcome};
use crate::domain::types::{
    AccessCode, Account, AccountRole, AccountStatus, ResourceLink, ResourceType,
};
use crate::error::IdentityServiceError;

// ── Account repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbAccountRepository {
    pub db: DatabaseConnection,
}

impl AccountRepository for DbAccountRepository {
    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Account>, IdentityServiceError> {
        let model = accounts::Entity::find()
            .filter(
                Expr::expr(Func::lower(Expr::col(accounts::Column::Email)))
                    .eq(email.to_lowercase()),
            )
            .one(&self.db)
            .await
            .context("find account by email")?;
        model.map(account_from_model).transpose()
    }

    async fn create(&self, account: &Account) -> Result<(), IdentityServiceError> {
        let (resource_type, resource_id) = match &account.resource_link {
            Some(link) => (
                Some(link.resource_type.as_str().to_owned()),
                Some(link.resource_id.clone()),
            ),
            None => (None, None),
        };
        accounts::ActiveModel {
            id: Set(account.id),
            email: Set(account.email.clone()),
            name: Set(account.name.clone()),
            password_hash: Set(account.password_hash.clone()),
            role: Set(i16::from(account.role.as_u8())),
            status: Set(i16::from(account.status.as_u8())),
            resource_type: Set(resource_type),
            resource_id: Set(resource_id),
            created_at: Set(account.created_at),
            updated_at: Set(account.updated_at),
        }
        .insert(&self.db)
        .await
        .context("create account")?;
        Ok(())
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: AccountStatus,
    ) -> Result<(), IdentityServiceError> {
        accounts::ActiveModel {
            id: Set(id),
            status: Set(i16::from(status.as_u8())),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("update account status")?;
        Ok(())
    }
}

fn account_from_model(model: accounts::Model) -> Result<Account, IdentityServiceError> {
    let role = AccountRole::from_u8(model.role as u8)
        .ok_or_else(|| anyhow::anyhow!("unknown role value in accounts row: {}", model.role))?;
    let status = AccountStatus::from_u8(model.status as u8).ok_or_else(|| {
        anyhow::anyhow!("unknown status value in accounts row: {}", model.status)
    })?;
    let resource_link = match (model.resource_type, model.resource_id) {
        (Some(t), Some(id)) => Some(ResourceLink {
            resource_type: parse_resource_type(&t)?,
            resource_id: id,
        }),
        _ => None,
    };
    Ok(Account {
        id: model.id,
        email: model.email,
        name: model.name,
        password_hash: model.password_hash,
        role,
        status,
        resource_link,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── AccessCode repository ─────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbAccessCodeRepository {
    pub db: DatabaseConnection,
}

impl AccessCodeRepository for DbAccessCodeRepository {
    async fn insert(&self, code: &AccessCode) -> Result<(), IdentityServiceError> {
        access_codes::ActiveModel {
            id: Set(code.id),
            code: Set(code.code.clone()),
            resource_type: Set(code.resource_type.as_str().to_owned()),
            resource_id: Set(code.resource_id.clone()),
            email: Set(code.email.clone()),
            issued_at: Set(code.issued_at),
            expires_at: Set(code.expires_at),
            consumed_at: Set(None),
        }
        .insert(&self.db)
        .await
        .context("insert access code")?;
        Ok(())
    }

    async fn find_by_value(
        &self,
        code: &str,
    ) -> Result<Option<AccessCode>, IdentityServiceError> {
        let model = access_codes::Entity::find()
            .filter(access_codes::Column::Code.eq(code))
            .one(&self.db)
            .await
            .context("find access code by value")?;
        model.map(code_from_model).transpose()
    }

    async fn consume(&self, code: &str) -> Result<ConsumeOutcome, IdentityServiceError> {
        let now = Utc::now();
        // Single conditional UPDATE guarded on the active-state predicate.
        // The row's unique key serializes concurrent callers: exactly one
        // update matches, everyone else falls through to classification.
        let result = access_codes::Entity::update_many()
            .col_expr(access_codes::Column::ConsumedAt, Expr::value(now))
            .filter(access_codes::Column::Code.eq(code))
            .filter(access_codes::Column::ConsumedAt.is_null())
            .filter(access_codes::Column::ExpiresAt.gt(now))
            .exec(&self.db)
            .await
            .context("consume access code")?;

        if result.rows_affected == 1 {
            let consumed = self
                .find_by_value(code)
                .await?
                .context("consumed access code vanished")?;
            return Ok(ConsumeOutcome::Consumed(consumed));
        }

        match self.find_by_value(code).await? {
            None => Ok(ConsumeOutcome::NotFound),
            Some(existing) if existing.consumed_at.is_some() => {
                Ok(ConsumeOutcome::AlreadyConsumed)
            }
            Some(_) => Ok(ConsumeOutcome::Expired),
        }
    }

    async fn sweep_expired(
        &self,
        retention: chrono::Duration,
    ) -> Result<u64, IdentityServiceError> {
        let cutoff = Utc::now() - retention;
        let result = access_codes::Entity::delete_many()
            .filter(access_codes::Column::ConsumedAt.is_null())
            .filter(access_codes::Column::ExpiresAt.lt(cutoff))
            .exec(&self.db)
            .await
            .context("sweep expired access codes")?;
        Ok(result.rows_affected)
    }
}

fn code_from_model(model: access_codes::Model) -> Result<AccessCode, IdentityServiceError> {
    Ok(AccessCode {
        id: model.id,
        code: model.code,
        resource_type: parse_resource_type(&model.resource_type)?,
        resource_id: model.resource_id,
        email: model.email,
        issued_at: model.issued_at,
        expires_at: model.expires_at,
        consumed_at: model.consumed_at,
    })
}

fn parse_resource_type(value: &str) -> Result<ResourceType, IdentityServiceError> {
    value
        .parse()
        .map_err(|_| anyhow::anyhow!("unknown resource type in row: {value}").into())
}
