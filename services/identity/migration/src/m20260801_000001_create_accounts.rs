use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::ConnectionTrait;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Accounts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Accounts::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Accounts::Email).string().not_null())
                    .col(ColumnDef::new(Accounts::Name).string().not_null())
                    .col(ColumnDef::new(Accounts::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Accounts::Role).small_integer().not_null())
                    .col(ColumnDef::new(Accounts::Status).small_integer().not_null())
                    .col(ColumnDef::new(Accounts::ResourceType).string())
                    .col(ColumnDef::new(Accounts::ResourceId).string())
                    .col(
                        ColumnDef::new(Accounts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Accounts::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // One account per clinical resource. Postgres unique indexes ignore
        // all-null rows, so unlinked administrator accounts are unaffected.
        manager
            .create_index(
                Index::create()
                    .table(Accounts::Table)
                    .col(Accounts::ResourceType)
                    .col(Accounts::ResourceId)
                    .name("idx_accounts_resource_link")
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Uniqueness is case-insensitive while storage stays case-preserving,
        // so the index goes on lower(email), not the raw column.
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX idx_accounts_email_lower ON accounts (LOWER(email))",
            )
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Accounts::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Accounts {
    Table,
    Id,
    Email,
    Name,
    PasswordHash,
    Role,
    Status,
    ResourceType,
    ResourceId,
    CreatedAt,
    UpdatedAt,
}
