//! Migration: Create the member table with audit columns.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Member::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Member::MemberId)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Member::Name).string().null())
                    .col(ColumnDef::new(Member::Email).string().null().unique_key())
                    .col(ColumnDef::new(Member::Address).string().null())
                    .col(ColumnDef::new(Member::Role).string_len(16).not_null())
                    .col(
                        ColumnDef::new(Member::RegTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Member::UpdateTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Member::CreatedBy).string().null())
                    .col(ColumnDef::new(Member::ModifiedBy).string().null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Member::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Member {
    Table,
    MemberId,
    Name,
    Email,
    Address,
    Role,
    RegTime,
    UpdateTime,
    CreatedBy,
    ModifiedBy,
}
