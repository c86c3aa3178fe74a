//! Migration: Create the item table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Item::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Item::ItemId)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Item::ItemNm).string_len(50).not_null())
                    .col(ColumnDef::new(Item::Price).integer().not_null())
                    .col(ColumnDef::new(Item::ItemDetail).text().not_null())
                    .col(ColumnDef::new(Item::ItemSellStatus).string_len(16).not_null())
                    .col(ColumnDef::new(Item::StockNumber).integer().not_null())
                    .col(
                        ColumnDef::new(Item::RegTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Item::UpdateTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Price range lookups and price ordering
        manager
            .create_index(
                Index::create()
                    .name("idx_item_price")
                    .table(Item::Table)
                    .col(Item::Price)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Dropping the table drops idx_item_price with it
        manager
            .drop_table(Table::drop().table(Item::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Item {
    Table,
    ItemId,
    ItemNm,
    Price,
    ItemDetail,
    ItemSellStatus,
    StockNumber,
    RegTime,
    UpdateTime,
}
