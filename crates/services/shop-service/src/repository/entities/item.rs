//! Item database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::{NotSet, Set, Unchanged};

use common::AppResult;
use domain::{DomainError, Item};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "item")]
pub struct Model {
    #[sea_orm(primary_key, column_name = "item_id")]
    pub id: i64,
    #[sea_orm(column_name = "item_nm")]
    pub name: String,
    pub price: i32,
    #[sea_orm(column_type = "Text")]
    pub item_detail: String,
    pub item_sell_status: String,
    pub stock_number: i32,
    pub reg_time: DateTimeUtc,
    pub update_time: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    /// Build an active model carrying every field of `item`.
    ///
    /// A persisted item keeps its id as the update key; a new one leaves the
    /// id to the database.
    pub fn from_item(item: &Item) -> Self {
        Self {
            id: match item.id {
                Some(id) => Unchanged(id),
                None => NotSet,
            },
            name: Set(item.name.clone()),
            price: Set(item.price),
            item_detail: Set(item.detail.clone()),
            item_sell_status: Set(item.sell_status.as_str().to_string()),
            stock_number: Set(item.stock_number),
            reg_time: Set(item.reg_time),
            update_time: Set(item.update_time),
        }
    }
}

/// Convert database model to domain entity
impl TryFrom<Model> for Item {
    type Error = DomainError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let sell_status = model.item_sell_status.parse().map_err(|_| {
            DomainError::internal(format!(
                "item {} has unknown sell status '{}'",
                model.id, model.item_sell_status
            ))
        })?;

        Ok(Item {
            id: Some(model.id),
            name: model.name,
            price: model.price,
            detail: model.item_detail,
            sell_status,
            stock_number: model.stock_number,
            reg_time: model.reg_time,
            update_time: model.update_time,
        })
    }
}

/// Convert a batch of rows, failing on the first corrupt one
pub(crate) fn into_items(models: Vec<Model>) -> AppResult<Vec<Item>> {
    models
        .into_iter()
        .map(|model| Item::try_from(model).map_err(Into::into))
        .collect()
}
