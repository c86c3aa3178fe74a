//! Item domain entity and related types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::constants::{SELL_STATUS_SELL, SELL_STATUS_SOLD_OUT};
use crate::error::DomainError;

/// Item sell status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemSellStatus {
    Sell,
    SoldOut,
}

impl ItemSellStatus {
    /// Stored representation of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemSellStatus::Sell => SELL_STATUS_SELL,
            ItemSellStatus::SoldOut => SELL_STATUS_SOLD_OUT,
        }
    }
}

impl FromStr for ItemSellStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            SELL_STATUS_SELL => Ok(ItemSellStatus::Sell),
            SELL_STATUS_SOLD_OUT => Ok(ItemSellStatus::SoldOut),
            other => Err(DomainError::validation(format!(
                "unknown item sell status '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for ItemSellStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Item domain entity
///
/// `id` is `None` until the item has been persisted once; after that it
/// never changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: Option<i64>,
    pub name: String,
    pub price: i32,
    pub detail: String,
    pub sell_status: ItemSellStatus,
    pub stock_number: i32,
    pub reg_time: DateTime<Utc>,
    pub update_time: DateTime<Utc>,
}

impl Item {
    /// Create a new, not yet persisted item stamped with the current time
    pub fn new(
        name: impl Into<String>,
        price: i32,
        detail: impl Into<String>,
        sell_status: ItemSellStatus,
        stock_number: i32,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            name: name.into(),
            price,
            detail: detail.into(),
            sell_status,
            stock_number,
            reg_time: now,
            update_time: now,
        }
    }

    /// Check if the item has been assigned an id by the database
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Check if any stock is left
    pub fn is_in_stock(&self) -> bool {
        self.stock_number > 0
    }
}

/// Item creation data transfer object
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewItem {
    /// Item display name
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    /// Unit price, never negative
    #[validate(range(min = 0))]
    pub price: i32,
    /// Free-text description
    pub detail: String,
    /// Initial sell status
    pub sell_status: ItemSellStatus,
    /// Units in stock, never negative
    #[validate(range(min = 0))]
    pub stock_number: i32,
}

impl From<NewItem> for Item {
    fn from(new: NewItem) -> Self {
        Item::new(
            new.name,
            new.price,
            new.detail,
            new.sell_status,
            new.stock_number,
        )
    }
}
