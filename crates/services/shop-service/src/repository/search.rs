//! Dynamic item search.
//!
//! An [`ItemSearch`] is an ordered list of predicate clauses combined with
//! AND, plus an ordering. Callers assemble it at runtime from whichever
//! inputs are present; the repository translates it into a SeaORM
//! [`Condition`].

use sea_orm::sea_query::{Expr, LikeExpr, SimpleExpr};
use sea_orm::{ColumnTrait, Condition, EntityTrait, Order, QueryFilter, QueryOrder, Select};

use domain::ItemSellStatus;

use super::entities::item::{self, Entity as ItemEntity};

/// Escape character used in every LIKE pattern built here.
///
/// `!` needs no quoting in any SQL dialect, unlike a backslash.
pub(crate) const LIKE_ESCAPE: char = '!';

/// LIKE pattern matching any text that contains `needle` literally.
pub(crate) fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// `column LIKE '%needle%'` with wildcards in `needle` matched literally.
pub(crate) fn contains(column: item::Column, needle: &str) -> SimpleExpr {
    Expr::col(column).like(LikeExpr::new(contains_pattern(needle)).escape(LIKE_ESCAPE))
}

/// A single filter clause over item columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemPredicate {
    NameEquals(String),
    DetailContains(String),
    PriceGreaterThan(i32),
    PriceLessThan(i32),
    SellStatusIs(ItemSellStatus),
}

impl ItemPredicate {
    fn to_expr(&self) -> SimpleExpr {
        match self {
            ItemPredicate::NameEquals(name) => item::Column::Name.eq(name.as_str()),
            ItemPredicate::DetailContains(needle) => contains(item::Column::ItemDetail, needle),
            ItemPredicate::PriceGreaterThan(price) => item::Column::Price.gt(*price),
            ItemPredicate::PriceLessThan(price) => item::Column::Price.lt(*price),
            ItemPredicate::SellStatusIs(status) => item::Column::ItemSellStatus.eq(status.as_str()),
        }
    }
}

/// Result ordering for a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemOrder {
    PriceAsc,
    PriceDesc,
    IdAsc,
}

impl ItemOrder {
    fn column_and_order(&self) -> (item::Column, Order) {
        match self {
            ItemOrder::PriceAsc => (item::Column::Price, Order::Asc),
            ItemOrder::PriceDesc => (item::Column::Price, Order::Desc),
            ItemOrder::IdAsc => (item::Column::Id, Order::Asc),
        }
    }
}

/// Loosely-typed search input as the command line collects it.
#[derive(Debug, Clone, Default)]
pub struct ItemSearchFilter {
    pub detail: Option<String>,
    pub min_price: Option<i32>,
    pub sell_status: Option<String>,
}

/// Conjunction of item predicates plus an ordering.
///
/// An empty search matches every item. Without an explicit order the result
/// order is whatever the database returns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemSearch {
    predicates: Vec<ItemPredicate>,
    orders: Vec<ItemOrder>,
}

impl ItemSearch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a search from filter input.
    ///
    /// Blank detail text adds no clause. A status string that does not name
    /// a known status adds no clause either.
    pub fn from_filter(filter: &ItemSearchFilter) -> Self {
        let detail = filter
            .detail
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(|d| ItemPredicate::DetailContains(d.to_string()));
        let status = filter
            .sell_status
            .as_deref()
            .and_then(|s| s.trim().parse::<ItemSellStatus>().ok())
            .map(ItemPredicate::SellStatusIs);

        Self::new()
            .and_if_some(detail)
            .and_if_some(filter.min_price.map(ItemPredicate::PriceGreaterThan))
            .and_if_some(status)
    }

    /// Append a clause
    pub fn and(mut self, predicate: ItemPredicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    /// Append a clause when one is given
    pub fn and_if_some(self, predicate: Option<ItemPredicate>) -> Self {
        match predicate {
            Some(predicate) => self.and(predicate),
            None => self,
        }
    }

    pub fn name_eq(self, name: impl Into<String>) -> Self {
        self.and(ItemPredicate::NameEquals(name.into()))
    }

    pub fn detail_contains(self, needle: impl Into<String>) -> Self {
        self.and(ItemPredicate::DetailContains(needle.into()))
    }

    pub fn price_gt(self, price: i32) -> Self {
        self.and(ItemPredicate::PriceGreaterThan(price))
    }

    pub fn price_lt(self, price: i32) -> Self {
        self.and(ItemPredicate::PriceLessThan(price))
    }

    pub fn sell_status(self, status: ItemSellStatus) -> Self {
        self.and(ItemPredicate::SellStatusIs(status))
    }

    /// Append an ordering; earlier orderings take precedence
    pub fn order_by(mut self, order: ItemOrder) -> Self {
        self.orders.push(order);
        self
    }

    pub fn predicates(&self) -> &[ItemPredicate] {
        &self.predicates
    }

    pub fn orders(&self) -> &[ItemOrder] {
        &self.orders
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Translate the clauses into a single AND condition
    pub fn to_condition(&self) -> Condition {
        self.predicates
            .iter()
            .fold(Condition::all(), |condition, predicate| {
                condition.add(predicate.to_expr())
            })
    }

    /// Filtered and ordered select over the item table
    pub fn to_select(&self) -> Select<ItemEntity> {
        self.orders.iter().fold(
            ItemEntity::find().filter(self.to_condition()),
            |select, order| {
                let (column, order) = order.column_and_order();
                select.order_by(column, order)
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbBackend, QueryTrait};

    #[test]
    fn test_contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("Test Item"), "%Test Item%");
        assert_eq!(contains_pattern("50%_off!"), "%50!%!_off!!%");
        assert_eq!(contains_pattern(""), "%%");
    }

    #[test]
    fn test_builder_keeps_clause_order() {
        let search = ItemSearch::new()
            .detail_contains("Test Item Detail")
            .price_gt(10003)
            .sell_status(ItemSellStatus::Sell);

        assert_eq!(
            search.predicates(),
            &[
                ItemPredicate::DetailContains("Test Item Detail".to_string()),
                ItemPredicate::PriceGreaterThan(10003),
                ItemPredicate::SellStatusIs(ItemSellStatus::Sell),
            ]
        );
    }

    #[test]
    fn test_from_filter_skips_absent_and_unknown_inputs() {
        let filter = ItemSearchFilter {
            detail: Some("   ".to_string()),
            min_price: None,
            sell_status: Some("ON_HOLD".to_string()),
        };
        assert!(ItemSearch::from_filter(&filter).is_empty());

        let filter = ItemSearchFilter {
            detail: Some("Test Item Detail".to_string()),
            min_price: Some(10003),
            sell_status: Some("SELL".to_string()),
        };
        assert_eq!(
            ItemSearch::from_filter(&filter),
            ItemSearch::new()
                .detail_contains("Test Item Detail")
                .price_gt(10003)
                .sell_status(ItemSellStatus::Sell)
        );
    }

    #[test]
    fn test_select_renders_conjunction_and_order() {
        let sql = ItemSearch::new()
            .detail_contains("Detail")
            .price_gt(10003)
            .sell_status(ItemSellStatus::Sell)
            .order_by(ItemOrder::PriceDesc)
            .to_select()
            .build(DbBackend::Postgres)
            .to_string();

        assert!(sql.contains("LIKE '%Detail%'"), "{}", sql);
        assert!(sql.contains("ESCAPE"), "{}", sql);
        assert!(sql.contains(r#""price" > 10003"#), "{}", sql);
        assert!(sql.contains("'SELL'"), "{}", sql);
        assert!(sql.contains("ORDER BY"), "{}", sql);
        assert!(sql.ends_with("DESC"), "{}", sql);
    }
}
