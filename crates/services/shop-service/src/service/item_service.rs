//! Item service - Handles item catalogue use cases.

use async_trait::async_trait;
use std::sync::Arc;
use validator::Validate;

use common::{AppError, AppResult, OptionExt, Page, PageRequest};
use domain::{DomainError, Item, NewItem};

use crate::repository::{ItemOrder, ItemRepository, ItemSearch, ItemSearchFilter};

/// Item service trait for dependency injection.
#[async_trait]
pub trait ItemService: Send + Sync {
    /// Validate and persist a new item
    async fn register_item(&self, new_item: NewItem) -> AppResult<Item>;

    /// Get item by ID
    async fn get_item(&self, id: i64) -> AppResult<Item>;

    /// Paginated search over loosely-typed filter input, most expensive first
    async fn search_items(
        &self,
        filter: ItemSearchFilter,
        page: PageRequest,
    ) -> AppResult<Page<Item>>;
}

/// Concrete implementation of ItemService using repository.
pub struct ItemManager {
    repo: Arc<dyn ItemRepository>,
}

impl ItemManager {
    /// Create new item service instance with repository
    pub fn new(repo: Arc<dyn ItemRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl ItemService for ItemManager {
    async fn register_item(&self, new_item: NewItem) -> AppResult<Item> {
        new_item
            .validate()
            .map_err(|e| AppError::from(DomainError::from(e)))?;

        let item = self.repo.save(Item::from(new_item)).await?;
        tracing::info!(item_id = ?item.id, name = %item.name, "Registered item");
        Ok(item)
    }

    async fn get_item(&self, id: i64) -> AppResult<Item> {
        self.repo.find_by_id(id).await?.ok_or_not_found()
    }

    async fn search_items(
        &self,
        filter: ItemSearchFilter,
        page: PageRequest,
    ) -> AppResult<Page<Item>> {
        let search = ItemSearch::from_filter(&filter).order_by(ItemOrder::PriceDesc);
        self.repo.find_all(&search, &page).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{ItemPredicate, MockItemRepository};
    use domain::ItemSellStatus;
    use mockall::predicate::eq;

    fn new_item(price: i32) -> NewItem {
        NewItem {
            name: "Test Item".to_string(),
            price,
            detail: "Test Item Detail".to_string(),
            sell_status: ItemSellStatus::Sell,
            stock_number: 100,
        }
    }

    #[tokio::test]
    async fn test_register_item_saves_valid_item() {
        let mut repo = MockItemRepository::new();
        repo.expect_save()
            .withf(|item| item.id.is_none() && item.price == 10000)
            .times(1)
            .returning(|item| Ok(Item { id: Some(1), ..item }));

        let service = ItemManager::new(Arc::new(repo));
        let item = service.register_item(new_item(10000)).await.unwrap();

        assert_eq!(item.id, Some(1));
        assert_eq!(item.name, "Test Item");
    }

    #[tokio::test]
    async fn test_register_item_rejects_negative_price() {
        let mut repo = MockItemRepository::new();
        repo.expect_save().never();

        let service = ItemManager::new(Arc::new(repo));
        let result = service.register_item(new_item(-1)).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_get_item_not_found() {
        let mut repo = MockItemRepository::new();
        repo.expect_find_by_id()
            .with(eq(42))
            .returning(|_| Ok(None));

        let service = ItemManager::new(Arc::new(repo));
        let result = service.get_item(42).await;

        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_search_items_orders_by_price_desc() {
        let mut repo = MockItemRepository::new();
        repo.expect_find_all()
            .withf(|search, page| {
                search.orders() == [ItemOrder::PriceDesc]
                    && search.predicates()
                        == [
                            ItemPredicate::PriceGreaterThan(10003),
                            ItemPredicate::SellStatusIs(ItemSellStatus::Sell),
                        ]
                    && page.size() == 5
            })
            .times(1)
            .returning(|_, page| Ok(Page::new(Vec::new(), page, 0)));

        let service = ItemManager::new(Arc::new(repo));
        let filter = ItemSearchFilter {
            detail: None,
            min_price: Some(10003),
            sell_status: Some("SELL".to_string()),
        };
        let page = service
            .search_items(filter, PageRequest::of(0, 5))
            .await
            .unwrap();

        assert_eq!(page.total_elements, 0);
        assert!(page.content.is_empty());
    }
}
