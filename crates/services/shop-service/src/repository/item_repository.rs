//! Item repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection,
    DatabaseTransaction, DbBackend, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Statement, Value,
};

use common::{AppError, AppResult, Page, PageRequest};
use domain::Item;

use super::connection::StoreConnection;
use super::entities::item::{self, into_items, ActiveModel, Entity as ItemEntity};
use super::search::{contains, contains_pattern, ItemSearch};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Detail substring search written as plain SQL, PostgreSQL placeholders.
const FIND_BY_DETAIL_SQL_POSTGRES: &str = "SELECT i.item_id, i.item_nm, i.price, i.item_detail, i.item_sell_status, i.stock_number, i.reg_time, i.update_time FROM item i WHERE i.item_detail LIKE $1 ESCAPE '!' ORDER BY i.price DESC";

/// Same statement with `?` placeholders (SQLite, MySQL).
const FIND_BY_DETAIL_SQL_QMARK: &str = "SELECT i.item_id, i.item_nm, i.price, i.item_detail, i.item_sell_status, i.stock_number, i.reg_time, i.update_time FROM item i WHERE i.item_detail LIKE ? ESCAPE '!' ORDER BY i.price DESC";

/// Item repository trait for dependency injection.
///
/// Methods without an ordering in their name return rows in whatever order
/// the database produces.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Insert a new item, or update it when it already carries an id
    async fn save(&self, item: Item) -> AppResult<Item>;

    /// Find item by ID
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Item>>;

    /// Items whose name equals `name`
    async fn find_by_name(&self, name: &str) -> AppResult<Vec<Item>>;

    /// Items whose name equals `name` or whose detail equals `detail`
    async fn find_by_name_or_detail(&self, name: &str, detail: &str) -> AppResult<Vec<Item>>;

    /// Items priced strictly below `price`
    async fn find_by_price_less_than(&self, price: i32) -> AppResult<Vec<Item>>;

    /// Items priced strictly below `price`, most expensive first
    async fn find_by_price_less_than_order_by_price_desc(&self, price: i32)
        -> AppResult<Vec<Item>>;

    /// Items whose detail contains `detail`, most expensive first
    async fn find_by_item_detail(&self, detail: &str) -> AppResult<Vec<Item>>;

    /// Same as `find_by_item_detail`, executed as a native SQL statement
    async fn find_by_item_detail_native(&self, detail: &str) -> AppResult<Vec<Item>>;

    /// One page of the items matching `search`
    async fn find_all(&self, search: &ItemSearch, page: &PageRequest) -> AppResult<Page<Item>>;

    /// Every item matching `search`
    async fn search(&self, search: &ItemSearch) -> AppResult<Vec<Item>>;

    /// Total number of items
    async fn count(&self) -> AppResult<u64>;
}

/// SeaORM-backed item repository.
///
/// `ItemStore` runs on the connection pool; [`TxItemRepository`] runs inside
/// an open transaction.
pub struct ItemStore<C = DatabaseConnection> {
    db: C,
}

/// Item repository bound to an open transaction.
pub type TxItemRepository<'a> = ItemStore<&'a DatabaseTransaction>;

impl ItemStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl<'a> ItemStore<&'a DatabaseTransaction> {
    /// Create a repository that joins `txn`
    pub fn in_transaction(txn: &'a DatabaseTransaction) -> Self {
        Self { db: txn }
    }
}

fn native_detail_statement(backend: DbBackend, detail: &str) -> Statement {
    let sql = match backend {
        DbBackend::Postgres => FIND_BY_DETAIL_SQL_POSTGRES,
        _ => FIND_BY_DETAIL_SQL_QMARK,
    };
    Statement::from_sql_and_values(backend, sql, [Value::from(contains_pattern(detail))])
}

#[async_trait]
impl<C> ItemRepository for ItemStore<C>
where
    C: StoreConnection,
{
    async fn save(&self, item: Item) -> AppResult<Item> {
        let db = self.db.conn();
        let active = ActiveModel::from_item(&item);

        let model = match item.id {
            None => active.insert(db).await?,
            Some(id) => active.update(db).await.map_err(|e| match e {
                DbErr::RecordNotUpdated => {
                    tracing::debug!(item_id = id, "Update matched no item");
                    AppError::NotFound
                }
                other => AppError::from(other),
            })?,
        };

        tracing::debug!(item_id = model.id, "Saved item");
        Ok(Item::try_from(model)?)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Item>> {
        let result = ItemEntity::find_by_id(id)
            .one(self.db.conn())
            .await
            .map_err(AppError::from)?;

        result.map(Item::try_from).transpose().map_err(AppError::from)
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Vec<Item>> {
        let models = ItemEntity::find()
            .filter(item::Column::Name.eq(name))
            .all(self.db.conn())
            .await?;

        into_items(models)
    }

    async fn find_by_name_or_detail(&self, name: &str, detail: &str) -> AppResult<Vec<Item>> {
        let models = ItemEntity::find()
            .filter(
                Condition::any()
                    .add(item::Column::Name.eq(name))
                    .add(item::Column::ItemDetail.eq(detail)),
            )
            .all(self.db.conn())
            .await?;

        into_items(models)
    }

    async fn find_by_price_less_than(&self, price: i32) -> AppResult<Vec<Item>> {
        let models = ItemEntity::find()
            .filter(item::Column::Price.lt(price))
            .all(self.db.conn())
            .await?;

        into_items(models)
    }

    async fn find_by_price_less_than_order_by_price_desc(
        &self,
        price: i32,
    ) -> AppResult<Vec<Item>> {
        let models = ItemEntity::find()
            .filter(item::Column::Price.lt(price))
            .order_by_desc(item::Column::Price)
            .all(self.db.conn())
            .await?;

        into_items(models)
    }

    async fn find_by_item_detail(&self, detail: &str) -> AppResult<Vec<Item>> {
        let models = ItemEntity::find()
            .filter(contains(item::Column::ItemDetail, detail))
            .order_by_desc(item::Column::Price)
            .all(self.db.conn())
            .await?;

        into_items(models)
    }

    async fn find_by_item_detail_native(&self, detail: &str) -> AppResult<Vec<Item>> {
        let db = self.db.conn();
        let statement = native_detail_statement(db.get_database_backend(), detail);

        let models = ItemEntity::find()
            .from_raw_sql(statement)
            .all(db)
            .await?;

        into_items(models)
    }

    async fn find_all(&self, search: &ItemSearch, page: &PageRequest) -> AppResult<Page<Item>> {
        let db = self.db.conn();
        let total = search.to_select().count(db).await?;

        // Pages past the end, including offsets beyond u64, are empty
        let offset = match page.offset().filter(|offset| *offset < total) {
            Some(offset) => offset,
            None => {
                tracing::debug!(total, page = page.page(), "Requested page is past the end");
                return Ok(Page::new(Vec::new(), page, total));
            }
        };

        let models = search
            .to_select()
            .offset(offset)
            .limit(page.size())
            .all(db)
            .await?;

        tracing::debug!(
            total,
            page = page.page(),
            returned = models.len(),
            "Fetched item page"
        );

        Ok(Page::new(into_items(models)?, page, total))
    }

    async fn search(&self, search: &ItemSearch) -> AppResult<Vec<Item>> {
        let models = search.to_select().all(self.db.conn()).await?;
        into_items(models)
    }

    async fn count(&self) -> AppResult<u64> {
        ItemEntity::find()
            .count(self.db.conn())
            .await
            .map_err(Into::into)
    }
}
