//! Unit of Work pattern implementation.
//!
//! Centralizes repository access and transaction lifecycle:
//! - `transaction` commits on success and rolls back on error
//! - `rollback_scope` always rolls back, so nothing done inside it outlives
//!   the scope (integration tests run in one of these)

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{
    AccessMode, ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbBackend,
    IsolationLevel, TransactionTrait,
};

use common::{AppError, AppResult};

use crate::audit::Auditor;
use crate::repository::{
    ItemRepository, ItemStore, MemberRepository, MemberStore, TxItemRepository,
    TxMemberRepository,
};

/// Boxed future returned by a transactional closure.
pub type TxFuture<'a, T> = Pin<Box<dyn Future<Output = AppResult<T>> + Send + 'a>>;

/// Box a transactional body. The bound pins the body's error type to
/// `AppError`, so `?` works inside `async` blocks passed here.
pub fn tx_body<'a, T, Fut>(fut: Fut) -> TxFuture<'a, T>
where
    Fut: Future<Output = AppResult<T>> + Send + 'a,
{
    Box::pin(fut)
}

/// Unit of Work trait for dependency injection.
///
/// Note: This trait is not object-safe due to generic methods.
/// For testing, mock the repositories instead.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Get item repository
    fn items(&self) -> Arc<dyn ItemRepository>;

    /// Get member repository
    fn members(&self) -> Arc<dyn MemberRepository>;

    /// Execute a closure within a transaction.
    ///
    /// The transaction is committed on success or rolled back on error.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send;

    /// Execute a closure within a transaction that is rolled back regardless
    /// of the outcome. Writes are visible inside the closure only.
    async fn rollback_scope<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send;
}

/// Transaction context providing repository access within a transaction.
///
/// All repository operations performed through this context are part
/// of the same database transaction.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
    auditor: Arc<Auditor>,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction, auditor: Arc<Auditor>) -> Self {
        Self { txn, auditor }
    }

    /// Get item repository for this transaction
    pub fn items(&self) -> TxItemRepository<'a> {
        ItemStore::in_transaction(self.txn)
    }

    /// Get member repository for this transaction
    pub fn members(&self) -> TxMemberRepository<'a> {
        MemberStore::in_transaction(self.txn, self.auditor.clone())
    }
}

/// How a transaction ends once its closure returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Completion {
    CommitOnSuccess,
    AlwaysRollback,
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    auditor: Arc<Auditor>,
    item_repo: Arc<ItemStore>,
    member_repo: Arc<MemberStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection, auditor: Arc<Auditor>) -> Self {
        let item_repo = Arc::new(ItemStore::new(db.clone()));
        let member_repo = Arc::new(MemberStore::new(db.clone(), auditor.clone()));
        Self {
            db,
            auditor,
            item_repo,
            member_repo,
        }
    }

    /// Begin a transaction; SQLite takes neither isolation level nor access mode.
    async fn begin(&self) -> AppResult<DatabaseTransaction> {
        let txn = match self.db.get_database_backend() {
            DbBackend::Sqlite => self.db.begin().await?,
            _ => {
                self.db
                    .begin_with_config(
                        Some(IsolationLevel::ReadCommitted),
                        Some(AccessMode::ReadWrite),
                    )
                    .await?
            }
        };
        Ok(txn)
    }

    async fn execute_transaction<F, T>(&self, completion: Completion, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send,
    {
        let txn = self.begin().await?;

        let outcome = {
            let ctx = TransactionContext::new(&txn, self.auditor.clone());
            f(ctx).await
        };

        match (outcome, completion) {
            (Ok(result), Completion::CommitOnSuccess) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            (outcome, _) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                outcome
            }
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn items(&self) -> Arc<dyn ItemRepository> {
        self.item_repo.clone()
    }

    fn members(&self) -> Arc<dyn MemberRepository> {
        self.member_repo.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send,
    {
        self.execute_transaction(Completion::CommitOnSuccess, f)
            .await
    }

    async fn rollback_scope<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send,
    {
        self.execute_transaction(Completion::AlwaysRollback, f)
            .await
    }
}

/// Run a block inside a committing transaction.
///
/// ```ignore
/// let item = with_transaction!(uow, |ctx| ctx.items().save(item).await)?;
/// ```
#[macro_export]
macro_rules! with_transaction {
    ($uow:expr, |$ctx:ident| $body:expr) => {
        $uow
            .transaction(|$ctx| $crate::infra::unit_of_work::tx_body(async move { $body }))
            .await
    };
}

/// Run a block inside a transaction that is always rolled back.
#[macro_export]
macro_rules! with_rollback {
    ($uow:expr, |$ctx:ident| $body:expr) => {
        $uow
            .rollback_scope(|$ctx| $crate::infra::unit_of_work::tx_body(async move { $body }))
            .await
    };
}
