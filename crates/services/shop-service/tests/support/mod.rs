//! Shared fixtures for integration tests.
//!
//! Every test gets its own in-memory SQLite database with the schema
//! migrated, and runs its scenario inside a rollback scope.

#![allow(dead_code)]

use std::sync::Arc;

use common::{AppResult, DatabaseConfig};
use domain::Item;

use shop_service::audit::{AuditPolicy, Auditor, IdentityProvider, StaticIdentity};
use shop_service::infra::{Database, Persistence};
use shop_service::repository::ItemRepository;

/// Username of the mocked authenticated principal.
pub const TEST_USER: &str = "ikari";

/// Fresh in-memory database with migrations applied.
pub async fn setup_database() -> Database {
    Database::connect(&DatabaseConfig::in_memory())
        .await
        .expect("in-memory database should start")
}

/// Auditor that always sees [`TEST_USER`].
pub fn test_auditor() -> Arc<Auditor> {
    let identity: Arc<dyn IdentityProvider> = Arc::new(StaticIdentity::new(TEST_USER));
    Arc::new(Auditor::new(identity, AuditPolicy::Lenient))
}

/// Unit of work over a fresh database, auditing as [`TEST_USER`].
pub async fn setup_persistence() -> Persistence {
    setup_persistence_with(test_auditor()).await
}

/// Unit of work over a fresh database with a custom auditor.
pub async fn setup_persistence_with(auditor: Arc<Auditor>) -> Persistence {
    let db = setup_database().await;
    Persistence::new(db.get_connection(), auditor)
}

/// Save every item in order, returning the persisted copies.
pub async fn save_all<R>(repo: &R, items: Vec<Item>) -> AppResult<Vec<Item>>
where
    R: ItemRepository + ?Sized,
{
    let mut saved = Vec::with_capacity(items.len());
    for item in items {
        saved.push(repo.save(item).await?);
    }
    Ok(saved)
}

pub fn prices(items: &[Item]) -> Vec<i32> {
    items.iter().map(|item| item.price).collect()
}

pub fn sorted_ids(items: &[Item]) -> Vec<i64> {
    let mut ids: Vec<i64> = items.iter().filter_map(|item| item.id).collect();
    ids.sort_unstable();
    ids
}
