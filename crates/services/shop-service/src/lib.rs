//! Shop Service Library
//!
//! Persistence and query layer for a small e-commerce catalogue: members
//! with audited writes, items with derived, native and dynamic queries.
//! The binary wraps it in a command line for migrations, seeding and search.

pub mod audit;
pub mod config;
pub mod infra;
pub mod repository;
pub mod seed;
pub mod service;

use std::sync::Arc;

use tracing::info;

use common::{AppResult, PageRequest};

use crate::audit::{Auditor, IdentityProvider, StaticIdentity, TaskIdentity};
use crate::config::ShopServiceConfig;
use crate::infra::{Database, Persistence, UnitOfWork};
use crate::repository::{ItemRepository, ItemSearchFilter};
use crate::service::{ItemManager, ItemService};

/// Build the auditor described by `config`.
///
/// A configured audit user is recorded on every write; otherwise the
/// principal bound to the running task (if any) is.
pub fn build_auditor(config: &ShopServiceConfig) -> Arc<Auditor> {
    let identity: Arc<dyn IdentityProvider> = match &config.audit_user {
        Some(user) => Arc::new(StaticIdentity::new(user.clone())),
        None => Arc::new(TaskIdentity),
    };
    Arc::new(Auditor::new(identity, config.audit_policy))
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(action: MigrateAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = ShopServiceConfig::from_env();
    let db = Database::connect_without_migrations(&config.database).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            for status in db.migration_status().await? {
                let marker = if status.applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, status.name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

/// Migration action type.
#[derive(Debug, Clone, Copy)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}

/// Insert sample items in a single transaction.
pub async fn run_seed(count: u16, sold_out: u16) -> Result<(), Box<dyn std::error::Error>> {
    let config = ShopServiceConfig::from_env();
    let db = Database::connect(&config.database).await?;
    let uow = Persistence::new(db.get_connection(), build_auditor(&config));

    let saved = seed_items(&uow, seed::mixed_sample_items(count, sold_out)).await?;
    info!(saved, "Seeded sample items");

    Ok(())
}

/// Save `items` atomically, returning how many were written.
pub async fn seed_items<U: UnitOfWork>(uow: &U, items: Vec<domain::Item>) -> AppResult<usize> {
    with_transaction!(uow, |ctx| {
        let repo = ctx.items();
        let mut saved = 0;
        for item in items {
            repo.save(item).await?;
            saved += 1;
        }
        Ok(saved)
    })
}

/// Run a paginated item search and print the page as JSON.
pub async fn run_search(
    filter: ItemSearchFilter,
    page: PageRequest,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = ShopServiceConfig::from_env();
    let db = Database::connect(&config.database).await?;
    let uow = Persistence::new(db.get_connection(), build_auditor(&config));

    let service = ItemManager::new(uow.items());
    let result = service.search_items(filter, page).await?;
    info!(
        total = result.total_elements,
        returned = result.number_of_elements(),
        "Search finished"
    );

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
