//! Infrastructure layer - database connection, migrations and transactions.

mod db;
pub mod migrations;
pub mod unit_of_work;

pub use db::{Database, MigrationStatus};
pub use migrations::Migrator;
pub use unit_of_work::{Persistence, TransactionContext, UnitOfWork};
