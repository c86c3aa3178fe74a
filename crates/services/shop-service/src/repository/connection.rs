//! Connections a store can run statements against.

use sea_orm::{ConnectionTrait, DatabaseConnection, DatabaseTransaction};

/// A pooled connection or a borrowed open transaction.
///
/// Stores are generic over this so the same query code serves both the
/// autocommit path and the unit of work.
pub trait StoreConnection: Send + Sync {
    type Conn: ConnectionTrait + Send + Sync;

    fn conn(&self) -> &Self::Conn;
}

impl StoreConnection for DatabaseConnection {
    type Conn = DatabaseConnection;

    fn conn(&self) -> &DatabaseConnection {
        self
    }
}

impl<'a> StoreConnection for &'a DatabaseTransaction {
    type Conn = DatabaseTransaction;

    fn conn(&self) -> &DatabaseTransaction {
        self
    }
}
