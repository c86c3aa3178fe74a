//! Repository layer for data access.

mod connection;
pub mod entities;
mod item_repository;
mod member_repository;
pub mod search;

pub use connection::StoreConnection;
pub use item_repository::{ItemRepository, ItemStore, TxItemRepository};
pub use member_repository::{MemberRepository, MemberStore, TxMemberRepository};
pub use search::{ItemOrder, ItemPredicate, ItemSearch, ItemSearchFilter};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use item_repository::MockItemRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use member_repository::MockMemberRepository;
