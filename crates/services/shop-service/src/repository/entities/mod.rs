//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod item;
pub mod member;

// Re-exports for public API convenience
#[allow(unused_imports)]
pub use item::{ActiveModel as ItemActiveModel, Entity as ItemEntity, Model as ItemModel};
#[allow(unused_imports)]
pub use member::{ActiveModel as MemberActiveModel, Entity as MemberEntity, Model as MemberModel};
