//! Domain layer - Core shop entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! Persistence mappings live in the service crate.

pub mod constants;
pub mod error;
pub mod item;
pub mod member;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use item::{Item, ItemSellStatus, NewItem};
pub use member::{Member, MemberRole, NewMember};
