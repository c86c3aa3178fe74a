//! Business logic layer.

mod item_service;
mod member_service;

pub use item_service::{ItemManager, ItemService};
pub use member_service::{MemberManager, MemberService};
