//! Common utilities shared across shop crates.
//!
//! This crate provides:
//! - Unified error handling
//! - Configuration structures
//! - Page request and page response types

pub mod config;
pub mod error;
pub mod pagination;

pub use config::*;
pub use error::{AppError, AppResult, OptionExt};
pub use pagination::{Page, PageRequest};
