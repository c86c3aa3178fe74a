//! Domain-level constants.
//!
//! These constants define business rules and stored enumeration values.

// =============================================================================
// Item Sell Status
// =============================================================================

/// Stored value for an item that is on sale
pub const SELL_STATUS_SELL: &str = "SELL";

/// Stored value for an item that is sold out
pub const SELL_STATUS_SOLD_OUT: &str = "SOLD_OUT";

// =============================================================================
// Member Roles
// =============================================================================

/// Default role assigned to new members
pub const ROLE_USER: &str = "USER";

/// Administrator role with elevated privileges
pub const ROLE_ADMIN: &str = "ADMIN";

// =============================================================================
// Pagination
// =============================================================================

/// Default number of elements per page
pub const DEFAULT_PAGE_SIZE: u64 = 20;

/// Maximum allowed elements per page to prevent excessive queries
pub const MAX_PAGE_SIZE: u64 = 100;
