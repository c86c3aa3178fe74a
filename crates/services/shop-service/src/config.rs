//! Shop service configuration.

use std::env;

use common::DatabaseConfig;

use crate::audit::AuditPolicy;

/// Shop service configuration.
#[derive(Debug, Clone)]
pub struct ShopServiceConfig {
    /// Database connection settings
    pub database: DatabaseConfig,
    /// Whether writes without an authenticated principal are refused
    pub audit_policy: AuditPolicy,
    /// Principal recorded in audit columns for CLI-driven writes
    pub audit_user: Option<String>,
}

impl ShopServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = DatabaseConfig::default();

        let mut database = DatabaseConfig {
            url: env::var("SHOP_SERVICE_DATABASE_URL")
                .or_else(|_| env::var("DATABASE_URL"))
                .unwrap_or(defaults.url),
            max_connections: parse_var("SHOP_DB_MAX_CONNECTIONS")
                .unwrap_or(defaults.max_connections),
            min_connections: parse_var("SHOP_DB_MIN_CONNECTIONS")
                .unwrap_or(defaults.min_connections),
            sql_logging: parse_var("SHOP_DB_SQL_LOGGING").unwrap_or(defaults.sql_logging),
        };
        if database.url.contains(":memory:") {
            // Each pooled connection would open its own empty database
            database.max_connections = 1;
            database.min_connections = 1;
        }

        let audit_policy = match parse_var::<bool>("SHOP_AUDIT_REQUIRE_PRINCIPAL") {
            Some(true) => AuditPolicy::RequirePrincipal,
            _ => AuditPolicy::Lenient,
        };

        Self {
            database,
            audit_policy,
            audit_user: env::var("SHOP_AUDIT_USER")
                .ok()
                .filter(|user| !user.trim().is_empty()),
        }
    }
}

fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}
