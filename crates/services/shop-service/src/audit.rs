//! Auditing hooks for persisted records.
//!
//! Repositories call [`Auditor::on_create`] before inserting and
//! [`Auditor::on_update`] before updating an auditable record. The auditor
//! stamps the current time and asks its [`IdentityProvider`] who is acting.

use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use common::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

tokio::task_local! {
    static CURRENT_PRINCIPAL: String;
}

/// Source of the authenticated username for the current operation.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait IdentityProvider: Send + Sync {
    /// Username of the acting principal, `None` when unauthenticated
    fn current_user(&self) -> Option<String>;
}

/// No authenticated principal, ever.
#[derive(Debug, Clone, Copy, Default)]
pub struct Anonymous;

impl IdentityProvider for Anonymous {
    fn current_user(&self) -> Option<String> {
        None
    }
}

/// A fixed principal, e.g. a system account or a CLI operator.
#[derive(Debug, Clone)]
pub struct StaticIdentity {
    username: String,
}

impl StaticIdentity {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }
}

impl IdentityProvider for StaticIdentity {
    fn current_user(&self) -> Option<String> {
        Some(self.username.clone())
    }
}

/// Principal bound to the running task with [`with_principal`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskIdentity;

impl IdentityProvider for TaskIdentity {
    fn current_user(&self) -> Option<String> {
        CURRENT_PRINCIPAL.try_with(|name| name.clone()).ok()
    }
}

/// Run `fut` with `username` as the authenticated principal seen by [`TaskIdentity`].
pub async fn with_principal<F: Future>(username: impl Into<String>, fut: F) -> F::Output {
    CURRENT_PRINCIPAL.scope(username.into(), fut).await
}

/// What to do when a record is written without an authenticated principal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuditPolicy {
    /// Leave created-by / modified-by untouched
    #[default]
    Lenient,
    /// Refuse the write with `AppError::Unauthorized`
    RequirePrincipal,
}

/// A record carrying audit columns.
pub trait Auditable {
    /// Stamp a record that is about to be inserted
    fn stamp_created(&mut self, at: DateTime<Utc>, by: Option<String>);

    /// Stamp a record that is about to be updated
    fn stamp_modified(&mut self, at: DateTime<Utc>, by: Option<String>);
}

/// Stamps audit columns on behalf of the repositories.
#[derive(Clone)]
pub struct Auditor {
    identity: Arc<dyn IdentityProvider>,
    policy: AuditPolicy,
}

impl Auditor {
    pub fn new(identity: Arc<dyn IdentityProvider>, policy: AuditPolicy) -> Self {
        Self { identity, policy }
    }

    /// Auditor that never knows a principal and never refuses a write
    pub fn anonymous() -> Self {
        Self::new(Arc::new(Anonymous), AuditPolicy::Lenient)
    }

    /// Resolve the acting principal according to the policy.
    fn principal(&self) -> AppResult<Option<String>> {
        let user = self
            .identity
            .current_user()
            .filter(|name| !name.trim().is_empty());

        match (user, self.policy) {
            (Some(name), _) => Ok(Some(name)),
            (None, AuditPolicy::Lenient) => Ok(None),
            (None, AuditPolicy::RequirePrincipal) => {
                tracing::warn!("Rejected write without an authenticated principal");
                Err(AppError::Unauthorized)
            }
        }
    }

    /// Stamp registration time, update time, created-by and modified-by.
    pub fn on_create<A: Auditable>(&self, record: &mut A) -> AppResult<()> {
        let principal = self.principal()?;
        tracing::debug!(principal = ?principal, "Stamping created record");
        record.stamp_created(Utc::now(), principal);
        Ok(())
    }

    /// Stamp update time and modified-by. Creation stamps stay as they are.
    pub fn on_update<A: Auditable>(&self, record: &mut A) -> AppResult<()> {
        let principal = self.principal()?;
        tracing::debug!(principal = ?principal, "Stamping modified record");
        record.stamp_modified(Utc::now(), principal);
        Ok(())
    }
}

impl std::fmt::Debug for Auditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Auditor")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
