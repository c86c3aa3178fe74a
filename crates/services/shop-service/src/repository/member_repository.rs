//! Member repository implementation with auditing.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    QueryFilter, SqlErr,
};

use common::{AppError, AppResult};
use domain::Member;

use super::connection::StoreConnection;
use super::entities::member::{self, ActiveModel, Entity as MemberEntity};
use crate::audit::Auditor;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Member repository trait for dependency injection.
///
/// Audit columns on the saved member are always filled in by the
/// repository; whatever the caller put there is ignored. Saving an email
/// another member already has fails with `AppError::Conflict`.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Insert a new member, or update it when it already carries an id
    async fn save(&self, member: Member) -> AppResult<Member>;

    /// Find member by ID
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Member>>;

    /// Find member by email address
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Member>>;
}

/// SeaORM-backed member repository stamping audit columns through an [`Auditor`].
pub struct MemberStore<C = DatabaseConnection> {
    db: C,
    auditor: Arc<Auditor>,
}

/// Member repository bound to an open transaction.
pub type TxMemberRepository<'a> = MemberStore<&'a DatabaseTransaction>;

impl MemberStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection, auditor: Arc<Auditor>) -> Self {
        Self { db, auditor }
    }
}

impl<'a> MemberStore<&'a DatabaseTransaction> {
    /// Create a repository that joins `txn`
    pub fn in_transaction(txn: &'a DatabaseTransaction, auditor: Arc<Auditor>) -> Self {
        Self { db: txn, auditor }
    }
}

/// The email column is the only unique key besides the id, so a unique
/// violation on write means the email is taken.
fn write_error(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            tracing::debug!(%detail, "Member email already taken");
            AppError::conflict("Email")
        }
        _ => AppError::from(err),
    }
}

#[async_trait]
impl<C> MemberRepository for MemberStore<C>
where
    C: StoreConnection,
{
    async fn save(&self, member: Member) -> AppResult<Member> {
        let db = self.db.conn();

        let model = match member.id {
            None => {
                let mut active = ActiveModel {
                    id: NotSet,
                    name: Set(member.name),
                    email: Set(member.email),
                    address: Set(member.address),
                    role: Set(member.role.as_str().to_string()),
                    reg_time: NotSet,
                    update_time: NotSet,
                    created_by: NotSet,
                    modified_by: NotSet,
                };
                self.auditor.on_create(&mut active)?;
                active.insert(db).await.map_err(write_error)?
            }
            Some(id) => {
                let existing = MemberEntity::find_by_id(id)
                    .one(db)
                    .await?
                    .ok_or(AppError::NotFound)?;

                let mut active: ActiveModel = existing.into();
                active.name = Set(member.name);
                active.email = Set(member.email);
                active.address = Set(member.address);
                active.role = Set(member.role.as_str().to_string());
                self.auditor.on_update(&mut active)?;
                active.update(db).await.map_err(write_error)?
            }
        };

        tracing::debug!(member_id = model.id, "Saved member");
        Ok(Member::try_from(model)?)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Member>> {
        let result = MemberEntity::find_by_id(id)
            .one(self.db.conn())
            .await
            .map_err(AppError::from)?;

        result.map(Member::try_from).transpose().map_err(AppError::from)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Member>> {
        let result = MemberEntity::find()
            .filter(member::Column::Email.eq(email))
            .one(self.db.conn())
            .await
            .map_err(AppError::from)?;

        result.map(Member::try_from).transpose().map_err(AppError::from)
    }
}
