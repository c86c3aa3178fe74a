//! Member service - Handles member registration and lookup.

use async_trait::async_trait;
use std::sync::Arc;
use validator::Validate;

use common::{AppError, AppResult, OptionExt};
use domain::{DomainError, Member, NewMember};

use crate::repository::MemberRepository;

/// Member service trait for dependency injection.
#[async_trait]
pub trait MemberService: Send + Sync {
    /// Register a new member; the email must not be taken
    async fn register_member(&self, new_member: NewMember) -> AppResult<Member>;

    /// Get member by ID
    async fn get_member(&self, id: i64) -> AppResult<Member>;
}

/// Concrete implementation of MemberService using repository.
pub struct MemberManager {
    repo: Arc<dyn MemberRepository>,
}

impl MemberManager {
    /// Create new member service instance with repository
    pub fn new(repo: Arc<dyn MemberRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl MemberService for MemberManager {
    async fn register_member(&self, new_member: NewMember) -> AppResult<Member> {
        new_member
            .validate()
            .map_err(|e| AppError::from(DomainError::from(e)))?;

        // Check if email already exists
        if self.repo.find_by_email(&new_member.email).await?.is_some() {
            return Err(AppError::conflict("Email"));
        }

        self.repo.save(Member::from(new_member)).await
    }

    async fn get_member(&self, id: i64) -> AppResult<Member> {
        self.repo.find_by_id(id).await?.ok_or_not_found()
    }
}
