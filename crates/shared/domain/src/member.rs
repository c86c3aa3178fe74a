//! Member domain entity and related types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::constants::{ROLE_ADMIN, ROLE_USER};
use crate::error::DomainError;

/// Member roles enumeration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MemberRole {
    #[default]
    User,
    Admin,
}

impl MemberRole {
    /// Stored representation of the role
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberRole::User => ROLE_USER,
            MemberRole::Admin => ROLE_ADMIN,
        }
    }
}

impl FromStr for MemberRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_USER => Ok(MemberRole::User),
            ROLE_ADMIN => Ok(MemberRole::Admin),
            other => Err(DomainError::validation(format!(
                "unknown member role '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for MemberRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Member domain entity
///
/// The audit fields (`reg_time`, `update_time`, `created_by`, `modified_by`)
/// are owned by the persistence layer. Application code leaves them alone;
/// they are filled in when the member is saved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub role: MemberRole,
    pub reg_time: Option<DateTime<Utc>>,
    pub update_time: Option<DateTime<Utc>>,
    pub created_by: Option<String>,
    pub modified_by: Option<String>,
}

impl Member {
    /// Check if the member has been assigned an id by the database
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Check if every audit field has been stamped
    pub fn is_fully_audited(&self) -> bool {
        self.reg_time.is_some()
            && self.update_time.is_some()
            && self.created_by.is_some()
            && self.modified_by.is_some()
    }
}

/// Member registration data transfer object
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct NewMember {
    /// Display name
    #[validate(length(min = 1))]
    pub name: String,
    /// Contact email, unique across members
    #[validate(email)]
    pub email: String,
    /// Shipping address
    pub address: Option<String>,
}

impl From<NewMember> for Member {
    fn from(new: NewMember) -> Self {
        Member {
            name: Some(new.name),
            email: Some(new.email),
            address: new.address,
            ..Member::default()
        }
    }
}
