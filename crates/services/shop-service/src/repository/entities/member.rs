//! Member database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;

use domain::{DomainError, Member, MemberRole};

use crate::audit::Auditable;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "member")]
pub struct Model {
    #[sea_orm(primary_key, column_name = "member_id")]
    pub id: i64,
    pub name: Option<String>,
    #[sea_orm(unique)]
    pub email: Option<String>,
    pub address: Option<String>,
    pub role: String,
    pub reg_time: DateTimeUtc,
    pub update_time: DateTimeUtc,
    pub created_by: Option<String>,
    pub modified_by: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Auditable for ActiveModel {
    fn stamp_created(&mut self, at: DateTimeUtc, by: Option<String>) {
        self.reg_time = Set(at);
        self.update_time = Set(at);
        self.created_by = Set(by.clone());
        self.modified_by = Set(by);
    }

    fn stamp_modified(&mut self, at: DateTimeUtc, by: Option<String>) {
        self.update_time = Set(at);
        if by.is_some() {
            self.modified_by = Set(by);
        }
    }
}

/// Convert database model to domain entity
impl TryFrom<Model> for Member {
    type Error = DomainError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let role = model.role.parse::<MemberRole>().map_err(|_| {
            DomainError::internal(format!(
                "member {} has unknown role '{}'",
                model.id, model.role
            ))
        })?;

        Ok(Member {
            id: Some(model.id),
            name: model.name,
            email: model.email,
            address: model.address,
            role,
            reg_time: Some(model.reg_time),
            update_time: Some(model.update_time),
            created_by: model.created_by,
            modified_by: model.modified_by,
        })
    }
}
