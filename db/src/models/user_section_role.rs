use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::Set, QueryFilter};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// The central table for user-section-role relationships.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "user_section_roles")]
pub struct Model {
    /// User ID (foreign key to `users`)
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: i64,

    /// Section ID (foreign key to `sections`)
    #[sea_orm(primary_key, auto_increment = false)]
    pub section_id: i64,

    /// Role type: Manager, Supervisor, or Operator
    pub role: Role,
}

/// Enum representing user roles within a section.
/// Backed by a `user_section_role_type` enum in the database.
#[derive(
    Debug, Clone, PartialEq, EnumIter, DeriveActiveEnum, Display, EnumString, Deserialize, Serialize,
)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "user_section_role_type")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Role {
    #[sea_orm(string_value = "manager")]
    Manager,

    #[sea_orm(string_value = "supervisor")]
    Supervisor,

    #[sea_orm(string_value = "operator")]
    Operator,
}

/// Defines relationships for foreign key joins.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Belongs to a user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,

    /// Belongs to a section
    #[sea_orm(
        belongs_to = "super::section::Entity",
        from = "Column::SectionId",
        to = "super::section::Column::Id"
    )]
    Section,
}

impl Related<super::section::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Section.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Assigns (or reassigns) a user to a section with the given role.
    pub async fn assign_user_to_section(
        db: &DbConn,
        user_id: i64,
        section_id: i64,
        role: Role,
    ) -> Result<Model, DbErr> {
        // One role per user per section; a reassignment replaces the old row.
        let existing = Entity::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::SectionId.eq(section_id))
            .one(db)
            .await?;

        if let Some(existing) = existing {
            let mut active: ActiveModel = existing.into();
            active.role = Set(role);
            return active.update(db).await;
        }

        let active = ActiveModel {
            user_id: Set(user_id),
            section_id: Set(section_id),
            role: Set(role),
        };
        active.insert(db).await
    }

    pub async fn remove_user_from_section(
        db: &DbConn,
        user_id: i64,
        section_id: i64,
    ) -> Result<(), DbErr> {
        Entity::delete_many()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::SectionId.eq(section_id))
            .exec(db)
            .await?;
        Ok(())
    }
}
