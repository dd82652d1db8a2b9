use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use chrono::{DateTime, Utc};
use rand::rngs::OsRng;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, QueryFilter, Set};
use serde::Serialize;

use crate::models::section::{Column as SectionColumn, Entity as SectionEntity};
use crate::models::user_section_role::{
    Column as RoleColumn, Entity as RoleEntity, Role,
};
use std::str::FromStr;

/// Represents a user in the `users` table.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Primary key ID (auto-incremented).
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Unique login name.
    pub username: String,
    /// User's unique email address.
    pub email: String,
    /// Display name shown on dashboards and reports.
    pub full_name: String,
    /// Securely hashed password string.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Whether the user has admin privileges.
    pub admin: bool,
    /// Soft-disable flag; inactive users cannot log in.
    pub is_active: bool,
    /// Timestamp when the user was created.
    pub created_at: DateTime<Utc>,
    /// Timestamp when the user was last updated.
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_section_role::Entity")]
    UserSectionRole,

    #[sea_orm(has_one = "super::user_preference::Entity")]
    UserPreference,
}

impl Related<super::user_section_role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserSectionRole.def()
    }
}

impl Related<super::user_preference::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserPreference.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// A user's role within one section, joined with the section row.
#[derive(Debug, Clone)]
pub struct SectionRole {
    pub section_id: i64,
    pub section_name: String,
    pub role: Role,
}

impl Model {
    /// Creates a new active user with a freshly hashed password.
    pub async fn create(
        db: &DatabaseConnection,
        username: &str,
        email: &str,
        full_name: &str,
        password: &str,
        admin: bool,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();
        let active = ActiveModel {
            username: Set(username.to_owned()),
            email: Set(email.to_owned()),
            full_name: Set(full_name.to_owned()),
            password_hash: Set(Self::hash_password(password)?),
            admin: Set(admin),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        active.insert(db).await
    }

    pub async fn get_by_username(
        db: &DatabaseConnection,
        username: &str,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::Username.eq(username))
            .one(db)
            .await
    }

    /// Verifies a username/password pair. Returns `None` for an unknown
    /// username or a wrong password; the caller decides how much to reveal.
    pub async fn verify_credentials(
        db: &DatabaseConnection,
        username: &str,
        password: &str,
    ) -> Result<Option<Model>, DbErr> {
        let Some(user) = Self::get_by_username(db, username).await? else {
            return Ok(None);
        };
        if user.verify_password(password) {
            Ok(Some(user))
        } else {
            Ok(None)
        }
    }

    pub fn verify_password(&self, password: &str) -> bool {
        PasswordHash::new(&self.password_hash)
            .map(|parsed| {
                Argon2::default()
                    .verify_password(password.as_bytes(), &parsed)
                    .is_ok()
            })
            .unwrap_or(false)
    }

    pub fn hash_password(password: &str) -> Result<String, DbErr> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| DbErr::Custom(format!("Password hashing failed: {e}")))
    }

    pub async fn set_password(
        db: &DatabaseConnection,
        user_id: i64,
        password: &str,
    ) -> Result<Model, DbErr> {
        let model = Entity::find_by_id(user_id)
            .one(db)
            .await?
            .ok_or(DbErr::RecordNotFound("User not found".to_string()))?;

        let mut active: ActiveModel = model.into();
        active.password_hash = Set(Self::hash_password(password)?);
        active.updated_at = Set(Utc::now());
        active.update(db).await
    }

    /// Soft-enables or disables an account.
    pub async fn set_active(
        db: &DatabaseConnection,
        user_id: i64,
        active: bool,
    ) -> Result<Model, DbErr> {
        let model = Entity::find_by_id(user_id)
            .one(db)
            .await?
            .ok_or(DbErr::RecordNotFound("User not found".to_string()))?;

        let mut am: ActiveModel = model.into();
        am.is_active = Set(active);
        am.updated_at = Set(Utc::now());
        am.update(db).await
    }

    /// Checks whether a user holds the named role within a section.
    ///
    /// Unknown role strings resolve to `false` rather than an error so that
    /// guards stay fail-safe.
    pub async fn is_in_role(
        db: &DatabaseConnection,
        user_id: i64,
        section_id: i64,
        role: &str,
    ) -> Result<bool, DbErr> {
        let Ok(role) = Role::from_str(role) else {
            return Ok(false);
        };

        let found = RoleEntity::find()
            .filter(RoleColumn::UserId.eq(user_id))
            .filter(RoleColumn::SectionId.eq(section_id))
            .filter(RoleColumn::Role.eq(role))
            .one(db)
            .await?;

        Ok(found.is_some())
    }

    /// Returns true if the user holds any role in the section.
    pub async fn is_assigned_to_section(
        db: &DatabaseConnection,
        user_id: i64,
        section_id: i64,
    ) -> Result<bool, DbErr> {
        let found = RoleEntity::find()
            .filter(RoleColumn::UserId.eq(user_id))
            .filter(RoleColumn::SectionId.eq(section_id))
            .one(db)
            .await?;
        Ok(found.is_some())
    }

    /// All section assignments for a user, joined with the section registry.
    pub async fn get_section_roles(
        db: &DatabaseConnection,
        user_id: i64,
    ) -> Result<Vec<SectionRole>, DbErr> {
        let rows = RoleEntity::find()
            .filter(RoleColumn::UserId.eq(user_id))
            .all(db)
            .await?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            let section = SectionEntity::find()
                .filter(SectionColumn::Id.eq(row.section_id))
                .one(db)
                .await?
                .ok_or(DbErr::RecordNotFound("Section not found".to_string()))?;
            out.push(SectionRole {
                section_id: section.id,
                section_name: section.name,
                role: row.role,
            });
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::setup_test_db;

    #[tokio::test]
    async fn create_and_verify_credentials() {
        let db = setup_test_db().await;
        let user = Model::create(&db, "maria", "maria@plant.test", "Maria Perera", "s3cret!", false)
            .await
            .unwrap();
        assert!(user.is_active);
        assert_ne!(user.password_hash, "s3cret!");

        let ok = Model::verify_credentials(&db, "maria", "s3cret!").await.unwrap();
        assert_eq!(ok.map(|u| u.id), Some(user.id));

        let bad = Model::verify_credentials(&db, "maria", "wrong").await.unwrap();
        assert!(bad.is_none());
    }

    #[tokio::test]
    async fn unknown_role_string_is_denied() {
        let db = setup_test_db().await;
        let user = Model::create(&db, "ops", "ops@plant.test", "Ops", "pw123456", false)
            .await
            .unwrap();
        let allowed = Model::is_in_role(&db, user.id, 1, "warlord").await.unwrap();
        assert!(!allowed);
    }
}
