use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::Serialize;

/// A production section of the facility: 1 = raw materials,
/// 2 = processing/dehydration, 3 = packaging. Sections scope both data and
/// user access.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "sections")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub name: String,
    pub description: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_section_role::Entity")]
    UserSectionRole,
}

impl Related<super::user_section_role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserSectionRole.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(
        db: &DbConn,
        name: &str,
        description: Option<&str>,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();
        let active = ActiveModel {
            name: Set(name.to_owned()),
            description: Set(description.map(str::to_owned)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        active.insert(db).await
    }

    pub async fn exists(db: &DbConn, section_id: i64) -> Result<bool, DbErr> {
        Ok(Entity::find_by_id(section_id).one(db).await?.is_some())
    }
}
