use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::Set, QueryFilter, QueryOrder, QuerySelect};
use serde::Serialize;

/// Append-only audit trail written by every mutating action.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "activity_logs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub user_id: i64,

    /// Feature area the action belongs to, e.g. "inventory" or "users".
    pub module: String,
    pub action: String,
    pub details: String,
    pub ip_address: Option<String>,

    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn record(
        db: &DbConn,
        user_id: i64,
        module: &str,
        action: &str,
        details: &str,
        ip_address: Option<&str>,
    ) -> Result<Model, DbErr> {
        let active = ActiveModel {
            user_id: Set(user_id),
            module: Set(module.to_owned()),
            action: Set(action.to_owned()),
            details: Set(details.to_owned()),
            ip_address: Set(ip_address.map(str::to_owned)),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        active.insert(db).await
    }

    pub async fn recent_for_user(
        db: &DbConn,
        user_id: i64,
        limit: u64,
    ) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::UserId.eq(user_id))
            .order_by_desc(Column::CreatedAt)
            .limit(limit)
            .all(db)
            .await
    }
}
