use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::Set, QueryFilter};
use serde::Serialize;

/// Per-user UI preferences. Created lazily the first time a user's
/// preferences are fetched, then updated in place.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "user_preferences")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    #[sea_orm(unique)]
    pub user_id: i64,

    pub theme: String,
    pub email_notifications: bool,
    pub alert_notifications: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
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
    /// Fetches the user's preference row, inserting defaults on first visit.
    pub async fn get_or_create(db: &DbConn, user_id: i64) -> Result<Model, DbErr> {
        if let Some(existing) = Entity::find()
            .filter(Column::UserId.eq(user_id))
            .one(db)
            .await?
        {
            return Ok(existing);
        }

        let now = Utc::now();
        let active = ActiveModel {
            user_id: Set(user_id),
            theme: Set("light".to_owned()),
            email_notifications: Set(true),
            alert_notifications: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        active.insert(db).await
    }

    pub async fn update_settings(
        db: &DbConn,
        user_id: i64,
        theme: Option<&str>,
        email_notifications: Option<bool>,
        alert_notifications: Option<bool>,
    ) -> Result<Model, DbErr> {
        let model = Self::get_or_create(db, user_id).await?;

        let mut active: ActiveModel = model.into();
        if let Some(theme) = theme {
            active.theme = Set(theme.to_owned());
        }
        if let Some(v) = email_notifications {
            active.email_notifications = Set(v);
        }
        if let Some(v) = alert_notifications {
            active.alert_notifications = Set(v);
        }
        active.updated_at = Set(Utc::now());
        active.update(db).await
    }
}
