use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// A packaging line monitored for throughput and OEE.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "packaging_lines")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub section_id: i64,

    pub code: String,
    pub name: String,

    pub status: LineStatus,

    /// Overall Equipment Effectiveness, 0-100.
    pub oee_pct: f64,

    pub units_per_minute: f64,
    pub units_packed_today: i64,

    pub last_maintenance_at: Option<DateTime<Utc>>,
    pub next_maintenance_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(
    Debug, Clone, PartialEq, EnumIter, DeriveActiveEnum, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "packaging_line_status")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LineStatus {
    #[sea_orm(string_value = "running")]
    Running,

    #[sea_orm(string_value = "idle")]
    Idle,

    #[sea_orm(string_value = "maintenance")]
    Maintenance,

    #[sea_orm(string_value = "offline")]
    Offline,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
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

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        db: &DbConn,
        section_id: i64,
        code: &str,
        name: &str,
        status: LineStatus,
        oee_pct: f64,
        units_per_minute: f64,
        units_packed_today: i64,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();
        let active = ActiveModel {
            section_id: Set(section_id),
            code: Set(code.to_owned()),
            name: Set(name.to_owned()),
            status: Set(status),
            oee_pct: Set(oee_pct),
            units_per_minute: Set(units_per_minute),
            units_packed_today: Set(units_packed_today),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        active.insert(db).await
    }
}
