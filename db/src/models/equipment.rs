use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::Set, QueryFilter};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// A registered machine within a section.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "equipment")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub section_id: i64,

    pub code: String,
    pub name: String,

    pub status: EquipmentStatus,

    /// Utilization over the current shift, 0-100.
    pub utilization_pct: f64,

    pub last_maintenance_at: Option<DateTime<Utc>>,
    pub next_maintenance_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(
    Debug, Clone, PartialEq, EnumIter, DeriveActiveEnum, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "equipment_status")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum EquipmentStatus {
    #[sea_orm(string_value = "operational")]
    Operational,

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
    pub async fn create(
        db: &DbConn,
        section_id: i64,
        code: &str,
        name: &str,
        status: EquipmentStatus,
        utilization_pct: f64,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();
        let active = ActiveModel {
            section_id: Set(section_id),
            code: Set(code.to_owned()),
            name: Set(name.to_owned()),
            status: Set(status),
            utilization_pct: Set(utilization_pct),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        active.insert(db).await
    }

    pub async fn find_in_section(
        db: &DbConn,
        section_id: i64,
        equipment_id: i64,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::Id.eq(equipment_id))
            .filter(Column::SectionId.eq(section_id))
            .one(db)
            .await
    }

    pub async fn set_status(
        db: &DbConn,
        section_id: i64,
        equipment_id: i64,
        status: EquipmentStatus,
    ) -> Result<Model, DbErr> {
        let model = Self::find_in_section(db, section_id, equipment_id)
            .await?
            .ok_or(DbErr::RecordNotFound("Equipment not found".to_string()))?;

        let mut active: ActiveModel = model.into();
        let now = Utc::now();
        if status == EquipmentStatus::Maintenance {
            active.last_maintenance_at = Set(Some(now));
        }
        active.status = Set(status);
        active.updated_at = Set(now);
        active.update(db).await
    }
}
