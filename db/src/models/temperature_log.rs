use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// One temperature/humidity reading from a monitored location.
/// Readings are append-only.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "temperature_logs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub section_id: i64,

    /// Monitored spot, e.g. "cold room 1" or "drying tunnel B".
    pub location: String,

    pub temperature_c: f64,
    pub humidity_pct: Option<f64>,

    pub recorded_by: i64,
    pub recorded_at: DateTime<Utc>,

    pub created_at: DateTime<Utc>,
}

/// Computed reading flag against section thresholds; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Display, EnumString, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TempAlert {
    Ok,
    Warning,
    Critical,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::section::Entity",
        from = "Column::SectionId",
        to = "super::section::Column::Id"
    )]
    Section,

    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::RecordedBy",
        to = "super::user::Column::Id"
    )]
    Recorder,
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
        location: &str,
        temperature_c: f64,
        humidity_pct: Option<f64>,
        recorded_by: i64,
        recorded_at: DateTime<Utc>,
    ) -> Result<Model, DbErr> {
        let active = ActiveModel {
            section_id: Set(section_id),
            location: Set(location.to_owned()),
            temperature_c: Set(temperature_c),
            humidity_pct: Set(humidity_pct),
            recorded_by: Set(recorded_by),
            recorded_at: Set(recorded_at),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        active.insert(db).await
    }

    pub fn alert_status(&self, warning_c: f64, critical_c: f64) -> TempAlert {
        if self.temperature_c >= critical_c {
            TempAlert::Critical
        } else if self.temperature_c >= warning_c {
            TempAlert::Warning
        } else {
            TempAlert::Ok
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(temperature_c: f64) -> Model {
        Model {
            id: 1,
            section_id: 2,
            location: "cold room 1".into(),
            temperature_c,
            humidity_pct: None,
            recorded_by: 1,
            recorded_at: Utc::now(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn alert_thresholds() {
        assert_eq!(reading(4.0).alert_status(8.0, 12.0), TempAlert::Ok);
        assert_eq!(reading(8.0).alert_status(8.0, 12.0), TempAlert::Warning);
        assert_eq!(reading(12.5).alert_status(8.0, 12.0), TempAlert::Critical);
    }
}
