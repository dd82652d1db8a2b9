use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// One inspection of a batch. Checks are immutable history: there is no
/// update path, only inserts and reads.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "quality_checks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub section_id: i64,

    pub batch_code: String,
    pub checked_at: DateTime<Utc>,

    pub sample_size: i64,
    pub defect_count: i64,

    pub status: CheckStatus,
    pub grade: Grade,

    pub inspector_id: i64,
    pub notes: Option<String>,

    pub created_at: DateTime<Utc>,
}

#[derive(
    Debug, Clone, PartialEq, EnumIter, DeriveActiveEnum, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "quality_check_status")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum CheckStatus {
    #[sea_orm(string_value = "passed")]
    Passed,

    #[sea_orm(string_value = "rework")]
    Rework,

    #[sea_orm(string_value = "rejected")]
    Rejected,
}

#[derive(
    Debug, Clone, PartialEq, EnumIter, DeriveActiveEnum, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "quality_grade")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Grade {
    #[sea_orm(string_value = "a")]
    A,

    #[sea_orm(string_value = "b")]
    B,

    #[sea_orm(string_value = "c")]
    C,
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
        from = "Column::InspectorId",
        to = "super::user::Column::Id"
    )]
    Inspector,
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
        batch_code: &str,
        checked_at: DateTime<Utc>,
        sample_size: i64,
        defect_count: i64,
        status: CheckStatus,
        grade: Grade,
        inspector_id: i64,
        notes: Option<&str>,
    ) -> Result<Model, DbErr> {
        let active = ActiveModel {
            section_id: Set(section_id),
            batch_code: Set(batch_code.to_owned()),
            checked_at: Set(checked_at),
            sample_size: Set(sample_size),
            defect_count: Set(defect_count),
            status: Set(status),
            grade: Set(grade),
            inspector_id: Set(inspector_id),
            notes: Set(notes.map(str::to_owned)),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        active.insert(db).await
    }

    /// Defects per sampled unit as a percentage; absent for empty samples.
    pub fn defect_rate_pct(&self) -> Option<f64> {
        (self.sample_size > 0).then(|| self.defect_count as f64 / self.sample_size as f64 * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defect_rate() {
        let check = Model {
            id: 1,
            section_id: 3,
            batch_code: "B-100".into(),
            checked_at: Utc::now(),
            sample_size: 200,
            defect_count: 5,
            status: CheckStatus::Passed,
            grade: Grade::A,
            inspector_id: 1,
            notes: None,
            created_at: Utc::now(),
        };
        assert_eq!(check.defect_rate_pct(), Some(2.5));

        let empty = Model {
            sample_size: 0,
            defect_count: 0,
            ..check
        };
        assert_eq!(empty.defect_rate_pct(), None);
    }
}
