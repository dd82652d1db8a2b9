use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::Set, QueryFilter};
use serde::Serialize;

/// One processing batch run in the dehydration section.
///
/// `yield_pct` and `duration_minutes` are derived columns, recalculated on
/// every create and edit; rows are never deleted.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "processing_logs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub section_id: i64,

    pub batch_code: String,
    pub product: String,

    pub input_quantity: f64,
    pub output_quantity: Option<f64>,
    pub yield_pct: Option<f64>,

    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub duration_minutes: Option<i64>,

    pub operator_id: i64,
    pub supervisor_id: Option<i64>,

    pub notes: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
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
        from = "Column::OperatorId",
        to = "super::user::Column::Id"
    )]
    Operator,
}

impl Related<super::section::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Section.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Output over input as a percentage. Absent when the batch has no output
/// yet, the output is zero, or the input is not positive.
pub fn derive_yield_pct(input_quantity: f64, output_quantity: Option<f64>) -> Option<f64> {
    match output_quantity {
        Some(output) if output > 0.0 && input_quantity > 0.0 => {
            Some(output / input_quantity * 100.0)
        }
        _ => None,
    }
}

/// Whole minutes between start and end. Absent while the batch is still
/// running. An end before the start is invalid input; callers must reject
/// it before persisting (this function never yields a negative).
pub fn derive_duration_minutes(
    started_at: DateTime<Utc>,
    ended_at: Option<DateTime<Utc>>,
) -> Option<i64> {
    let ended = ended_at?;
    let minutes = (ended - started_at).num_minutes();
    (minutes >= 0).then_some(minutes)
}

impl Model {
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        db: &DbConn,
        section_id: i64,
        batch_code: &str,
        product: &str,
        input_quantity: f64,
        output_quantity: Option<f64>,
        started_at: DateTime<Utc>,
        ended_at: Option<DateTime<Utc>>,
        operator_id: i64,
        supervisor_id: Option<i64>,
        notes: Option<&str>,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();
        let active = ActiveModel {
            section_id: Set(section_id),
            batch_code: Set(batch_code.to_owned()),
            product: Set(product.to_owned()),
            input_quantity: Set(input_quantity),
            output_quantity: Set(output_quantity),
            yield_pct: Set(derive_yield_pct(input_quantity, output_quantity)),
            started_at: Set(started_at),
            ended_at: Set(ended_at),
            duration_minutes: Set(derive_duration_minutes(started_at, ended_at)),
            operator_id: Set(operator_id),
            supervisor_id: Set(supervisor_id),
            notes: Set(notes.map(str::to_owned)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        active.insert(db).await
    }

    pub async fn find_in_section(
        db: &DbConn,
        section_id: i64,
        log_id: i64,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::Id.eq(log_id))
            .filter(Column::SectionId.eq(section_id))
            .one(db)
            .await
    }

    /// Edits quantities/times and recalculates both derived columns.
    #[allow(clippy::too_many_arguments)]
    pub async fn update_quantities(
        db: &DbConn,
        section_id: i64,
        log_id: i64,
        input_quantity: f64,
        output_quantity: Option<f64>,
        started_at: DateTime<Utc>,
        ended_at: Option<DateTime<Utc>>,
        notes: Option<&str>,
    ) -> Result<Model, DbErr> {
        let model = Self::find_in_section(db, section_id, log_id)
            .await?
            .ok_or(DbErr::RecordNotFound("Processing log not found".to_string()))?;

        let mut active: ActiveModel = model.into();
        active.input_quantity = Set(input_quantity);
        active.output_quantity = Set(output_quantity);
        active.yield_pct = Set(derive_yield_pct(input_quantity, output_quantity));
        active.started_at = Set(started_at);
        active.ended_at = Set(ended_at);
        active.duration_minutes = Set(derive_duration_minutes(started_at, ended_at));
        if let Some(notes) = notes {
            active.notes = Set(Some(notes.to_owned()));
        }
        active.updated_at = Set(Utc::now());
        active.update(db).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn yield_pct_for_normal_batch() {
        assert_eq!(derive_yield_pct(100.0, Some(85.0)), Some(85.0));
    }

    #[test]
    fn yield_pct_absent_without_output() {
        assert_eq!(derive_yield_pct(100.0, None), None);
        assert_eq!(derive_yield_pct(100.0, Some(0.0)), None);
        assert_eq!(derive_yield_pct(0.0, Some(10.0)), None);
    }

    #[test]
    fn duration_in_whole_minutes() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 1, 1, 10, 30, 0).unwrap();
        assert_eq!(derive_duration_minutes(start, Some(end)), Some(150));
    }

    #[test]
    fn duration_never_negative() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();
        assert_eq!(derive_duration_minutes(start, Some(end)), None);
        assert_eq!(derive_duration_minutes(start, None), None);
    }
}
