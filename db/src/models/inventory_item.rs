use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::Set, QueryFilter};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// A stocked item scoped to one section of the facility.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "inventory_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub section_id: i64,

    pub item_code: String,
    pub name: String,
    pub category: String,

    pub quantity: f64,
    pub unit: String,
    pub unit_cost: f64,

    /// Quantity at or below which the item counts as low stock.
    pub reorder_level: f64,
    /// Quantity at or below which the item counts as critical.
    pub critical_level: f64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Computed stock flag; derived from quantity thresholds, never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Display, EnumString, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AlertStatus {
    #[default]
    Ok,
    LowStock,
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
        item_code: &str,
        name: &str,
        category: &str,
        quantity: f64,
        unit: &str,
        unit_cost: f64,
        reorder_level: f64,
        critical_level: f64,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();
        let active = ActiveModel {
            section_id: Set(section_id),
            item_code: Set(item_code.to_owned()),
            name: Set(name.to_owned()),
            category: Set(category.to_owned()),
            quantity: Set(quantity),
            unit: Set(unit.to_owned()),
            unit_cost: Set(unit_cost),
            reorder_level: Set(reorder_level),
            critical_level: Set(critical_level),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        active.insert(db).await
    }

    /// Looks up an item by ID **within** a section. Cross-section IDs
    /// resolve to `None`, never to another section's row.
    pub async fn find_in_section(
        db: &DbConn,
        section_id: i64,
        item_id: i64,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::Id.eq(item_id))
            .filter(Column::SectionId.eq(section_id))
            .one(db)
            .await
    }

    /// Applies a signed quantity delta. The resulting quantity is clamped
    /// at zero; stock cannot go negative.
    pub async fn adjust_quantity(
        db: &DbConn,
        section_id: i64,
        item_id: i64,
        delta: f64,
    ) -> Result<Model, DbErr> {
        let model = Self::find_in_section(db, section_id, item_id)
            .await?
            .ok_or(DbErr::RecordNotFound("Inventory item not found".to_string()))?;

        let next = (model.quantity + delta).max(0.0);
        let mut active: ActiveModel = model.into();
        active.quantity = Set(next);
        active.updated_at = Set(Utc::now());
        active.update(db).await
    }

    pub fn alert_status(&self) -> AlertStatus {
        if self.quantity <= self.critical_level {
            AlertStatus::Critical
        } else if self.quantity <= self.reorder_level {
            AlertStatus::LowStock
        } else {
            AlertStatus::Ok
        }
    }

    pub fn stock_value(&self) -> f64 {
        self.quantity * self.unit_cost
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(quantity: f64) -> Model {
        Model {
            id: 1,
            section_id: 1,
            item_code: "RM-001".into(),
            name: "Green mango".into(),
            category: "raw_fruit".into(),
            quantity,
            unit: "kg".into(),
            unit_cost: 120.0,
            reorder_level: 50.0,
            critical_level: 10.0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn alert_status_thresholds() {
        assert_eq!(item(200.0).alert_status(), AlertStatus::Ok);
        assert_eq!(item(50.0).alert_status(), AlertStatus::LowStock);
        assert_eq!(item(10.0).alert_status(), AlertStatus::Critical);
        assert_eq!(item(0.0).alert_status(), AlertStatus::Critical);
    }

    #[test]
    fn stock_value_is_quantity_times_cost() {
        assert_eq!(item(10.0).stock_value(), 1200.0);
    }
}
