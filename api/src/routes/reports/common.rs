//! Shared data assembly for the financial exporters. The CSV and the print
//! view are two renderings of this one structure, so their numbers can
//! never drift apart.

use chrono::{DateTime, Utc};
use db::models::inventory_item::{AlertStatus, Column as ItemColumn, Entity as ItemEntity};
use db::models::section::Entity as SectionEntity;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};
use std::collections::BTreeMap;

pub struct FinancialReport {
    pub section_id: i64,
    pub section_name: String,
    pub generated_at: DateTime<Utc>,
    pub total_items: usize,
    pub total_value: f64,
    pub low_stock: usize,
    pub critical: usize,
    pub categories: Vec<CategoryRow>,
    pub details: Vec<DetailRow>,
}

pub struct CategoryRow {
    pub category: String,
    pub items: usize,
    pub quantity: f64,
    pub value: f64,
}

pub struct DetailRow {
    pub item_code: String,
    pub name: String,
    pub category: String,
    pub quantity: f64,
    pub unit: String,
    pub unit_cost: f64,
    pub stock_value: f64,
    pub alert: AlertStatus,
}

/// Builds the section's stock valuation report: summary totals, a
/// per-category breakdown, and the detail rows, all from one section-scoped
/// query.
pub async fn build_financial_report(
    db: &DatabaseConnection,
    section_id: i64,
) -> Result<Option<FinancialReport>, DbErr> {
    let Some(section) = SectionEntity::find_by_id(section_id).one(db).await? else {
        return Ok(None);
    };

    let rows = ItemEntity::find()
        .filter(ItemColumn::SectionId.eq(section_id))
        .order_by_asc(ItemColumn::Category)
        .order_by_asc(ItemColumn::Name)
        .all(db)
        .await?;

    let mut report = FinancialReport {
        section_id,
        section_name: section.name,
        generated_at: Utc::now(),
        total_items: rows.len(),
        total_value: 0.0,
        low_stock: 0,
        critical: 0,
        categories: Vec::new(),
        details: Vec::new(),
    };

    let mut by_category: BTreeMap<String, CategoryRow> = BTreeMap::new();
    for row in rows {
        let value = row.stock_value();
        let alert = row.alert_status();

        report.total_value += value;
        match alert {
            AlertStatus::LowStock => report.low_stock += 1,
            AlertStatus::Critical => report.critical += 1,
            AlertStatus::Ok => {}
        }

        let entry = by_category
            .entry(row.category.clone())
            .or_insert_with(|| CategoryRow {
                category: row.category.clone(),
                items: 0,
                quantity: 0.0,
                value: 0.0,
            });
        entry.items += 1;
        entry.quantity += row.quantity;
        entry.value += value;

        report.details.push(DetailRow {
            item_code: row.item_code,
            name: row.name,
            category: row.category,
            quantity: row.quantity,
            unit: row.unit,
            unit_cost: row.unit_cost,
            stock_value: value,
            alert,
        });
    }
    report.categories = by_category.into_values().collect();

    Ok(Some(report))
}

/// Minimal HTML escape for the print views.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(escape_html("<b>&\"x\""), "&lt;b&gt;&amp;&quot;x&quot;");
    }
}
