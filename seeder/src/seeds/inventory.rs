use crate::seed::Seeder;
use db::models::inventory_item::Model;
use sea_orm::DatabaseConnection;

pub struct InventorySeeder;

#[async_trait::async_trait]
impl Seeder for InventorySeeder {
    async fn seed(&self, db: &DatabaseConnection) {
        // Section 1: raw material stores
        let raw = [
            ("RM-001", "Green mango", "raw_fruit", 450.0, "kg", 120.0, 100.0, 25.0),
            ("RM-002", "Pineapple", "raw_fruit", 60.0, "kg", 180.0, 80.0, 20.0),
            ("RM-003", "Banana", "raw_fruit", 300.0, "kg", 90.0, 120.0, 30.0),
            ("RM-010", "Citric acid", "additive", 12.0, "kg", 950.0, 10.0, 2.0),
        ];
        for (code, name, category, qty, unit, cost, reorder, critical) in raw {
            let _ = Model::create(db, 1, code, name, category, qty, unit, cost, reorder, critical).await;
        }

        // Section 3: packaging materials
        let packaging = [
            ("PK-001", "Stand-up pouch 100g", "packaging", 18000.0, "pcs", 22.5, 5000.0, 1000.0),
            ("PK-002", "Carton box 24x", "packaging", 700.0, "pcs", 85.0, 300.0, 50.0),
            ("PK-003", "Label roll sticker", "packaging", 40.0, "rolls", 1400.0, 20.0, 5.0),
        ];
        for (code, name, category, qty, unit, cost, reorder, critical) in packaging {
            let _ = Model::create(db, 3, code, name, category, qty, unit, cost, reorder, critical).await;
        }
    }
}
