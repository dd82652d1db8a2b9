use crate::seed::Seeder;
use db::models::equipment::{EquipmentStatus, Model};
use sea_orm::DatabaseConnection;

pub struct EquipmentSeeder;

#[async_trait::async_trait]
impl Seeder for EquipmentSeeder {
    async fn seed(&self, db: &DatabaseConnection) {
        let machines = [
            (1, "EQ-101", "Washing tank A", EquipmentStatus::Operational),
            (1, "EQ-102", "Sorting conveyor", EquipmentStatus::Operational),
            (2, "EQ-201", "Dehydrator tunnel 1", EquipmentStatus::Operational),
            (2, "EQ-202", "Dehydrator tunnel 2", EquipmentStatus::Maintenance),
            (2, "EQ-203", "Slicer", EquipmentStatus::Operational),
            (3, "EQ-301", "Pouch filler", EquipmentStatus::Operational),
            (3, "EQ-302", "Carton sealer", EquipmentStatus::Offline),
        ];
        for (section_id, code, name, status) in machines {
            let utilization = f64::from(fastrand::u8(40..95));
            let _ = Model::create(db, section_id, code, name, status, utilization).await;
        }
    }
}
