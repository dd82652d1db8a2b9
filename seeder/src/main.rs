use crate::seed::Seeder;
use crate::seed::run_seeder;
use crate::seeds::{
    equipment::EquipmentSeeder, inventory::InventorySeeder, labeling_line::LabelingLineSeeder,
    packaging_line::PackagingLineSeeder, processing_log::ProcessingLogSeeder,
    quality_check::QualityCheckSeeder, section::SectionSeeder, temperature_log::TemperatureLogSeeder,
    user::UserSeeder, user_role::UserRoleSeeder,
};

mod seed;
mod seeds;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let db = db::connect().await;

    for (seeder, name) in [
        (Box::new(SectionSeeder) as Box<dyn Seeder + Send + Sync>, "Section"),
        (Box::new(UserSeeder), "User"),
        (Box::new(UserRoleSeeder), "UserRole"),
        (Box::new(InventorySeeder), "Inventory"),
        (Box::new(EquipmentSeeder), "Equipment"),
        (Box::new(LabelingLineSeeder), "LabelingLine"),
        (Box::new(PackagingLineSeeder), "PackagingLine"),
        (Box::new(ProcessingLogSeeder), "ProcessingLog"),
        (Box::new(QualityCheckSeeder), "QualityCheck"),
        (Box::new(TemperatureLogSeeder), "TemperatureLog"),
    ] {
        run_seeder(&*seeder, name, &db).await;
    }
}
