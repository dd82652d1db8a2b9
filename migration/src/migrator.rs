use sea_orm_migration::prelude::*;

use crate::migrations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(migrations::m202601050001_create_users::Migration),
            Box::new(migrations::m202601050002_create_sections::Migration),
            Box::new(migrations::m202601050003_create_user_section_roles::Migration),
            Box::new(migrations::m202601050004_create_activity_logs::Migration),
            Box::new(migrations::m202601050005_create_inventory_items::Migration),
            Box::new(migrations::m202601050006_create_equipment::Migration),
            Box::new(migrations::m202601050007_create_labeling_lines::Migration),
            Box::new(migrations::m202601050008_create_packaging_lines::Migration),
            Box::new(migrations::m202601050009_create_processing_logs::Migration),
            Box::new(migrations::m202601050010_create_quality_checks::Migration),
            Box::new(migrations::m202601050011_create_temperature_logs::Migration),
            Box::new(migrations::m202601050012_create_user_preferences::Migration),
        ]
    }
}
