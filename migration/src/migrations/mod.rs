pub mod m202601050001_create_users;
pub mod m202601050002_create_sections;
pub mod m202601050003_create_user_section_roles;
pub mod m202601050004_create_activity_logs;
pub mod m202601050005_create_inventory_items;
pub mod m202601050006_create_equipment;
pub mod m202601050007_create_labeling_lines;
pub mod m202601050008_create_packaging_lines;
pub mod m202601050009_create_processing_logs;
pub mod m202601050010_create_quality_checks;
pub mod m202601050011_create_temperature_logs;
pub mod m202601050012_create_user_preferences;
