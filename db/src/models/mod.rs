pub mod activity_log;
pub mod equipment;
pub mod inventory_item;
pub mod labeling_line;
pub mod packaging_line;
pub mod processing_log;
pub mod quality_check;
pub mod section;
pub mod temperature_log;
pub mod user;
pub mod user_preference;
pub mod user_section_role;

pub use activity_log::Entity as ActivityLog;
pub use equipment::Entity as Equipment;
pub use inventory_item::Entity as InventoryItem;
pub use labeling_line::Entity as LabelingLine;
pub use packaging_line::Entity as PackagingLine;
pub use processing_log::Entity as ProcessingLog;
pub use quality_check::Entity as QualityCheck;
pub use section::Entity as Section;
pub use temperature_log::Entity as TemperatureLog;
pub use user::Entity as User;
pub use user_preference::Entity as UserPreference;
pub use user_section_role::Entity as UserSectionRole;
