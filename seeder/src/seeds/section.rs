use crate::seed::Seeder;
use db::models::section::Model;
use sea_orm::DatabaseConnection;

pub struct SectionSeeder;

#[async_trait::async_trait]
impl Seeder for SectionSeeder {
    async fn seed(&self, db: &DatabaseConnection) {
        // Fixed facility layout: IDs 1-3 are referenced throughout.
        let _ = Model::create(db, "Raw Materials", Some("Receiving and raw material stores")).await;
        let _ = Model::create(db, "Processing", Some("Processing and dehydration floor")).await;
        let _ = Model::create(db, "Packaging", Some("Packaging and labeling floor")).await;
    }
}
