use crate::seed::Seeder;
use db::models::packaging_line::{LineStatus, Model};
use sea_orm::DatabaseConnection;

pub struct PackagingLineSeeder;

#[async_trait::async_trait]
impl Seeder for PackagingLineSeeder {
    async fn seed(&self, db: &DatabaseConnection) {
        let lines = [
            ("PL-01", "Pouch line", LineStatus::Running, 74.0, 120.0),
            ("PL-02", "Jar line", LineStatus::Running, 68.5, 60.0),
            ("PL-03", "Bulk line", LineStatus::Offline, 0.0, 0.0),
        ];
        for (code, name, status, oee, upm) in lines {
            let packed = i64::from(fastrand::u16(..30_000));
            let _ = Model::create(db, 3, code, name, status, oee, upm, packed).await;
        }
    }
}
