use crate::seed::Seeder;
use db::models::labeling_line::{LineStatus, Model};
use sea_orm::DatabaseConnection;

pub struct LabelingLineSeeder;

#[async_trait::async_trait]
impl Seeder for LabelingLineSeeder {
    async fn seed(&self, db: &DatabaseConnection) {
        let lines = [
            ("LL-01", "Labeling line 1", LineStatus::Running, "sticker", 95.0),
            ("LL-02", "Labeling line 2", LineStatus::Idle, "sticker", 80.0),
            ("LL-03", "Sleeve applicator", LineStatus::Maintenance, "sleeve", 45.0),
        ];
        for (code, name, status, label_type, speed) in lines {
            let applied = i64::from(fastrand::u16(..20_000));
            let _ = Model::create(db, 3, code, name, status, label_type, speed, applied).await;
        }
    }
}
