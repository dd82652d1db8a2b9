use crate::seed::Seeder;
use chrono::{Duration, Utc};
use db::models::quality_check::{CheckStatus, Grade, Model};
use db::models::user::Model as UserModel;
use sea_orm::DatabaseConnection;

pub struct QualityCheckSeeder;

#[async_trait::async_trait]
impl Seeder for QualityCheckSeeder {
    async fn seed(&self, db: &DatabaseConnection) {
        let Ok(Some(inspector)) = UserModel::get_by_username(db, "packaging_lead").await else {
            return;
        };

        for i in 0..10i64 {
            let sample = i64::from(fastrand::u8(50..200));
            let defects = i64::from(fastrand::u8(..12));
            let (status, grade) = match defects {
                0..=3 => (CheckStatus::Passed, Grade::A),
                4..=7 => (CheckStatus::Rework, Grade::B),
                _ => (CheckStatus::Rejected, Grade::C),
            };
            let _ = Model::create(
                db,
                3,
                &format!("B-{:04}", 1000 + i),
                Utc::now() - Duration::days(i),
                sample,
                defects,
                status,
                grade,
                inspector.id,
                None,
            )
            .await;
        }
    }
}
