use crate::seed::Seeder;
use chrono::{Duration, Utc};
use db::models::temperature_log::Model;
use db::models::user::Model as UserModel;
use sea_orm::DatabaseConnection;

pub struct TemperatureLogSeeder;

#[async_trait::async_trait]
impl Seeder for TemperatureLogSeeder {
    async fn seed(&self, db: &DatabaseConnection) {
        let Ok(Some(recorder)) = UserModel::get_by_username(db, "processing_lead").await else {
            return;
        };

        let locations = [(1, "cold room 1"), (2, "drying tunnel A"), (3, "packing hall")];
        for (section_id, location) in locations {
            for hour in 0..24i64 {
                let temperature = 3.0 + f64::from(fastrand::u8(..90)) / 10.0;
                let humidity = Some(40.0 + f64::from(fastrand::u8(..40)));
                let _ = Model::create(
                    db,
                    section_id,
                    location,
                    temperature,
                    humidity,
                    recorder.id,
                    Utc::now() - Duration::hours(hour),
                )
                .await;
            }
        }
    }
}
