use crate::seed::Seeder;
use chrono::{Duration, Utc};
use db::models::user::Model as UserModel;
use sea_orm::DatabaseConnection;

pub struct ProcessingLogSeeder;

#[async_trait::async_trait]
impl Seeder for ProcessingLogSeeder {
    async fn seed(&self, db: &DatabaseConnection) {
        let Ok(Some(operator)) = UserModel::get_by_username(db, "operator01").await else {
            return;
        };
        let Ok(Some(supervisor)) = UserModel::get_by_username(db, "processing_lead").await else {
            return;
        };

        let products = ["Dried mango", "Dried pineapple", "Banana chips"];
        for i in 0..12i64 {
            let input = 80.0 + f64::from(fastrand::u8(..80));
            let finished = i % 4 != 0;
            let output = finished.then(|| input * (0.15 + f64::from(fastrand::u8(..10)) / 100.0));
            let started = Utc::now() - Duration::days(i) - Duration::hours(6);
            let ended = finished.then(|| started + Duration::minutes(i64::from(fastrand::u16(180..600))));

            let _ = db::models::processing_log::Model::create(
                db,
                2,
                &format!("B-{:04}", 1000 + i),
                products[(i % 3) as usize],
                input,
                output,
                started,
                ended,
                operator.id,
                Some(supervisor.id),
                None,
            )
            .await;
        }
    }
}
