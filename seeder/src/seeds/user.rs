use crate::seed::Seeder;
use db::models::user::Model;
use fake::{Fake, faker::internet::en::SafeEmail, faker::name::en::Name};
use sea_orm::DatabaseConnection;

pub struct UserSeeder;

#[async_trait::async_trait]
impl Seeder for UserSeeder {
    async fn seed(&self, db: &DatabaseConnection) {
        // Fixed Admin User
        let _ = Model::create(db, "admin", "admin@example.com", "Plant Admin", "password123", true).await;

        // Fixed section leads
        let _ = Model::create(db, "stores_lead", "stores@example.com", "Stores Lead", "password123", false).await;
        let _ = Model::create(db, "processing_lead", "processing@example.com", "Processing Lead", "password123", false).await;
        let _ = Model::create(db, "packaging_lead", "packaging@example.com", "Packaging Lead", "password123", false).await;

        // Random Operators
        for i in 0..10 {
            let username = format!("operator{:02}", i + 1);
            let email: String = SafeEmail().fake();
            let full_name: String = Name().fake();
            let _ = Model::create(db, &username, &email, &full_name, "password123", false).await;
        }
    }
}
