use crate::seed::Seeder;
use db::models::user::Model as UserModel;
use db::models::user_section_role::{Model, Role};
use sea_orm::DatabaseConnection;

pub struct UserRoleSeeder;

#[async_trait::async_trait]
impl Seeder for UserRoleSeeder {
    async fn seed(&self, db: &DatabaseConnection) {
        let leads = [
            ("stores_lead", 1),
            ("processing_lead", 2),
            ("packaging_lead", 3),
        ];
        for (username, section_id) in leads {
            if let Ok(Some(user)) = UserModel::get_by_username(db, username).await {
                let _ = Model::assign_user_to_section(db, user.id, section_id, Role::Manager).await;
            }
        }

        for i in 0..10 {
            let username = format!("operator{:02}", i + 1);
            if let Ok(Some(user)) = UserModel::get_by_username(db, &username).await {
                let section_id = (i % 3) + 1;
                let role = if i % 4 == 0 { Role::Supervisor } else { Role::Operator };
                let _ = Model::assign_user_to_section(db, user.id, section_id, role).await;
            }
        }
    }
}
