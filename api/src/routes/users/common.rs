use db::models::user::Model as UserModel;
use serde::Serialize;

#[derive(Debug, Serialize, Default)]
pub struct UserItem {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub admin: bool,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<UserModel> for UserItem {
    fn from(user: UserModel) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            full_name: user.full_name,
            admin: user.admin,
            is_active: user.is_active,
            created_at: user.created_at.to_rfc3339(),
            updated_at: user.updated_at.to_rfc3339(),
        }
    }
}
