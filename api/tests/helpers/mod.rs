use axum::Router;
use db::models::section::Model as SectionModel;
use db::models::user::Model as UserModel;
use db::models::user_section_role::{Model as UserSectionRoleModel, Role};
use sea_orm::DatabaseConnection;
use serde_json::Value;
use std::sync::Once;
use util::state::AppState;

static INIT: Once = Once::new();

/// Test configuration; set before the `AppConfig` singleton first loads.
pub fn ensure_test_env() {
    INIT.call_once(|| unsafe {
        std::env::set_var("JWT_SECRET", "test-secret-key");
        std::env::set_var("JWT_DURATION_MINUTES", "60");
        std::env::set_var("DATABASE_PATH", "data/test.db");
        std::env::set_var("APP_ENV", "test");
    });
}

/// Builds the real router over a fresh in-memory database.
pub async fn make_test_app() -> (Router, AppState) {
    ensure_test_env();
    let db = db::test_utils::setup_test_db().await;
    let app_state = AppState::new(db);
    let app = Router::new().nest("/api", api::routes::routes(app_state.clone()));
    (app, app_state)
}

/// The three fixed sections every test database starts from.
pub async fn seed_sections(db: &DatabaseConnection) {
    SectionModel::create(db, "Raw Materials", Some("Stores"))
        .await
        .expect("Failed to create section 1");
    SectionModel::create(db, "Processing", Some("Dehydration floor"))
        .await
        .expect("Failed to create section 2");
    SectionModel::create(db, "Packaging", Some("Packaging floor"))
        .await
        .expect("Failed to create section 3");
}

pub async fn create_user_with_role(
    db: &DatabaseConnection,
    username: &str,
    section_id: i64,
    role: Role,
) -> UserModel {
    let user = UserModel::create(
        db,
        username,
        &format!("{username}@test.com"),
        username,
        "password123",
        false,
    )
    .await
    .expect("Failed to create user");
    UserSectionRoleModel::assign_user_to_section(db, user.id, section_id, role)
        .await
        .expect("Failed to assign role");
    user
}

pub async fn create_admin(db: &DatabaseConnection, username: &str) -> UserModel {
    UserModel::create(
        db,
        username,
        &format!("{username}@test.com"),
        username,
        "password123",
        true,
    )
    .await
    .expect("Failed to create admin")
}

pub async fn get_json_body(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

pub async fn get_body_bytes(response: axum::response::Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}
