mod helpers;

use api::auth::generate_jwt;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use db::models::user::Model as UserModel;
use helpers::{create_admin, get_json_body, make_test_app, seed_sections};
use tower::ServiceExt;

fn json_request(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_login_success_returns_token() {
    let (app, app_state) = make_test_app().await;
    seed_sections(app_state.db()).await;
    create_admin(app_state.db(), "admin_login").await;

    let req = json_request(
        "/api/auth/login",
        serde_json::json!({ "username": "admin_login", "password": "password123" }),
    );
    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_json_body(response).await;
    assert_eq!(json["success"], true);
    assert!(json["data"]["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(json["data"]["admin"], true);
}

#[tokio::test]
async fn test_login_wrong_password_unauthorized() {
    let (app, app_state) = make_test_app().await;
    create_admin(app_state.db(), "admin_badpw").await;

    let req = json_request(
        "/api/auth/login",
        serde_json::json!({ "username": "admin_badpw", "password": "not-the-password" }),
    );
    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_disabled_account_forbidden() {
    let (app, app_state) = make_test_app().await;
    let user = create_admin(app_state.db(), "admin_disabled").await;
    UserModel::set_active(app_state.db(), user.id, false)
        .await
        .unwrap();

    let req = json_request(
        "/api/auth/login",
        serde_json::json!({ "username": "admin_disabled", "password": "password123" }),
    );
    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_whoami_round_trip() {
    let (app, app_state) = make_test_app().await;
    seed_sections(app_state.db()).await;
    let user = helpers::create_user_with_role(
        app_state.db(),
        "whoami_user",
        2,
        db::models::user_section_role::Role::Operator,
    )
    .await;

    let (token, _) = generate_jwt(user.id, user.admin);
    let req = Request::builder()
        .method("GET")
        .uri("/api/auth/whoami")
        .header("Authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_json_body(response).await;
    assert_eq!(json["data"]["username"], "whoami_user");
    assert_eq!(json["data"]["sections"][0]["section_id"], 2);
    assert_eq!(json["data"]["sections"][0]["role"], "operator");
}

#[tokio::test]
async fn test_whoami_without_token_unauthorized() {
    let (app, _state) = make_test_app().await;

    let req = Request::builder()
        .method("GET")
        .uri("/api/auth/whoami")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
