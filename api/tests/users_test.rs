mod helpers;

use api::auth::generate_jwt;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use db::models::user_section_role::Role;
use helpers::{create_admin, create_user_with_role, get_json_body, make_test_app, seed_sections};
use tower::ServiceExt;

fn authed(method: &str, uri: &str, token: &str, body: Option<serde_json::Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Authorization", format!("Bearer {}", token));
    match body {
        Some(json) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

#[tokio::test]
async fn test_list_users_success_as_admin() {
    let (app, app_state) = make_test_app().await;
    let admin = create_admin(app_state.db(), "user_admin").await;

    let (token, _) = generate_jwt(admin.id, admin.admin);
    let response = app
        .oneshot(authed("GET", "/api/users", &token, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_json_body(response).await;
    assert_eq!(json["success"], true);
    assert!(json["data"]["users"].as_array().is_some());
    assert!(json["data"]["total"].as_u64().is_some());
}

#[tokio::test]
async fn test_list_users_forbidden_non_admin() {
    let (app, app_state) = make_test_app().await;
    seed_sections(app_state.db()).await;
    let user = create_user_with_role(app_state.db(), "user_regular", 1, Role::Operator).await;

    let (token, _) = generate_jwt(user.id, user.admin);
    let response = app
        .oneshot(authed("GET", "/api/users", &token, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_create_user_and_duplicate_conflict() {
    let (app, app_state) = make_test_app().await;
    let admin = create_admin(app_state.db(), "user_creator").await;
    let (token, _) = generate_jwt(admin.id, admin.admin);

    let body = serde_json::json!({
        "username": "new_operator",
        "email": "new_operator@test.com",
        "full_name": "New Operator",
        "password": "password123"
    });

    let response = app
        .clone()
        .oneshot(authed("POST", "/api/users", &token, Some(body.clone())))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = get_json_body(response).await;
    assert_eq!(json["data"]["username"], "new_operator");
    assert_eq!(json["data"]["is_active"], true);

    let response = app
        .oneshot(authed("POST", "/api/users", &token, Some(body)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_disable_user_blocks_login() {
    let (app, app_state) = make_test_app().await;
    seed_sections(app_state.db()).await;
    let admin = create_admin(app_state.db(), "user_disabler").await;
    let target = create_user_with_role(app_state.db(), "target_user", 1, Role::Operator).await;
    let (token, _) = generate_jwt(admin.id, admin.admin);

    let response = app
        .clone()
        .oneshot(authed(
            "PUT",
            &format!("/api/users/{}/active", target.id),
            &token,
            Some(serde_json::json!({ "is_active": false })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let login = Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header("Content-Type", "application/json")
        .body(Body::from(
            serde_json::json!({ "username": "target_user", "password": "password123" }).to_string(),
        ))
        .unwrap();
    let response = app.oneshot(login).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_assign_and_list_section_roles() {
    let (app, app_state) = make_test_app().await;
    seed_sections(app_state.db()).await;
    let admin = create_admin(app_state.db(), "role_admin").await;
    let target = create_user_with_role(app_state.db(), "role_target", 1, Role::Operator).await;
    let (token, _) = generate_jwt(admin.id, admin.admin);

    let response = app
        .clone()
        .oneshot(authed(
            "POST",
            &format!("/api/users/{}/sections", target.id),
            &token,
            Some(serde_json::json!({ "section_id": 3, "role": "supervisor" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(authed(
            "GET",
            &format!("/api/users/{}/sections", target.id),
            &token,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_json_body(response).await;
    let sections = json["data"].as_array().unwrap();
    assert_eq!(sections.len(), 2);
    assert!(sections.iter().any(|s| s["section_id"] == 3 && s["role"] == "supervisor"));
}

#[tokio::test]
async fn test_assign_role_unknown_section_not_found() {
    let (app, app_state) = make_test_app().await;
    seed_sections(app_state.db()).await;
    let admin = create_admin(app_state.db(), "role_admin2").await;
    let target = create_user_with_role(app_state.db(), "role_target2", 1, Role::Operator).await;
    let (token, _) = generate_jwt(admin.id, admin.admin);

    let response = app
        .oneshot(authed(
            "POST",
            &format!("/api/users/{}/sections", target.id),
            &token,
            Some(serde_json::json!({ "section_id": 99, "role": "operator" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
