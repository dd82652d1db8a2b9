mod helpers;

use api::auth::generate_jwt;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use helpers::{create_admin, get_body_bytes, get_json_body, make_test_app};
use tower::ServiceExt;

fn reply_request(message: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/chat/reply")
        .header("Content-Type", "application/json");
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }
    builder
        .body(Body::from(
            serde_json::json!({ "message": message }).to_string(),
        ))
        .unwrap()
}

#[tokio::test]
async fn test_widget_script_is_served() {
    let (app, _state) = make_test_app().await;

    let req = Request::builder()
        .method("GET")
        .uri("/api/chat/widget.js")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("Content-Type").unwrap(),
        "application/javascript; charset=utf-8"
    );

    let text = String::from_utf8(get_body_bytes(response).await).unwrap();
    // Escapes user text before it touches the DOM
    assert!(text.contains("escapeHtml"));
    assert!(text.contains("createTextNode"));
    // Carries a request sequence token so stale replies are dropped
    assert!(text.contains("requestSeq"));
    // Greeting fires once per panel, renders session-expired on 401
    assert!(text.contains("initialized"));
    assert!(text.contains("session has expired"));
}

#[tokio::test]
async fn test_reply_requires_authentication() {
    let (app, _state) = make_test_app().await;

    let response = app.oneshot(reply_request("hello", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_reply_matches_keywords_and_caps_actions() {
    let (app, app_state) = make_test_app().await;
    let admin = create_admin(app_state.db(), "chat_admin").await;
    let (token, _) = generate_jwt(admin.id, admin.admin);

    let response = app
        .clone()
        .oneshot(reply_request("where is my inventory?", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_json_body(response).await;
    assert_eq!(json["success"], true);
    assert!(json["data"]["reply"].as_str().unwrap().contains("stock"));
    let actions = json["data"]["actions"].as_array().unwrap();
    assert!(!actions.is_empty() && actions.len() <= 3);
    assert!(actions.iter().all(|a| a["type"] == "open_url" || a["type"] == "suggest"));

    // Unmatched input still gets a canned reply, never an error
    let response = app
        .oneshot(reply_request("zzz qqq", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_json_body(response).await;
    assert!(json["data"]["reply"].as_str().unwrap().contains("Sorry"));
}

#[tokio::test]
async fn test_reply_rejects_empty_message() {
    let (app, app_state) = make_test_app().await;
    let admin = create_admin(app_state.db(), "chat_admin2").await;
    let (token, _) = generate_jwt(admin.id, admin.admin);

    let response = app
        .oneshot(reply_request("   ", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
