mod helpers;

use api::auth::generate_jwt;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use db::models::inventory_item::Model as ItemModel;
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

// --- Access gate ---

#[tokio::test]
async fn test_section_scoped_user_cannot_read_other_section() {
    let (app, app_state) = make_test_app().await;
    seed_sections(app_state.db()).await;
    let user = create_user_with_role(app_state.db(), "sect2_user", 2, Role::Operator).await;

    let (token, _) = generate_jwt(user.id, user.admin);

    // Own section works
    let response = app
        .clone()
        .oneshot(authed("GET", "/api/sections/2/inventory", &token, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Direct URL access to section 3 is refused, never leaks data
    let response = app
        .oneshot(authed("GET", "/api/sections/3/inventory", &token, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_unknown_section_is_not_found() {
    let (app, app_state) = make_test_app().await;
    seed_sections(app_state.db()).await;
    let admin = create_admin(app_state.db(), "sect_admin").await;

    let (token, _) = generate_jwt(admin.id, admin.admin);
    let response = app
        .oneshot(authed("GET", "/api/sections/42/inventory", &token, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unauthenticated_is_rejected() {
    let (app, app_state) = make_test_app().await;
    seed_sections(app_state.db()).await;

    let req = Request::builder()
        .method("GET")
        .uri("/api/sections/1/inventory")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// --- Inventory filter loop ---

#[tokio::test]
async fn test_inventory_stats_match_filtered_details() {
    let (app, app_state) = make_test_app().await;
    let db = app_state.db();
    seed_sections(db).await;
    let user = create_user_with_role(db, "inv_user", 1, Role::Supervisor).await;

    ItemModel::create(db, 1, "RM-001", "Mango", "fruit", 100.0, "kg", 10.0, 20.0, 5.0)
        .await
        .unwrap();
    ItemModel::create(db, 1, "RM-002", "Pineapple", "fruit", 50.0, "kg", 20.0, 20.0, 5.0)
        .await
        .unwrap();
    ItemModel::create(db, 1, "AD-001", "Citric acid", "additive", 5.0, "kg", 100.0, 10.0, 2.0)
        .await
        .unwrap();
    // Same category, different section: must never appear in section 1 results
    ItemModel::create(db, 3, "PK-001", "Pouch", "fruit", 9999.0, "pcs", 1.0, 10.0, 2.0)
        .await
        .unwrap();

    let (token, _) = generate_jwt(user.id, user.admin);
    let response = app
        .oneshot(authed(
            "GET",
            "/api/sections/1/inventory?category=fruit",
            &token,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_json_body(response).await;
    let items = json["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(json["data"]["stats"]["total_items"], 2);

    // Stats and detail rows come from the same condition: the summed
    // detail value equals the aggregate total.
    let detail_sum: f64 = items.iter().map(|i| i["stock_value"].as_f64().unwrap()).sum();
    let total_value = json["data"]["stats"]["total_value"].as_f64().unwrap();
    assert!((detail_sum - total_value).abs() < 1e-9);
    assert!((total_value - 2000.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_inventory_empty_result_is_success() {
    let (app, app_state) = make_test_app().await;
    seed_sections(app_state.db()).await;
    let user = create_user_with_role(app_state.db(), "inv_empty", 1, Role::Operator).await;

    let (token, _) = generate_jwt(user.id, user.admin);
    let response = app
        .oneshot(authed(
            "GET",
            "/api/sections/1/inventory?category=nonexistent",
            &token,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_json_body(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["items"].as_array().unwrap().len(), 0);
    assert_eq!(json["data"]["stats"]["total_items"], 0);
}

#[tokio::test]
async fn test_inventory_alert_narrows_details_only() {
    let (app, app_state) = make_test_app().await;
    let db = app_state.db();
    seed_sections(db).await;
    let user = create_user_with_role(db, "inv_alert", 1, Role::Operator).await;

    ItemModel::create(db, 1, "A-1", "Plenty", "misc", 100.0, "kg", 1.0, 20.0, 5.0)
        .await
        .unwrap();
    ItemModel::create(db, 1, "A-2", "Low", "misc", 15.0, "kg", 1.0, 20.0, 5.0)
        .await
        .unwrap();
    ItemModel::create(db, 1, "A-3", "Gone", "misc", 2.0, "kg", 1.0, 20.0, 5.0)
        .await
        .unwrap();

    let (token, _) = generate_jwt(user.id, user.admin);
    let response = app
        .oneshot(authed(
            "GET",
            "/api/sections/1/inventory?alert=critical",
            &token,
            None,
        ))
        .await
        .unwrap();
    let json = get_json_body(response).await;

    let items = json["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["item_code"], "A-3");
    // Stats still describe the full section-scoped set
    assert_eq!(json["data"]["stats"]["total_items"], 3);
    assert_eq!(json["data"]["stats"]["low_stock"], 1);
    assert_eq!(json["data"]["stats"]["critical"], 1);
}

#[tokio::test]
async fn test_cross_section_item_id_resolves_not_found() {
    let (app, app_state) = make_test_app().await;
    let db = app_state.db();
    seed_sections(db).await;
    let user = create_user_with_role(db, "inv_cross", 2, Role::Supervisor).await;

    let foreign = ItemModel::create(db, 3, "PK-9", "Pouch", "packaging", 10.0, "pcs", 1.0, 5.0, 1.0)
        .await
        .unwrap();

    let (token, _) = generate_jwt(user.id, user.admin);
    let response = app
        .oneshot(authed(
            "PUT",
            &format!("/api/sections/2/inventory/{}", foreign.id),
            &token,
            Some(serde_json::json!({ "name": "Hijacked" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_inventory_create_requires_supervisor() {
    let (app, app_state) = make_test_app().await;
    seed_sections(app_state.db()).await;
    let operator = create_user_with_role(app_state.db(), "inv_op", 1, Role::Operator).await;

    let (token, _) = generate_jwt(operator.id, operator.admin);
    let body = serde_json::json!({
        "item_code": "RM-100", "name": "Papaya", "category": "fruit",
        "quantity": 10.0, "unit": "kg", "unit_cost": 50.0
    });
    let response = app
        .oneshot(authed("POST", "/api/sections/1/inventory", &token, Some(body)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// --- Processing derived fields ---

#[tokio::test]
async fn test_processing_yield_and_duration_derivation() {
    let (app, app_state) = make_test_app().await;
    seed_sections(app_state.db()).await;
    let user = create_user_with_role(app_state.db(), "proc_user", 2, Role::Operator).await;

    let (token, _) = generate_jwt(user.id, user.admin);
    let body = serde_json::json!({
        "batch_code": "B-1001",
        "product": "Dried mango",
        "input_quantity": 100.0,
        "output_quantity": 85.0,
        "started_at": "2024-01-01T08:00:00Z",
        "ended_at": "2024-01-01T10:30:00Z"
    });
    let response = app
        .oneshot(authed("POST", "/api/sections/2/processing", &token, Some(body)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = get_json_body(response).await;
    assert_eq!(json["data"]["yield_pct"], 85.0);
    assert_eq!(json["data"]["duration_minutes"], 150);
}

#[tokio::test]
async fn test_processing_open_batch_has_no_derived_fields() {
    let (app, app_state) = make_test_app().await;
    seed_sections(app_state.db()).await;
    let user = create_user_with_role(app_state.db(), "proc_open", 2, Role::Operator).await;

    let (token, _) = generate_jwt(user.id, user.admin);
    let body = serde_json::json!({
        "batch_code": "B-1002",
        "product": "Dried mango",
        "input_quantity": 100.0,
        "started_at": "2024-01-01T08:00:00Z"
    });
    let response = app
        .oneshot(authed("POST", "/api/sections/2/processing", &token, Some(body)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = get_json_body(response).await;
    assert!(json["data"]["yield_pct"].is_null());
    assert!(json["data"]["duration_minutes"].is_null());
}

#[tokio::test]
async fn test_processing_end_before_start_rejected() {
    let (app, app_state) = make_test_app().await;
    seed_sections(app_state.db()).await;
    let user = create_user_with_role(app_state.db(), "proc_bad", 2, Role::Supervisor).await;

    let (token, _) = generate_jwt(user.id, user.admin);
    let body = serde_json::json!({
        "batch_code": "B-1003",
        "product": "Dried mango",
        "input_quantity": 100.0,
        "output_quantity": 10.0,
        "started_at": "2024-01-01T10:00:00Z",
        "ended_at": "2024-01-01T08:00:00Z"
    });
    let response = app
        .oneshot(authed("POST", "/api/sections/2/processing", &token, Some(body)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_processing_edit_recalculates_and_requires_supervisor() {
    let (app, app_state) = make_test_app().await;
    seed_sections(app_state.db()).await;
    let db = app_state.db();
    let operator = create_user_with_role(db, "proc_edit_op", 2, Role::Operator).await;
    let supervisor = create_user_with_role(db, "proc_edit_sup", 2, Role::Supervisor).await;

    let (op_token, _) = generate_jwt(operator.id, operator.admin);
    let body = serde_json::json!({
        "batch_code": "B-1004",
        "product": "Banana chips",
        "input_quantity": 100.0,
        "output_quantity": 20.0,
        "started_at": "2024-01-01T08:00:00Z",
        "ended_at": "2024-01-01T09:00:00Z"
    });
    let response = app
        .clone()
        .oneshot(authed("POST", "/api/sections/2/processing", &op_token, Some(body)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = get_json_body(response).await;
    let log_id = created["data"]["id"].as_i64().unwrap();

    let edit = serde_json::json!({
        "input_quantity": 100.0,
        "output_quantity": 30.0,
        "started_at": "2024-01-01T08:00:00Z",
        "ended_at": "2024-01-01T10:00:00Z"
    });

    // Operators cannot edit history
    let response = app
        .clone()
        .oneshot(authed(
            "PUT",
            &format!("/api/sections/2/processing/{}", log_id),
            &op_token,
            Some(edit.clone()),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Supervisors can; derived fields recalculate
    let (sup_token, _) = generate_jwt(supervisor.id, supervisor.admin);
    let response = app
        .oneshot(authed(
            "PUT",
            &format!("/api/sections/2/processing/{}", log_id),
            &sup_token,
            Some(edit),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_json_body(response).await;
    assert_eq!(json["data"]["yield_pct"], 30.0);
    assert_eq!(json["data"]["duration_minutes"], 120);
}

// --- Quality checks ---

#[tokio::test]
async fn test_quality_check_create_and_stats() {
    let (app, app_state) = make_test_app().await;
    seed_sections(app_state.db()).await;
    let user = create_user_with_role(app_state.db(), "qc_user", 3, Role::Operator).await;
    let (token, _) = generate_jwt(user.id, user.admin);

    for (defects, status, grade) in [(2, "passed", "a"), (6, "rework", "b"), (11, "rejected", "c")] {
        let body = serde_json::json!({
            "batch_code": "B-2000",
            "sample_size": 100,
            "defect_count": defects,
            "status": status,
            "grade": grade
        });
        let response = app
            .clone()
            .oneshot(authed("POST", "/api/sections/3/quality", &token, Some(body)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
        .clone()
        .oneshot(authed("GET", "/api/sections/3/quality", &token, None))
        .await
        .unwrap();
    let json = get_json_body(response).await;
    assert_eq!(json["data"]["stats"]["total_checks"], 3);
    assert_eq!(json["data"]["stats"]["passed"], 1);
    assert_eq!(json["data"]["stats"]["rework"], 1);
    assert_eq!(json["data"]["stats"]["rejected"], 1);
    assert_eq!(json["data"]["stats"]["total_defects"], 19);

    // Status filter keeps stats and list in step
    let response = app
        .oneshot(authed(
            "GET",
            "/api/sections/3/quality?status=passed",
            &token,
            None,
        ))
        .await
        .unwrap();
    let json = get_json_body(response).await;
    assert_eq!(json["data"]["stats"]["total_checks"], 1);
    assert_eq!(json["data"]["checks"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_quality_defects_cannot_exceed_sample() {
    let (app, app_state) = make_test_app().await;
    seed_sections(app_state.db()).await;
    let user = create_user_with_role(app_state.db(), "qc_bad", 3, Role::Operator).await;
    let (token, _) = generate_jwt(user.id, user.admin);

    let body = serde_json::json!({
        "batch_code": "B-2001",
        "sample_size": 10,
        "defect_count": 11,
        "status": "rejected",
        "grade": "c"
    });
    let response = app
        .oneshot(authed("POST", "/api/sections/3/quality", &token, Some(body)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// --- Temperature monitoring ---

#[tokio::test]
async fn test_temperature_reading_and_stats() {
    let (app, app_state) = make_test_app().await;
    seed_sections(app_state.db()).await;
    let user = create_user_with_role(app_state.db(), "temp_user", 2, Role::Operator).await;
    let (token, _) = generate_jwt(user.id, user.admin);

    for (temp, expected) in [(4.0, "ok"), (9.0, "warning"), (13.5, "critical")] {
        let body = serde_json::json!({
            "location": "cold room 1",
            "temperature_c": temp
        });
        let response = app
            .clone()
            .oneshot(authed("POST", "/api/sections/2/temperature", &token, Some(body)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let json = get_json_body(response).await;
        assert_eq!(json["data"]["alert_status"], expected);
    }

    let response = app
        .oneshot(authed("GET", "/api/sections/2/temperature", &token, None))
        .await
        .unwrap();
    let json = get_json_body(response).await;
    assert_eq!(json["data"]["stats"]["total_readings"], 3);
    assert_eq!(json["data"]["stats"]["min_c"], 4.0);
    assert_eq!(json["data"]["stats"]["max_c"], 13.5);
    assert_eq!(json["data"]["stats"]["warnings"], 1);
    assert_eq!(json["data"]["stats"]["criticals"], 1);
}

// --- Equipment ---

#[tokio::test]
async fn test_equipment_status_update() {
    let (app, app_state) = make_test_app().await;
    let db = app_state.db();
    seed_sections(db).await;
    let supervisor = create_user_with_role(db, "eq_sup", 2, Role::Supervisor).await;
    let machine = db::models::equipment::Model::create(
        db,
        2,
        "EQ-201",
        "Dehydrator tunnel 1",
        db::models::equipment::EquipmentStatus::Operational,
        80.0,
    )
    .await
    .unwrap();

    let (token, _) = generate_jwt(supervisor.id, supervisor.admin);
    let response = app
        .clone()
        .oneshot(authed(
            "PUT",
            &format!("/api/sections/2/equipment/{}/status", machine.id),
            &token,
            Some(serde_json::json!({ "status": "maintenance" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_json_body(response).await;
    assert_eq!(json["data"]["status"], "maintenance");
    assert!(json["data"]["last_maintenance_at"].is_string());

    let response = app
        .oneshot(authed("GET", "/api/sections/2/equipment", &token, None))
        .await
        .unwrap();
    let json = get_json_body(response).await;
    assert_eq!(json["data"]["stats"]["maintenance"], 1);
}
