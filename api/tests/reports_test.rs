mod helpers;

use api::auth::generate_jwt;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use db::models::inventory_item::Model as ItemModel;
use db::models::user_section_role::Role;
use helpers::{
    create_admin, create_user_with_role, get_body_bytes, make_test_app, seed_sections,
};
use tower::ServiceExt;

fn authed_get(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header("Authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_financial_csv_layout_and_bom() {
    let (app, app_state) = make_test_app().await;
    let db = app_state.db();
    seed_sections(db).await;
    let supervisor = create_user_with_role(db, "csv_sup", 1, Role::Supervisor).await;

    ItemModel::create(db, 1, "RM-001", "Mango", "fruit", 100.0, "kg", 10.0, 20.0, 5.0)
        .await
        .unwrap();
    ItemModel::create(db, 1, "RM-002", "Pineapple, ripe", "fruit", 50.0, "kg", 20.0, 20.0, 5.0)
        .await
        .unwrap();

    let (token, _) = generate_jwt(supervisor.id, supervisor.admin);
    let response = app
        .oneshot(authed_get("/api/reports/sections/1/financial.csv", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("Content-Type").unwrap(),
        "text/csv; charset=utf-8"
    );
    assert!(
        response
            .headers()
            .get("Content-Disposition")
            .unwrap()
            .to_str()
            .unwrap()
            .starts_with("attachment")
    );

    let bytes = get_body_bytes(response).await;
    // BOM is the first 3 bytes
    assert_eq!(&bytes[..3], &[0xEF, 0xBB, 0xBF]);

    let text = String::from_utf8(bytes).unwrap();
    // Documented preamble sections separated by blank lines
    assert!(text.contains("Financial Report - Raw Materials"));
    assert!(text.contains("\nSummary\n"));
    assert!(text.contains("\nBreakdown by Category\n"));
    assert!(text.contains("Total Stock Value,Rs. 2000.00"));

    // Exactly 2 data rows in the detail section (header + 2)
    let detail = text.split("\nDetail\n").nth(1).unwrap();
    let rows: Vec<&str> = detail.lines().filter(|l| !l.is_empty()).collect();
    assert_eq!(rows.len(), 3);
    assert!(rows[0].starts_with("Item Code,"));
    assert!(rows[1].contains("RM-001"));
    // Embedded comma is quoted, not split
    assert!(rows[2].contains("\"Pineapple, ripe\""));
    // Currency cells keep the human-readable prefix
    assert!(rows[1].contains("Rs. 10.00"));
}

#[tokio::test]
async fn test_financial_csv_requires_supervisor() {
    let (app, app_state) = make_test_app().await;
    seed_sections(app_state.db()).await;
    let operator = create_user_with_role(app_state.db(), "csv_op", 1, Role::Operator).await;

    let (token, _) = generate_jwt(operator.id, operator.admin);
    let response = app
        .oneshot(authed_get("/api/reports/sections/1/financial.csv", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_financial_print_is_html_with_print_trigger() {
    let (app, app_state) = make_test_app().await;
    seed_sections(app_state.db()).await;
    let supervisor = create_user_with_role(app_state.db(), "print_sup", 1, Role::Supervisor).await;

    let (token, _) = generate_jwt(supervisor.id, supervisor.admin);
    let response = app
        .oneshot(authed_get("/api/reports/sections/1/financial/print", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("Content-Type").unwrap(),
        "text/html; charset=utf-8"
    );

    let text = String::from_utf8(get_body_bytes(response).await).unwrap();
    assert!(text.contains("window.print()"));
    assert!(text.contains("Financial Report - Raw Materials"));
}

#[tokio::test]
async fn test_invoice_print_scoped_to_batch_section() {
    let (app, app_state) = make_test_app().await;
    let db = app_state.db();
    seed_sections(db).await;
    let insider = create_user_with_role(db, "inv_insider", 2, Role::Operator).await;
    let outsider = create_user_with_role(db, "inv_outsider", 1, Role::Manager).await;

    let log = db::models::processing_log::Model::create(
        db,
        2,
        "B-3000",
        "Dried mango",
        100.0,
        Some(20.0),
        chrono::Utc::now() - chrono::Duration::hours(5),
        Some(chrono::Utc::now()),
        insider.id,
        None,
        None,
    )
    .await
    .unwrap();

    let (token, _) = generate_jwt(insider.id, insider.admin);
    let response = app
        .clone()
        .oneshot(authed_get(
            &format!("/api/reports/invoices/{}/print?rate=500", log.id),
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let text = String::from_utf8(get_body_bytes(response).await).unwrap();
    assert!(text.contains("Invoice - Batch B-3000"));
    assert!(text.contains("Rs. 10000.00"));

    let (token, _) = generate_jwt(outsider.id, outsider.admin);
    let response = app
        .oneshot(authed_get(
            &format!("/api/reports/invoices/{}/print", log.id),
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_backup_streams_full_dump_for_admin() {
    let (app, app_state) = make_test_app().await;
    let db = app_state.db();
    seed_sections(db).await;
    let admin = create_admin(db, "backup_admin").await;

    let (token, _) = generate_jwt(admin.id, admin.admin);
    let response = app
        .oneshot(authed_get("/api/reports/backup.sql", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("Content-Type").unwrap(),
        "application/sql"
    );
    assert_eq!(
        response.headers().get("Content-Disposition").unwrap(),
        "attachment; filename=\"backup.sql\""
    );

    let text = String::from_utf8(get_body_bytes(response).await).unwrap();
    assert!(text.starts_with("-- SQL backup generated at"));
    assert!(text.contains("PRAGMA foreign_keys=OFF;"));
    assert!(text.contains("DROP TABLE IF EXISTS \"users\";"));
    assert!(text.contains("CREATE TABLE \"users\""));
    assert!(text.contains("INSERT INTO \"users\" VALUES ("));
    assert!(text.contains("'backup_admin'"));
    assert!(text.trim_end().ends_with("PRAGMA foreign_keys=ON;"));
}

#[tokio::test]
async fn test_backup_forbidden_for_non_admin() {
    let (app, app_state) = make_test_app().await;
    seed_sections(app_state.db()).await;
    let user = create_user_with_role(app_state.db(), "backup_user", 1, Role::Manager).await;

    let (token, _) = generate_jwt(user.id, user.admin);
    let response = app
        .oneshot(authed_get("/api/reports/backup.sql", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
