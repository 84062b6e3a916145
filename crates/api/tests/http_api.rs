//! Black-box tests against the full router, no network involved.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use shopledger_api::AppConfig;

const ADMIN_TOKEN: &str = "test-admin-token";

async fn test_app() -> Router {
    let config = AppConfig {
        admin_token: ADMIN_TOKEN.to_string(),
        ..AppConfig::default()
    };
    shopledger_api::app::build_app(config).await
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&value).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

fn as_json(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).unwrap()
}

/// Register a user through the admin and return their bearer token.
async fn register_user(app: &Router, email: &str, role: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/users",
        Some(ADMIN_TOKEN),
        Some(json!({ "email": email, "display_name": email, "role": role })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    as_json(&body)["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_needs_no_auth() {
    let app = test_app().await;
    let (status, body) = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(as_json(&body)["status"], "ok");
}

#[tokio::test]
async fn protected_routes_reject_missing_or_bad_tokens() {
    let app = test_app().await;

    let (status, _) = send(&app, Method::GET, "/products", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, Method::GET, "/products", Some("bogus"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn employee_cannot_write_the_catalog() {
    let app = test_app().await;
    let employee = register_user(&app, "emp@example.com", "employee").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/categories",
        Some(&employee),
        Some(json!({ "name": "Apparel" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(as_json(&body)["error"], "forbidden");
}

#[tokio::test]
async fn creating_a_user_with_an_unknown_role_fails() {
    let app = test_app().await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/users",
        Some(ADMIN_TOKEN),
        Some(json!({ "email": "x@example.com", "display_name": "X", "role": "superuser" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(as_json(&body)["error"], "validation_error");
}

#[tokio::test]
async fn non_admin_cannot_list_users() {
    let app = test_app().await;
    let manager = register_user(&app, "mgr@example.com", "manager").await;
    let (status, _) = send(&app, Method::GET, "/users", Some(&manager), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn order_and_inventory_workflow() {
    let app = test_app().await;
    let manager = register_user(&app, "mgr@example.com", "manager").await;
    let employee = register_user(&app, "emp@example.com", "employee").await;

    // Seed catalog + supplier as the manager.
    let (status, body) = send(
        &app,
        Method::POST,
        "/categories",
        Some(&manager),
        Some(json!({ "name": "Apparel" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let category_id = as_json(&body)["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        Method::POST,
        "/product-types",
        Some(&manager),
        Some(json!({ "name": "T-Shirts", "category_id": category_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let type_id = as_json(&body)["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        Method::POST,
        "/products",
        Some(&manager),
        Some(json!({
            "sku": "SKU-001",
            "name": "Plain Tee",
            "category_id": category_id,
            "type_id": type_id
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let product_id = as_json(&body)["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        Method::POST,
        "/suppliers",
        Some(&manager),
        Some(json!({ "name": "Textile Co", "has_vat": true })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let supplier_id = as_json(&body)["id"].as_str().unwrap().to_string();

    // Employees may not commit purchase orders.
    let po_body = json!({
        "supplier_id": supplier_id,
        "date": "2024-01-10T12:00:00Z",
        "lines": [{ "product_id": product_id, "quantity": 10, "unit_price": 1000 }]
    });
    let (status, _) = send(
        &app,
        Method::POST,
        "/purchase-orders",
        Some(&employee),
        Some(po_body.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Manager restocks: +10 units, total 100.00.
    let (status, body) = send(
        &app,
        Method::POST,
        "/purchase-orders",
        Some(&manager),
        Some(po_body),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let purchase = as_json(&body);
    assert_eq!(purchase["total_amount"], 10_000);
    assert_eq!(purchase["payment_status"], "unpaid");

    // Inventory reflects the commit.
    let (status, body) = send(&app, Method::GET, "/inventory", Some(&employee), None).await;
    assert_eq!(status, StatusCode::OK);
    let items = as_json(&body)["items"].clone();
    assert_eq!(items[0]["quantity"], 10);
    assert_eq!(items[0]["status"], "in_stock");

    // Walk-in sale by the employee: -4 units.
    let (status, body) = send(
        &app,
        Method::POST,
        "/sales-orders",
        Some(&employee),
        Some(json!({
            "date": "2024-01-12T09:30:00Z",
            "order_type": "livestream",
            "lines": [{ "product_id": product_id, "quantity": 4, "unit_price": 2500 }]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let sale = as_json(&body);
    assert_eq!(sale["total_amount"], 10_000);
    assert_eq!(sale["customer_id"], Value::Null);
    let sale_id = sale["id"].as_str().unwrap().to_string();

    let (_, body) = send(&app, Method::GET, "/inventory/summary", Some(&employee), None).await;
    let summary = as_json(&body);
    assert_eq!(summary["total_units_in_stock"], 6);
    assert_eq!(summary["low_stock_count"], 1);

    let (status, body) = send(&app, Method::GET, "/dashboard/stats", Some(&employee), None).await;
    assert_eq!(status, StatusCode::OK);
    let stats = as_json(&body);
    assert_eq!(stats["total_revenue"], 10_000);
    assert_eq!(stats["total_expenses"], 10_000);
    assert_eq!(stats["pending_orders"], 1);

    // Overselling is rejected with structure, and no stock moves.
    let (status, body) = send(
        &app,
        Method::POST,
        "/sales-orders",
        Some(&employee),
        Some(json!({
            "date": "2024-01-12T10:00:00Z",
            "lines": [{ "product_id": product_id, "quantity": 100, "unit_price": 2500 }]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(as_json(&body)["error"], "insufficient_stock");

    let (_, body) = send(&app, Method::GET, "/inventory/summary", Some(&employee), None).await;
    assert_eq!(as_json(&body)["total_units_in_stock"], 6);

    // Payment status flip, then the order shows as paid.
    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/orders/{sale_id}/payment-status"),
        Some(&employee),
        Some(json!({ "status": "paid" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(
        &app,
        Method::GET,
        &format!("/sales-orders/{sale_id}"),
        Some(&employee),
        None,
    )
    .await;
    assert_eq!(as_json(&body)["payment_status"], "paid");

    // Listing filters: only the committed sale in January.
    let (status, body) = send(
        &app,
        Method::GET,
        "/sales-orders?from=2024-01-01T00:00:00Z&to=2024-01-31T23:59:59Z&payment_status=paid",
        Some(&employee),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let items = as_json(&body)["items"].clone();
    assert_eq!(items.as_array().unwrap().len(), 1);
    assert_eq!(items[0]["id"], sale_id.as_str());

    // CSV export.
    let app_for_export = app.clone();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/reports/export")
        .header(header::AUTHORIZATION, format!("Bearer {employee}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            serde_json::to_vec(&json!({
                "report_type": "sales",
                "start_date": "2024-01-01T00:00:00Z",
                "end_date": "2024-01-31T23:59:59Z"
            }))
            .unwrap(),
        ))
        .unwrap();
    let response = app_for_export.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/csv"
    );
    let csv_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(csv_bytes.to_vec()).unwrap();
    assert!(text.starts_with("order_id,date,customer,order_type,total_amount,payment_status"));
    assert!(text.contains(&sale_id));

    // Export with a reversed range is a clean 400.
    let (status, body) = send(
        &app,
        Method::POST,
        "/reports/export",
        Some(&employee),
        Some(json!({
            "report_type": "sales",
            "start_date": "2024-02-01T00:00:00Z",
            "end_date": "2024-01-01T00:00:00Z"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(as_json(&body)["error"], "invalid_range");
}

#[tokio::test]
async fn admin_can_promote_a_user() {
    let app = test_app().await;
    let employee_token = register_user(&app, "emp@example.com", "employee").await;

    // Find the employee's id through the admin listing.
    let (_, body) = send(&app, Method::GET, "/users", Some(ADMIN_TOKEN), None).await;
    let users = as_json(&body)["items"].clone();
    let employee_id = users
        .as_array()
        .unwrap()
        .iter()
        .find(|u| u["email"] == "emp@example.com")
        .unwrap()["id"]
        .as_str()
        .unwrap()
        .to_string();

    // The employee cannot change roles.
    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/users/{employee_id}/role"),
        Some(&employee_token),
        Some(json!({ "role": "manager" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // The admin can.
    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/users/{employee_id}/role"),
        Some(ADMIN_TOKEN),
        Some(json!({ "role": "manager" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(as_json(&body)["role"], "manager");

    // The promotion takes effect on the next request.
    let (status, _) = send(
        &app,
        Method::POST,
        "/categories",
        Some(&employee_token),
        Some(json!({ "name": "Apparel" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}
