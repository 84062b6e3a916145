use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use shopledger_auth::{require_role, Role};
use shopledger_core::{CustomerId, OrderId, SupplierId};
use shopledger_ledger::{OrderType, PaymentStatus, PurchaseOrder, SalesOrder};

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::CallerContext;

pub fn router() -> Router {
    Router::new()
        .route(
            "/purchase-orders",
            get(list_purchase_orders).post(create_purchase_order),
        )
        .route("/purchase-orders/:id", get(get_purchase_order))
        .route(
            "/sales-orders",
            get(list_sales_orders).post(create_sales_order),
        )
        .route("/sales-orders/:id", get(get_sales_order))
        .route("/orders/:id/payment-status", post(set_payment_status))
}

pub async fn create_purchase_order(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Json(body): Json<dto::CreatePurchaseOrderRequest>,
) -> axum::response::Response {
    if let Err(e) = require_role(caller.caller(), Role::Manager) {
        return errors::domain_error_to_response(e);
    }
    let supplier_id: SupplierId = match body.supplier_id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let lines = match dto::parse_lines(&body.lines) {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };
    match services
        .engine
        .commit_purchase_order(caller.caller(), supplier_id, body.date, &lines)
    {
        Ok(order) => (StatusCode::CREATED, Json(order)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn list_purchase_orders(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::OrderListQuery>,
) -> axum::response::Response {
    let filter = match query.to_filter() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let items: Vec<PurchaseOrder> = services.engine.list_purchase_orders(&filter).collect();
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

pub async fn get_purchase_order(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: OrderId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };
    match services.engine.get_purchase_order(id) {
        Some(order) => (StatusCode::OK, Json(order)).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "purchase order not found"),
    }
}

pub async fn create_sales_order(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Json(body): Json<dto::CreateSalesOrderRequest>,
) -> axum::response::Response {
    let customer_id: Option<CustomerId> = match &body.customer_id {
        Some(raw) => match raw.parse() {
            Ok(v) => Some(v),
            Err(e) => return errors::domain_error_to_response(e),
        },
        None => None,
    };
    let order_type = match body.order_type.as_deref() {
        None => OrderType::Normal,
        Some(raw) => match raw.parse::<OrderType>() {
            Ok(v) => v,
            Err(e) => return errors::domain_error_to_response(e),
        },
    };
    let lines = match dto::parse_lines(&body.lines) {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };
    match services.engine.commit_sales_order(
        caller.caller(),
        customer_id,
        body.date,
        order_type,
        &lines,
    ) {
        Ok(order) => (StatusCode::CREATED, Json(order)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn list_sales_orders(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::OrderListQuery>,
) -> axum::response::Response {
    let filter = match query.to_filter() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let items: Vec<SalesOrder> = services.engine.list_sales_orders(&filter).collect();
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

pub async fn get_sales_order(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: OrderId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };
    match services.engine.get_sales_order(id) {
        Some(order) => (StatusCode::OK, Json(order)).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "sales order not found"),
    }
}

/// Flip payment status on either order kind.
pub async fn set_payment_status(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::PaymentStatusRequest>,
) -> axum::response::Response {
    let id: OrderId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let status: PaymentStatus = match body.status.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };
    match services.engine.set_payment_status(caller.caller(), id, status) {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({ "id": id.to_string(), "payment_status": status })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
