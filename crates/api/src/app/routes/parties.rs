use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
    Json, Router,
};

use shopledger_auth::{require_role, Role};
use shopledger_core::CustomerId;
use shopledger_parties::ContactInfo;

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::CallerContext;

pub fn router() -> Router {
    Router::new()
        .route("/customers", get(list_customers).post(create_customer))
        .route("/customers/:id", put(update_customer))
        .route("/suppliers", get(list_suppliers).post(create_supplier))
}

pub async fn list_customers(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let items = services.parties.list_customers();
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

pub async fn create_customer(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateCustomerRequest>,
) -> axum::response::Response {
    let contact = ContactInfo {
        phone: body.phone,
        email: body.email,
        address: body.address,
    };
    match services
        .parties
        .create_customer(body.name, contact, body.group, body.notes)
    {
        Ok(customer) => (StatusCode::CREATED, Json(customer)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn update_customer(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::CreateCustomerRequest>,
) -> axum::response::Response {
    let id: CustomerId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let contact = ContactInfo {
        phone: body.phone,
        email: body.email,
        address: body.address,
    };
    match services
        .parties
        .update_customer(id, body.name, contact, body.group, body.notes)
    {
        Ok(customer) => (StatusCode::OK, Json(customer)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn list_suppliers(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let items = services.parties.list_suppliers();
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

pub async fn create_supplier(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Json(body): Json<dto::CreateSupplierRequest>,
) -> axum::response::Response {
    if let Err(e) = require_role(caller.caller(), Role::Manager) {
        return errors::domain_error_to_response(e);
    }
    let contact = ContactInfo {
        phone: body.phone,
        email: body.email,
        address: body.address,
    };
    match services
        .parties
        .create_supplier(body.name, body.contact_person, contact, body.has_vat)
    {
        Ok(supplier) => (StatusCode::CREATED, Json(supplier)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
