use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
    Json, Router,
};

use shopledger_auth::{require_role, Role};
use shopledger_catalog::ProductStatus;
use shopledger_core::{CategoryId, ProductId, ProductTypeId};

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::CallerContext;

pub fn router() -> Router {
    Router::new()
        .route("/categories", get(list_categories).post(create_category))
        .route("/categories/:id", put(update_category).delete(delete_category))
        .route("/product-types", get(list_product_types).post(create_product_type))
        .route("/products", get(list_products).post(create_product))
        .route("/products/:id", put(update_product))
}

pub async fn list_categories(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let items = services.catalog.list_categories();
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

pub async fn create_category(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Json(body): Json<dto::CreateCategoryRequest>,
) -> axum::response::Response {
    if let Err(e) = require_role(caller.caller(), Role::Manager) {
        return errors::domain_error_to_response(e);
    }
    match services.catalog.create_category(body.name, body.description) {
        Ok(category) => (StatusCode::CREATED, Json(category)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn update_category(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::CreateCategoryRequest>,
) -> axum::response::Response {
    if let Err(e) = require_role(caller.caller(), Role::Manager) {
        return errors::domain_error_to_response(e);
    }
    let id: CategoryId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };
    match services.catalog.update_category(id, body.name, body.description) {
        Ok(category) => (StatusCode::OK, Json(category)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_category(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(e) = require_role(caller.caller(), Role::Manager) {
        return errors::domain_error_to_response(e);
    }
    let id: CategoryId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };
    match services.catalog.delete_category(id) {
        Ok(()) => (StatusCode::OK, Json(serde_json::json!({ "deleted": true }))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn list_product_types(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let items = services.catalog.list_product_types();
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

pub async fn create_product_type(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Json(body): Json<dto::CreateProductTypeRequest>,
) -> axum::response::Response {
    if let Err(e) = require_role(caller.caller(), Role::Manager) {
        return errors::domain_error_to_response(e);
    }
    let category_id: CategoryId = match body.category_id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };
    match services.catalog.create_product_type(body.name, category_id) {
        Ok(product_type) => (StatusCode::CREATED, Json(product_type)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let items = services.catalog.list_products();
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

fn parse_status(raw: Option<&str>) -> Result<ProductStatus, axum::response::Response> {
    match raw {
        None => Ok(ProductStatus::Active),
        Some(s) => s
            .parse::<ProductStatus>()
            .map_err(errors::domain_error_to_response),
    }
}

pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Json(body): Json<dto::CreateProductRequest>,
) -> axum::response::Response {
    if let Err(e) = require_role(caller.caller(), Role::Manager) {
        return errors::domain_error_to_response(e);
    }
    let category_id: CategoryId = match body.category_id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let type_id: ProductTypeId = match body.type_id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let status = match parse_status(body.status.as_deref()) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services
        .catalog
        .create_product(body.sku, body.name, category_id, type_id, status)
    {
        Ok(product) => (StatusCode::CREATED, Json(product)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn update_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::CreateProductRequest>,
) -> axum::response::Response {
    if let Err(e) = require_role(caller.caller(), Role::Manager) {
        return errors::domain_error_to_response(e);
    }
    let id: ProductId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let category_id: CategoryId = match body.category_id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let type_id: ProductTypeId = match body.type_id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let status = match parse_status(body.status.as_deref()) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services
        .catalog
        .update_product(id, body.sku, body.name, category_id, type_id, status)
    {
        Ok(product) => (StatusCode::OK, Json(product)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
