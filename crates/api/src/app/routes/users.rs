use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
    Json, Router,
};

use shopledger_auth::{require_role, Role};
use shopledger_core::UserId;

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::CallerContext;

pub fn router() -> Router {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/:id/role", put(update_role))
}

pub async fn list_users(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
) -> axum::response::Response {
    if let Err(e) = require_role(caller.caller(), Role::Admin) {
        return errors::domain_error_to_response(e);
    }
    let items = services.users.list();
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

/// Register a user and hand back a bearer token for them.
pub async fn create_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Json(body): Json<dto::CreateUserRequest>,
) -> axum::response::Response {
    if let Err(e) = require_role(caller.caller(), Role::Admin) {
        return errors::domain_error_to_response(e);
    }
    let role: Role = match body.role.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };
    match services.users.register(body.email, body.display_name, role) {
        Ok(user) => {
            let token = services.tokens.issue(user.id);
            (
                StatusCode::CREATED,
                Json(serde_json::json!({ "user": user, "token": token })),
            )
                .into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn update_role(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateRoleRequest>,
) -> axum::response::Response {
    let id: UserId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let role: Role = match body.role.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };
    // Admin gate sits inside the directory (explicit actor parameter).
    match services.users.update_role(caller.caller(), id, role) {
        Ok(user) => (StatusCode::OK, Json(user)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
