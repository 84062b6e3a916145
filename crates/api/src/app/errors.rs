use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use shopledger_core::DomainError;
use shopledger_reporting::ExportError;

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    let (status, code) = match &err {
        DomainError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
        DomainError::InvalidLine { .. } => (StatusCode::BAD_REQUEST, "invalid_line"),
        DomainError::EmptyOrder => (StatusCode::BAD_REQUEST, "empty_order"),
        DomainError::InvalidRange { .. } => (StatusCode::BAD_REQUEST, "invalid_range"),
        DomainError::InvalidReference { .. } => {
            (StatusCode::UNPROCESSABLE_ENTITY, "invalid_reference")
        }
        DomainError::InsufficientStock { .. } => {
            (StatusCode::UNPROCESSABLE_ENTITY, "insufficient_stock")
        }
        DomainError::ProductInactive { .. } => {
            (StatusCode::UNPROCESSABLE_ENTITY, "product_inactive")
        }
        DomainError::NotFound => (StatusCode::NOT_FOUND, "not_found"),
        DomainError::Forbidden { .. } => (StatusCode::FORBIDDEN, "forbidden"),
        DomainError::Conflict(_) => (StatusCode::CONFLICT, "conflict"),
    };
    json_error(status, code, err.to_string())
}

pub fn export_error_to_response(err: ExportError) -> axum::response::Response {
    match err {
        ExportError::Domain(e) => domain_error_to_response(e),
        ExportError::Csv(e) => json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "export_error",
            e.to_string(),
        ),
        ExportError::Io(e) => json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "export_error",
            e.to_string(),
        ),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
