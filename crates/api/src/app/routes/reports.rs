use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use shopledger_reporting::{export_filename, ReportType};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/reports/export", post(export))
        .route("/dashboard/stats", get(dashboard_stats))
}

pub async fn dashboard_stats(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.dashboard.stats() {
        Ok(stats) => (StatusCode::OK, Json(stats)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn export(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::ExportRequest>,
) -> axum::response::Response {
    let report_type: ReportType = match body.report_type.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };
    match services
        .exporter
        .export(report_type, body.start_date, body.end_date)
    {
        Ok(bytes) => {
            let filename = export_filename(report_type, body.start_date, body.end_date);
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "text/csv".to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename={filename}"),
                    ),
                ],
                bytes,
            )
                .into_response()
        }
        Err(e) => errors::export_error_to_response(e),
    }
}
