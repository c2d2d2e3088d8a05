//! # REST API for Data Export
//!
//! Download endpoints for the spreadsheet and the screenshot archive.

use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use shared::ErrorResponse;
use tokio_util::io::ReaderStream;
use tracing::{error, info, warn};

use crate::domain::commands::export::ExportedFile;
use crate::error::AppError;
use crate::AppState;

/// Create a router for export related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/excel", get(download_excel))
        .route("/screenshots", get(download_screenshots))
}

/// Download every registration as a spreadsheet
pub async fn download_excel(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/download/excel");

    match state.export_service.export_spreadsheet().await {
        Ok(exported) => {
            info!("✅ Spreadsheet export ready ({} rows)", exported.item_count);
            attachment_response(exported)
        }
        Err(AppError::NoRecords) => {
            warn!("Spreadsheet requested before any registration was stored");
            (StatusCode::NOT_FOUND, "No data found").into_response()
        }
        Err(e) => {
            error!("❌ Failed to export spreadsheet: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to export spreadsheet").into_response()
        }
    }
}

/// Download every uploaded screenshot as a zip archive
pub async fn download_screenshots(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/download/screenshots");

    match state.export_service.export_screenshots().await {
        Ok(exported) => {
            info!("✅ Screenshot archive ready ({} files)", exported.item_count);
            attachment_response(exported)
        }
        Err(e) => {
            error!("❌ Failed to archive screenshots: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// Stream a generated artifact back as a file download
fn attachment_response(exported: ExportedFile) -> Response {
    let body = Body::from_stream(ReaderStream::new(exported.file));
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, exported.content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", exported.download_name),
            ),
        ],
        body,
    )
        .into_response()
}
