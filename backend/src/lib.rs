//! # Registration Intake Backend
//!
//! Accepts registration form submissions (with an optional payment
//! screenshot), appends them to a flat CSV store, and offers two downloads:
//! a spreadsheet of every registration and a zip of every uploaded screenshot.
//!
//! ## Architecture
//!
//! ```text
//! HTTP clients / static frontend
//!     ↓
//! IO Layer (REST handlers, multipart parsing)
//!     ↓
//! Domain Layer (intake and export services)
//!     ↓
//! Storage Layer (data.csv record store, uploads/ sink)
//! ```

pub mod config;
pub mod domain;
pub mod error;
pub mod io;
pub mod storage;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::info;

use shared::{EXCEL_DOWNLOAD_NAME, SCREENSHOTS_DOWNLOAD_NAME};

use crate::config::AppConfig;
use crate::domain::{ExportService, RegistrationService};
use crate::storage::{
    CsvConnection, CsvRegistrationRepository, RecordStore, UploadDirectoryRepository, UploadSink,
};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub registration_service: RegistrationService,
    pub export_service: ExportService,
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Setting up data directory at {}", config.data_dir.display());
    let connection = CsvConnection::new(&config.data_dir)?;

    let record_store: Arc<dyn RecordStore> =
        Arc::new(CsvRegistrationRepository::new(connection.clone()));
    let upload_sink: Arc<dyn UploadSink> =
        Arc::new(UploadDirectoryRepository::new(connection.clone()));

    info!("Setting up domain services");
    let registration_service = RegistrationService::new(record_store.clone(), upload_sink.clone());
    let export_service = ExportService::new(
        record_store,
        upload_sink,
        connection.export_file_path(EXCEL_DOWNLOAD_NAME),
        connection.export_file_path(SCREENSHOTS_DOWNLOAD_NAME),
    );

    Ok(AppState {
        registration_service,
        export_service,
    })
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, config: &AppConfig) -> Result<Router> {
    let api_routes = Router::new()
        .merge(io::registration_apis::router())
        .nest("/download", io::export_apis::router());

    let mut router = Router::new()
        .nest("/api", api_routes)
        .fallback_service(ServeDir::new(&config.public_dir))
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .with_state(app_state);

    if let Some(origin) = &config.cors_origin {
        let origin = origin
            .parse::<HeaderValue>()
            .with_context(|| format!("invalid cors_origin '{}'", origin))?;
        let cors = CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers(Any);
        router = router.layer(cors);
    }

    Ok(router)
}
