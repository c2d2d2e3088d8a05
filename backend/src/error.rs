//! Error types shared by the domain services and the REST layer.

use thiserror::Error;

/// Failures surfaced by intake and export operations
#[derive(Debug, Error)]
pub enum AppError {
    /// The registration store has not been created yet
    #[error("no registrations have been recorded yet")]
    NoRecords,

    /// The multipart body broke one of the intake rules
    #[error("invalid submission: {0}")]
    InvalidSubmission(String),

    /// The multipart body could not be read, or exceeded the body limit
    #[error("malformed multipart body: {0}")]
    Multipart(#[from] axum::extract::multipart::MultipartError),

    /// The record store or upload sink failed
    #[error("storage failure: {0}")]
    Storage(#[from] anyhow::Error),

    /// An export artifact could not be moved into place or reopened
    #[error("export file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("spreadsheet generation failed: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),

    #[error("archive generation failed: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// A blocking export job panicked or was cancelled
    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub type AppResult<T> = std::result::Result<T, AppError>;
