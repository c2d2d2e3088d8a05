//! Export service domain logic.
//!
//! Builds the two downloads offered by the service:
//! - a spreadsheet with every stored row (header included) on a single
//!   `Registrations` sheet
//! - a zip archive of every file in the upload sink, flattened at the root
//!
//! Both artifacts live at fixed paths in the data directory. Each export is
//! generated next to its target under a `.part` name, renamed over the target
//! and reopened, all under one lock; a download in progress keeps its own
//! handle when the next export replaces the file. Generation runs on the
//! blocking pool.

use rust_xlsxwriter::{Workbook, XlsxError};
use std::ffi::OsString;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};
use zip::result::ZipResult;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use shared::{EXCEL_DOWNLOAD_NAME, SCREENSHOTS_DOWNLOAD_NAME};

use crate::domain::commands::export::ExportedFile;
use crate::error::{AppError, AppResult};
use crate::storage::{RecordStore, UploadSink};

/// Name of the single worksheet in the spreadsheet export
pub const SHEET_NAME: &str = "Registrations";

/// Longest text a single xlsx cell can hold, in characters
pub const MAX_CELL_CHARS: usize = 32_767;

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const ZIP_CONTENT_TYPE: &str = "application/zip";

/// Export service that handles all export-related business logic
#[derive(Clone)]
pub struct ExportService {
    record_store: Arc<dyn RecordStore>,
    upload_sink: Arc<dyn UploadSink>,
    spreadsheet_path: PathBuf,
    archive_path: PathBuf,
    /// Serializes generation so two exports never write the same staging file
    export_lock: Arc<Mutex<()>>,
}

impl ExportService {
    pub fn new(
        record_store: Arc<dyn RecordStore>,
        upload_sink: Arc<dyn UploadSink>,
        spreadsheet_path: PathBuf,
        archive_path: PathBuf,
    ) -> Self {
        Self {
            record_store,
            upload_sink,
            spreadsheet_path,
            archive_path,
            export_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Write every stored row to the spreadsheet artifact.
    ///
    /// Returns [`AppError::NoRecords`] without touching the filesystem when
    /// the record store does not exist yet.
    pub async fn export_spreadsheet(&self) -> AppResult<ExportedFile> {
        let _guard = self.export_lock.lock().await;

        let rows = self
            .record_store
            .read_rows()
            .await?
            .ok_or(AppError::NoRecords)?;

        let staging = staging_path(&self.spreadsheet_path);
        let target = staging.clone();
        let row_count = rows.len();
        tokio::task::spawn_blocking(move || write_spreadsheet(&rows, &target)).await??;
        let file = publish(&staging, &self.spreadsheet_path).await?;

        info!("📄 EXPORT: Wrote {} rows to {}", row_count, self.spreadsheet_path.display());

        Ok(ExportedFile {
            path: self.spreadsheet_path.clone(),
            file,
            download_name: EXCEL_DOWNLOAD_NAME,
            content_type: XLSX_CONTENT_TYPE,
            item_count: row_count,
        })
    }

    /// Bundle every file in the upload sink into the archive artifact
    pub async fn export_screenshots(&self) -> AppResult<ExportedFile> {
        let _guard = self.export_lock.lock().await;

        let uploads = self.upload_sink.list_uploads().await?;

        let staging = staging_path(&self.archive_path);
        let target = staging.clone();
        let entry_count =
            tokio::task::spawn_blocking(move || write_archive(&uploads, &target)).await??;
        let file = publish(&staging, &self.archive_path).await?;

        info!(
            "🗜️ EXPORT: Archived {} uploads from {} to {}",
            entry_count,
            self.upload_sink.directory().display(),
            self.archive_path.display()
        );

        Ok(ExportedFile {
            path: self.archive_path.clone(),
            file,
            download_name: SCREENSHOTS_DOWNLOAD_NAME,
            content_type: ZIP_CONTENT_TYPE,
            item_count: entry_count,
        })
    }
}

/// `<path>.part`, the file an export is generated into before it is published
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".part");
    path.with_file_name(name)
}

/// Move a finished artifact over `path` and open it for reading
async fn publish(staging: &Path, path: &Path) -> io::Result<tokio::fs::File> {
    tokio::fs::rename(staging, path).await?;
    tokio::fs::File::open(path).await
}

/// Cut `value` to the longest prefix a cell accepts
fn fit_cell(value: &str) -> Option<&str> {
    value
        .char_indices()
        .nth(MAX_CELL_CHARS)
        .map(|(end, _)| &value[..end])
}

/// Write `rows` cell by cell, as text, onto a single sheet.
/// Values longer than [`MAX_CELL_CHARS`] are truncated.
pub fn write_spreadsheet(rows: &[Vec<String>], path: &Path) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (row_index, row) in rows.iter().enumerate() {
        for (column_index, value) in row.iter().enumerate() {
            let text = match fit_cell(value) {
                Some(truncated) => {
                    warn!(
                        "Truncated {}-character value at row {}, column {} to fit a cell",
                        value.chars().count(),
                        row_index,
                        column_index
                    );
                    truncated
                }
                None => value.as_str(),
            };
            worksheet.write_string(row_index as u32, column_index as u16, text)?;
        }
    }

    workbook.save(path)?;
    Ok(())
}

/// Zip `files` at the archive root under their own file names.
/// Returns the number of entries written.
pub fn write_archive(files: &[PathBuf], path: &Path) -> ZipResult<usize> {
    let mut writer = ZipWriter::new(File::create(path)?);
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(9));

    let mut entries = 0;
    for file in files {
        let Some(entry_name) = file.file_name() else {
            continue;
        };
        writer.start_file(entry_name.to_string_lossy().to_string(), options)?;
        let mut source = File::open(file)?;
        io::copy(&mut source, &mut writer)?;
        entries += 1;
    }

    writer.finish()?;
    Ok(entries)
}
