//! Test utilities for storage-backed tests
//!
//! Each environment owns a temporary data directory that is removed when the
//! environment is dropped, even if the test panics.
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use tempfile::TempDir;

use super::connection::CsvConnection;
use super::registration_repository::CsvRegistrationRepository;
use crate::storage::uploads::UploadDirectoryRepository;
use crate::storage::{RecordStore, UploadSink};

/// RAII test environment around a temporary data directory
pub struct TestEnvironment {
    /// Kept alive so the directory survives until drop
    _temp_dir: TempDir,
    pub connection: CsvConnection,
    pub base_path: PathBuf,
}

impl TestEnvironment {
    pub async fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let base_path = temp_dir.path().to_path_buf();
        let connection = CsvConnection::new(&base_path)?;

        Ok(TestEnvironment {
            _temp_dir: temp_dir,
            connection,
            base_path,
        })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_path
    }

    /// Record store backed by this environment's `data.csv`
    pub fn record_store(&self) -> Arc<dyn RecordStore> {
        Arc::new(CsvRegistrationRepository::new(self.connection.clone()))
    }

    /// Upload sink backed by this environment's `uploads/`
    pub fn upload_sink(&self) -> Arc<dyn UploadSink> {
        Arc::new(UploadDirectoryRepository::new(self.connection.clone()))
    }

    /// Raw contents of the registration store
    pub fn read_store(&self) -> String {
        std::fs::read_to_string(self.connection.registrations_file_path()).unwrap_or_default()
    }

    /// File names currently in the upload sink, sorted
    pub fn upload_names(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.connection.uploads_directory())
            .map(|entries| {
                entries
                    .filter_map(|entry| entry.ok())
                    .map(|entry| entry.file_name().to_string_lossy().to_string())
                    .collect()
            })
            .unwrap_or_default();
        names.sort();
        names
    }
}
