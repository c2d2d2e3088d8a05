use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Name of the registration store inside the data directory
pub const REGISTRATIONS_FILE_NAME: &str = "data.csv";

/// Name of the upload sink inside the data directory
pub const UPLOADS_DIRECTORY_NAME: &str = "uploads";

/// CsvConnection resolves every on-disk location under one data directory
#[derive(Debug, Clone)]
pub struct CsvConnection {
    base_directory: PathBuf,
}

impl CsvConnection {
    /// Create a new CSV connection rooted at `base_directory`.
    ///
    /// The base directory and the upload sink are created if missing; the
    /// registration store is only created by the first append.
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path).with_context(|| {
                format!("failed to create data directory {}", base_path.display())
            })?;
        }

        let connection = Self {
            base_directory: base_path,
        };

        let uploads = connection.uploads_directory();
        if !uploads.exists() {
            info!("Creating upload directory at {}", uploads.display());
            fs::create_dir_all(&uploads).with_context(|| {
                format!("failed to create upload directory {}", uploads.display())
            })?;
        }

        Ok(connection)
    }

    /// Get the base directory path
    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Get the file path of the registration store
    pub fn registrations_file_path(&self) -> PathBuf {
        self.base_directory.join(REGISTRATIONS_FILE_NAME)
    }

    /// Get the directory holding uploaded screenshots
    pub fn uploads_directory(&self) -> PathBuf {
        self.base_directory.join(UPLOADS_DIRECTORY_NAME)
    }

    /// Get the path a generated export artifact is written to.
    /// Each export overwrites the previous artifact of the same name.
    pub fn export_file_path(&self, file_name: &str) -> PathBuf {
        self.base_directory.join(file_name)
    }
}
