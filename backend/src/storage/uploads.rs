//! # Upload Sink
//!
//! Stores uploaded screenshots as plain files in the `uploads/` directory.
//! Files are never modified or deleted once written.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::path::PathBuf;
use tracing::info;

use crate::storage::csv::CsvConnection;
use crate::storage::traits::UploadSink;

/// Upload sink backed by a flat directory
#[derive(Debug, Clone)]
pub struct UploadDirectoryRepository {
    connection: CsvConnection,
}

impl UploadDirectoryRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    /// Build the stored name `<millis>-<original name>`.
    ///
    /// Only the last path component of the client-supplied name is kept, so
    /// uploads always land directly inside the sink. Two uploads of the same
    /// name within the same millisecond collide.
    pub fn generate_stored_name(original_name: &str, now_millis: i64) -> String {
        let base_name = original_name
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(original_name);
        format!("{}-{}", now_millis, base_name)
    }
}

#[async_trait]
impl UploadSink for UploadDirectoryRepository {
    async fn store_upload(&self, original_name: &str, bytes: &[u8]) -> Result<String> {
        let directory = self.connection.uploads_directory();
        tokio::fs::create_dir_all(&directory)
            .await
            .with_context(|| format!("failed to create {}", directory.display()))?;

        let stored_name = Self::generate_stored_name(original_name, Utc::now().timestamp_millis());
        let path = directory.join(&stored_name);
        tokio::fs::write(&path, bytes)
            .await
            .with_context(|| format!("failed to write upload {}", path.display()))?;

        info!("Stored upload '{}' ({} bytes)", stored_name, bytes.len());
        Ok(stored_name)
    }

    async fn list_uploads(&self) -> Result<Vec<PathBuf>> {
        let directory = self.connection.uploads_directory();
        if !tokio::fs::try_exists(&directory).await? {
            return Ok(Vec::new());
        }

        let mut entries = tokio::fs::read_dir(&directory).await?;
        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_file() {
                files.push(entry.path());
            }
        }
        files.sort();

        Ok(files)
    }

    fn directory(&self) -> PathBuf {
        self.connection.uploads_directory()
    }
}
