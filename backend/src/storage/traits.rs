//! # Storage Traits
//!
//! Storage abstractions the domain layer depends on, so the flat-file
//! implementations can be replaced by another backing medium.

use std::path::PathBuf;

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::registration::Registration;

/// Append-only store of registration rows
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Append one registration, writing the header first if the store is new
    async fn append_registration(&self, registration: &Registration) -> Result<()>;

    /// Read every row, header included, in stored order.
    /// Returns `None` when the store does not exist yet.
    async fn read_rows(&self) -> Result<Option<Vec<Vec<String>>>>;
}

/// Directory receiving uploaded attachments
#[async_trait]
pub trait UploadSink: Send + Sync {
    /// Store an attachment and return the generated file name it was saved under
    async fn store_upload(&self, original_name: &str, bytes: &[u8]) -> Result<String>;

    /// Every regular file currently in the sink, sorted by file name
    async fn list_uploads(&self) -> Result<Vec<PathBuf>>;

    /// Location of the sink on disk
    fn directory(&self) -> PathBuf;
}
