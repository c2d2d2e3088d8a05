use anyhow::{anyhow, Result};
use async_trait::async_trait;
use csv::{QuoteStyle, ReaderBuilder, Terminator, WriterBuilder};
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::connection::CsvConnection;
use crate::domain::models::registration::Registration;
use crate::storage::traits::RecordStore;

/// CSV-backed registration store
#[derive(Clone)]
pub struct CsvRegistrationRepository {
    connection: CsvConnection,
    /// Serializes appends so the header-once check and the write happen together
    write_lock: Arc<Mutex<()>>,
}

impl CsvRegistrationRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self {
            connection,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Header line: bare field names
    fn encode_header() -> Result<Vec<u8>> {
        encode_line(&Registration::COLUMNS, QuoteStyle::Necessary)
    }

    /// Data line: every value quoted, embedded quotes doubled
    fn encode_registration(registration: &Registration) -> Result<Vec<u8>> {
        encode_line(&registration.to_row(), QuoteStyle::Always)
    }

    /// Split store contents into rows of cells, skipping empty lines.
    ///
    /// Tokenizes whole records rather than lines, so a quoted value may span
    /// lines. An unbalanced `"` in a hand-edited file therefore runs to the
    /// next closing quote.
    pub fn parse_rows(content: &str) -> Result<Vec<Vec<String>>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(content.as_bytes());

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            if record.len() == 1 && record.get(0) == Some("") {
                continue;
            }
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(rows)
    }
}

fn encode_line(fields: &[&str], quote_style: QuoteStyle) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new()
        .quote_style(quote_style)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.write_record(fields)?;
    writer
        .into_inner()
        .map_err(|e| anyhow!("failed to flush CSV line: {}", e))
}

#[async_trait]
impl RecordStore for CsvRegistrationRepository {
    async fn append_registration(&self, registration: &Registration) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let file_path = self.connection.registrations_file_path();
        let is_new = !tokio::fs::try_exists(&file_path).await?;

        let mut buffer = Vec::new();
        if is_new {
            info!("Creating registration store at {}", file_path.display());
            buffer.extend(Self::encode_header()?);
        }
        buffer.extend(Self::encode_registration(registration)?);

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&file_path)
            .await?;
        file.write_all(&buffer).await?;
        file.flush().await?;

        debug!("Appended {} bytes to {}", buffer.len(), file_path.display());
        Ok(())
    }

    async fn read_rows(&self) -> Result<Option<Vec<Vec<String>>>> {
        let file_path = self.connection.registrations_file_path();
        if !tokio::fs::try_exists(&file_path).await? {
            return Ok(None);
        }

        let content = tokio::fs::read_to_string(&file_path).await?;
        Ok(Some(Self::parse_rows(&content)?))
    }
}
