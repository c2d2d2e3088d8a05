//! # Storage Module
//!
//! Handles all data persistence for the registration intake service.
//!
//! Two pieces of process-wide state live on disk, both re-opened on every
//! operation with no in-memory cache:
//!
//! - **Record store**: `data.csv`, one quoted line per registration under a
//!   header line written once when the file is created
//! - **Upload sink**: `uploads/`, holding screenshots under generated
//!   `<millis>-<original name>` file names
//!
//! Domain services only see the [`RecordStore`] and [`UploadSink`] traits, so
//! the flat-file backends here can be swapped without touching handler logic.

pub mod csv;
pub mod traits;
pub mod uploads;

pub use self::csv::{CsvConnection, CsvRegistrationRepository};
pub use traits::{RecordStore, UploadSink};
pub use uploads::UploadDirectoryRepository;
