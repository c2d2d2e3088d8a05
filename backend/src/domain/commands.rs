//! Domain-level command and result types.
//! These are used by services inside the domain layer and are **not** exposed
//! over the public API. The REST layer maps multipart submissions and
//! downloads onto them.

pub mod registration {
    use std::fmt;

    /// Binary attachment received with a submission
    #[derive(Clone)]
    pub struct UploadedFile {
        /// File name as sent by the client
        pub file_name: String,
        pub bytes: Vec<u8>,
    }

    impl fmt::Debug for UploadedFile {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.debug_struct("UploadedFile")
                .field("file_name", &self.file_name)
                .field("len", &self.bytes.len())
                .finish()
        }
    }

    /// A registration submission. `None` means the form field was absent.
    #[derive(Debug, Clone, Default)]
    pub struct SubmitRegistrationCommand {
        pub first_name: Option<String>,
        pub last_name: Option<String>,
        pub email: Option<String>,
        pub contact: Option<String>,
        pub ieee_id: Option<String>,
        pub membership_type: Option<String>,
        pub renewal_password: Option<String>,
        pub branch: Option<String>,
        pub batch: Option<String>,
        pub year: Option<String>,
        /// Every submitted society value, in submission order
        pub societies: Vec<String>,
        pub total_fee: Option<String>,
        pub submitted_at: Option<String>,
        pub screenshot: Option<UploadedFile>,
    }

    /// Outcome of a stored submission
    #[derive(Debug, Clone)]
    pub struct SubmitRegistrationResult {
        /// Generated upload name, when a screenshot was stored
        pub stored_screenshot: Option<String>,
    }
}

pub mod export {
    use std::path::PathBuf;

    /// A generated download artifact
    #[derive(Debug)]
    pub struct ExportedFile {
        /// Where the artifact was written; replaced by the next export
        pub path: PathBuf,
        /// Handle opened on this export's artifact. It keeps reading the same
        /// bytes even after a later export replaces `path`.
        pub file: tokio::fs::File,
        /// File name offered to the browser
        pub download_name: &'static str,
        pub content_type: &'static str,
        /// Spreadsheet rows or archive entries written
        pub item_count: usize,
    }
}
