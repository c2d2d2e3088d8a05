use serde::{Deserialize, Serialize};

/// Multipart form field names accepted by `POST /api/register`.
///
/// The same names, in the same order, make up the header line of the
/// registration store.
pub mod form_fields {
    pub const FIRST_NAME: &str = "firstName";
    pub const LAST_NAME: &str = "lastName";
    pub const EMAIL: &str = "email";
    pub const CONTACT: &str = "contact";
    pub const IEEE_ID: &str = "ieeeId";
    pub const MEMBERSHIP_TYPE: &str = "membershipType";
    pub const RENEWAL_PASSWORD: &str = "renewalPassword";
    pub const BRANCH: &str = "branch";
    pub const BATCH: &str = "batch";
    pub const YEAR: &str = "year";
    /// Repeatable; every value is kept in submission order
    pub const SOCIETIES: &str = "societies";
    /// Array-style spelling of [`SOCIETIES`] sent by some form libraries
    pub const SOCIETIES_ARRAY: &str = "societies[]";
    pub const TOTAL_FEE: &str = "totalFee";
    /// ISO-8601 timestamp; the server fills in the current time when absent
    pub const SUBMITTED_AT: &str = "submittedAt";
    /// File part carrying the payment screenshot
    pub const SCREENSHOT: &str = "screenshot";

    /// Every column of a registration row, in storage order
    pub const ALL: [&str; 14] = [
        FIRST_NAME,
        LAST_NAME,
        EMAIL,
        CONTACT,
        IEEE_ID,
        MEMBERSHIP_TYPE,
        RENEWAL_PASSWORD,
        BRANCH,
        BATCH,
        YEAR,
        SOCIETIES,
        TOTAL_FEE,
        SUBMITTED_AT,
        SCREENSHOT,
    ];
}

/// File name offered to the browser for the spreadsheet export
pub const EXCEL_DOWNLOAD_NAME: &str = "registrations.xlsx";

/// File name offered to the browser for the screenshot archive
pub const SCREENSHOTS_DOWNLOAD_NAME: &str = "screenshots.zip";

/// Acknowledgement returned by `POST /api/register`.
///
/// Intake never echoes the stored record back; a successful submission always
/// produces the same body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub success: bool,
}

impl RegisterResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// JSON body sent when an export fails on the server side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_response_shape() {
        let body = serde_json::to_value(RegisterResponse::ok()).unwrap();
        assert_eq!(body, serde_json::json!({ "success": true }));
    }

    #[test]
    fn test_error_response_shape() {
        let body = serde_json::to_value(ErrorResponse {
            error: "disk full".to_string(),
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "error": "disk full" }));
    }

    #[test]
    fn test_form_field_order() {
        assert_eq!(form_fields::ALL.first(), Some(&"firstName"));
        assert_eq!(form_fields::ALL[10], form_fields::SOCIETIES);
        assert_eq!(form_fields::ALL.last(), Some(&"screenshot"));
    }
}
