use chrono::{DateTime, SecondsFormat, Utc};
use shared::form_fields;

/// One row of the registration store.
///
/// Every field is free text; the service fills absent form fields with empty
/// strings, so a stored row always has exactly [`Registration::COLUMNS`] cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Registration {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub contact: String,
    pub ieee_id: String,
    pub membership_type: String,
    pub renewal_password: String,
    pub branch: String,
    pub batch: String,
    pub year: String,
    /// Comma-joined society names, in the order they were submitted
    pub societies: String,
    pub total_fee: String,
    /// ISO-8601 submission timestamp
    pub submitted_at: String,
    /// Generated name of the stored screenshot, empty when none was uploaded
    pub screenshot: String,
}

impl Registration {
    /// Header names, in column order
    pub const COLUMNS: [&'static str; 14] = form_fields::ALL;

    /// Field values in column order
    pub fn to_row(&self) -> [&str; 14] {
        [
            self.first_name.as_str(),
            self.last_name.as_str(),
            self.email.as_str(),
            self.contact.as_str(),
            self.ieee_id.as_str(),
            self.membership_type.as_str(),
            self.renewal_password.as_str(),
            self.branch.as_str(),
            self.batch.as_str(),
            self.year.as_str(),
            self.societies.as_str(),
            self.total_fee.as_str(),
            self.submitted_at.as_str(),
            self.screenshot.as_str(),
        ]
    }

    /// Collapse a multi-value society selection into the stored form
    pub fn join_societies(societies: &[String]) -> String {
        societies.join(",")
    }

    /// Timestamp used when a submission carries no `submittedAt`,
    /// e.g. `2026-10-19T08:15:30.123Z`
    pub fn format_submitted_at(now: DateTime<Utc>) -> String {
        now.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_row_follows_column_order() {
        let registration = Registration {
            first_name: "Ann".to_string(),
            email: "ann@x.com".to_string(),
            screenshot: "1700000000000-pay.png".to_string(),
            ..Default::default()
        };

        let row = registration.to_row();
        assert_eq!(row.len(), Registration::COLUMNS.len());
        assert_eq!(row[0], "Ann");
        assert_eq!(row[2], "ann@x.com");
        assert_eq!(row[1], "");
        assert_eq!(row[13], "1700000000000-pay.png");
    }

    #[test]
    fn test_join_societies_preserves_order() {
        let societies = vec!["WIE".to_string(), "IEEE".to_string(), "CS".to_string()];
        assert_eq!(Registration::join_societies(&societies), "WIE,IEEE,CS");
        assert_eq!(Registration::join_societies(&[]), "");
    }

    #[test]
    fn test_format_submitted_at() {
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 8, 15, 30).unwrap()
            + chrono::Duration::milliseconds(123);
        assert_eq!(
            Registration::format_submitted_at(now),
            "2026-10-19T08:15:30.123Z"
        );
    }
}
