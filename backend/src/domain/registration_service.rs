//! Registration intake.
//!
//! A submission is persisted in two steps: the optional screenshot goes to the
//! upload sink, then one row referencing it is appended to the record store.
//! A failure in either step is returned as-is; nothing already written is
//! rolled back.

use chrono::Utc;
use std::sync::Arc;
use tracing::info;

use crate::domain::commands::registration::{SubmitRegistrationCommand, SubmitRegistrationResult};
use crate::domain::models::registration::Registration;
use crate::error::AppResult;
use crate::storage::{RecordStore, UploadSink};

#[derive(Clone)]
pub struct RegistrationService {
    record_store: Arc<dyn RecordStore>,
    upload_sink: Arc<dyn UploadSink>,
}

impl RegistrationService {
    pub fn new(record_store: Arc<dyn RecordStore>, upload_sink: Arc<dyn UploadSink>) -> Self {
        Self {
            record_store,
            upload_sink,
        }
    }

    /// Store a submission and its screenshot, if any
    pub async fn submit_registration(
        &self,
        command: SubmitRegistrationCommand,
    ) -> AppResult<SubmitRegistrationResult> {
        let stored_screenshot = match &command.screenshot {
            Some(upload) => Some(
                self.upload_sink
                    .store_upload(&upload.file_name, &upload.bytes)
                    .await?,
            ),
            None => None,
        };

        let registration = Self::build_registration(command, stored_screenshot.clone());
        self.record_store.append_registration(&registration).await?;

        info!(
            "📝 Registration stored (screenshot: {})",
            stored_screenshot.as_deref().unwrap_or("none")
        );

        Ok(SubmitRegistrationResult { stored_screenshot })
    }

    /// Merge form fields with the stored upload name, defaulting absent values
    fn build_registration(
        command: SubmitRegistrationCommand,
        stored_screenshot: Option<String>,
    ) -> Registration {
        let submitted_at = command
            .submitted_at
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| Registration::format_submitted_at(Utc::now()));

        Registration {
            first_name: command.first_name.unwrap_or_default(),
            last_name: command.last_name.unwrap_or_default(),
            email: command.email.unwrap_or_default(),
            contact: command.contact.unwrap_or_default(),
            ieee_id: command.ieee_id.unwrap_or_default(),
            membership_type: command.membership_type.unwrap_or_default(),
            renewal_password: command.renewal_password.unwrap_or_default(),
            branch: command.branch.unwrap_or_default(),
            batch: command.batch.unwrap_or_default(),
            year: command.year.unwrap_or_default(),
            societies: Registration::join_societies(&command.societies),
            total_fee: command.total_fee.unwrap_or_default(),
            submitted_at,
            screenshot: stored_screenshot.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::registration::UploadedFile;
    use crate::storage::csv::test_utils::TestEnvironment;
    use chrono::DateTime;

    fn service_for(env: &TestEnvironment) -> RegistrationService {
        RegistrationService::new(env.record_store(), env.upload_sink())
    }

    fn ann_lee() -> SubmitRegistrationCommand {
        SubmitRegistrationCommand {
            first_name: Some("Ann".to_string()),
            last_name: Some("Lee".to_string()),
            email: Some("ann@x.com".to_string()),
            societies: vec!["IEEE".to_string(), "WIE".to_string()],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_submission_without_screenshot() {
        let env = TestEnvironment::new().await.unwrap();
        let service = service_for(&env);

        let result = service.submit_registration(ann_lee()).await.unwrap();
        assert!(result.stored_screenshot.is_none());
        assert!(env.upload_names().is_empty());

        let rows = env.record_store().read_rows().await.unwrap().unwrap();
        assert_eq!(rows.len(), 2);
        let row = &rows[1];
        assert_eq!(row[0], "Ann");
        assert_eq!(row[1], "Lee");
        assert_eq!(row[2], "ann@x.com");
        assert_eq!(row[3], "");
        assert_eq!(row[10], "IEEE,WIE");
        assert_eq!(row[13], "");
    }

    #[tokio::test]
    async fn test_submission_with_screenshot() {
        let env = TestEnvironment::new().await.unwrap();
        let service = service_for(&env);

        let mut command = ann_lee();
        command.screenshot = Some(UploadedFile {
            file_name: "payment.jpg".to_string(),
            bytes: vec![0xff, 0xd8, 0xff],
        });

        let result = service.submit_registration(command).await.unwrap();
        let stored = result.stored_screenshot.unwrap();

        assert_eq!(env.upload_names(), vec![stored.clone()]);
        assert!(stored.ends_with("-payment.jpg"));
        let prefix = stored.trim_end_matches("-payment.jpg");
        assert!(prefix.parse::<i64>().is_ok());

        let rows = env.record_store().read_rows().await.unwrap().unwrap();
        assert_eq!(rows[1][13], stored);
    }

    #[tokio::test]
    async fn test_absent_fields_default_to_empty() {
        let env = TestEnvironment::new().await.unwrap();
        let service = service_for(&env);

        service
            .submit_registration(SubmitRegistrationCommand::default())
            .await
            .unwrap();

        let rows = env.record_store().read_rows().await.unwrap().unwrap();
        let row = &rows[1];
        assert_eq!(row.len(), 14);
        for (index, cell) in row.iter().enumerate() {
            if index != 12 {
                assert_eq!(cell, "", "column {} should be empty", index);
            }
        }
        assert!(DateTime::parse_from_rfc3339(&row[12]).is_ok());
        assert!(row[12].ends_with('Z'));
    }

    #[tokio::test]
    async fn test_submitted_at_is_kept_when_provided() {
        let env = TestEnvironment::new().await.unwrap();
        let service = service_for(&env);

        let mut command = ann_lee();
        command.submitted_at = Some("2025-01-31T23:59:59.000Z".to_string());
        service.submit_registration(command).await.unwrap();

        let rows = env.record_store().read_rows().await.unwrap().unwrap();
        assert_eq!(rows[1][12], "2025-01-31T23:59:59.000Z");
    }

    #[tokio::test]
    async fn test_n_submissions_give_n_plus_one_lines() {
        let env = TestEnvironment::new().await.unwrap();
        let service = service_for(&env);

        for _ in 0..4 {
            service.submit_registration(ann_lee()).await.unwrap();
        }

        let content = env.read_store();
        assert_eq!(content.lines().count(), 5);
        assert_eq!(
            content.lines().filter(|line| line.starts_with("firstName,")).count(),
            1
        );
    }
}
