//! # REST API for Registration Intake
//!
//! `POST /api/register` accepts a multipart form of text fields plus at most
//! one `screenshot` file part, and answers `{"success": true}` once the row is
//! stored.

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::post,
    Router,
};
use shared::{form_fields, RegisterResponse};
use tracing::{error, info, warn};

use crate::domain::commands::registration::{SubmitRegistrationCommand, UploadedFile};
use crate::error::{AppError, AppResult};
use crate::AppState;

/// Create a router for registration APIs
pub fn router() -> Router<AppState> {
    Router::new().route("/register", post(register))
}

/// Store one registration submission
pub async fn register(State(state): State<AppState>, multipart: Multipart) -> impl IntoResponse {
    info!("POST /api/register");

    let command = match read_submission(multipart).await {
        Ok(command) => command,
        Err(e) => {
            warn!("Rejected registration submission: {}", e);
            let status = match &e {
                AppError::Multipart(multipart_error) => multipart_error.status(),
                _ => StatusCode::BAD_REQUEST,
            };
            return (status, e.to_string()).into_response();
        }
    };

    match state.registration_service.submit_registration(command).await {
        Ok(_) => (StatusCode::OK, Json(RegisterResponse::ok())).into_response(),
        Err(e) => {
            error!("❌ Failed to store registration: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to store registration").into_response()
        }
    }
}

/// Collect every multipart field into a submission command.
///
/// Unknown text fields are ignored. A file part is only accepted under
/// `screenshot`, and only once.
async fn read_submission(mut multipart: Multipart) -> AppResult<SubmitRegistrationCommand> {
    let mut command = SubmitRegistrationCommand::default();

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if let Some(file_name) = field.file_name().map(str::to_string) {
            if name != form_fields::SCREENSHOT {
                return Err(AppError::InvalidSubmission(format!(
                    "unexpected file field '{}'",
                    name
                )));
            }
            if command.screenshot.is_some() {
                return Err(AppError::InvalidSubmission(
                    "only one screenshot may be uploaded".to_string(),
                ));
            }

            let bytes = field.bytes().await?;
            // Browsers send an empty, unnamed part when no file was chosen
            if !file_name.is_empty() {
                command.screenshot = Some(UploadedFile {
                    file_name,
                    bytes: bytes.to_vec(),
                });
            }
            continue;
        }

        let value = field.text().await?;
        apply_text_field(&mut command, &name, value);
    }

    Ok(command)
}

/// Map one text form field onto the command; the last value wins except for
/// `societies` (or `societies[]`), which accumulates
fn apply_text_field(command: &mut SubmitRegistrationCommand, name: &str, value: String) {
    let slot = match name {
        form_fields::FIRST_NAME => &mut command.first_name,
        form_fields::LAST_NAME => &mut command.last_name,
        form_fields::EMAIL => &mut command.email,
        form_fields::CONTACT => &mut command.contact,
        form_fields::IEEE_ID => &mut command.ieee_id,
        form_fields::MEMBERSHIP_TYPE => &mut command.membership_type,
        form_fields::RENEWAL_PASSWORD => &mut command.renewal_password,
        form_fields::BRANCH => &mut command.branch,
        form_fields::BATCH => &mut command.batch,
        form_fields::YEAR => &mut command.year,
        form_fields::TOTAL_FEE => &mut command.total_fee,
        form_fields::SUBMITTED_AT => &mut command.submitted_at,
        form_fields::SOCIETIES | form_fields::SOCIETIES_ARRAY => {
            command.societies.push(value);
            return;
        }
        _ => return,
    };
    *slot = Some(value);
}
