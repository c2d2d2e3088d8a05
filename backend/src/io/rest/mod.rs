//! # REST API Interface Layer
//!
//! HTTP endpoints for the registration intake service. Handlers translate
//! multipart bodies into domain commands and domain errors into status codes;
//! they carry no business logic of their own.
//!
//! | Domain error | Response |
//! |---|---|
//! | `InvalidSubmission` | 400, plain-text message |
//! | `Multipart` | the multipart error's own status (413 over the body limit, else 400) |
//! | `NoRecords` | 404, `No data found` |
//! | any failure of the screenshot export | 500, JSON `{"error": ...}` |
//! | anything else | 500, plain-text message |

pub mod export_apis;
pub mod registration_apis;

#[cfg(test)]
pub(crate) mod test_support;
