//! # Domain Module
//!
//! Business logic for registration intake and export.
//!
//! ## Module Organization
//!
//! - **registration_service**: turns a submission into a stored row, saving the
//!   optional screenshot to the upload sink first
//! - **export_service**: builds the spreadsheet and screenshot-archive downloads
//!   from the current store and sink contents
//! - **commands**: internal command/result types the REST layer maps onto
//! - **models**: the registration row itself
//!
//! ## Business Rules
//!
//! - Absent text fields are stored as empty strings; nothing is rejected
//! - Society selections are comma-joined in submission order
//! - A missing submission timestamp defaults to the current UTC time
//! - Exports always reflect the files as they are at request time

pub mod commands;
pub mod export_service;
pub mod models;
pub mod registration_service;

pub use commands::*;
pub use export_service::*;
pub use registration_service::*;
