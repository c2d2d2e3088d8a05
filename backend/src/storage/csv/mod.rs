//! # CSV Storage Module
//!
//! Flat-file implementation of the registration record store.
//!
//! ## Features
//!
//! - Single `data.csv` under the configured data directory
//! - Header line written once, when the file is first created
//! - Every data field quoted; embedded quotes doubled per RFC 4180
//! - Appends serialized in-process so concurrent submissions never interleave
//!
//! ## File Format
//!
//! ```csv
//! firstName,lastName,email,contact,ieeeId,...,submittedAt,screenshot
//! "Ann","Lee","ann@x.com","","",...,"2026-10-19T08:15:30.123Z",""
//! ```

pub mod connection;
pub mod registration_repository;

#[cfg(test)]
pub mod test_utils;

pub use connection::CsvConnection;
pub use registration_repository::CsvRegistrationRepository;
