//! # IO Module
//!
//! Interface layer between HTTP clients and the domain services.
//!
//! ## Supported Operations
//!
//! - **POST /api/register**: multipart registration intake
//! - **GET /api/download/excel**: spreadsheet of every stored registration
//! - **GET /api/download/screenshots**: zip of every uploaded screenshot
//!
//! Anything else falls through to static file serving (see [`crate::create_router`]).

pub mod rest;

pub use rest::*;
