//! Core domain layer for the Bikeshare Explorer.
//!
//! Holds the trip-record and filter models, the shared error type, timestamp
//! parsing, display formatting helpers and CLI settings.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod timestamps;
