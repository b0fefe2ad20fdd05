//! Interactive session layer for the Bikeshare Explorer.
//!
//! Collects filter input, drives the analysis session state machine and
//! renders the statistics reports, all over injectable I/O streams.

pub mod prompts;
pub mod report;
pub mod session;

pub use explorer_core as core;
pub use explorer_data as data;
