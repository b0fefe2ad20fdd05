//! Data layer for the Bikeshare Explorer.
//!
//! Responsible for resolving city CSV sources, reading and filtering trip
//! records, computing the four statistics aggregations and paging raw rows.

pub mod pager;
pub mod reader;
pub mod sources;
pub mod stats;

pub use explorer_core as core;
