//! Data layer for the report dashboard.
//!
//! Responsible for validating and parsing an uploaded CSV of report records,
//! running the cleaning pipeline, and computing the nine chart views the UI
//! can request.

pub mod charts;
pub mod clean;
pub mod ingest;
pub mod table;

pub use dash_core as core;
