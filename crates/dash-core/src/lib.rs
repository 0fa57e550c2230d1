//! Domain layer for the report dashboard.
//!
//! Holds the data model for report records and chart views, the error
//! taxonomy, timestamp parsing, display formatting, and CLI settings.
//! Nothing in this crate touches the terminal or the filesystem beyond
//! settings persistence.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod timestamp;
