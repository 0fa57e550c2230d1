//! Terminal UI layer for the report metadata dashboard.
//!
//! Provides themes, the chart views for every menu selection, the raw-table
//! preview, and the main application event loop built on top of [`ratatui`]
//! for exploring report metadata in the terminal.

pub mod app;
pub mod chart_view;
pub mod table_view;
pub mod themes;

pub use dash_core as core;
