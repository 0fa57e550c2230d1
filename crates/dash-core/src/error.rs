use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while accepting an uploaded file, before any chart work.
///
/// Both variants are terminal for the session: processing stops and the
/// message is shown, no partial chart is attempted.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// The declared filename did not match the single expected literal name.
    #[error("Please upload only {expected:?} (got {actual:?})")]
    WrongFile {
        expected: &'static str,
        actual: String,
    },

    /// The byte stream was not well-formed CSV.
    #[error("Failed to parse CSV: {0}")]
    ParseFailure(#[from] csv::Error),
}

/// Errors raised by an individual chart builder.
///
/// Terminal for the selected chart only; other selections stay available.
#[derive(Error, Debug)]
pub enum ChartError {
    /// A column the builder needs is absent from the uploaded schema.
    #[error("Column {0:?} is missing from the dataset")]
    MissingColumn(String),
}

/// All errors produced by the report dashboard.
#[derive(Error, Debug)]
pub enum DashError {
    /// Upload validation failed (wrong name or malformed CSV).
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A chart builder could not run against the uploaded schema.
    #[error(transparent)]
    Chart(#[from] ChartError),

    /// The input file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An error originating from the terminal / TUI layer.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the dashboard crates.
pub type Result<T> = std::result::Result<T, DashError>;
