//! Error types for activity sheet ingestion.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading raw activity data.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// CSV file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === CSV Parsing Errors ===
    /// Malformed CSV.
    #[error("failed to parse CSV {origin}: {source}")]
    CsvParse {
        origin: String,
        #[source]
        source: csv::Error,
    },

    /// CSV has no header row.
    #[error("CSV is empty: {origin}")]
    EmptyCsv { origin: String },

    // === Spreadsheet Errors ===
    /// HTTP client could not be set up.
    #[error("failed to build HTTP client: {source}")]
    ClientBuild {
        #[source]
        source: reqwest::Error,
    },

    /// Sheet reference has no usable id.
    #[error("could not find a sheet id in '{input}'")]
    InvalidSheetRef { input: String },

    /// Request could not be sent or its body could not be read.
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Export endpoint answered with a non-success status.
    #[error("{url} returned HTTP {status}; make sure the sheet is publicly readable and the tab exists")]
    HttpStatus { url: String, status: u16 },

    /// Every requested tab failed.
    #[error("no tabs could be read from sheet {sheet_id}")]
    NoTabsRead { sheet_id: String },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
