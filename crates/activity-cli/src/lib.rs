//! Library components of the `activity-sheets` command-line converter.

pub mod config;
pub mod logging;
pub mod output;
pub mod summary;
pub mod types;
