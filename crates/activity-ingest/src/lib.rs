//! Activity sheet ingestion.
//!
//! Loads raw rows from a local CSV file or from the CSV export of one or more
//! spreadsheet tabs:
//!
//! - [`read_csv_dataset`] / [`read_csv_dataset_from_reader`]
//! - [`SheetRef`] and [`Tab`] for locating tab exports
//! - [`SheetClient`] for downloading them and [`combine_tabs`] for merging

mod csv_dataset;
mod error;
pub mod fetch;
pub mod sheets;

pub use csv_dataset::{read_csv_dataset, read_csv_dataset_from_reader};
pub use error::{IngestError, Result};
pub use fetch::{SheetClient, TabRequest, combine_tabs};
pub use sheets::{FIRST_TAB_GID, SheetRef, Tab};
