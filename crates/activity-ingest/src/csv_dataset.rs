//! CSV loading into [`RawDataset`]s.
//!
//! The first record is the header. Header names and cells are trimmed and
//! stripped of byte-order marks. Lines where every cell is blank are dropped,
//! short rows read their missing trailing cells as absent, and cells past the
//! last header column are ignored.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info};

use activity_model::{CellValue, RawDataset, RawRow};

use crate::error::{IngestError, Result};

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn normalize_cell(raw: &str) -> &str {
    raw.trim().trim_matches('\u{feff}')
}

/// Header names with repeats suffixed `.1`, `.2`, ... so every column stays
/// addressable.
fn unique_headers(record: &StringRecord) -> Vec<String> {
    let mut headers: Vec<String> = Vec::with_capacity(record.len());
    for raw in record {
        let base = normalize_header(raw);
        let mut name = base.clone();
        let mut suffix = 0;
        while headers.contains(&name) {
            suffix += 1;
            name = format!("{base}.{suffix}");
        }
        headers.push(name);
    }
    headers
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|cell| normalize_cell(cell).is_empty())
}

/// Reads a CSV file.
pub fn read_csv_dataset(path: &Path) -> Result<RawDataset> {
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let file = File::open(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let dataset = read_csv_dataset_from_reader(file, &path.display().to_string())?;
    info!(path = %path.display(), rows = dataset.len(), "read CSV file");
    Ok(dataset)
}

/// Reads CSV from any reader; `origin` names the source in errors and logs.
pub fn read_csv_dataset_from_reader<R: Read>(reader: R, origin: &str) -> Result<RawDataset> {
    let csv_error = |source| IngestError::CsvParse {
        origin: origin.to_string(),
        source,
    };
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut records = reader.records();
    let header = loop {
        match records.next() {
            None => {
                return Err(IngestError::EmptyCsv {
                    origin: origin.to_string(),
                });
            }
            Some(record) => {
                let record = record.map_err(csv_error)?;
                if !is_blank(&record) {
                    break record;
                }
            }
        }
    };

    let columns = unique_headers(&header);
    let mut dataset = RawDataset::new(columns.clone());
    for record in records {
        let record = record.map_err(csv_error)?;
        if is_blank(&record) {
            continue;
        }
        if record.len() > columns.len() {
            debug!(
                origin,
                extra = record.len() - columns.len(),
                "ignoring cells past the last header column"
            );
        }
        let mut row = RawRow::new();
        for (column, raw) in columns.iter().zip(record.iter()) {
            row.set(column, CellValue::from_raw(normalize_cell(raw)));
        }
        dataset.push_row(row);
    }
    debug!(origin, columns = ?dataset.columns, rows = dataset.len(), "parsed CSV");
    Ok(dataset)
}
