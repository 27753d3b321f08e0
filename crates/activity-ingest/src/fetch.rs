//! Downloading spreadsheet tabs as CSV and combining them.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;
use tracing::{debug, info, warn};

use activity_model::{RawDataset, columns};

use crate::csv_dataset::read_csv_dataset_from_reader;
use crate::error::{IngestError, Result};
use crate::sheets::{SheetRef, Tab};

/// HTTP request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// One tab to read, with an optional explicit GID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabRequest {
    pub tab: Tab,
    pub gid: Option<String>,
}

impl TabRequest {
    pub fn new(tab: Tab, gid: Option<String>) -> Self {
        Self { tab, gid }
    }
}

/// Blocking client for sheet CSV exports.
pub struct SheetClient {
    client: Client,
}

impl SheetClient {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|source| IngestError::ClientBuild { source })?;
        Ok(Self { client })
    }

    /// Downloads `url` and parses the body as CSV.
    pub fn fetch_csv(&self, url: &str) -> Result<RawDataset> {
        debug!(url, "requesting CSV export");
        let http_error = |source| IngestError::Http {
            url: url.to_string(),
            source,
        };
        let response = self
            .client
            .get(url)
            .header(
                USER_AGENT,
                format!("activity-sheets/{}", env!("CARGO_PKG_VERSION")),
            )
            .send()
            .map_err(http_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(IngestError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let body = response.bytes().map_err(http_error)?;
        read_csv_dataset_from_reader(body.as_ref(), url)
    }

    /// Reads one tab of `sheet`.
    pub fn fetch_tab(&self, sheet: &SheetRef, request: &TabRequest) -> Result<RawDataset> {
        let gid = request.tab.resolve_gid(request.gid.as_deref(), sheet);
        let dataset = self.fetch_csv(&sheet.export_url(&gid))?;
        info!(tab = %request.tab, gid = %gid, rows = dataset.len(), "read tab");
        Ok(dataset)
    }

    /// Reads each requested tab and combines the ones that succeeded.
    ///
    /// A failing tab is logged and left out; the call fails only when no tab
    /// could be read.
    pub fn fetch_tabs(&self, sheet: &SheetRef, requests: &[TabRequest]) -> Result<RawDataset> {
        let mut tabs = Vec::with_capacity(requests.len());
        for request in requests {
            match self.fetch_tab(sheet, request) {
                Ok(dataset) => tabs.push((request.tab, dataset)),
                Err(error) => warn!(tab = %request.tab, %error, "could not read tab"),
            }
        }
        if tabs.is_empty() {
            return Err(IngestError::NoTabsRead {
                sheet_id: sheet.id.clone(),
            });
        }
        Ok(combine_tabs(tabs))
    }
}

/// Concatenates tab datasets in the order given.
///
/// Rows of the Financial and Quotes tabs get their `type` forced to the tab's
/// kind. Columns are the ordered union across tabs.
pub fn combine_tabs(tabs: Vec<(Tab, RawDataset)>) -> RawDataset {
    let tab_count = tabs.len();
    let mut combined = RawDataset::default();
    for (tab, mut dataset) in tabs {
        if let Some(kind) = tab.forced_type() {
            dataset.set_column(columns::TYPE, kind.as_str());
            debug!(%tab, activity_type = %kind, "forced activity type for tab");
        }
        combined.append(dataset);
    }
    info!(rows = combined.len(), tabs = tab_count, "combined tabs");
    combined
}

#[cfg(test)]
mod tests {
    use super::*;

    use activity_model::RawRow;

    fn dataset(columns: &[&str], rows: Vec<RawRow>) -> RawDataset {
        RawDataset::with_rows(columns.iter().map(|c| (*c).to_string()).collect(), rows)
    }

    #[test]
    fn forces_types_and_unions_columns() {
        let experiences = dataset(
            &["name", "category"],
            vec![RawRow::new().with("name", "Hike").with("category", "nature")],
        );
        let financial = dataset(
            &["name", "category", "amount", "type"],
            vec![
                RawRow::new()
                    .with("name", "Rent")
                    .with("category", "housing")
                    .with("amount", "900")
                    .with("type", "experiential"),
            ],
        );
        let quotes = dataset(
            &["name", "category", "description"],
            vec![RawRow::new().with("name", "Wisdom").with("category", "reflection")],
        );

        let combined = combine_tabs(vec![
            (Tab::Experiences, experiences),
            (Tab::Financial, financial),
            (Tab::Quotes, quotes),
        ]);

        assert_eq!(
            combined.columns,
            vec!["name", "category", "amount", "type", "description"]
        );
        assert_eq!(combined.len(), 3);
        assert_eq!(combined.rows[0].text("type"), None);
        assert_eq!(combined.rows[1].text("type").as_deref(), Some("financial"));
        assert_eq!(combined.rows[2].text("type").as_deref(), Some("quote"));
    }

    #[test]
    fn empty_tab_still_contributes_columns() {
        let combined = combine_tabs(vec![(Tab::Quotes, dataset(&["name", "author"], Vec::new()))]);
        assert!(combined.is_empty());
        assert_eq!(combined.columns, vec!["name", "author", "type"]);
    }
}
