//! Spreadsheet references, tabs, and CSV export URLs.

use std::fmt;

use activity_model::ActivityType;

use crate::error::{IngestError, Result};

const EXPORT_BASE_URL: &str = "https://docs.google.com/spreadsheets/d";

/// GID of the first tab of a spreadsheet.
pub const FIRST_TAB_GID: &str = "0";

/// A spreadsheet, identified by id, plus the tab the URL pointed at (if any).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRef {
    pub id: String,
    /// `#gid=` fragment of the source URL.
    pub url_gid: Option<String>,
}

impl SheetRef {
    /// Accepts a full sheet URL (`.../spreadsheets/d/<id>/edit#gid=<gid>`) or
    /// a bare sheet id.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let invalid = || IngestError::InvalidSheetRef {
            input: input.to_string(),
        };

        let (location, fragment) = match trimmed.split_once('#') {
            Some((location, fragment)) => (location, Some(fragment)),
            None => (trimmed, None),
        };
        let id = match location.split_once("/d/") {
            Some((_, rest)) => rest.split(['/', '?']).next().unwrap_or_default(),
            None if location.contains('/') => return Err(invalid()),
            None => location,
        };
        if id.is_empty() {
            return Err(invalid());
        }

        let url_gid = fragment
            .and_then(|fragment| fragment.split('&').find_map(|part| part.strip_prefix("gid=")))
            .filter(|gid| !gid.is_empty())
            .map(str::to_string);
        Ok(Self {
            id: id.to_string(),
            url_gid,
        })
    }

    /// CSV export URL for one tab.
    pub fn export_url(&self, gid: &str) -> String {
        format!("{EXPORT_BASE_URL}/{}/export?format=csv&gid={gid}", self.id)
    }
}

/// Tabs a sheet may carry, in the order they are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tab {
    Experiences,
    Financial,
    Quotes,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Experiences, Tab::Financial, Tab::Quotes];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Experiences => "Experiences",
            Self::Financial => "Financial",
            Self::Quotes => "Quotes",
        }
    }

    /// Type stamped on every row of this tab, overriding the `type` column.
    pub const fn forced_type(self) -> Option<ActivityType> {
        match self {
            Self::Experiences => None,
            Self::Financial => Some(ActivityType::Financial),
            Self::Quotes => Some(ActivityType::Quote),
        }
    }

    /// GID to export: an explicit one wins, then the first tab for
    /// Experiences, then the URL's `#gid=`, then the first tab.
    pub fn resolve_gid(self, explicit: Option<&str>, sheet: &SheetRef) -> String {
        if let Some(gid) = explicit.map(str::trim).filter(|gid| !gid.is_empty()) {
            return gid.to_string();
        }
        if self == Self::Experiences {
            return FIRST_TAB_GID.to_string();
        }
        sheet
            .url_gid
            .clone()
            .unwrap_or_else(|| FIRST_TAB_GID.to_string())
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
