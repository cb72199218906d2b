//! Shared types for the job aggregator: the record model, the search query
//! builder, process configuration and the error type every stage returns.

mod config;
mod error;
mod query;

pub use config::{AppConfig, DEFAULT_SERVICE_ACCOUNT_FILE, DEFAULT_SPREADSHEET_NAME};
pub use error::{AggregatorError, Result};
pub use query::{build_query, DEFAULT_DOMAINS, DEFAULT_KEYWORDS};

use serde::{Deserialize, Serialize};

/// A single job posting as returned by one organic search hit.
///
/// Nothing is validated: a hit without a title or link keeps `None`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct JobRecord {
    pub title: Option<String>,
    pub link: Option<String>,
    #[serde(default)]
    pub snippet: String,
}

/// One spreadsheet row: `[timestamp, title, link, snippet]`.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct SheetRow {
    pub timestamp: String,
    pub title: String,
    pub link: String,
    pub snippet: String,
}

impl SheetRow {
    /// Builds the row for `record`, stamping it with the run's `timestamp`.
    /// Absent fields become empty cells.
    pub fn from_record(timestamp: &str, record: &JobRecord) -> Self {
        Self {
            timestamp: timestamp.to_string(),
            title: record.title.clone().unwrap_or_default(),
            link: record.link.clone().unwrap_or_default(),
            snippet: record.snippet.clone(),
        }
    }

    /// Cell values in column order.
    pub fn into_cells(self) -> Vec<String> {
        vec![self.timestamp, self.title, self.link, self.snippet]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_record_missing_snippet_defaults_to_empty() {
        let record: JobRecord =
            serde_json::from_str(r#"{"title": "Chief of Staff", "link": "https://jobs.lever.co/x"}"#)
                .unwrap();
        assert_eq!(record.snippet, "");
        assert_eq!(record.title.as_deref(), Some("Chief of Staff"));
    }

    #[test]
    fn test_job_record_missing_title_and_link_are_none() {
        let record: JobRecord = serde_json::from_str(r#"{"snippet": "Remote"}"#).unwrap();
        assert_eq!(record.title, None);
        assert_eq!(record.link, None);
    }

    #[test]
    fn test_sheet_row_column_order() {
        let record = JobRecord {
            title: Some("Strategy Analyst".to_string()),
            link: Some("https://jobs.ashbyhq.com/acme/1".to_string()),
            snippet: "NYC".to_string(),
        };
        let cells = SheetRow::from_record("2026-10-18T09:00:00.000000Z", &record).into_cells();
        assert_eq!(
            cells,
            vec![
                "2026-10-18T09:00:00.000000Z",
                "Strategy Analyst",
                "https://jobs.ashbyhq.com/acme/1",
                "NYC"
            ]
        );
    }

    #[test]
    fn test_sheet_row_absent_fields_are_empty_cells() {
        let row = SheetRow::from_record("ts", &JobRecord::default());
        assert_eq!(row.title, "");
        assert_eq!(row.link, "");
        assert_eq!(row.snippet, "");
    }
}
