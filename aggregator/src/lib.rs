//! SerpAPI job search and Google Sheets append pipeline.
//!
//! [`JobAggregator::run_job_aggregation`] is the entry point: it builds the
//! query, fetches one page of results from the past day, and appends them to
//! the first sheet of the configured spreadsheet.

pub mod appender;
pub mod pipeline;
pub mod search;
pub mod sheets;

pub use appender::append_job_results;
pub use pipeline::JobAggregator;
pub use search::{JobSearch, SerpApiClient};
pub use sheets::{GoogleSheets, SheetOpener, SheetSink};
