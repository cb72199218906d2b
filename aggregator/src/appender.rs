use chrono::{DateTime, SecondsFormat, Utc};
use common::{JobRecord, Result, SheetRow};
use tracing::debug;

use crate::sheets::SheetSink;

/// RFC 3339 UTC with microseconds, e.g. `2026-10-18T09:00:00.123456Z`.
pub fn run_timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Writes one row per record, all stamped with the same run timestamp.
/// An empty slice makes no call at all. Returns the number of rows written.
pub async fn append_job_results(sheet: &dyn SheetSink, results: &[JobRecord]) -> Result<usize> {
    let timestamp = run_timestamp(Utc::now());
    let rows: Vec<SheetRow> = results
        .iter()
        .map(|job| SheetRow::from_record(&timestamp, job))
        .collect();

    if rows.is_empty() {
        debug!("No rows to append to Google Sheet");
        return Ok(0);
    }

    let count = rows.len();
    debug!(rows = count, "Appending rows to Google Sheet");
    sheet.append_rows(rows).await?;
    Ok(count)
}
