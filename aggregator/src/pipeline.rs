use std::sync::Arc;

use common::{build_query, AppConfig, JobRecord, Result};
use tracing::info;

use crate::appender::append_job_results;
use crate::search::{JobSearch, SerpApiClient};
use crate::sheets::{GoogleSheets, SheetOpener};

/// Search → append, once per call. Holds no state between runs.
#[derive(Clone)]
pub struct JobAggregator {
    search: Arc<dyn JobSearch>,
    sheets: Arc<dyn SheetOpener>,
    domains: Vec<String>,
    keywords: Vec<String>,
}

impl JobAggregator {
    pub fn new(
        search: Arc<dyn JobSearch>,
        sheets: Arc<dyn SheetOpener>,
        domains: Vec<String>,
        keywords: Vec<String>,
    ) -> Self {
        Self {
            search,
            sheets,
            domains,
            keywords,
        }
    }

    /// Wires the SerpAPI client and Google Sheets from the process config.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            Arc::new(SerpApiClient::new(config.serpapi_key.clone())),
            Arc::new(GoogleSheets::from_config(config)),
            config.domains.clone(),
            config.keywords.clone(),
        )
    }

    /// Runs one aggregation and returns what the search found, even when
    /// nothing was written. The sheet is only opened if there are results.
    /// Rows are appended as-is: repeated runs append duplicates.
    pub async fn run_job_aggregation(&self) -> Result<Vec<JobRecord>> {
        let query = build_query(&self.domains, &self.keywords);
        let results = self.search.search_jobs(&query).await?;

        if !results.is_empty() {
            let sheet = self.sheets.open_sheet().await?;
            append_job_results(sheet.as_ref(), &results).await?;
        }

        info!(jobs_fetched = results.len(), "Job aggregation run complete");
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheets::SheetSink;
    use async_trait::async_trait;
    use common::{AggregatorError, SheetRow};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct FixedSearch {
        results: Vec<JobRecord>,
        queries: Mutex<Vec<String>>,
    }

    impl FixedSearch {
        fn new(results: Vec<JobRecord>) -> Self {
            Self {
                results,
                queries: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl JobSearch for FixedSearch {
        async fn search_jobs(&self, query: &str) -> Result<Vec<JobRecord>> {
            self.queries.lock().unwrap().push(query.to_string());
            Ok(self.results.clone())
        }
    }

    struct FailingSearch;

    #[async_trait]
    impl JobSearch for FailingSearch {
        async fn search_jobs(&self, _query: &str) -> Result<Vec<JobRecord>> {
            Err(AggregatorError::SearchRequestFailed {
                status: 429,
                body: "quota exceeded".to_string(),
            })
        }
    }

    #[derive(Default)]
    struct RecordingOpener {
        opens: AtomicUsize,
        appends: Arc<Mutex<Vec<Vec<SheetRow>>>>,
        fail_append: bool,
    }

    struct RecordingSink {
        appends: Arc<Mutex<Vec<Vec<SheetRow>>>>,
        fail: bool,
    }

    #[async_trait]
    impl SheetSink for RecordingSink {
        async fn append_rows(&self, rows: Vec<SheetRow>) -> Result<()> {
            if self.fail {
                return Err(AggregatorError::sheet("403: PERMISSION_DENIED"));
            }
            self.appends.lock().unwrap().push(rows);
            Ok(())
        }
    }

    #[async_trait]
    impl SheetOpener for RecordingOpener {
        async fn open_sheet(&self) -> Result<Box<dyn SheetSink>> {
            self.opens.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(RecordingSink {
                appends: self.appends.clone(),
                fail: self.fail_append,
            }))
        }
    }

    fn jobs() -> Vec<JobRecord> {
        vec![
            JobRecord {
                title: Some("Chief of Staff".to_string()),
                link: Some("https://jobs.lever.co/acme/1".to_string()),
                snippet: "Remote".to_string(),
            },
            JobRecord {
                title: Some("Business Operations Lead".to_string()),
                link: Some("https://apply.workable.com/acme/2".to_string()),
                snippet: String::new(),
            },
        ]
    }

    fn aggregator(search: Arc<dyn JobSearch>, sheets: Arc<dyn SheetOpener>) -> JobAggregator {
        JobAggregator::new(
            search,
            sheets,
            vec!["a.com".to_string(), "b.com".to_string()],
            vec!["\"x\"".to_string()],
        )
    }

    #[tokio::test]
    async fn test_run_searches_with_built_query_and_appends() {
        let search = Arc::new(FixedSearch::new(jobs()));
        let sheets = Arc::new(RecordingOpener::default());
        let agg = aggregator(search.clone(), sheets.clone());

        let results = agg.run_job_aggregation().await.unwrap();

        assert_eq!(results, jobs());
        assert_eq!(
            search.queries.lock().unwrap().as_slice(),
            ["site:a.com OR site:b.com (\"x\")"]
        );
        assert_eq!(sheets.opens.load(Ordering::SeqCst), 1);
        let appends = sheets.appends.lock().unwrap();
        assert_eq!(appends.len(), 1);
        assert_eq!(appends[0].len(), 2);
    }

    #[tokio::test]
    async fn test_repeated_runs_append_duplicates() {
        let search = Arc::new(FixedSearch::new(jobs()));
        let sheets = Arc::new(RecordingOpener::default());
        let agg = aggregator(search, sheets.clone());

        agg.run_job_aggregation().await.unwrap();
        agg.run_job_aggregation().await.unwrap();

        let appends = sheets.appends.lock().unwrap();
        assert_eq!(appends.len(), 2);
        assert_eq!(appends[0].len(), 2);
        assert_eq!(appends[1].len(), 2);
        assert_eq!(appends[0][0].link, appends[1][0].link);
    }

    #[tokio::test]
    async fn test_no_results_never_opens_sheet() {
        let search = Arc::new(FixedSearch::new(Vec::new()));
        let sheets = Arc::new(RecordingOpener::default());
        let agg = aggregator(search, sheets.clone());

        let results = agg.run_job_aggregation().await.unwrap();

        assert!(results.is_empty());
        assert_eq!(sheets.opens.load(Ordering::SeqCst), 0);
        assert!(sheets.appends.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_failure_propagates_without_opening_sheet() {
        let sheets = Arc::new(RecordingOpener::default());
        let agg = aggregator(Arc::new(FailingSearch), sheets.clone());

        let err = agg.run_job_aggregation().await.unwrap_err();

        assert!(matches!(
            err,
            AggregatorError::SearchRequestFailed { status: 429, .. }
        ));
        assert_eq!(sheets.opens.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_append_failure_propagates() {
        let search = Arc::new(FixedSearch::new(jobs()));
        let sheets = Arc::new(RecordingOpener {
            fail_append: true,
            ..Default::default()
        });
        let agg = aggregator(search, sheets);

        let err = agg.run_job_aggregation().await.unwrap_err();
        assert!(matches!(err, AggregatorError::SheetWriteFailed(_)));
    }
}
