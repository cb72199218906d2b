use async_trait::async_trait;
use common::{AggregatorError, JobRecord, Result};
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, error};

pub const SERPAPI_URL: &str = "https://serpapi.com/search";

/// Only the first page is ever requested.
const RESULT_CAP: u32 = 100;

/// SerpAPI time filter for "past 24 hours".
const PAST_DAY: &str = "qdr:d";

/// Anything that can turn a query string into job records.
#[async_trait]
pub trait JobSearch: Send + Sync {
    async fn search_jobs(&self, query: &str) -> Result<Vec<JobRecord>>;
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    organic_results: Option<Vec<OrganicResult>>,
}

#[derive(Debug, Deserialize)]
struct OrganicResult {
    title: Option<String>,
    link: Option<String>,
    snippet: Option<String>,
}

impl From<OrganicResult> for JobRecord {
    fn from(result: OrganicResult) -> Self {
        JobRecord {
            title: result.title,
            link: result.link,
            snippet: result.snippet.unwrap_or_default(),
        }
    }
}

/// Google engine client for SerpAPI.
#[derive(Debug, Clone)]
pub struct SerpApiClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl SerpApiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: SERPAPI_URL.to_string(),
        }
    }

    /// Points the client at a different endpoint (tests, proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Runs one search restricted to the past day and maps the organic
    /// results. Anything other than `200 OK` is an error.
    pub async fn search_jobs(&self, query: &str) -> Result<Vec<JobRecord>> {
        let num = RESULT_CAP.to_string();
        let params = [
            ("engine", "google"),
            ("q", query),
            ("api_key", self.api_key.as_str()),
            ("tbs", PAST_DAY),
            ("num", num.as_str()),
        ];
        debug!(
            engine = "google",
            q = query,
            api_key = "<redacted>",
            tbs = PAST_DAY,
            num = RESULT_CAP,
            "Sending request to SerpAPI"
        );

        let resp = self
            .client
            .get(&self.base_url)
            .query(&params)
            .send()
            .await
            .map_err(|e| AggregatorError::SearchUnavailable(e.to_string()))?;

        let status = resp.status();
        if status != StatusCode::OK {
            let body = resp.text().await.unwrap_or_default();
            error!(status = status.as_u16(), %body, "Failed SerpAPI request");
            return Err(AggregatorError::SearchRequestFailed {
                status: status.as_u16(),
                body,
            });
        }

        let data: SearchResponse = resp
            .json()
            .await
            .map_err(|e| AggregatorError::SearchUnavailable(e.to_string()))?;

        let organic = data.organic_results.unwrap_or_default();
        debug!(count = organic.len(), "Received results from SerpAPI");

        Ok(organic.into_iter().map(JobRecord::from).collect())
    }
}

#[async_trait]
impl JobSearch for SerpApiClient {
    async fn search_jobs(&self, query: &str) -> Result<Vec<JobRecord>> {
        SerpApiClient::search_jobs(self, query).await
    }
}
