use std::path::PathBuf;

use crate::error::{AggregatorError, Result};
use crate::query::{DEFAULT_DOMAINS, DEFAULT_KEYWORDS};

pub const DEFAULT_SERVICE_ACCOUNT_FILE: &str = "service-account.json";
pub const DEFAULT_SPREADSHEET_NAME: &str = "Job Aggregator";

/// Process configuration, read once at startup and passed down explicitly.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// SerpAPI key (`SERPAPI_KEY`, required).
    pub serpapi_key: String,
    /// Service account JSON (`SERVICE_ACCOUNT_FILE_PATH`).
    pub service_account_file: PathBuf,
    /// Spreadsheet to append to (`SPREADSHEET_NAME`), first sheet only.
    pub spreadsheet_name: String,
    pub domains: Vec<String>,
    pub keywords: Vec<String>,
}

impl AppConfig {
    /// Loads `.env` if present, then reads the process environment.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        let config = Self::from_lookup(|key| std::env::var(key).ok())?;
        config.log_keys();
        Ok(config)
    }

    /// Builds the config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let serpapi_key = lookup("SERPAPI_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                AggregatorError::Configuration(
                    "SERPAPI_KEY not found in environment variables".to_string(),
                )
            })?;

        Ok(Self {
            serpapi_key,
            service_account_file: lookup("SERVICE_ACCOUNT_FILE_PATH")
                .unwrap_or_else(|| DEFAULT_SERVICE_ACCOUNT_FILE.to_string())
                .into(),
            spreadsheet_name: lookup("SPREADSHEET_NAME")
                .unwrap_or_else(|| DEFAULT_SPREADSHEET_NAME.to_string()),
            domains: DEFAULT_DOMAINS.iter().map(|d| d.to_string()).collect(),
            keywords: DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
        })
    }

    fn log_keys(&self) {
        let preview: String = self.serpapi_key.chars().take(4).collect();
        tracing::info!("Config loaded:");
        tracing::info!(
            "  SERPAPI_KEY: {}...({} chars)",
            preview,
            self.serpapi_key.len()
        );
        tracing::info!(
            "  SERVICE_ACCOUNT_FILE_PATH: {}",
            self.service_account_file.display()
        );
        tracing::info!("  SPREADSHEET_NAME: {}", self.spreadsheet_name);
    }
}
