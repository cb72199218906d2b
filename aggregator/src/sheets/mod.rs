//! Google Sheets access through a service account.

pub mod auth;
pub mod client;
pub mod credentials;

use std::path::PathBuf;

use async_trait::async_trait;
use common::{AppConfig, Result, SheetRow};
use tracing::debug;

pub use client::{GoogleEndpoints, Worksheet};
pub use credentials::ServiceAccountKey;

/// Destination for a run's rows.
#[async_trait]
pub trait SheetSink: Send + Sync {
    /// Appends every row in a single batched write.
    async fn append_rows(&self, rows: Vec<SheetRow>) -> Result<()>;
}

/// Authenticates and opens the target sheet. Called once per run that has
/// results to write.
#[async_trait]
pub trait SheetOpener: Send + Sync {
    async fn open_sheet(&self) -> Result<Box<dyn SheetSink>>;
}

#[async_trait]
impl SheetSink for Worksheet {
    async fn append_rows(&self, rows: Vec<SheetRow>) -> Result<()> {
        Worksheet::append_rows(self, rows).await
    }
}

/// Opens the first sheet of a named spreadsheet with service account credentials.
#[derive(Debug, Clone)]
pub struct GoogleSheets {
    http: reqwest::Client,
    credentials_path: PathBuf,
    spreadsheet_name: String,
    endpoints: GoogleEndpoints,
}

impl GoogleSheets {
    pub fn new(credentials_path: impl Into<PathBuf>, spreadsheet_name: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            credentials_path: credentials_path.into(),
            spreadsheet_name: spreadsheet_name.into(),
            endpoints: GoogleEndpoints::default(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.service_account_file.clone(),
            config.spreadsheet_name.clone(),
        )
    }

    pub fn with_endpoints(mut self, endpoints: GoogleEndpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Loads the key file, mints a token and resolves the first sheet.
    /// The key file is checked before any request is made.
    pub async fn open(&self) -> Result<Worksheet> {
        let key = ServiceAccountKey::from_file(&self.credentials_path)?;
        let token = auth::fetch_access_token(&self.http, &key, auth::SCOPES).await?;
        debug!("Authorized Google Sheets client successfully");

        Worksheet::open_first(
            self.http.clone(),
            &self.endpoints,
            token,
            &self.spreadsheet_name,
        )
        .await
    }
}

#[async_trait]
impl SheetOpener for GoogleSheets {
    async fn open_sheet(&self) -> Result<Box<dyn SheetSink>> {
        Ok(Box::new(self.open().await?))
    }
}
