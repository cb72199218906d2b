use std::path::Path;

use common::{AggregatorError, Result};
use serde::Deserialize;
use tracing::{debug, error};

const GOOGLE_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

fn default_token_uri() -> String {
    GOOGLE_TOKEN_URI.to_string()
}

/// The subset of a Google service account JSON key used for the JWT grant.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

impl ServiceAccountKey {
    /// Reads the key file. A missing file is reported as
    /// [`AggregatorError::CredentialNotFound`] without touching the network.
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "Checking for service account file");
        if !path.is_file() {
            error!(path = %path.display(), "Service account JSON not found");
            return Err(AggregatorError::CredentialNotFound {
                path: path.to_path_buf(),
            });
        }

        let raw = std::fs::read_to_string(path).map_err(|e| {
            AggregatorError::sheet(format!(
                "failed to read service account file {}: {e}",
                path.display()
            ))
        })?;

        serde_json::from_str(&raw).map_err(|e| {
            AggregatorError::sheet(format!(
                "invalid service account file {}: {e}",
                path.display()
            ))
        })
    }
}
