//! Bearer-token acquisition for the Drive and GCS clients.
//!
//! Resolution order: the `GOOGLE_OAUTH_ACCESS_TOKEN` environment variable
//! (local runs, tests), then the Cloud Run / GCE metadata server, which
//! serves tokens for the job's service account.

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

const METADATA_TOKEN_URL: &str =
    "http://metadata.google.internal/computeMetadata/v1/instance/service-accounts/default/token";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("metadata server request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("metadata server returned status {status}")]
    Status { status: u16 },
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Obtain an OAuth access token valid for both Drive and GCS calls.
pub async fn fetch_access_token(http: &reqwest::Client) -> Result<String, AuthError> {
    if let Ok(token) = std::env::var("GOOGLE_OAUTH_ACCESS_TOKEN") {
        debug!("using access token from environment");
        return Ok(token);
    }

    let resp = http
        .get(METADATA_TOKEN_URL)
        .header("Metadata-Flavor", "Google")
        .send()
        .await?;
    let status = resp.status();
    if !status.is_success() {
        return Err(AuthError::Status {
            status: status.as_u16(),
        });
    }
    let token: TokenResponse = resp.json().await?;
    info!("obtained access token from metadata server");
    Ok(token.access_token)
}
