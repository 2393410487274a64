// Menu sheet retrieval over HTTP

use crate::errors::FetchError;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

/// Source of the raw menu sheet.
///
/// The refresh engine only depends on this seam, so tests can substitute a
/// stub source for the real HTTP endpoint.
#[async_trait]
pub trait MenuSource: Send + Sync {
    /// Retrieve the raw delimited text of the published sheet.
    async fn fetch_raw(&self) -> Result<String, FetchError>;
}

/// HttpMenuSource fetches the sheet from one fixed HTTP(S) location.
pub struct HttpMenuSource {
    client: Client,
    url: String,
}

impl HttpMenuSource {
    /// Create a new source with the specified request timeout.
    pub fn new(url: impl Into<String>, timeout_seconds: u64) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .map_err(|e| FetchError::ClientBuild(e.to_string()))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl MenuSource for HttpMenuSource {
    #[tracing::instrument(skip(self), fields(url = %self.url))]
    async fn fetch_raw(&self) -> Result<String, FetchError> {
        debug!("Requesting menu sheet");

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| FetchError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::BodyRead(e.to_string()))?;

        info!(bytes = body.len(), "Menu sheet retrieved");
        Ok(body)
    }
}
