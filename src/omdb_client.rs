use log::{debug, warn};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::errors::LookupError;

// @module: OMDb identifier lookup client

/// OMDb client for resolving a title and year to an IMDB identifier
pub struct OmdbClient {
    /// HTTP client for API requests
    client: Client,
    /// API endpoint URL
    endpoint: String,
}

/// OMDb search response
#[derive(Debug, Deserialize)]
struct OmdbResponse {
    /// "True" when the service found a match
    #[serde(rename = "Response", default)]
    response: String,

    /// IMDB identifier of the matched movie
    #[serde(rename = "imdbID")]
    imdb_id: Option<String>,
}

impl OmdbClient {
    /// Create a new OMDb client
    pub fn new(endpoint: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            endpoint: endpoint.into(),
        }
    }

    /// Search for a movie by title and release year.
    ///
    /// Returns `Ok(None)` when the service reports no match; that is an
    /// expected outcome, not an error.
    pub async fn search(&self, title: &str, year: u16) -> Result<Option<String>, LookupError> {
        debug!("Looking for {} ({})", title, year);

        let url = format!("{}/", self.endpoint.trim_end_matches('/'));
        let response = self
            .client
            .get(&url)
            .query(&[("t", title), ("y", &year.to_string())])
            .send()
            .await
            .map_err(|e| LookupError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            return Err(LookupError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        let body: OmdbResponse = response
            .json()
            .await
            .map_err(|e| LookupError::ParseError(e.to_string()))?;

        if body.response != "True" {
            warn!("No match found for {} ({})", title, year);
            return Ok(None);
        }

        let imdb_id = body
            .imdb_id
            .ok_or_else(|| LookupError::ParseError("response is missing imdbID".to_string()))?;
        debug!("IMDB identifier {} found for {} ({})", imdb_id, title, year);

        Ok(Some(imdb_id))
    }
}
