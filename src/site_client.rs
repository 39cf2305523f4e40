use anyhow::{Context, Result};
use bytes::Bytes;
use log::debug;
use reqwest::Client;
use std::time::Duration;
use url::Url;

// @module: HTTP access to the subtitle listing site

/// Client for the subtitle listing site
pub struct SiteClient {
    /// HTTP client for page and archive fetches
    client: Client,
    /// Base origin of the listing site
    base_url: Url,
}

impl SiteClient {
    /// Create a new site client with the given base origin and timeout
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        let base_url = Url::parse(base_url)
            .with_context(|| format!("Invalid site base URL: {}", base_url))?;

        Ok(Self { client, base_url })
    }

    /// URL of the subtitle listing page for an IMDB identifier
    pub fn listing_url(&self, imdb_id: &str) -> Result<Url> {
        self.base_url
            .join(&format!("movie-imdb/{}", imdb_id))
            .with_context(|| format!("Invalid IMDB identifier: {}", imdb_id))
    }

    /// Absolute URL for a relative subtitle page link
    pub fn page_url(&self, link: &str) -> Result<Url> {
        self.base_url
            .join(link)
            .with_context(|| format!("Invalid subtitle page link: {}", link))
    }

    /// Fetch the subtitle listing page for a movie
    pub async fn movie_page(&self, imdb_id: &str) -> Result<String> {
        let url = self.listing_url(imdb_id)?;
        debug!("Fetching movie page from {}", url);
        self.fetch_page(url).await
    }

    /// Fetch a subtitle detail page by its relative link
    pub async fn subtitle_page(&self, link: &str) -> Result<String> {
        let url = self.page_url(link)?;
        debug!("Fetching subtitle page from {}", url);
        self.fetch_page(url).await
    }

    /// Download a subtitle archive fully into memory
    pub async fn download_archive(&self, archive_url: &str) -> Result<Bytes> {
        let url = Url::parse(archive_url)
            .with_context(|| format!("Invalid archive URL: {}", archive_url))?;

        debug!("Downloading subtitle archive from {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to download archive: {}", archive_url))?
            .error_for_status()
            .with_context(|| format!("Archive download rejected: {}", archive_url))?;

        response
            .bytes()
            .await
            .with_context(|| format!("Failed to read archive body: {}", archive_url))
    }

    // Decodes the body with the charset declared in the Content-Type header,
    // falling back to UTF-8 when it is missing or unknown.
    async fn fetch_page(&self, url: Url) -> Result<String> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("Failed to fetch page: {}", url))?
            .error_for_status()
            .with_context(|| format!("Page fetch rejected: {}", url))?;

        response
            .text()
            .await
            .with_context(|| format!("Failed to decode page body: {}", url))
    }
}
