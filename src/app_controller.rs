use anyhow::Result;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::archive_utils::ArchiveManager;
use crate::language_utils;
use crate::listing_parser;
use crate::site_client::SiteClient;

// @module: Search and download orchestration

/// A matching subtitle reported to the listener during a search.
///
/// One archive may be the origin of several of these, one per contained
/// file; the identity of a found subtitle is the (url, filename) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundSubtitle {
    /// Path of the subtitle file inside the archive
    pub filename: String,

    /// Canonical language name
    pub language: String,

    /// Rating string ("0", "3" or "5")
    pub rating: String,

    /// Archive download URL
    pub url: String,
}

/// Event callbacks delivered synchronously during search and download.
///
/// Hosts implement this independently of any log sink; the controller makes
/// no assumption that both land on the same object.
pub trait SubtitleListener {
    /// Called once per matching subtitle file found during a search
    fn on_subtitle_found(&mut self, subtitle: &FoundSubtitle);

    /// Called after a subtitle has been downloaded and unpacked
    fn on_subtitle_downloaded(&mut self, path: &Path);
}

/// Check a scraped language label against the requested set.
///
/// Returns the canonical language name when accepted, `None` otherwise. The
/// caller must perform this check before any detail-page fetch; skipping
/// unwanted candidates without network traffic is the point of the ordering.
pub fn accepted_language(raw_language: &str, languages: &[String]) -> Option<String> {
    let canonical = language_utils::normalize_language(raw_language);
    languages
        .iter()
        .any(|wanted| wanted == canonical)
        .then(|| canonical.to_string())
}

/// Orchestrates the scrape/filter/extract pipeline
pub struct Controller {
    /// Listing site access
    site: SiteClient,
    /// Working directory for extracted subtitle files
    workdir: PathBuf,
}

impl Controller {
    /// Create a controller from application configuration
    pub fn with_config(config: &Config) -> Result<Self> {
        let site = SiteClient::new(&config.base_url, config.timeout_secs)?;
        Ok(Self::new(site, config.workdir.clone()))
    }

    /// Create a controller from its parts
    pub fn new(site: SiteClient, workdir: PathBuf) -> Self {
        Self { site, workdir }
    }

    /// Search subtitles for an IMDB identifier, restricted to the given
    /// canonical language names.
    ///
    /// Candidates are processed sequentially in page order and one
    /// `on_subtitle_found` event is emitted per matching archive entry, in
    /// discovery order. Candidates whose detail page has no download anchor
    /// are skipped; a transport failure aborts the remaining search.
    ///
    /// Returns the number of subtitles reported.
    pub async fn search(
        &self,
        imdb_id: &str,
        languages: &[String],
        listener: &mut dyn SubtitleListener,
    ) -> Result<usize> {
        debug!("Searching subtitles for IMDB identifier {}", imdb_id);

        let page = self.site.movie_page(imdb_id).await?;
        let candidates = listing_parser::parse_listing(&page);
        if candidates.is_empty() {
            info!("No subtitles listed for {}", imdb_id);
            return Ok(0);
        }

        let mut found = 0;
        for candidate in candidates {
            let Some(language) = accepted_language(&candidate.language, languages) else {
                debug!(
                    "Ignoring {} subtitle {}",
                    candidate.language, candidate.page_link
                );
                continue;
            };
            let rating = language_utils::rating_value(candidate.rating);

            let detail_page = self.site.subtitle_page(&candidate.page_link).await?;
            let Some(archive_url) = listing_parser::extract_archive_url(&detail_page) else {
                warn!("No archive available for {}", candidate.page_link);
                continue;
            };

            let archive = self.site.download_archive(&archive_url).await?;
            for filename in ArchiveManager::list_subtitles(archive.as_ref())? {
                debug!("Found {} subtitle {}:{}", language, archive_url, filename);
                listener.on_subtitle_found(&FoundSubtitle {
                    filename,
                    language: language.clone(),
                    rating: rating.to_string(),
                    url: archive_url.clone(),
                });
                found += 1;
            }
        }

        Ok(found)
    }

    /// Download an archive and extract one named subtitle file into the
    /// working directory, emitting `on_subtitle_downloaded` on success.
    ///
    /// Runs independently of any prior search; the caller retained the
    /// (url, filename) pair from an earlier `on_subtitle_found` event.
    pub async fn download(
        &self,
        url: &str,
        filename: &str,
        listener: &mut dyn SubtitleListener,
    ) -> Result<PathBuf> {
        let archive = self.site.download_archive(url).await?;

        debug!("Extracting {} to {:?}", filename, self.workdir);
        let path = ArchiveManager::extract_entry(archive.as_ref(), filename, &self.workdir)?;

        listener.on_subtitle_downloaded(&path);
        Ok(path)
    }
}
