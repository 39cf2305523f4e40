/*!
 * # yifysub - YIFY subtitle search and download
 *
 * A Rust library for locating and retrieving movie subtitles from the YIFY
 * subtitle listing site, driven by IMDB identifiers.
 *
 * ## Features
 *
 * - Scrape a movie's subtitle listing page into candidate records
 * - Filter candidates by requested languages before any detail fetch
 * - Resolve each matching candidate's archive download URL
 * - Enumerate subtitle files inside downloaded ZIP archives
 * - Extract a selected subtitle file into a working directory
 * - Resolve title + year to an IMDB identifier via the OMDb API
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `listing_parser`: tolerant pattern-based scraping of listing and detail pages
 * - `language_utils`: language and rating normalization tables
 * - `site_client`: HTTP access to the listing site
 * - `archive_utils`: ZIP archive listing and extraction
 * - `omdb_client`: IMDB identifier lookup
 * - `app_controller`: search/download orchestration and the listener boundary
 * - `host`: plugin-convention invocation parsing
 * - `app_config`: Configuration management
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod archive_utils;
pub mod errors;
pub mod host;
pub mod language_utils;
pub mod listing_parser;
pub mod omdb_client;
pub mod site_client;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, FoundSubtitle, SubtitleListener};
pub use errors::{AppError, ArchiveError, LookupError};
pub use listing_parser::{RatingClass, SubtitleCandidate};
