/*!
 * Tests for search orchestration: language filtering and construction
 */

use std::path::Path;
use yifysub::app_config::Config;
use yifysub::app_controller::{Controller, FoundSubtitle, SubtitleListener, accepted_language};
use yifysub::site_client::SiteClient;

use crate::common::{self, RecordingListener, StubSite};

fn wanted(languages: &[&str]) -> Vec<String> {
    languages.iter().map(|s| s.to_string()).collect()
}

/// Test that an alias label matches after normalization and the canonical
/// name is handed back
#[test]
fn test_accepted_language_withAliasLabel_shouldMatchCanonicalName() {
    let languages = wanted(&["English", "Persian"]);

    assert_eq!(
        accepted_language("Farsi/Persian", &languages),
        Some("Persian".to_string())
    );
    assert_eq!(
        accepted_language("English", &languages),
        Some("English".to_string())
    );
}

/// Test that labels outside the requested set are rejected
#[test]
fn test_accepted_language_withUnwantedLabel_shouldReturnNone() {
    let languages = wanted(&["English"]);

    assert_eq!(accepted_language("French", &languages), None);
    assert_eq!(accepted_language("Farsi/Persian", &languages), None);
}

/// Test that an empty requested set rejects every candidate
#[test]
fn test_accepted_language_withEmptySet_shouldRejectEverything() {
    let languages: Vec<String> = Vec::new();

    assert_eq!(accepted_language("English", &languages), None);
    assert_eq!(accepted_language("Farsi/Persian", &languages), None);
    assert_eq!(accepted_language("", &languages), None);
}

/// Test that matching is exact on the canonical name, not a substring match
#[test]
fn test_accepted_language_withPartialMatch_shouldReturnNone() {
    let languages = wanted(&["Portuguese"]);

    assert_eq!(accepted_language("Brazilian Portuguese", &languages), None);
    assert_eq!(
        accepted_language("Portuguese", &languages),
        Some("Portuguese".to_string())
    );
}

/// Test that a controller builds from the default configuration
#[test]
fn test_with_config_withDefaultConfig_shouldConstruct() {
    assert!(Controller::with_config(&Config::default()).is_ok());
}

fn stub_controller(site: &StubSite, workdir: &Path) -> Controller {
    let client = SiteClient::new(site.base_url(), 5).unwrap();
    Controller::new(client, workdir.to_path_buf())
}

/// Test that a rejected candidate's detail page is never fetched; the
/// language filter runs before any per-candidate network traffic
#[tokio::test]
async fn test_search_withRejectedCandidate_shouldNotFetchItsDetailPage() {
    let site = StubSite::start().unwrap();
    let archive = common::build_subtitle_archive(&[("movie.srt", b"payload")]).unwrap();
    let listing = common::listing_page(&[
        common::candidate_block("English", "/subtitles/movie-english", None, false),
        common::candidate_block("French", "/subtitles/movie-french", None, false),
    ]);
    site.route("/movie-imdb/tt0100001", 200, listing.into_bytes());
    site.route(
        "/subtitles/movie-english",
        200,
        common::detail_page(&site.url("/archive/movie-english.zip")).into_bytes(),
    );
    site.route("/archive/movie-english.zip", 200, archive);

    let temp_dir = common::create_temp_dir().unwrap();
    let controller = stub_controller(&site, temp_dir.path());
    let mut listener = RecordingListener::default();

    let found = controller
        .search("tt0100001", &wanted(&["English"]), &mut listener)
        .await
        .unwrap();

    assert_eq!(found, 1);
    assert_eq!(listener.found.len(), 1);
    assert_eq!(listener.found[0].filename, "movie.srt");
    assert_eq!(listener.found[0].language, "English");
    assert_eq!(listener.found[0].rating, "3");
    assert_eq!(listener.found[0].url, site.url("/archive/movie-english.zip"));

    let paths = site.requested_paths();
    assert!(
        !paths.iter().any(|p| p.contains("movie-french")),
        "rejected candidate was fetched: {:?}",
        paths
    );
}

/// Test that an empty accepted set stops at the listing page: no detail
/// fetches, no events
#[tokio::test]
async fn test_search_withEmptyLanguageSet_shouldOnlyFetchListing() {
    let site = StubSite::start().unwrap();
    let listing = common::listing_page(&[
        common::candidate_block("English", "/subtitles/movie-english", None, false),
        common::candidate_block("French", "/subtitles/movie-french", None, false),
    ]);
    site.route("/movie-imdb/tt0100002", 200, listing.into_bytes());

    let temp_dir = common::create_temp_dir().unwrap();
    let controller = stub_controller(&site, temp_dir.path());
    let mut listener = RecordingListener::default();

    let found = controller
        .search("tt0100002", &[], &mut listener)
        .await
        .unwrap();

    assert_eq!(found, 0);
    assert!(listener.found.is_empty());
    assert_eq!(site.requested_paths(), vec!["/movie-imdb/tt0100002".to_string()]);
}

/// Test that a transport failure mid-search aborts the remaining candidates
#[tokio::test]
async fn test_search_withFailingArchiveFetch_shouldAbortRemainingSearch() {
    let site = StubSite::start().unwrap();
    let listing = common::listing_page(&[
        common::candidate_block("English", "/subtitles/first", None, false),
        common::candidate_block("English", "/subtitles/second", None, false),
    ]);
    site.route("/movie-imdb/tt0100003", 200, listing.into_bytes());
    site.route(
        "/subtitles/first",
        200,
        common::detail_page(&site.url("/archive/first.zip")).into_bytes(),
    );
    site.route("/archive/first.zip", 500, Vec::new());

    let temp_dir = common::create_temp_dir().unwrap();
    let controller = stub_controller(&site, temp_dir.path());
    let mut listener = RecordingListener::default();

    let result = controller
        .search("tt0100003", &wanted(&["English"]), &mut listener)
        .await;

    assert!(result.is_err());
    assert!(listener.found.is_empty());
    let paths = site.requested_paths();
    assert!(
        !paths.iter().any(|p| p.contains("second")),
        "search continued past the failure: {:?}",
        paths
    );
}

/// Test the download path end to end: fetch, extract, notify
#[tokio::test]
async fn test_download_withServedArchive_shouldExtractAndNotify() {
    let site = StubSite::start().unwrap();
    let archive = common::build_subtitle_archive(&[("movie.srt", b"payload")]).unwrap();
    site.route("/archive/movie.zip", 200, archive);

    let temp_dir = common::create_temp_dir().unwrap();
    let controller = stub_controller(&site, temp_dir.path());
    let mut listener = RecordingListener::default();

    let path = controller
        .download(&site.url("/archive/movie.zip"), "movie.srt", &mut listener)
        .await
        .unwrap();

    assert_eq!(path, temp_dir.path().join("movie.srt"));
    assert_eq!(std::fs::read(&path).unwrap(), b"payload");
    assert_eq!(listener.downloaded, vec![path]);
}

/// Test that the recording listener keeps events in delivery order
#[test]
fn test_listener_withEvents_shouldRecordInOrder() {
    let mut listener = RecordingListener::default();

    let first = FoundSubtitle {
        filename: "a.srt".to_string(),
        language: "English".to_string(),
        rating: "5".to_string(),
        url: "https://example.org/a.zip".to_string(),
    };
    let second = FoundSubtitle {
        filename: "b.srt".to_string(),
        language: "Persian".to_string(),
        rating: "3".to_string(),
        url: "https://example.org/b.zip".to_string(),
    };

    listener.on_subtitle_found(&first);
    listener.on_subtitle_found(&second);
    listener.on_subtitle_downloaded(Path::new("/tmp/a.srt"));

    assert_eq!(listener.found, vec![first, second]);
    assert_eq!(listener.downloaded, vec![Path::new("/tmp/a.srt").to_path_buf()]);
}
