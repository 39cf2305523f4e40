/*!
 * Integration tests against the live listing site and OMDb.
 *
 * Ignored by default: they need network access and a reachable site.
 * Run with `cargo test -- --ignored`.
 */

use yifysub::app_config::Config;
use yifysub::app_controller::Controller;
use yifysub::omdb_client::OmdbClient;

use crate::common::RecordingListener;

/// Test a live search for a well-known movie in English
#[tokio::test]
#[ignore]
async fn test_search_withKnownMovie_shouldFindEnglishSubtitles() {
    let config = Config::default();
    let controller = Controller::with_config(&config).unwrap();
    let mut listener = RecordingListener::default();

    let found = controller
        .search("tt0371746", &["English".to_string()], &mut listener)
        .await
        .unwrap();

    assert!(found > 0, "Expected at least one English subtitle");
    assert_eq!(listener.found.len(), found);
    assert!(listener.found.iter().all(|s| s.language == "English"));
}

/// Test a live OMDb lookup by title and year
#[tokio::test]
#[ignore]
async fn test_omdb_search_withKnownTitle_shouldResolveImdbId() {
    let config = Config::default();
    let client = OmdbClient::new(&config.omdb_endpoint, config.timeout_secs);

    let imdb_id = client.search("Iron Man", 2008).await.unwrap();

    assert_eq!(imdb_id.as_deref(), Some("tt0371746"));
}

/// Test that a live OMDb lookup for a nonsense title reports no match
#[tokio::test]
#[ignore]
async fn test_omdb_search_withNonsenseTitle_shouldReturnNone() {
    let config = Config::default();
    let client = OmdbClient::new(&config.omdb_endpoint, config.timeout_secs);

    let imdb_id = client
        .search("zzzz-no-such-movie-zzzz", 1999)
        .await
        .unwrap();

    assert_eq!(imdb_id, None);
}
