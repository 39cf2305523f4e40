/*!
 * Tests for host invocation parsing
 */

use yifysub::host::{Action, Invocation, parse_params};

/// Test that an ordinary query string parses into key/value pairs
#[test]
fn test_parse_params_withQueryString_shouldSplitPairs() {
    let params = parse_params("?action=search&imdbid=tt0371746");

    assert_eq!(params.len(), 2);
    assert_eq!(params.get("action").map(String::as_str), Some("search"));
    assert_eq!(params.get("imdbid").map(String::as_str), Some("tt0371746"));
}

/// Test the host convention's trailing-slash rule: a cleaned string ending
/// in '/' loses its final two characters, eating the last value byte
#[test]
fn test_parse_params_withTrailingSlash_shouldDropLastTwoCharacters() {
    let params = parse_params("?a=b&c=dx/?");

    assert_eq!(params.len(), 2);
    assert_eq!(params.get("a").map(String::as_str), Some("b"));
    assert_eq!(params.get("c").map(String::as_str), Some("d"));
}

/// Test that the trailing-slash rule counts characters, not bytes; a
/// multibyte character before the slash must not break parsing
#[test]
fn test_parse_params_withMultibyteBeforeTrailingSlash_shouldDropLastTwoChars() {
    let params = parse_params("?a=bé/?");

    assert_eq!(params.len(), 1);
    assert_eq!(params.get("a").map(String::as_str), Some("b"));
}

/// Test that strings shorter than two characters carry no parameters
#[test]
fn test_parse_params_withTooShortInput_shouldReturnEmpty() {
    assert!(parse_params("").is_empty());
    assert!(parse_params("?").is_empty());
}

/// Test that pairs without an equals sign are dropped, not errors
#[test]
fn test_parse_params_withMalformedPair_shouldSkipPair() {
    let params = parse_params("?action=search&flag&x=1");

    assert_eq!(params.len(), 2);
    assert_eq!(params.get("action").map(String::as_str), Some("search"));
    assert_eq!(params.get("x").map(String::as_str), Some("1"));
}

/// Test that values split on the first equals sign only
#[test]
fn test_parse_params_withEqualsInValue_shouldSplitOnFirstEquals() {
    let params = parse_params("?searchstring=a=b");

    assert_eq!(params.get("searchstring").map(String::as_str), Some("a=b"));
}

/// Test action parsing for all three known actions
#[test]
fn test_action_withKnownActions_shouldParse() {
    let search = Invocation::parse("?action=search");
    let manual = Invocation::parse("?action=manualsearch");
    let download = Invocation::parse("?action=download&url=x&filename=y");

    assert_eq!(search.action().unwrap(), Action::Search);
    assert_eq!(manual.action().unwrap(), Action::ManualSearch);
    assert_eq!(download.action().unwrap(), Action::Download);
}

/// Test that missing and unknown actions are errors
#[test]
fn test_action_withMissingOrUnknownAction_shouldFail() {
    assert!(Invocation::parse("?imdbid=tt0371746").action().is_err());
    assert!(Invocation::parse("?action=browse").action().is_err());
}

/// Test that the languages parameter is percent-decoded then comma-split
#[test]
fn test_languages_withEncodedList_shouldDecodeAndSplit() {
    let invocation = Invocation::parse("?action=search&languages=en%2Cfa");

    assert_eq!(invocation.languages(), vec!["en".to_string(), "fa".to_string()]);
}

/// Test that only %XX escapes are decoded; '+' stays a literal '+'
#[test]
fn test_languages_withPlusInToken_shouldKeepPlusLiteral() {
    let invocation = Invocation::parse("?action=search&languages=pt+BR%2Cen");

    assert_eq!(
        invocation.languages(),
        vec!["pt+BR".to_string(), "en".to_string()]
    );
}

/// Test that an absent or empty languages parameter yields no languages
#[test]
fn test_languages_withAbsentOrEmptyParameter_shouldReturnEmpty() {
    assert!(Invocation::parse("?action=search").languages().is_empty());
    assert!(
        Invocation::parse("?action=search&languages=")
            .languages()
            .is_empty()
    );
}

/// Test that only the languages parameter is decoded; other values keep
/// their percent escapes verbatim
#[test]
fn test_get_withEncodedValue_shouldReturnRawValue() {
    let invocation = Invocation::parse("?searchstring=Iron%20Man");

    assert_eq!(invocation.get("searchstring"), Some("Iron%20Man"));
}
