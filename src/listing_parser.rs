use once_cell::sync::Lazy;
use regex::Regex;

// @module: Listing page and subtitle page scraping

// The listing site's markup is a stable-but-sloppy template, not well-formed
// HTML. Candidates are matched with a tolerant pattern over the raw page text
// rather than a strict HTML parser; pages where nothing matches simply yield
// no candidates.
static CANDIDATE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r#"<li data-id=".*?"(?: class="((?:high|low)-rating)")?>\s*"#,
        r#"<span class="rating">\s*(?:<span.*?>.*?</span>\s*)*</span>\s*"#,
        r#"<a class="subtitle-page" href="(.*?)">\s*"#,
        r#"<span class="flag flag-.*?">.*?</span>\s*"#,
        r#"<span>(.*?)</span>.*?"#,
        r#"<span class="subdesc">.*?</span>\s*"#,
        r#"(?:<span class="verified-subtitle" title="verified">.*?</span>\s*)?"#,
        r#"</a>"#,
        r#".*?"#,
        r#"</li>"#,
    ))
    .expect("valid candidate pattern")
});

// @const: Download anchor on a subtitle detail page
static DOWNLOAD_ANCHOR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<a href="([^"]*)" class="[^"]*\bdownload-subtitle\b[^"]*">"#)
        .expect("valid download anchor pattern")
});

/// Coarse quality signal carried by a listing entry's class attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RatingClass {
    /// Entry carries the high-rating class
    High,
    /// Entry carries the low-rating class
    Low,
    /// No rating class on the entry
    #[default]
    Unset,
}

impl From<Option<&str>> for RatingClass {
    fn from(class_attr: Option<&str>) -> Self {
        match class_attr {
            Some("high-rating") => Self::High,
            Some("low-rating") => Self::Low,
            _ => Self::Unset,
        }
    }
}

/// A subtitle listing entry as scraped from a movie page, not yet filtered
#[derive(Debug, Clone)]
pub struct SubtitleCandidate {
    /// Language label in the site's own spelling
    pub language: String,

    /// Relative link to the subtitle detail page
    pub page_link: String,

    /// Rating class carried by the entry
    pub rating: RatingClass,
}

/// Scrape subtitle candidates from a movie listing page, in page order.
///
/// A page with no matching entries produces an empty vector; that is the
/// "no subtitles found" outcome, not a fault.
pub fn parse_listing(page: &str) -> Vec<SubtitleCandidate> {
    CANDIDATE_REGEX
        .captures_iter(page)
        .map(|caps| SubtitleCandidate {
            language: caps[3].to_string(),
            page_link: caps[2].to_string(),
            rating: RatingClass::from(caps.get(1).map(|m| m.as_str())),
        })
        .collect()
}

/// Extract the archive download URL from a subtitle detail page.
///
/// Returns `None` when the page carries no download anchor, meaning no
/// archive is available for this candidate.
pub fn extract_archive_url(page: &str) -> Option<String> {
    DOWNLOAD_ANCHOR_REGEX
        .captures(page)
        .map(|caps| caps[1].to_string())
}
