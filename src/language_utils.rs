use isolang::Language;
use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::listing_parser::RatingClass;

/// Language and rating normalization for the listing site
///
/// The site labels some languages with its own spellings; `normalize_language`
/// maps those to the canonical English names the rest of the pipeline compares
/// against. Anything not in the table passes through unchanged.
/// Lookups are case-exact on purpose: the table mirrors the site's strings.
static LANGUAGE_ALIASES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("Brazilian Portuguese", "Portuguese (Brazil)"),
        ("Farsi/Persian", "Persian"),
    ])
});

/// Map a site-native language label to its canonical name
pub fn normalize_language(raw: &str) -> &str {
    LANGUAGE_ALIASES.get(raw).copied().unwrap_or(raw)
}

/// Map a rating class to its rating string.
///
/// The site only exposes a tri-level signal; "3" stands for unrated/average,
/// not a measured score.
pub fn rating_value(rating: RatingClass) -> &'static str {
    match rating {
        RatingClass::High => "5",
        RatingClass::Low => "0",
        RatingClass::Unset => "3",
    }
}

/// Resolve a caller-supplied language token to an English language name.
///
/// Accepts ISO 639-1 codes ("en"), ISO 639-3 codes ("eng") and English
/// names ("English"). Returns `None` for tokens isolang does not know.
pub fn resolve_language_token(token: &str) -> Option<String> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }

    let lowered = token.to_lowercase();
    if lowered.len() == 2 {
        if let Some(language) = Language::from_639_1(&lowered) {
            return Some(language.to_name().to_string());
        }
    }
    if lowered.len() == 3 {
        if let Some(language) = Language::from_639_3(&lowered) {
            return Some(language.to_name().to_string());
        }
    }

    Language::from_name(token).map(|language| language.to_name().to_string())
}
