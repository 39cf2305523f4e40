use anyhow::{Result, anyhow};
use std::collections::HashMap;
use std::str::FromStr;

// @module: Host invocation parsing (plugin calling convention)

/// Action requested by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Automatic subtitle search
    Search,
    /// User-initiated subtitle search
    ManualSearch,
    /// Download of a previously found subtitle
    Download,
}

impl FromStr for Action {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "search" => Ok(Self::Search),
            "manualsearch" => Ok(Self::ManualSearch),
            "download" => Ok(Self::Download),
            _ => Err(anyhow!("unknown action: {}", s)),
        }
    }
}

/// A parsed host invocation: an action plus flat key/value parameters
#[derive(Debug, Default)]
pub struct Invocation {
    params: HashMap<String, String>,
}

impl Invocation {
    /// Parse a raw parameter string in the host's calling convention
    pub fn parse(raw: &str) -> Self {
        Self {
            params: parse_params(raw),
        }
    }

    /// The requested action; missing or unknown actions are errors
    pub fn action(&self) -> Result<Action> {
        self.params
            .get("action")
            .ok_or_else(|| anyhow!("missing action parameter"))?
            .parse()
    }

    /// Raw value of a parameter
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Requested language tokens: the percent-decoded, comma-separated
    /// `languages` parameter. Absent or empty means no languages.
    pub fn languages(&self) -> Vec<String> {
        match self.get("languages") {
            Some(raw) if !raw.is_empty() => decode_component(raw)
                .split(',')
                .map(str::to_string)
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Split a host parameter string into key/value pairs.
///
/// Replicates the host's calling convention exactly: all `?` characters are
/// removed, a cleaned string ending in `/` loses its final two characters,
/// and pairs split on `&` then on the first `=`. Strings shorter than two
/// characters carry no parameters.
pub fn parse_params(raw: &str) -> HashMap<String, String> {
    let mut params = HashMap::new();
    if raw.len() < 2 {
        return params;
    }

    let mut cleaned = raw.replace('?', "");
    if cleaned.ends_with('/') {
        // Characters, not bytes: the value before the slash is user text
        // and may be multibyte.
        cleaned.pop();
        cleaned.pop();
    }

    for pair in cleaned.split('&') {
        if let Some((name, value)) = pair.split_once('=') {
            params.insert(name.to_string(), value.to_string());
        }
    }

    params
}

// Percent-decode a single query component. Only %XX escapes are decoded;
// '+' stays a literal '+' under this calling convention.
fn decode_component(value: &str) -> String {
    percent_encoding::percent_decode_str(value)
        .decode_utf8_lossy()
        .into_owned()
}
