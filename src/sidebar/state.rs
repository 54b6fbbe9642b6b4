//! Per-sidebar view state and its query-string form

use percent_encoding::{percent_decode_str, utf8_percent_encode, NON_ALPHANUMERIC};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::plugins::PostSummary;

/// Errors from parsing sidebar state out of a request
#[derive(Error, Debug, PartialEq, Eq)]
pub enum QueryError {
    #[error("Invalid page number: {0}")]
    InvalidPage(String),

    #[error("Unknown sidebar variant: {0} (expected desktop or mobile)")]
    UnknownVariant(String),

    #[error("Malformed query parameter: {0}")]
    Malformed(String),
}

/// The category filter currently applied
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    /// No filter
    #[default]
    All,
    Category(String),
}

impl Selection {
    /// Map a select option to a selection; `all_label` is the sentinel
    pub fn from_option(value: &str, all_label: &str) -> Self {
        if value == all_label {
            Selection::All
        } else {
            Selection::Category(value.to_string())
        }
    }

    /// The select option this selection corresponds to
    pub fn as_option<'a>(&'a self, all_label: &'a str) -> &'a str {
        match self {
            Selection::All => all_label,
            Selection::Category(c) => c,
        }
    }

    pub fn matches(&self, item: &PostSummary) -> bool {
        match self {
            Selection::All => true,
            Selection::Category(c) => item.has_category(c),
        }
    }
}

/// State owned by one sidebar instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub selection: Selection,
    /// 1-based; only meaningful for the mobile variant
    pub current_page: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            selection: Selection::All,
            current_page: 1,
        }
    }
}

impl ViewState {
    /// Parse `category=…&page=…`; unrelated keys are ignored
    pub fn from_query(query: &str, all_label: &str) -> Result<Self, QueryError> {
        let mut state = ViewState::default();

        for (key, value) in parse_query(query)? {
            match key.as_str() {
                "category" => state.selection = Selection::from_option(&value, all_label),
                "page" => {
                    state.current_page = match value.parse::<usize>() {
                        Ok(page) if page >= 1 => page,
                        _ => return Err(QueryError::InvalidPage(value)),
                    }
                }
                _ => {}
            }
        }

        Ok(state)
    }

    /// Query string reproducing this state, omitting defaults
    pub fn to_query(&self, all_label: &str) -> String {
        let mut parts = Vec::new();
        if let Selection::Category(c) = &self.selection {
            if c != all_label {
                parts.push(format!("category={}", encode_component(c)));
            }
        }
        if self.current_page > 1 {
            parts.push(format!("page={}", self.current_page));
        }
        parts.join("&")
    }
}

/// Which sidebar layout to render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    /// Full filtered list, no pagination
    #[default]
    Desktop,
    /// Paginated list with prev/next controls
    Mobile,
}

impl FromStr for Variant {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "desktop" => Ok(Variant::Desktop),
            "mobile" => Ok(Variant::Mobile),
            _ => Err(QueryError::UnknownVariant(s.to_string())),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Desktop => f.write_str("desktop"),
            Variant::Mobile => f.write_str("mobile"),
        }
    }
}

/// Percent-encode a query component
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, NON_ALPHANUMERIC).to_string()
}

/// Split a query string into decoded key/value pairs
pub fn parse_query(query: &str) -> Result<Vec<(String, String)>, QueryError> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            Ok((decode_component(key, pair)?, decode_component(value, pair)?))
        })
        .collect()
}

fn decode_component(raw: &str, pair: &str) -> Result<String, QueryError> {
    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced)
        .decode_utf8()
        .map(|s| s.into_owned())
        .map_err(|_| QueryError::Malformed(pair.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_sentinel() {
        assert_eq!(Selection::from_option("all", "all"), Selection::All);
        assert_eq!(
            Selection::from_option("go", "all"),
            Selection::Category("go".into())
        );
        assert_eq!(Selection::All.as_option("すべて"), "すべて");
    }

    #[test]
    fn test_query_roundtrip_with_encoding() {
        let state = ViewState {
            selection: Selection::Category("C++ & Rust".into()),
            current_page: 3,
        };
        let query = state.to_query("all");
        assert_eq!(query, "category=C%2B%2B%20%26%20Rust&page=3");
        assert_eq!(ViewState::from_query(&query, "all").unwrap(), state);
    }

    #[test]
    fn test_query_defaults() {
        assert_eq!(ViewState::default().to_query("all"), "");
        assert_eq!(
            ViewState::from_query("", "all").unwrap(),
            ViewState::default()
        );
        let state = ViewState::from_query("?category=all&variant=mobile", "all").unwrap();
        assert_eq!(state.selection, Selection::All);
    }

    #[test]
    fn test_query_plus_is_space() {
        let state = ViewState::from_query("category=web+dev", "all").unwrap();
        assert_eq!(state.selection, Selection::Category("web dev".into()));
    }

    #[test]
    fn test_invalid_page() {
        assert_eq!(
            ViewState::from_query("page=0", "all"),
            Err(QueryError::InvalidPage("0".into()))
        );
        assert_eq!(
            ViewState::from_query("page=two", "all"),
            Err(QueryError::InvalidPage("two".into()))
        );
    }

    #[test]
    fn test_variant_parse() {
        assert_eq!("Mobile".parse::<Variant>().unwrap(), Variant::Mobile);
        assert_eq!("desktop".parse::<Variant>().unwrap(), Variant::Desktop);
        assert!(matches!(
            "tablet".parse::<Variant>(),
            Err(QueryError::UnknownVariant(_))
        ));
    }
}
