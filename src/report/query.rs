//! Query string parsing for report requests.

use super::format::decode_query_value;
use super::sort::SortKey;
use crate::utils::config::DEFAULT_SORT;
use crate::utils::error::ReportError;
use log::debug;
use std::collections::HashMap;

/// Flat key -> raw value map of a request's query string
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: HashMap<String, String>,
}

impl QueryParams {
    /// Parse `a=1&b=2` style query strings
    ///
    /// Pairs are split on the first `=` only. Segments without `=` are
    /// skipped, and a repeated key keeps its last value. Values stay raw
    /// until an accessor decodes them.
    pub fn parse(query: &str) -> Self {
        let mut pairs = HashMap::new();
        for segment in query.split('&').filter(|s| !s.is_empty()) {
            match segment.split_once('=') {
                Some((key, value)) => {
                    pairs.insert(key.to_string(), value.to_string());
                }
                None => debug!("Skipping query segment without '=': {}", segment),
            }
        }
        Self { pairs }
    }

    /// Raw (undecoded) value of a key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs.get(key).map(String::as_str)
    }

    /// Requested sort key, `ct` when absent
    pub fn sort_key(&self) -> Result<SortKey, ReportError> {
        self.get("sort").unwrap_or(DEFAULT_SORT).parse()
    }

    /// Decoded filter expression, `None` when absent or empty
    pub fn filter(&self) -> Option<String> {
        self.get("filter")
            .map(decode_query_value)
            .filter(|value| !value.is_empty())
    }
}
