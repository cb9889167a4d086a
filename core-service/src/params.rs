//! Request parameter extraction
//!
//! Controllers receive the raw request target (`/artists/123?page=2`) and
//! read identifiers from path segments and pagination from the query string.

use std::collections::HashMap;

use url::Url;

use crate::error::{CoreError, Result};

// Relative request targets are resolved against this origin
const LOCAL_ORIGIN: &str = "http://localhost/";

/// Decoded path segments and query pairs of a request target
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestParams {
    segments: Vec<String>,
    query: HashMap<String, String>,
}

impl RequestParams {
    /// Parse a request target, either origin-relative or absolute.
    ///
    /// ```
    /// use core_service::params::RequestParams;
    ///
    /// let params = RequestParams::parse("/artists/0OdUWJ0sBjDrqHygGUXeCF?page=2").unwrap();
    /// assert_eq!(params.segment(1), Some("0OdUWJ0sBjDrqHygGUXeCF"));
    /// assert_eq!(params.query("page"), Some("2"));
    /// ```
    pub fn parse(target: &str) -> Result<Self> {
        let url = Url::parse(LOCAL_ORIGIN)
            .and_then(|origin| origin.join(target))
            .map_err(|e| CoreError::InvalidParameter {
                name: "url".to_string(),
                message: e.to_string(),
            })?;

        let segments = match url.path_segments() {
            Some(raw) => raw
                .map(|segment| {
                    urlencoding::decode(segment)
                        .map(|decoded| decoded.into_owned())
                        .map_err(|e| CoreError::InvalidParameter {
                            name: "path".to_string(),
                            message: e.to_string(),
                        })
                })
                .collect::<Result<Vec<_>>>()?,
            None => Vec::new(),
        };

        let mut query = HashMap::new();
        for (key, value) in url.query_pairs() {
            // First occurrence wins
            query
                .entry(key.into_owned())
                .or_insert_with(|| value.into_owned());
        }

        Ok(Self { segments, query })
    }

    /// Path segment at `index` (0 is the route name); empty segments are absent.
    pub fn segment(&self, index: usize) -> Option<&str> {
        self.segments
            .get(index)
            .map(String::as_str)
            .filter(|segment| !segment.is_empty())
    }

    /// Query value for `name`; empty values are absent.
    pub fn query(&self, name: &str) -> Option<&str> {
        self.query
            .get(name)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// Positive integer query value, `default` when absent
    pub fn positive_u32(&self, name: &str, default: u32) -> Result<u32> {
        let Some(raw) = self.query(name) else {
            return Ok(default);
        };

        match raw.trim().parse::<u32>() {
            Ok(0) | Err(_) => Err(CoreError::InvalidParameter {
                name: name.to_string(),
                message: format!("expected a positive integer, got '{}'", raw),
            }),
            Ok(value) => Ok(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segments_are_decoded() {
        let params = RequestParams::parse("/search/Guns%20N%27%20Roses").unwrap();
        assert_eq!(params.segment(0), Some("search"));
        assert_eq!(params.segment(1), Some("Guns N' Roses"));
        assert_eq!(params.segment(2), None);
    }

    #[test]
    fn test_query_pairs() {
        let params = RequestParams::parse("/?q=daft+punk&q=ignored&page=").unwrap();
        assert_eq!(params.query("q"), Some("daft punk"));
        assert_eq!(params.query("page"), None);
        assert_eq!(params.segment(0), None);
    }

    #[test]
    fn test_absolute_target() {
        let params = RequestParams::parse("https://spotie.example/albums/abc?limit=20").unwrap();
        assert_eq!(params.segment(1), Some("abc"));
        assert_eq!(params.positive_u32("limit", 10).unwrap(), 20);
    }

    #[test]
    fn test_positive_u32() {
        let params = RequestParams::parse("/x?page=3&limit=0&offset=-1&size=ten").unwrap();
        assert_eq!(params.positive_u32("page", 1).unwrap(), 3);
        assert_eq!(params.positive_u32("missing", 7).unwrap(), 7);

        for name in ["limit", "offset", "size"] {
            assert!(matches!(
                params.positive_u32(name, 1),
                Err(CoreError::InvalidParameter { name: n, .. }) if n == name
            ));
        }
    }
}
