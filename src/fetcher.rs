use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::error::TransportError;

/// Algolia's Hacker News story search, newest first.
pub const DEFAULT_ENDPOINT: &str = "http://hn.algolia.com/api/v1/search_by_date?tags=story";

/// One news entry as listed by the upstream search API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub title: String,
    /// Absent for self-posts such as "Ask HN".
    pub url: Option<String>,
    pub author: Option<String>,
}

/// The listing endpoint nests its items under `hits`.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    hits: Vec<Item>,
}

pub struct Fetcher {
    client: Client,
    endpoint: String,
}

impl Fetcher {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Issues a single GET against the endpoint and returns the listed items.
    ///
    /// Failures are returned as-is; nothing is retried.
    pub async fn fetch(&self) -> Result<Vec<Item>, TransportError> {
        info!("Fetching items from {}", self.endpoint);

        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|source| self.request_error(source))?;

        let status = response.status();
        if !status.is_success() {
            error!("Listing request to {} returned {}", self.endpoint, status);
            return Err(TransportError::Status {
                url: self.endpoint.clone(),
                status,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|source| self.request_error(source))?;
        debug!("Received {} bytes from {}", bytes.len(), self.endpoint);

        let items = Self::parse_items(&bytes).map_err(|source| TransportError::Decode {
            url: self.endpoint.clone(),
            source,
        })?;

        info!("Fetched {} items", items.len());
        Ok(items)
    }

    /// Adapts a raw response body into items. A bare array is rejected.
    pub fn parse_items(body: &[u8]) -> Result<Vec<Item>, serde_json::Error> {
        let response: SearchResponse = serde_json::from_slice(body)?;
        Ok(response.hits)
    }

    fn request_error(&self, source: reqwest::Error) -> TransportError {
        TransportError::Request {
            url: self.endpoint.clone(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod parse_items_tests {
        use super::*;

        #[test]
        fn test_parse_hits() {
            let body = r#"{
                "hits": [
                    {"title": "First", "url": "https://one.example.com", "author": "alice"},
                    {"title": "Second", "url": "https://two.example.com", "author": "bob"}
                ],
                "nbHits": 2,
                "page": 0
            }"#;

            let items = Fetcher::parse_items(body.as_bytes()).unwrap();
            assert_eq!(items.len(), 2);
            assert_eq!(items[0].title, "First");
            assert_eq!(items[0].url.as_deref(), Some("https://one.example.com"));
            assert_eq!(items[1].author.as_deref(), Some("bob"));
        }

        #[test]
        fn test_parse_empty_hits() {
            let items = Fetcher::parse_items(br#"{"hits": []}"#).unwrap();
            assert!(items.is_empty());
        }

        #[test]
        fn test_parse_keeps_order() {
            let body = r#"{"hits": [{"title": "c"}, {"title": "a"}, {"title": "b"}]}"#;
            let titles: Vec<_> = Fetcher::parse_items(body.as_bytes())
                .unwrap()
                .into_iter()
                .map(|item| item.title)
                .collect();
            assert_eq!(titles, vec!["c", "a", "b"]);
        }

        #[test]
        fn test_parse_missing_optional_fields() {
            let body = r#"{"hits": [{"title": "Ask HN: anything", "url": null}]}"#;
            let items = Fetcher::parse_items(body.as_bytes()).unwrap();
            assert_eq!(
                items[0],
                Item {
                    title: "Ask HN: anything".to_string(),
                    url: None,
                    author: None,
                }
            );
        }

        #[test]
        fn test_parse_ignores_unknown_fields() {
            let body = r#"{"hits": [{"title": "T", "url": "https://t.example.com", "points": 12, "objectID": "1"}]}"#;
            let items = Fetcher::parse_items(body.as_bytes()).unwrap();
            assert_eq!(items.len(), 1);
        }

        #[test]
        fn test_parse_rejects_bare_array() {
            let body = r#"[{"title": "T", "url": "https://t.example.com"}]"#;
            assert!(Fetcher::parse_items(body.as_bytes()).is_err());
        }

        #[test]
        fn test_parse_rejects_missing_hits() {
            assert!(Fetcher::parse_items(br#"{"nbHits": 0}"#).is_err());
        }

        #[test]
        fn test_parse_rejects_item_without_title() {
            let body = r#"{"hits": [{"url": "https://t.example.com"}]}"#;
            assert!(Fetcher::parse_items(body.as_bytes()).is_err());
        }

        #[test]
        fn test_parse_rejects_non_json() {
            assert!(Fetcher::parse_items(b"<html>oops</html>").is_err());
        }
    }

    #[test]
    fn test_endpoint_is_kept() {
        let fetcher = Fetcher::new(DEFAULT_ENDPOINT);
        assert_eq!(fetcher.endpoint(), DEFAULT_ENDPOINT);
    }
}
