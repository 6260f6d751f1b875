use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::model::ContentEntry;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("request for {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request for {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("response from {url} is not valid JSON: {reason}")]
    Parse { url: String, reason: String },

    #[error("fragment {url} has the wrong shape, expected {expected}")]
    Shape { url: String, expected: &'static str },
}

/// Where fragments come from. The HTTP implementation is the real one;
/// tests plug in an in-memory source so loading and caching can be
/// exercised without a network.
#[async_trait]
pub trait FragmentSource: Send + Sync {
    async fn fetch_json(&self, url: &str) -> Result<Value, LoadError>;
}

/// Fetches fragments from the archive host over HTTP.
///
/// No timeout, no retries, no redirects beyond reqwest defaults: a failed
/// fetch is a terminal, user-visible error for the page view.
pub struct HttpSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSource {
    pub fn new(base_url: &str) -> Result<Self, String> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json"),
        );
        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| format!("failed to build http client: {e}"))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn absolute(&self, url: &str) -> String {
        format!("{}{}", self.base_url, url)
    }
}

#[async_trait]
impl FragmentSource for HttpSource {
    async fn fetch_json(&self, url: &str) -> Result<Value, LoadError> {
        let target = self.absolute(url);
        let resp = self
            .client
            .get(&target)
            .send()
            .await
            .map_err(|source| LoadError::Network {
                url: target.clone(),
                source,
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                url: target,
                status: status.as_u16(),
            });
        }

        resp.json::<Value>().await.map_err(|e| LoadError::Parse {
            url: target,
            reason: e.to_string(),
        })
    }
}

/// Fetch a list fragment of entry records. Anything but an array of
/// records (each with a name) is a shape error, not an empty success.
pub async fn fetch_entry_list(
    source: &dyn FragmentSource,
    url: &str,
) -> Result<Vec<ContentEntry>, LoadError> {
    let value = source.fetch_json(url).await?;
    let Value::Array(items) = value else {
        return Err(shape(url, "an array of entry records"));
    };
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        if !item.is_object() {
            return Err(shape(url, "an array of entry records"));
        }
        let entry: ContentEntry = serde_json::from_value(item)
            .map_err(|_| shape(url, "an array of entry records"))?;
        out.push(entry);
    }
    Ok(out)
}

/// Fetch a list fragment of plain names (topics or categories).
pub async fn fetch_name_list(
    source: &dyn FragmentSource,
    url: &str,
) -> Result<Vec<String>, LoadError> {
    let value = source.fetch_json(url).await?;
    let Value::Array(items) = value else {
        return Err(shape(url, "an array of name strings"));
    };
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        let Value::String(name) = item else {
            return Err(shape(url, "an array of name strings"));
        };
        out.push(name);
    }
    Ok(out)
}

/// Fetch a single-entry fragment. Arrays here are a shape error too:
/// entry pages expect exactly one record.
pub async fn fetch_entry(
    source: &dyn FragmentSource,
    url: &str,
) -> Result<ContentEntry, LoadError> {
    let value = source.fetch_json(url).await?;
    if !value.is_object() {
        return Err(shape(url, "a single entry record"));
    }
    serde_json::from_value(value).map_err(|_| shape(url, "a single entry record"))
}

fn shape(url: &str, expected: &'static str) -> LoadError {
    LoadError::Shape {
        url: url.to_string(),
        expected,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    struct MapSource {
        fragments: HashMap<String, Value>,
    }

    #[async_trait]
    impl FragmentSource for MapSource {
        async fn fetch_json(&self, url: &str) -> Result<Value, LoadError> {
            self.fragments
                .get(url)
                .cloned()
                .ok_or_else(|| LoadError::Status {
                    url: url.to_string(),
                    status: 404,
                })
        }
    }

    fn source(url: &str, value: Value) -> MapSource {
        MapSource {
            fragments: HashMap::from([(url.to_string(), value)]),
        }
    }

    #[tokio::test]
    async fn entry_list_decodes_records() {
        let src = source(
            "/d/software/games.json",
            serde_json::json!([{"name": "a"}, {"name": "b", "year": 1999}]),
        );
        let entries = fetch_entry_list(&src, "/d/software/games.json").await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].name, "b");
    }

    #[tokio::test]
    async fn single_record_where_list_expected_is_a_shape_error() {
        let src = source("/d/t.json", serde_json::json!({"name": "a"}));
        let err = fetch_entry_list(&src, "/d/t.json").await.unwrap_err();
        assert!(matches!(err, LoadError::Shape { .. }));
    }

    #[tokio::test]
    async fn list_where_record_expected_is_a_shape_error() {
        let src = source("/d/e.json", serde_json::json!([{"name": "a"}]));
        let err = fetch_entry(&src, "/d/e.json").await.unwrap_err();
        assert!(matches!(err, LoadError::Shape { .. }));
    }

    #[tokio::test]
    async fn record_without_name_is_a_shape_error() {
        let src = source("/d/t.json", serde_json::json!([{"year": 1999}]));
        let err = fetch_entry_list(&src, "/d/t.json").await.unwrap_err();
        assert!(matches!(err, LoadError::Shape { .. }));
    }

    #[tokio::test]
    async fn name_list_rejects_mixed_items() {
        let src = source("/d/topics.json", serde_json::json!(["Software", 3]));
        let err = fetch_name_list(&src, "/d/topics.json").await.unwrap_err();
        assert!(matches!(err, LoadError::Shape { .. }));
    }

    #[tokio::test]
    async fn missing_fragment_surfaces_http_status() {
        let src = source("/d/topics.json", serde_json::json!([]));
        let err = fetch_name_list(&src, "/d/other.json").await.unwrap_err();
        assert!(matches!(err, LoadError::Status { status: 404, .. }));
    }
}
