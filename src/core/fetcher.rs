use crate::core::{ConfigProvider, LadderQuery, LadderSource, ProblemEntry};
use crate::utils::error::{LadderError, Result};
use async_trait::async_trait;
use reqwest::Client;
use url::Url;

pub const ALERT_MESSAGE: &str = "Failed to fetch ladder. Make sure backend is running.";

pub struct HttpLadderSource {
    endpoint: String,
    client: Client,
}

impl HttpLadderSource {
    pub fn new<C: ConfigProvider>(config: &C) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            endpoint: config.api_endpoint().to_string(),
            client: builder.build()?,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// GET the service root and expect `{"status": "ok"}`.
    pub async fn check_backend(&self) -> Result<()> {
        let root = root_url(&self.endpoint)?;
        tracing::debug!("Checking backend health at: {}", root);

        let response = self.client.get(root).send().await?;
        let status = response.status();
        let body: serde_json::Value = response.json().await?;

        match body.get("status").and_then(|s| s.as_str()) {
            Some("ok") if status.is_success() => Ok(()),
            _ => Err(LadderError::ServiceError {
                status: status.as_u16(),
                message: format!("unexpected health response: {}", body),
            }),
        }
    }
}

#[async_trait]
impl LadderSource for HttpLadderSource {
    async fn fetch(&self, query: &LadderQuery) -> Result<Vec<ProblemEntry>> {
        let url = build_url(&self.endpoint, query)?;
        tracing::debug!("Making ladder request to: {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        tracing::debug!("Ladder response status: {}", status);

        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(LadderError::ServiceError {
                status: status.as_u16(),
                message: service_error_message(&body),
            });
        }

        let entries = decode_ladder(&body)?;
        tracing::info!("Fetched {} ladder entries", entries.len());
        Ok(entries)
    }
}

pub fn build_url(endpoint: &str, query: &LadderQuery) -> Result<Url> {
    let mut url = Url::parse(endpoint).map_err(|e| LadderError::InvalidConfigValueError {
        field: "api_endpoint".to_string(),
        value: endpoint.to_string(),
        reason: format!("Invalid URL format: {}", e),
    })?;

    url.query_pairs_mut().extend_pairs(query.to_pairs());
    Ok(url)
}

fn root_url(endpoint: &str) -> Result<Url> {
    let url = Url::parse(endpoint).map_err(|e| LadderError::InvalidConfigValueError {
        field: "api_endpoint".to_string(),
        value: endpoint.to_string(),
        reason: format!("Invalid URL format: {}", e),
    })?;

    url.join("/").map_err(|e| LadderError::ConfigError {
        message: format!("Cannot derive service root from {}: {}", endpoint, e),
    })
}

/// Decodes the whole body before anything is rendered. The array is
/// checked element by element so the error names the offending entry.
pub fn decode_ladder(body: &[u8]) -> Result<Vec<ProblemEntry>> {
    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|e| LadderError::PayloadError {
            message: format!("body is not JSON: {}", e),
        })?;

    let items = match value {
        serde_json::Value::Array(items) => items,
        other => {
            return Err(LadderError::PayloadError {
                message: format!("expected an array of problems, got {}", json_kind(&other)),
            })
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            serde_json::from_value(item).map_err(|e| LadderError::PayloadError {
                message: format!("entry {}: {}", i, e),
            })
        })
        .collect()
}

fn service_error_message(body: &[u8]) -> String {
    serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or_else(|| String::from_utf8_lossy(body).trim().to_string())
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FilterValues;
    use httpmock::prelude::*;
    use std::time::Duration;

    struct MockConfig {
        api_endpoint: String,
        timeout: Option<Duration>,
    }

    impl MockConfig {
        fn new(api_endpoint: String) -> Self {
            Self {
                api_endpoint,
                timeout: None,
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn api_endpoint(&self) -> &str {
            &self.api_endpoint
        }

        fn handle(&self) -> &str {
            "Samia5038"
        }

        fn output_path(&self) -> &str {
            "test_output.html"
        }

        fn timeout(&self) -> Option<Duration> {
            self.timeout
        }
    }

    fn sample_query() -> LadderQuery {
        LadderQuery::new(
            "Samia5038",
            FilterValues {
                min: "1200".to_string(),
                max: "1600".to_string(),
                sort: "rating".to_string(),
                indices: String::new(),
            },
        )
    }

    #[test]
    fn test_build_url_encodes_query() {
        let query = LadderQuery::new(
            "tourist",
            FilterValues {
                min: "".to_string(),
                max: "1 600".to_string(),
                sort: "rating&x=1".to_string(),
                indices: String::new(),
            },
        );

        let url = build_url("http://127.0.0.1:5000/api/ladder", &query).unwrap();
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:5000/api/ladder?handle=tourist&min=&max=1+600&sort=rating%26x%3D1"
        );
    }

    #[test]
    fn test_root_url_from_ladder_endpoint() {
        let root = root_url("http://127.0.0.1:5000/api/ladder").unwrap();
        assert_eq!(root.as_str(), "http://127.0.0.1:5000/");
    }

    #[test]
    fn test_decode_rejects_object_body() {
        let err = decode_ladder(br#"{"error": "boom"}"#).unwrap_err();
        assert!(err.to_string().contains("got an object"));
    }

    #[test]
    fn test_decode_names_faulty_entry() {
        let body = serde_json::json!([
            {"index": "A", "name": "Sum", "link": "https://x/a", "contestName": "C",
             "division": "div2", "rating": 800, "solvedCount": 1, "tags": []},
            {"index": "B", "name": "Diff", "link": "https://x/b", "contestName": "C",
             "division": "div2", "rating": 900, "solvedCount": 1}
        ]);

        let err = decode_ladder(body.to_string().as_bytes()).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("entry 1"));
        assert!(message.contains("tags"));
    }

    #[test]
    fn test_decode_rejects_non_json() {
        let err = decode_ladder(b"<html>Internal Server Error</html>").unwrap_err();
        assert!(matches!(err, LadderError::PayloadError { .. }));
    }

    #[tokio::test]
    async fn test_fetch_sends_filter_query() {
        let server = MockServer::start();
        let mock_data = serde_json::json!([{
            "index": "A", "name": "Sum", "link": "https://x/a",
            "contestName": "Div2 #1", "division": "2",
            "rating": 1300, "solvedCount": 500, "tags": ["math"]
        }]);

        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/ladder")
                .query_param("handle", "Samia5038")
                .query_param("min", "1200")
                .query_param("max", "1600")
                .query_param("sort", "rating");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(mock_data);
        });

        let source = HttpLadderSource::new(&MockConfig::new(server.url("/api/ladder"))).unwrap();
        let entries = source.fetch(&sample_query()).await.unwrap();

        api_mock.assert();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "Sum");
        assert_eq!(entries[0].rating, Some(1300));
    }

    #[tokio::test]
    async fn test_fetch_surfaces_backend_error_message() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/api/ladder");
            then.status(500)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"error": "Failed to fetch contests"}));
        });

        let source = HttpLadderSource::new(&MockConfig::new(server.url("/api/ladder"))).unwrap();
        let err = source.fetch(&sample_query()).await.unwrap_err();

        api_mock.assert();
        match err {
            LadderError::ServiceError { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "Failed to fetch contests");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_times_out() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/ladder");
            then.status(200)
                .delay(Duration::from_millis(500))
                .json_body(serde_json::json!([]));
        });

        let config = MockConfig {
            api_endpoint: server.url("/api/ladder"),
            timeout: Some(Duration::from_millis(50)),
        };
        let source = HttpLadderSource::new(&config).unwrap();
        let err = source.fetch(&sample_query()).await.unwrap_err();

        match err {
            LadderError::ApiError(e) => assert!(e.is_timeout()),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_check_backend_ok() {
        let server = MockServer::start();
        let health = server.mock(|when, then| {
            when.method(GET).path("/");
            then.status(200)
                .json_body(serde_json::json!({"status": "ok", "note": "/api/ladder available"}));
        });

        let source = HttpLadderSource::new(&MockConfig::new(server.url("/api/ladder"))).unwrap();
        source.check_backend().await.unwrap();
        health.assert();
    }
}
