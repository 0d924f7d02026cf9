//! Loading the OpenAPI document from a URL or a local file.

use std::fs;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;

/// Whether the input names an HTTP(S) URL rather than a file path.
pub fn is_remote(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

/// Read the raw document text from `input`.
pub async fn load_source(input: &str) -> Result<String> {
    if is_remote(input) {
        fetch(input).await
    } else {
        fs::read_to_string(input).with_context(|| format!("failed to read {}", input))
    }
}

/// Fetch the document with a single GET. Non-success statuses are errors.
async fn fetch(url: &str) -> Result<String> {
    let client = Client::builder()
        .timeout(Duration::from_secs(30))
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .build()
        .context("failed to create HTTP client")?;

    log::info!("fetching {}", url);
    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("failed to fetch {}", url))?
        .error_for_status()
        .with_context(|| format!("unexpected response from {}", url))?;

    response
        .text()
        .await
        .with_context(|| format!("failed to read response body from {}", url))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const SPEC_JSON: &str = r#"{"info":{"title":"Remote","version":"1"},"paths":{}}"#;

    #[test]
    fn test_is_remote() {
        assert!(is_remote("https://example.com/api.json"));
        assert!(is_remote("http://localhost:8080/openapi.yaml"));
        assert!(!is_remote("openapi.json"));
        assert!(!is_remote("./specs/http.yaml"));
    }

    #[tokio::test]
    async fn test_fetch_remote_document() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/docs/api.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(SPEC_JSON))
            .expect(1)
            .mount(&server)
            .await;

        let url = format!("{}/docs/api.json", server.uri());
        let body = load_source(&url).await.unwrap();
        assert_eq!(body, SPEC_JSON);
    }

    #[tokio::test]
    async fn test_fetch_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let url = format!("{}/missing.json", server.uri());
        let err = load_source(&url).await.unwrap_err();
        assert!(err.to_string().contains("unexpected response"));
    }

    #[tokio::test]
    async fn test_load_local_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("openapi.json");
        fs::write(&file, SPEC_JSON).unwrap();

        let body = load_source(file.to_str().unwrap()).await.unwrap();
        assert_eq!(body, SPEC_JSON);

        let missing = dir.path().join("nope.json");
        assert!(load_source(missing.to_str().unwrap()).await.is_err());
    }
}
