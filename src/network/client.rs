//! HTTP client wrapper - executes requests and captures every result as an Outcome

use std::error::Error as StdError;
use std::time::{Duration, Instant};

use reqwest::header::CONTENT_TYPE;
use serde_json::Value;

use crate::constants::{NOT_FOUND_STATUS_TEXT, REQUEST_TIMEOUT_SECS, TIMEOUT_STATUS_TEXT};
use crate::models::{Outcome, OutcomeStatus, RequestDescriptor};
use crate::normalizer::{normalize, NormalizedRequest, RequestBody};

/// Build a reqwest request from a normalized request
fn build_request(client: &reqwest::Client, request: &NormalizedRequest) -> reqwest::RequestBuilder {
    let mut req_builder = client.request(request.method.to_reqwest(), &request.url);

    // Add headers
    for (key, value) in &request.headers {
        req_builder = req_builder.header(key, value);
    }

    // Add body
    match &request.body {
        Some(RequestBody::Json(value)) => {
            let has_content_type = request
                .headers
                .keys()
                .any(|k| k.eq_ignore_ascii_case(CONTENT_TYPE.as_str()));
            if !has_content_type {
                req_builder = req_builder.header(CONTENT_TYPE, "application/json");
            }
            req_builder = req_builder.body(value.to_string());
        }
        Some(RequestBody::Raw(text)) => {
            req_builder = req_builder.body(text.clone());
        }
        None => {}
    }

    req_builder
}

/// Normalize and execute a request. Never fails: every error becomes an Outcome.
pub async fn dispatch(client: &reqwest::Client, request: &RequestDescriptor) -> Outcome {
    let start = Instant::now();

    let normalized = match normalize(request) {
        Ok(normalized) => normalized,
        Err(e) => {
            let message = e.to_string();
            tracing::debug!(error = %message, "Request rejected before dispatch");
            return Outcome::failure(message.clone(), Value::String(message), elapsed_ms(start));
        }
    };

    execute_request(client, &normalized, start).await
}

/// Execute a normalized request; `start` marks when the attempt began
pub async fn execute_request(
    client: &reqwest::Client,
    request: &NormalizedRequest,
    start: Instant,
) -> Outcome {
    let result = build_request(client, request).send().await;

    let resp = match result {
        Ok(resp) => resp,
        Err(e) => return failure_outcome(&e, elapsed_ms(start)),
    };

    let status = resp.status();
    let content_type = resp
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(String::from);

    match resp.text().await {
        Ok(body) => Outcome {
            status: OutcomeStatus::Http(status.as_u16()),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            data: parse_data(body),
            time: elapsed_ms(start),
            content_type,
        },
        Err(e) => failure_outcome(&e, elapsed_ms(start)),
    }
}

/// JSON when the payload parses, the text otherwise
pub fn parse_data(body: String) -> Value {
    match serde_json::from_str::<Value>(&body) {
        Ok(value) => value,
        Err(_) => Value::String(body),
    }
}

fn failure_outcome(e: &reqwest::Error, time: u64) -> Outcome {
    if e.is_timeout() {
        Outcome::failure(TIMEOUT_STATUS_TEXT, Value::String(TIMEOUT_STATUS_TEXT.into()), time)
    } else if is_resolution_failure(e) {
        Outcome::failure(
            NOT_FOUND_STATUS_TEXT,
            Value::String(NOT_FOUND_STATUS_TEXT.into()),
            time,
        )
    } else {
        let message = error_chain(e);
        Outcome::failure(message.clone(), Value::String(message), time)
    }
}

/// Whether any error in the chain reports a failed name lookup
fn is_resolution_failure(e: &(dyn StdError + 'static)) -> bool {
    let mut current = Some(e);
    while let Some(err) = current {
        let text = err.to_string().to_lowercase();
        if text.contains("dns error")
            || text.contains("failed to lookup address")
            || text.contains("name or service not known")
            || text.contains("nodename nor servname")
            || text.contains("no such host")
        {
            return true;
        }
        current = err.source();
    }
    false
}

/// Error message with its sources joined by `: `
fn error_chain(e: &(dyn StdError + 'static)) -> String {
    let mut message = e.to_string();
    let mut current = e.source();
    while let Some(err) = current {
        let text = err.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        current = err.source();
    }
    message
}

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

/// Create an HTTP client with the fixed request timeout
pub fn create_client() -> reqwest::Client {
    create_client_with_timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
}

/// Create an HTTP client with a custom timeout
pub fn create_client_with_timeout(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HttpMethod;
    use std::fmt;

    #[derive(Debug)]
    struct Layer {
        text: &'static str,
        source: Option<Box<Layer>>,
    }

    impl fmt::Display for Layer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.text)
        }
    }

    impl StdError for Layer {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            self.source.as_deref().map(|s| s as &(dyn StdError + 'static))
        }
    }

    fn chain(outer: &'static str, inner: &'static str) -> Layer {
        Layer {
            text: outer,
            source: Some(Box::new(Layer {
                text: inner,
                source: None,
            })),
        }
    }

    #[test]
    fn test_resolution_failure_detected_in_sources() {
        let err = chain("error sending request", "dns error: failed to lookup address information");
        assert!(is_resolution_failure(&err));

        let err = chain("error sending request", "tcp connect error: Connection refused");
        assert!(!is_resolution_failure(&err));
    }

    #[test]
    fn test_error_chain_joins_sources() {
        let err = chain("error sending request", "Connection refused");
        assert_eq!(error_chain(&err), "error sending request: Connection refused");
    }

    #[test]
    fn test_parse_data() {
        assert_eq!(parse_data(r#"{"ok":true}"#.into()), serde_json::json!({"ok": true}));
        assert_eq!(parse_data("plain".into()), Value::String("plain".into()));
        assert_eq!(parse_data(String::new()), Value::String(String::new()));
    }

    #[tokio::test]
    async fn test_invalid_headers_become_error_outcome() {
        let client = create_client();
        let request =
            RequestDescriptor::new(HttpMethod::POST, "http://127.0.0.1:9").with_headers("{bad");

        let outcome = dispatch(&client, &request).await;
        assert_eq!(outcome.status, OutcomeStatus::Error);
        assert_eq!(outcome.status_text, "Invalid Headers JSON format");
        assert_eq!(outcome.data, Value::String("Invalid Headers JSON format".into()));
        assert_eq!(outcome.content_type, None);
    }

    #[tokio::test]
    async fn test_empty_url_fails_at_transport() {
        let client = create_client();
        let outcome = dispatch(&client, &RequestDescriptor::new(HttpMethod::GET, "   ")).await;
        assert!(outcome.status.is_error());
        assert!(!outcome.status_text.is_empty());
    }
}
