// SPDX-License-Identifier: GPL-3.0-or-later

use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CatalogError>;

/// Failure of a single catalog request, classified by how the caller should react.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// The service asked us to slow down. `retry_after` is its advisory wait, if any.
    #[error("rate limit exceeded (retry after {retry_after:?})")]
    RateLimited { retry_after: Option<Duration> },

    /// Network failure, timeout, server error or malformed body; worth retrying.
    #[error("transient catalog error: {message}")]
    Transient { message: String },

    /// Authentication failure, missing resource or any other protocol error.
    #[error("catalog request failed: {message}")]
    Fatal { message: String },
}

impl CatalogError {
    pub fn transient(message: impl Into<String>) -> Self {
        Self::Transient {
            message: message.into(),
        }
    }

    pub fn fatal(message: impl Into<String>) -> Self {
        Self::Fatal {
            message: message.into(),
        }
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal { .. })
    }

    /// Classify a non-success HTTP response.
    pub fn from_status(status: StatusCode, retry_after: Option<Duration>, body: &str) -> Self {
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Self::RateLimited { retry_after };
        }

        let message = format!("{} - {}", status.as_u16(), summarize_body(body));
        if status.is_server_error() {
            Self::transient(message)
        } else {
            Self::fatal(message)
        }
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_builder() {
            Self::fatal(format!("invalid request: {}", error))
        } else {
            Self::transient(format!("HTTP request failed: {}", error))
        }
    }
}

/// Retry-After header as whole seconds.
pub(crate) fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}

/// Extract the service's error message when the body is a JSON error envelope.
fn summarize_body(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            let error = value.get("error")?;
            error
                .get("message")
                .or(value.get("error_description"))
                .or(Some(error))
                .and_then(|message| message.as_str().map(str::to_string))
        })
        .unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                "Unknown error".to_string()
            } else {
                trimmed.to_string()
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn classifies_statuses() {
        assert_eq!(
            CatalogError::from_status(StatusCode::TOO_MANY_REQUESTS, Some(Duration::from_secs(2)), ""),
            CatalogError::RateLimited {
                retry_after: Some(Duration::from_secs(2))
            }
        );
        assert!(matches!(
            CatalogError::from_status(StatusCode::BAD_GATEWAY, None, ""),
            CatalogError::Transient { .. }
        ));
        assert!(CatalogError::from_status(StatusCode::NOT_FOUND, None, "").is_fatal());
        assert!(CatalogError::from_status(StatusCode::UNAUTHORIZED, None, "").is_fatal());
    }

    #[test]
    fn fatal_message_includes_service_error() {
        let body = r#"{"error":{"status":404,"message":"Resource not found"}}"#;
        let error = CatalogError::from_status(StatusCode::NOT_FOUND, None, body);
        assert_eq!(
            error,
            CatalogError::fatal("404 - Resource not found")
        );

        let body = r#"{"error":"invalid_client","error_description":"Invalid client secret"}"#;
        let error = CatalogError::from_status(StatusCode::BAD_REQUEST, None, body);
        assert_eq!(error, CatalogError::fatal("400 - Invalid client secret"));
    }

    #[test]
    fn parses_retry_after_seconds() {
        let mut headers = HeaderMap::new();
        assert_eq!(parse_retry_after(&headers), None);

        headers.insert(RETRY_AFTER, HeaderValue::from_static("7"));
        assert_eq!(parse_retry_after(&headers), Some(Duration::from_secs(7)));

        headers.insert(RETRY_AFTER, HeaderValue::from_static("soon"));
        assert_eq!(parse_retry_after(&headers), None);
    }
}
