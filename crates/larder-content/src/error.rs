//! Error types for content store access.

use thiserror::Error;

/// Errors produced by the fetch layer.
///
/// Transport-specific failures are wrapped here at the boundary; callers
/// never see the underlying HTTP client's error types. The layer performs
/// no retries; retry policy belongs to whoever consumed the fetch.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContentError {
    /// The store answered with a non-success status.
    #[error("content store returned status {status} for {query}")]
    Http { status: u16, query: String },

    /// The request never produced a usable response.
    #[error("transport error: {0}")]
    Transport(String),

    /// The response body did not match the expected shape.
    #[error("failed to decode {query} response: {detail}")]
    Decode { query: String, detail: String },

    /// Required configuration is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),
}

impl ContentError {
    /// HTTP status, when the store itself answered.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ContentError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Uniform shape for presentation: message, optional detail, status.
    pub fn report(&self) -> ErrorReport {
        let detail = match self {
            ContentError::Http { query, .. } => Some(query.clone()),
            ContentError::Transport(detail) => Some(detail.clone()),
            ContentError::Decode { detail, .. } => Some(detail.clone()),
            ContentError::Config(_) => None,
        };

        ErrorReport {
            message: self.to_string(),
            detail,
            status_code: self.status_code().unwrap_or(500),
        }
    }
}

/// Presentation-facing error report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReport {
    /// Human-readable message.
    pub message: String,
    /// Optional supporting detail.
    pub detail: Option<String>,
    /// Numeric status; non-HTTP failures report 500.
    pub status_code: u16,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_report() {
        let err = ContentError::Http {
            status: 429,
            query: "all-products".to_string(),
        };
        let report = err.report();
        assert_eq!(report.status_code, 429);
        assert!(report.message.contains("429"));
        assert_eq!(report.detail.as_deref(), Some("all-products"));
    }

    #[test]
    fn test_non_http_errors_report_500() {
        let err = ContentError::Transport("connection refused".to_string());
        assert_eq!(err.status_code(), None);
        assert_eq!(err.report().status_code, 500);

        let err = ContentError::Config("missing project id".to_string());
        assert_eq!(err.report().status_code, 500);
        assert_eq!(err.report().detail, None);
    }
}
