use thiserror::Error;

/// Maximum number of characters of a response body kept for diagnostics
pub const BODY_SNIPPET_CHARS: usize = 100;

/// Errors produced by the client and its retry-wrapped fetcher.
#[derive(Debug, Error)]
pub enum NaverError {
    /// Per-attempt deadline exceeded on every attempt
    #[error("request timed out")]
    Timeout,

    /// Upstream answered with a non-success status
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        /// Status code of the last attempt
        status: u16,
        /// First characters of the response body
        body: String,
    },

    /// Connection, DNS or body-read failure
    #[error("network error: {0}")]
    Network(String),

    /// The target is not an absolute http(s) URL
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The response body could not be decoded into the expected shape
    #[error("malformed response: {0}")]
    Malformed(String),

    /// Configuration error (e.g., missing credentials)
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl NaverError {
    /// Whether another attempt may succeed.
    ///
    /// Timeouts, transport failures, 429 and 5xx are retryable. Everything
    /// else surfaces on the first failure.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout | Self::Network(_) => true,
            Self::HttpStatus { status, .. } => crate::retry::is_retryable_status(*status),
            Self::InvalidUrl(_) | Self::Malformed(_) | Self::Config(_) => false,
        }
    }

    /// HTTP status code, if the error carries one
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub(crate) fn from_reqwest(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// First [`BODY_SNIPPET_CHARS`] characters of `body`.
#[must_use]
pub fn snippet(body: &str) -> String {
    body.chars().take(BODY_SNIPPET_CHARS).collect()
}

/// Maps a serde deserialization error to a [`NaverError::Malformed`] with context
#[must_use]
pub fn map_deser(e: &serde_json::Error, body: &str) -> NaverError {
    NaverError::Malformed(format!("{e}: {}", snippet(body)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_classification() {
        assert!(NaverError::Timeout.is_retryable());
        assert!(NaverError::Network("reset".into()).is_retryable());
        for status in [429, 500, 502, 503, 599] {
            let err = NaverError::HttpStatus {
                status,
                body: String::new(),
            };
            assert!(err.is_retryable(), "{status} should be retryable");
        }
        for status in [400, 401, 403, 404, 408, 409] {
            let err = NaverError::HttpStatus {
                status,
                body: String::new(),
            };
            assert!(!err.is_retryable(), "{status} should not be retryable");
        }
        assert!(!NaverError::Malformed("x".into()).is_retryable());
        assert!(!NaverError::Config("x".into()).is_retryable());
        assert!(!NaverError::InvalidUrl("x".into()).is_retryable());
    }

    #[test]
    fn status_only_for_http_errors() {
        let err = NaverError::HttpStatus {
            status: 404,
            body: "nope".into(),
        };
        assert_eq!(err.status(), Some(404));
        assert_eq!(NaverError::Timeout.status(), None);
    }

    #[test]
    fn snippet_counts_characters_not_bytes() {
        let body = "가".repeat(150);
        let s = snippet(&body);
        assert_eq!(s.chars().count(), BODY_SNIPPET_CHARS);
        assert_eq!(snippet("short"), "short");
    }

    #[test]
    fn map_deser_includes_snippet() {
        let body = "<html>not json</html>";
        let err = serde_json::from_str::<serde_json::Value>(body).unwrap_err();
        let mapped = map_deser(&err, body);
        assert!(matches!(mapped, NaverError::Malformed(_)));
        assert!(mapped.to_string().contains("<html>not json</html>"));
    }
}
