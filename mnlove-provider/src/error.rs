use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for every call made against the map data API.
///
/// Each variant carries an `endpoint` naming the call that failed, plus
/// variant-specific context. All variants are serializable so the UI layer
/// can forward them verbatim.
///
/// # Retryable Errors
///
/// - [`NetworkError`](Self::NetworkError)
/// - [`Timeout`](Self::Timeout)
/// - [`RateLimited`](Self::RateLimited)
///
/// The HTTP helpers retry these with exponential backoff.
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ProviderError {
    /// Connection refused, DNS failure, 502/503/504 and the like.
    #[error("[{endpoint}] Network error: {detail}")]
    NetworkError { endpoint: String, detail: String },

    /// The request timed out.
    #[error("[{endpoint}] Request timeout: {detail}")]
    Timeout { endpoint: String, detail: String },

    /// HTTP 429.
    #[error("[{endpoint}] Rate limited{}", .retry_after.map(|s| format!(" (retry after {s}s)")).unwrap_or_default())]
    RateLimited {
        endpoint: String,
        /// Seconds to wait, from the `Retry-After` header.
        retry_after: Option<u64>,
        raw_message: Option<String>,
    },

    /// HTTP 401: missing or expired session.
    #[error("[{endpoint}] Unauthorized{}", .raw_message.as_ref().map(|m| format!(": {m}")).unwrap_or_default())]
    Unauthorized {
        endpoint: String,
        raw_message: Option<String>,
    },

    /// HTTP 403: the session lacks the role for this call (atlas admin tools).
    #[error("[{endpoint}] Permission denied{}", .raw_message.as_ref().map(|m| format!(": {m}")).unwrap_or_default())]
    PermissionDenied {
        endpoint: String,
        raw_message: Option<String>,
    },

    /// HTTP 404 for an addressed resource.
    #[error("[{endpoint}] {resource} '{id}' not found")]
    NotFound {
        endpoint: String,
        resource: String,
        id: String,
    },

    /// HTTP 400/422 or a request rejected before sending.
    #[error("[{endpoint}] Invalid parameter '{param}': {detail}")]
    InvalidParameter {
        endpoint: String,
        param: String,
        detail: String,
    },

    /// The response body was not the JSON we expected.
    #[error("[{endpoint}] Parse error: {detail}")]
    ParseError { endpoint: String, detail: String },

    /// The request body could not be serialized.
    #[error("[{endpoint}] Serialization error: {detail}")]
    SerializationError { endpoint: String, detail: String },

    /// Any other non-success status.
    #[error("[{endpoint}] HTTP {status}: {raw_message}")]
    Unknown {
        endpoint: String,
        status: u16,
        raw_message: String,
    },
}

impl ProviderError {
    /// Whether this is expected behavior (bad input, missing resource, no
    /// session) rather than a fault.
    ///
    /// `true` should be logged at `warn`, `false` at `error`.
    /// **Update this when adding variants.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::Unauthorized { .. }
                | Self::PermissionDenied { .. }
                | Self::NotFound { .. }
                | Self::InvalidParameter { .. }
        )
    }

    /// Whether retrying the same request may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::NetworkError { .. } | Self::Timeout { .. } | Self::RateLimited { .. }
        )
    }

    /// Name of the endpoint that produced the error.
    pub fn endpoint(&self) -> &str {
        match self {
            Self::NetworkError { endpoint, .. }
            | Self::Timeout { endpoint, .. }
            | Self::RateLimited { endpoint, .. }
            | Self::Unauthorized { endpoint, .. }
            | Self::PermissionDenied { endpoint, .. }
            | Self::NotFound { endpoint, .. }
            | Self::InvalidParameter { endpoint, .. }
            | Self::ParseError { endpoint, .. }
            | Self::SerializationError { endpoint, .. }
            | Self::Unknown { endpoint, .. } => endpoint,
        }
    }
}

/// Convenience type alias for `Result<T, ProviderError>`.
pub type Result<T> = std::result::Result<T, ProviderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_network_error() {
        let e = ProviderError::NetworkError {
            endpoint: "pins".to_string(),
            detail: "connection refused".to_string(),
        };
        assert_eq!(e.to_string(), "[pins] Network error: connection refused");
    }

    #[test]
    fn display_rate_limited_with_retry_after() {
        let e = ProviderError::RateLimited {
            endpoint: "pins/nearby".to_string(),
            retry_after: Some(3),
            raw_message: None,
        };
        assert_eq!(e.to_string(), "[pins/nearby] Rate limited (retry after 3s)");
    }

    #[test]
    fn display_unauthorized_without_message() {
        let e = ProviderError::Unauthorized {
            endpoint: "groups".to_string(),
            raw_message: None,
        };
        assert_eq!(e.to_string(), "[groups] Unauthorized");
    }

    #[test]
    fn display_not_found() {
        let e = ProviderError::NotFound {
            endpoint: "atlas/lakes".to_string(),
            resource: "lake".to_string(),
            id: "bde-maka-ska".to_string(),
        };
        assert_eq!(e.to_string(), "[atlas/lakes] lake 'bde-maka-ska' not found");
    }

    #[test]
    fn expected_errors_are_user_facing() {
        assert!(
            ProviderError::PermissionDenied {
                endpoint: "atlas".into(),
                raw_message: None,
            }
            .is_expected()
        );
        assert!(
            !ProviderError::ParseError {
                endpoint: "pins".into(),
                detail: "eof".into(),
            }
            .is_expected()
        );
    }

    #[test]
    fn serializes_with_code_tag() {
        let e = ProviderError::Timeout {
            endpoint: "stats".into(),
            detail: "30s".into(),
        };
        let json = serde_json::to_value(&e).unwrap_or_default();
        assert_eq!(json["code"], "Timeout");
        assert_eq!(json["endpoint"], "stats");
    }

    #[test]
    fn endpoint_accessor_covers_variants() {
        let e = ProviderError::Unknown {
            endpoint: "analytics".into(),
            status: 418,
            raw_message: "teapot".into(),
        };
        assert_eq!(e.endpoint(), "analytics");
        assert!(!e.is_retryable());
    }
}
