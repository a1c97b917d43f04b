//! Generic HTTP helpers
//!
//! The map data API is a plain JSON-over-HTTP service: every call is
//! "send, check status, parse JSON". These helpers own that flow so the
//! typed provider only builds requests.

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::error::{ProviderError, Result};
use crate::types::ApiErrorBody;
use crate::utils::truncate_for_log;

/// Connection timeout (seconds)
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// Whole-request timeout (seconds)
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Build the shared client with timeouts applied.
pub fn create_http_client() -> Result<Client> {
    Client::builder()
        .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
        .timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
        .build()
        .map_err(|e| ProviderError::NetworkError {
            endpoint: "client".to_string(),
            detail: format!("Failed to build HTTP client: {e}"),
        })
}

/// HTTP helper function set
pub struct HttpUtils;

impl HttpUtils {
    /// Send a request and return `(status, body)`.
    ///
    /// Transport failures, 429 and 502-504 are turned into retryable errors
    /// here; every other status is returned to the caller untouched.
    pub async fn execute_request(
        request_builder: RequestBuilder,
        endpoint: &str,
        method_name: &str,
    ) -> Result<(u16, String)> {
        log::debug!("[{endpoint}] {method_name}");

        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout {
                    endpoint: endpoint.to_string(),
                    detail: e.to_string(),
                }
            } else {
                ProviderError::NetworkError {
                    endpoint: endpoint.to_string(),
                    detail: e.to_string(),
                }
            }
        })?;

        let status_code = response.status().as_u16();
        log::debug!("[{endpoint}] Response Status: {status_code}");

        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        if status_code == 429 {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[{endpoint}] Rate limited (HTTP 429), retry_after={retry_after:?}");
            return Err(ProviderError::RateLimited {
                endpoint: endpoint.to_string(),
                retry_after,
                raw_message: Some(body),
            });
        }

        if matches!(status_code, 502..=504) {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[{endpoint}] Server unavailable (HTTP {status_code})");
            return Err(ProviderError::NetworkError {
                endpoint: endpoint.to_string(),
                detail: format!("HTTP {status_code}: {}", truncate_for_log(&body)),
            });
        }

        let response_text = response
            .text()
            .await
            .map_err(|e| ProviderError::NetworkError {
                endpoint: endpoint.to_string(),
                detail: format!("Failed to read response body: {e}"),
            })?;

        log::debug!(
            "[{endpoint}] Response Body: {}",
            truncate_for_log(&response_text)
        );

        Ok((status_code, response_text))
    }

    /// Same as [`execute_request`](Self::execute_request), retrying
    /// retryable failures with exponential backoff.
    pub async fn execute_request_with_retry(
        request_builder: RequestBuilder,
        endpoint: &str,
        method_name: &str,
        max_retries: u32,
    ) -> Result<(u16, String)> {
        if max_retries == 0 {
            return Self::execute_request(request_builder, endpoint, method_name).await;
        }

        let mut last_error = None;

        for attempt in 0..=max_retries {
            // RequestBuilder is single-use
            let Some(req) = request_builder.try_clone() else {
                log::warn!("[{endpoint}] Cannot clone request, disabling retry");
                return Self::execute_request(request_builder, endpoint, method_name).await;
            };

            match Self::execute_request(req, endpoint, method_name).await {
                Ok(resp) => return Ok(resp),
                Err(e) if attempt < max_retries && e.is_retryable() => {
                    let delay = retry_delay(&e, attempt);
                    log::warn!(
                        "[{}] Request failed (attempt {}/{}), retrying in {:.1}s: {}",
                        endpoint,
                        attempt + 1,
                        max_retries + 1,
                        delay.as_secs_f64(),
                        e
                    );
                    tokio::time::sleep(delay).await;
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or_else(|| ProviderError::NetworkError {
            endpoint: endpoint.to_string(),
            detail: "All retries exhausted with no error captured".to_string(),
        }))
    }

    /// Parse a JSON body into `T`.
    pub fn parse_json<T>(response_text: &str, endpoint: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(response_text).map_err(|e| {
            log::error!("[{endpoint}] JSON parse failed: {e}");
            log::error!(
                "[{endpoint}] Raw response: {}",
                truncate_for_log(response_text)
            );
            ProviderError::ParseError {
                endpoint: endpoint.to_string(),
                detail: e.to_string(),
            }
        })
    }

    /// Turn a non-success status into a structured error.
    ///
    /// `resource` and `id` name the addressed object for 404s; list calls
    /// pass `None` and get [`ProviderError::Unknown`] instead.
    pub fn status_error(
        status_code: u16,
        body: &str,
        endpoint: &str,
        target: Option<(&str, &str)>,
    ) -> ProviderError {
        let message = serde_json::from_str::<ApiErrorBody>(body)
            .ok()
            .and_then(|b| b.error)
            .unwrap_or_else(|| truncate_for_log(body));

        match (status_code, target) {
            (401, _) => ProviderError::Unauthorized {
                endpoint: endpoint.to_string(),
                raw_message: Some(message),
            },
            (403, _) => ProviderError::PermissionDenied {
                endpoint: endpoint.to_string(),
                raw_message: Some(message),
            },
            (404, Some((resource, id))) => ProviderError::NotFound {
                endpoint: endpoint.to_string(),
                resource: resource.to_string(),
                id: id.to_string(),
            },
            (400 | 422, _) => ProviderError::InvalidParameter {
                endpoint: endpoint.to_string(),
                param: "body".to_string(),
                detail: message,
            },
            (status, _) => ProviderError::Unknown {
                endpoint: endpoint.to_string(),
                status,
                raw_message: message,
            },
        }
    }
}

/// Honor `Retry-After` (capped at 30s) for 429, otherwise back off exponentially.
fn retry_delay(error: &ProviderError, attempt: u32) -> Duration {
    if let ProviderError::RateLimited {
        retry_after: Some(secs),
        ..
    } = error
    {
        Duration::from_secs((*secs).min(30))
    } else {
        backoff_delay(attempt)
    }
}

/// 100ms, 200ms, 400ms, ... capped at 10s.
fn backoff_delay(attempt: u32) -> Duration {
    let capped_attempt = attempt.min(20);
    let delay_ms = 100_u64.saturating_mul(1_u64 << capped_attempt);
    Duration::from_millis(delay_ms.min(10_000))
}
