//! HTTP-specific error types for the Moltin API SDK.
//!
//! This module contains error types for HTTP operations, including API error
//! responses, network failures, and request validation failures.
//!
//! # Error Handling
//!
//! - [`ApiError`]: A non-2xx HTTP response, with the platform's error detail
//! - [`InvalidHttpRequestError`]: A request that fails validation before sending
//! - [`HttpError`]: Failures of [`HttpClient::send`](crate::clients::HttpClient::send)
//!
//! # Example
//!
//! ```rust,ignore
//! use moltin_api::clients::{HttpClient, HttpError};
//!
//! match client.send(&request, token.as_str()).await {
//!     Ok(response) => println!("Status: {}", response.code),
//!     Err(HttpError::InvalidRequest(e)) => println!("Invalid request: {}", e),
//!     Err(HttpError::Network(e)) => println!("Network error: {}", e),
//! }
//! ```

use std::collections::HashMap;

use serde_json::Value;
use thiserror::Error;

/// Error returned when the API answers with a status outside `200..=299`.
///
/// The platform reports failures as
/// `{ "errors": [ { "status": 404, "title": "Not Found", "detail": "..." } ] }`.
/// The first entry's title and the details of all entries are extracted. When
/// the body is not such an envelope, the raw text becomes the detail. The raw
/// body is always preserved for diagnostics.
///
/// # Example
///
/// ```rust
/// use moltin_api::clients::ApiError;
/// use std::collections::HashMap;
///
/// let error = ApiError::from_response(
///     404,
///     &HashMap::new(),
///     r#"{"errors":[{"status":404,"title":"Not Found","detail":"No integration found"}]}"#,
/// );
///
/// assert_eq!(error.status, 404);
/// assert_eq!(error.title.as_deref(), Some("Not Found"));
/// assert_eq!(error.detail.as_deref(), Some("No integration found"));
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Moltin API error {status}: {}", summarize(.title, .detail))]
pub struct ApiError {
    /// The HTTP status code of the response.
    pub status: u16,
    /// Short error title, e.g. `Not Found`.
    pub title: Option<String>,
    /// Human-readable error detail.
    pub detail: Option<String>,
    /// The raw response body.
    pub body: String,
    /// The `X-Request-Id` header value, if present.
    pub request_id: Option<String>,
}

fn summarize(title: &Option<String>, detail: &Option<String>) -> String {
    match (title.as_deref(), detail.as_deref()) {
        (Some(title), Some(detail)) => format!("{title} ({detail})"),
        (Some(text), None) | (None, Some(text)) => text.to_string(),
        (None, None) => "no error detail provided".to_string(),
    }
}

impl ApiError {
    /// Builds an `ApiError` from a raw response.
    ///
    /// # Arguments
    ///
    /// * `status` - The HTTP status code
    /// * `headers` - Response headers with lowercased names
    /// * `body` - The raw response body
    #[must_use]
    pub fn from_response(status: u16, headers: &HashMap<String, Vec<String>>, body: &str) -> Self {
        let (title, detail) = serde_json::from_str::<Value>(body)
            .ok()
            .map_or_else(|| (None, raw_detail(body)), |json| parse_error_envelope(&json, body));

        Self {
            status,
            title,
            detail,
            body: body.to_string(),
            request_id: headers
                .get("x-request-id")
                .and_then(|values| values.first())
                .cloned(),
        }
    }
}

fn raw_detail(body: &str) -> Option<String> {
    let trimmed = body.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn string_field(object: &Value, key: &str) -> Option<String> {
    match object.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

/// Extracts `(title, detail)` from the known error envelope shapes.
fn parse_error_envelope(json: &Value, body: &str) -> (Option<String>, Option<String>) {
    match json.get("errors") {
        Some(Value::Array(entries)) if !entries.is_empty() => {
            let title = entries.iter().find_map(|e| string_field(e, "title"));
            let details: Vec<String> = entries
                .iter()
                .filter_map(|e| string_field(e, "detail"))
                .collect();
            let detail = (!details.is_empty()).then(|| details.join("; "));
            (title, detail)
        }
        Some(entry @ Value::Object(_)) => {
            (string_field(entry, "title"), string_field(entry, "detail"))
        }
        Some(Value::String(message)) => (None, Some(message.clone())),
        _ => {
            let title = string_field(json, "error").or_else(|| string_field(json, "title"));
            let detail = string_field(json, "error_description")
                .or_else(|| string_field(json, "detail"))
                .or_else(|| string_field(json, "message"));
            if title.is_none() && detail.is_none() {
                (None, raw_detail(body))
            } else {
                (title, detail)
            }
        }
    }
}

/// Error returned when an HTTP request fails validation.
///
/// This error is raised before a request is sent.
///
/// # Example
///
/// ```rust
/// use moltin_api::clients::InvalidHttpRequestError;
///
/// let error = InvalidHttpRequestError::MissingBody {
///     method: "POST".to_string(),
/// };
///
/// assert_eq!(error.to_string(), "Cannot use POST without specifying data.");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A POST or PUT request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },

    /// A GET or DELETE request was given a body.
    #[error("Cannot send a body with {method}.")]
    UnexpectedBody {
        /// The HTTP method that forbids a body.
        method: String,
    },

    /// The request path is empty.
    #[error("Request path cannot be empty.")]
    EmptyPath,
}

/// Error returned by the transport before any response is read.
///
/// Non-2xx responses are not errors at this layer; they surface as
/// [`ApiError`] from [`HttpResponse::normalize`](crate::clients::HttpResponse::normalize).
#[derive(Debug, Error)]
pub enum HttpError {
    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}
