//! HTTP response types for the Moltin API SDK.
//!
//! The transport hands back an [`HttpResponse`] holding the raw status,
//! headers, and body text. [`HttpResponse::normalize`] turns it into either a
//! JSON document or an [`ApiError`].

use std::collections::HashMap;

use serde_json::Value;

use crate::clients::errors::ApiError;

/// The body of a successful response after normalization.
#[derive(Clone, Debug, PartialEq)]
pub enum NormalizedBody {
    /// A parsed JSON document.
    Document(Value),
    /// A 2xx response without content, typically `204 No Content`.
    Empty,
}

impl NormalizedBody {
    /// Returns `true` for a response without content.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Converts into a JSON value. An empty body becomes `{}`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use moltin_api::clients::NormalizedBody;
    /// use serde_json::json;
    ///
    /// assert_eq!(NormalizedBody::Empty.into_value(), json!({}));
    /// ```
    #[must_use]
    pub fn into_value(self) -> Value {
        match self {
            Self::Document(value) => value,
            Self::Empty => Value::Object(serde_json::Map::new()),
        }
    }
}

/// An HTTP response from the Moltin API.
///
/// The body is kept as text so that error bodies which are not JSON can still
/// be reported verbatim.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers with lowercased names (headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
    /// The raw response body.
    pub body: String,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: impl Into<String>) -> Self {
        Self {
            code,
            headers,
            body: body.into(),
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the `X-Request-Id` header value, if present.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.headers
            .get("x-request-id")
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Normalizes the response.
    ///
    /// - 2xx with a blank body (including 204) yields [`NormalizedBody::Empty`]
    /// - 2xx with JSON yields [`NormalizedBody::Document`]
    /// - 2xx with a body that is not JSON yields an [`ApiError`] carrying the
    ///   status and the raw text
    /// - anything else yields an [`ApiError`] parsed from the error envelope
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] as described above.
    pub fn normalize(&self) -> Result<NormalizedBody, ApiError> {
        if !self.is_ok() {
            return Err(ApiError::from_response(self.code, &self.headers, &self.body));
        }

        if self.code == 204 || self.body.trim().is_empty() {
            return Ok(NormalizedBody::Empty);
        }

        serde_json::from_str(&self.body)
            .map(NormalizedBody::Document)
            .map_err(|e| ApiError {
                status: self.code,
                title: Some("Invalid JSON response".to_string()),
                detail: Some(e.to_string()),
                body: self.body.clone(),
                request_id: self.request_id().map(String::from),
            })
    }
}
