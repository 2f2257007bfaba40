//! Response types for resource operations.
//!
//! Every successful Moltin response is a JSON:API-style envelope:
//!
//! ```json
//! {
//!   "data": { ... } | [ ... ],
//!   "meta": { "page": { "limit": 25, "offset": 0, "current": 1, "total": 4 },
//!             "results": { "total": 97 } },
//!   "links": { "current": "...", "first": "...", "last": "...", "next": "..." },
//!   "included": { ... }
//! }
//! ```
//!
//! [`Envelope<T>`] models that shape with an opaque payload `T`.
//! [`ResourceResponse<T>`] wraps it together with the request ID and
//! implements `Deref<Target = T>` for direct access to `data`.
//!
//! # Deref Pattern
//!
//! ```rust,ignore
//! let response = gateway.integrations().all().await?;
//!
//! // Vec methods via Deref
//! for integration in response.iter() {
//!     println!("{}", integration["id"]);
//! }
//! println!("Count: {}", response.len());
//!
//! // Take ownership of the data
//! let integrations: Vec<serde_json::Value> = response.into_inner();
//! ```

use std::ops::{Deref, DerefMut};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::clients::NormalizedBody;
use crate::rest::ResourceError;

/// Page information in `meta.page`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    /// Page size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    /// Number of skipped items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    /// The current page number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<u64>,
    /// The total number of pages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

/// Result counts in `meta.results`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultsMeta {
    /// The total number of matching items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

/// The `meta` member of an envelope.
///
/// Fields other than `page` and `results` vary by resource and are kept in
/// `extra`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    /// Pagination details.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<PageMeta>,
    /// Result counts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<ResultsMeta>,
    /// Any other metadata.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The `links` member of an envelope.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Links {
    /// Link to this resource, on single-resource responses.
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,
    /// Link to the current page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<String>,
    /// Link to the first page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first: Option<String>,
    /// Link to the last page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last: Option<String>,
    /// Link to the next page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    /// Link to the previous page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev: Option<String>,
}

/// A response envelope with payload type `T`.
///
/// # Example
///
/// ```rust
/// use moltin_api::rest::Envelope;
/// use serde_json::{json, Value};
///
/// let envelope: Envelope<Vec<Value>> = serde_json::from_value(json!({
///     "data": [{"id": "log-1"}],
///     "meta": {"results": {"total": 1}}
/// }))
/// .unwrap();
///
/// assert_eq!(envelope.data.len(), 1);
/// assert_eq!(envelope.total(), Some(1));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// The payload: one resource or a list of resources.
    pub data: T,
    /// Pagination and other metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
    /// Pagination links.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
    /// Related resources requested with `include`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub included: Option<Value>,
}

impl<T> Envelope<T> {
    /// Returns `meta.results.total`, if present.
    #[must_use]
    pub fn total(&self) -> Option<u64> {
        self.meta
            .as_ref()
            .and_then(|meta| meta.results.as_ref())
            .and_then(|results| results.total)
    }

    /// Returns the `links.next` URL, if present.
    #[must_use]
    pub fn next_link(&self) -> Option<&str> {
        self.links.as_ref().and_then(|links| links.next.as_deref())
    }

    /// Returns the `links.prev` URL, if present.
    #[must_use]
    pub fn prev_link(&self) -> Option<&str> {
        self.links.as_ref().and_then(|links| links.prev.as_deref())
    }
}

/// A response from a resource operation.
///
/// `ResourceResponse<T>` implements `Deref<Target = T>`, which means you can
/// use it like the envelope's `data` directly.
///
/// # Type Parameters
///
/// * `T` - The payload type. For single resources this is the resource type
///   (`serde_json::Value` by default). For collections it is `Vec<_>`.
///
/// # Example
///
/// ```rust
/// use moltin_api::rest::{Envelope, ResourceResponse};
///
/// let response = ResourceResponse::new(
///     Envelope {
///         data: vec!["item1", "item2", "item3"],
///         meta: None,
///         links: None,
///         included: None,
///     },
///     Some("req-123".to_string()),
/// );
///
/// assert_eq!(response.len(), 3);
/// assert_eq!(response[0], "item1");
/// assert_eq!(response.request_id(), Some("req-123"));
/// assert!(!response.has_next_page());
/// ```
#[derive(Debug, Clone)]
pub struct ResourceResponse<T> {
    envelope: Envelope<T>,
    request_id: Option<String>,
}

impl<T> ResourceResponse<T> {
    /// Creates a new `ResourceResponse`.
    #[must_use]
    pub const fn new(envelope: Envelope<T>, request_id: Option<String>) -> Self {
        Self {
            envelope,
            request_id,
        }
    }

    /// Returns a reference to the payload.
    #[must_use]
    pub const fn data(&self) -> &T {
        &self.envelope.data
    }

    /// Returns the envelope metadata, if present.
    #[must_use]
    pub const fn meta(&self) -> Option<&Meta> {
        self.envelope.meta.as_ref()
    }

    /// Returns the envelope links, if present.
    #[must_use]
    pub const fn links(&self) -> Option<&Links> {
        self.envelope.links.as_ref()
    }

    /// Returns the included related resources, if present.
    #[must_use]
    pub const fn included(&self) -> Option<&Value> {
        self.envelope.included.as_ref()
    }

    /// Returns the `X-Request-Id` of the response, if present.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    /// Returns `true` if the envelope links to a next page.
    #[must_use]
    pub fn has_next_page(&self) -> bool {
        self.envelope.next_link().is_some()
    }

    /// Returns `true` if the envelope links to a previous page.
    #[must_use]
    pub fn has_prev_page(&self) -> bool {
        self.envelope.prev_link().is_some()
    }

    /// Returns a reference to the full envelope.
    #[must_use]
    pub const fn envelope(&self) -> &Envelope<T> {
        &self.envelope
    }

    /// Consumes the response and returns the full envelope.
    #[must_use]
    pub fn into_envelope(self) -> Envelope<T> {
        self.envelope
    }

    /// Consumes the response and returns the payload.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.envelope.data
    }
}

impl<T: DeserializeOwned> ResourceResponse<T> {
    /// Deserializes a normalized body into a typed response.
    ///
    /// An empty body (`204 No Content`) carries no envelope. Its `data` is
    /// decoded from `{}`, or from `[]` for collection payloads, and it has
    /// no `meta`, `links` or `included`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Decode`] if the document does not match
    /// `Envelope<T>`, or if `T` cannot be built from an empty body.
    pub fn from_normalized(
        resource: &'static str,
        body: NormalizedBody,
        request_id: Option<String>,
    ) -> Result<Self, ResourceError> {
        let envelope = match body {
            NormalizedBody::Document(value) => serde_json::from_value(value)
                .map_err(|source| ResourceError::Decode { resource, source })?,
            NormalizedBody::Empty => Envelope {
                data: serde_json::from_value(Value::Object(Map::new()))
                    .or_else(|_| serde_json::from_value(Value::Array(Vec::new())))
                    .map_err(|source| ResourceError::Decode { resource, source })?,
                meta: None,
                links: None,
                included: None,
            },
        };
        Ok(Self::new(envelope, request_id))
    }
}

impl<T> Deref for ResourceResponse<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.envelope.data
    }
}

impl<T> DerefMut for ResourceResponse<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.envelope.data
    }
}
