//! Declarative resource table and the generic resource client.
//!
//! A resource is described by a [`ResourceDefinition`]: its collection name
//! and the operations it supports. One generic dispatcher,
//! [`ResourceClient`], serves every definition, so adding a resource means
//! adding a table entry, not code.
//!
//! # Example
//!
//! ```rust,ignore
//! use moltin_api::rest::{ListParams, ResourceDefinition, ResourceOperation};
//! use serde_json::json;
//!
//! let integrations = gateway.integrations();
//!
//! let created = integrations
//!     .create(&json!({"type": "integration", "name": "Order hook"}))
//!     .await?;
//! let page = integrations.all_with(&ListParams::new().limit(10)).await?;
//! let logs = integrations
//!     .get_all_logs_for_job("123", "integration-job-1")
//!     .await?;
//!
//! // A resource that is not in the built-in table
//! const WISHLISTS: ResourceDefinition = ResourceDefinition::new(
//!     "flows/wishlists/entries",
//!     &[ResourceOperation::All, ResourceOperation::Get],
//! );
//! let entries = gateway.resource(WISHLISTS).all().await?;
//! ```

use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::clients::NormalizedBody;
use crate::gateway::Gateway;
use crate::rest::errors::{ResourceError, ValidationError};
use crate::rest::params::{build_request, ListParams, RequestParams};
use crate::rest::path::ResourceOperation;
use crate::rest::response::ResourceResponse;

/// Create, update, list, get and delete.
pub const CRUD_OPERATIONS: &[ResourceOperation] = &[
    ResourceOperation::Create,
    ResourceOperation::Update,
    ResourceOperation::All,
    ResourceOperation::Get,
    ResourceOperation::Delete,
];

/// CRUD plus the log and job reads of integrations.
pub const INTEGRATION_OPERATIONS: &[ResourceOperation] = &[
    ResourceOperation::Create,
    ResourceOperation::Update,
    ResourceOperation::All,
    ResourceOperation::Get,
    ResourceOperation::Delete,
    ResourceOperation::GetLogs,
    ResourceOperation::GetJobs,
    ResourceOperation::GetAllLogsForJob,
];

/// CRUD without create. Orders are created through checkout.
pub const ORDER_OPERATIONS: &[ResourceOperation] = &[
    ResourceOperation::Update,
    ResourceOperation::All,
    ResourceOperation::Get,
    ResourceOperation::Delete,
];

/// A declarative resource table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceDefinition {
    /// The collection path segment, e.g. `integrations`.
    pub name: &'static str,
    /// The operations the resource supports.
    pub operations: &'static [ResourceOperation],
}

impl ResourceDefinition {
    /// Creates a new `ResourceDefinition`.
    #[must_use]
    pub const fn new(name: &'static str, operations: &'static [ResourceOperation]) -> Self {
        Self { name, operations }
    }

    /// Returns `true` if the resource declares the operation.
    #[must_use]
    pub fn supports(&self, operation: ResourceOperation) -> bool {
        self.operations.contains(&operation)
    }
}

/// `integrations`, including logs and jobs.
pub const INTEGRATIONS: ResourceDefinition =
    ResourceDefinition::new("integrations", INTEGRATION_OPERATIONS);
/// `products`.
pub const PRODUCTS: ResourceDefinition = ResourceDefinition::new("products", CRUD_OPERATIONS);
/// `brands`.
pub const BRANDS: ResourceDefinition = ResourceDefinition::new("brands", CRUD_OPERATIONS);
/// `categories`.
pub const CATEGORIES: ResourceDefinition = ResourceDefinition::new("categories", CRUD_OPERATIONS);
/// `collections`.
pub const COLLECTIONS: ResourceDefinition =
    ResourceDefinition::new("collections", CRUD_OPERATIONS);
/// `currencies`.
pub const CURRENCIES: ResourceDefinition = ResourceDefinition::new("currencies", CRUD_OPERATIONS);
/// `customers`.
pub const CUSTOMERS: ResourceDefinition = ResourceDefinition::new("customers", CRUD_OPERATIONS);
/// `files`.
pub const FILES: ResourceDefinition = ResourceDefinition::new("files", CRUD_OPERATIONS);
/// `flows`.
pub const FLOWS: ResourceDefinition = ResourceDefinition::new("flows", CRUD_OPERATIONS);
/// `orders`, without create.
pub const ORDERS: ResourceDefinition = ResourceDefinition::new("orders", ORDER_OPERATIONS);
/// `promotions`.
pub const PROMOTIONS: ResourceDefinition = ResourceDefinition::new("promotions", CRUD_OPERATIONS);

/// Every built-in resource.
pub const RESOURCES: &[ResourceDefinition] = &[
    INTEGRATIONS,
    PRODUCTS,
    BRANDS,
    CATEGORIES,
    COLLECTIONS,
    CURRENCIES,
    CUSTOMERS,
    FILES,
    FLOWS,
    ORDERS,
    PROMOTIONS,
];

/// Looks up a built-in resource by name.
///
/// # Example
///
/// ```rust
/// use moltin_api::rest::{find_resource, ResourceOperation};
///
/// let orders = find_resource("orders").unwrap();
/// assert!(!orders.supports(ResourceOperation::Create));
/// assert!(find_resource("unknown").is_none());
/// ```
#[must_use]
pub fn find_resource(name: &str) -> Option<&'static ResourceDefinition> {
    RESOURCES.iter().find(|definition| definition.name == name)
}

/// Stage of a single resource call.
///
/// A call moves `Pending → Authenticating → Sending → Normalizing` and ends
/// in `Succeeded` or `Failed`. The current stage is recorded on the call's
/// tracing span under the `stage` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallStage {
    /// Parameters are being validated and the request built.
    Pending,
    /// Waiting for an access token.
    Authenticating,
    /// Waiting for the HTTP response.
    Sending,
    /// Turning the response into a body or an error.
    Normalizing,
    /// The call returned a result.
    Succeeded,
    /// The call returned an error.
    Failed,
}

impl CallStage {
    /// Returns the stage name as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Authenticating => "authenticating",
            Self::Sending => "sending",
            Self::Normalizing => "normalizing",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for CallStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized response together with its request ID.
struct Dispatched {
    body: NormalizedBody,
    request_id: Option<String>,
}

/// Generic client for one resource.
///
/// Obtained from [`Gateway`] accessors such as
/// [`Gateway::integrations`]. The payload type `T` defaults to
/// `serde_json::Value`; use [`typed`](Self::typed) to decode into your own
/// type.
///
/// Every method validates its parameters, obtains a token, sends exactly one
/// request and normalizes the response. It returns exactly one result or one
/// [`ResourceError`].
pub struct ResourceClient<'g, T = Value> {
    gateway: &'g Gateway,
    definition: ResourceDefinition,
    _payload: PhantomData<fn() -> T>,
}

impl<'g, T> Clone for ResourceClient<'g, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'g, T> Copy for ResourceClient<'g, T> {}

impl<'g, T> fmt::Debug for ResourceClient<'g, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceClient")
            .field("resource", &self.definition.name)
            .field("operations", &self.definition.operations)
            .finish_non_exhaustive()
    }
}

impl<'g> ResourceClient<'g> {
    /// Creates an untyped client for a resource definition.
    #[must_use]
    pub const fn new(gateway: &'g Gateway, definition: ResourceDefinition) -> Self {
        Self {
            gateway,
            definition,
            _payload: PhantomData,
        }
    }
}

impl<'g, T> ResourceClient<'g, T> {
    /// Returns the same client decoding payloads as `U`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// #[derive(serde::Deserialize)]
    /// struct Integration { id: String, name: String }
    ///
    /// let integration = gateway
    ///     .integrations()
    ///     .typed::<Integration>()
    ///     .get("123")
    ///     .await?;
    /// println!("{}", integration.name);
    /// ```
    #[must_use]
    pub const fn typed<U>(&self) -> ResourceClient<'g, U> {
        ResourceClient {
            gateway: self.gateway,
            definition: self.definition,
            _payload: PhantomData,
        }
    }

    /// Returns the resource definition this client serves.
    #[must_use]
    pub const fn definition(&self) -> &ResourceDefinition {
        &self.definition
    }

    /// Returns the resource name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.definition.name
    }

    fn payload_value<P: Serialize + ?Sized>(&self, payload: &P) -> Result<Value, ResourceError> {
        serde_json::to_value(payload).map_err(|e| {
            ValidationError::InvalidPayload {
                resource: self.definition.name,
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Runs one operation through the full call lifecycle.
    #[tracing::instrument(
        name = "moltin_call",
        skip(self, operation, params),
        fields(
            resource = self.definition.name,
            operation = operation.as_str(),
            stage = CallStage::Pending.as_str(),
        )
    )]
    async fn execute(
        &self,
        operation: ResourceOperation,
        params: RequestParams,
    ) -> Result<Dispatched, ResourceError> {
        let span = tracing::Span::current();
        let result = self.dispatch(&span, operation, &params).await;

        let stage = if result.is_ok() {
            CallStage::Succeeded
        } else {
            CallStage::Failed
        };
        span.record("stage", stage.as_str());
        if let Err(error) = &result {
            tracing::debug!(error = %error, "Moltin call failed");
        }

        result
    }

    async fn dispatch(
        &self,
        span: &tracing::Span,
        operation: ResourceOperation,
        params: &RequestParams,
    ) -> Result<Dispatched, ResourceError> {
        let request = build_request(&self.definition, operation, params)?;

        span.record("stage", CallStage::Authenticating.as_str());
        let token = self.gateway.token_provider().token().await?;

        span.record("stage", CallStage::Sending.as_str());
        let response = self
            .gateway
            .http_client()
            .send(&request, token.as_str())
            .await?;

        span.record("stage", CallStage::Normalizing.as_str());
        let request_id = response.request_id().map(String::from);
        let body = response.normalize()?;

        Ok(Dispatched { body, request_id })
    }

    /// Deletes a resource. A `204 No Content` yields `{}`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if validation, authentication or the request
    /// fails.
    pub async fn delete(&self, id: &str) -> Result<Value, ResourceError> {
        let dispatched = self
            .execute(ResourceOperation::Delete, RequestParams::new().id(id))
            .await?;
        Ok(dispatched.body.into_value())
    }

    /// Lists the logs of a resource.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if validation, authentication, the request
    /// or decoding fails.
    pub async fn get_logs(&self, id: &str) -> Result<ResourceResponse<Vec<Value>>, ResourceError> {
        self.fetch(ResourceOperation::GetLogs, RequestParams::new().id(id))
            .await
    }

    /// Lists the jobs of a resource.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if validation, authentication, the request
    /// or decoding fails.
    pub async fn get_jobs(&self, id: &str) -> Result<ResourceResponse<Vec<Value>>, ResourceError> {
        self.fetch(ResourceOperation::GetJobs, RequestParams::new().id(id))
            .await
    }

    /// Lists the logs of one job of a resource.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if validation, authentication, the request
    /// or decoding fails.
    pub async fn get_all_logs_for_job(
        &self,
        id: &str,
        job_id: &str,
    ) -> Result<ResourceResponse<Vec<Value>>, ResourceError> {
        self.fetch(
            ResourceOperation::GetAllLogsForJob,
            RequestParams::new().id(id).job_id(job_id),
        )
        .await
    }

    async fn fetch<U: DeserializeOwned>(
        &self,
        operation: ResourceOperation,
        params: RequestParams,
    ) -> Result<ResourceResponse<U>, ResourceError> {
        let dispatched = self.execute(operation, params).await?;
        ResourceResponse::from_normalized(
            self.definition.name,
            dispatched.body,
            dispatched.request_id,
        )
    }
}

/// Create, Update and Get decode `data` into `T`. A `204 No Content` or an
/// empty success body yields `{}` as the data.
impl<'g, T: DeserializeOwned> ResourceClient<'g, T> {
    /// Creates a resource. The payload is sent as `{ "data": payload }`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the payload cannot be serialized, or if
    /// authentication, the request or decoding fails.
    pub async fn create<P: Serialize + ?Sized>(
        &self,
        payload: &P,
    ) -> Result<ResourceResponse<T>, ResourceError> {
        let params = RequestParams::new().payload(self.payload_value(payload)?);
        self.fetch(ResourceOperation::Create, params).await
    }

    /// Updates a resource. The payload is sent as `{ "data": payload }`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if `id` is blank, the payload cannot be
    /// serialized, or authentication, the request or decoding fails.
    pub async fn update<P: Serialize + ?Sized>(
        &self,
        id: &str,
        payload: &P,
    ) -> Result<ResourceResponse<T>, ResourceError> {
        let params = RequestParams::new()
            .id(id)
            .payload(self.payload_value(payload)?);
        self.fetch(ResourceOperation::Update, params).await
    }

    /// Lists resources.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if authentication, the request or decoding
    /// fails.
    pub async fn all(&self) -> Result<ResourceResponse<Vec<T>>, ResourceError> {
        self.all_with(&ListParams::default()).await
    }

    /// Lists resources with pagination, sorting, filtering or includes.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if authentication, the request or decoding
    /// fails.
    pub async fn all_with(
        &self,
        list: &ListParams,
    ) -> Result<ResourceResponse<Vec<T>>, ResourceError> {
        self.fetch(ResourceOperation::All, RequestParams::new().list(list.clone()))
            .await
    }

    /// Fetches a single resource.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if `id` is blank, or if authentication, the
    /// request or decoding fails.
    pub async fn get(&self, id: &str) -> Result<ResourceResponse<T>, ResourceError> {
        self.fetch(ResourceOperation::Get, RequestParams::new().id(id))
            .await
    }
}

// Verify types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceDefinition>();
    assert_send_sync::<CallStage>();
    assert_send_sync::<ResourceClient<'static>>();
};
