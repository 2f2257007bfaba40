//! Request parameters and request building for resource operations.
//!
//! [`build_request`] turns a resource definition, an operation and a bag of
//! [`RequestParams`] into an [`HttpRequest`]. It is pure: nothing is sent and
//! nothing is cached.

use std::collections::HashMap;

use serde_json::{json, Value};

use crate::clients::HttpRequest;
use crate::rest::errors::ValidationError;
use crate::rest::path::{build_path, ResourceOperation};
use crate::rest::resource::ResourceDefinition;

/// Query parameters for list reads.
///
/// Each field maps onto one query pair:
///
/// | Field | Query key |
/// |---|---|
/// | `limit` | `page[limit]` |
/// | `offset` | `page[offset]` |
/// | `sort` | `sort` |
/// | `filter` | `filter` |
/// | `include` | `include` |
///
/// # Example
///
/// ```rust
/// use moltin_api::rest::ListParams;
///
/// let params = ListParams::new().limit(10).offset(20).sort("-created_at");
///
/// assert_eq!(
///     params.to_query(),
///     vec![
///         ("page[limit]".to_string(), "10".to_string()),
///         ("page[offset]".to_string(), "20".to_string()),
///         ("sort".to_string(), "-created_at".to_string()),
///     ]
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListParams {
    /// Maximum number of items per page.
    pub limit: Option<u32>,
    /// Number of items to skip.
    pub offset: Option<u32>,
    /// Sort expression, e.g. `name` or `-created_at`.
    pub sort: Option<String>,
    /// Filter expression, e.g. `eq(status,live)`.
    pub filter: Option<String>,
    /// Related resources to include, comma separated.
    pub include: Option<String>,
}

impl ListParams {
    /// Creates empty list parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page size.
    #[must_use]
    pub const fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets the page offset.
    #[must_use]
    pub const fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Sets the sort expression.
    #[must_use]
    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    /// Sets the filter expression.
    #[must_use]
    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Sets the related resources to include.
    #[must_use]
    pub fn include(mut self, include: impl Into<String>) -> Self {
        self.include = Some(include.into());
        self
    }

    /// Returns `true` if no parameter is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.limit.is_none()
            && self.offset.is_none()
            && self.sort.is_none()
            && self.filter.is_none()
            && self.include.is_none()
    }

    /// Converts the parameters into ordered query pairs.
    #[must_use]
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(limit) = self.limit {
            query.push(("page[limit]".to_string(), limit.to_string()));
        }
        if let Some(offset) = self.offset {
            query.push(("page[offset]".to_string(), offset.to_string()));
        }
        if let Some(sort) = &self.sort {
            query.push(("sort".to_string(), sort.clone()));
        }
        if let Some(filter) = &self.filter {
            query.push(("filter".to_string(), filter.clone()));
        }
        if let Some(include) = &self.include {
            query.push(("include".to_string(), include.clone()));
        }
        query
    }
}

/// Everything a single operation may need.
///
/// Fields an operation does not use are ignored.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RequestParams {
    /// The primary resource identifier.
    pub id: Option<String>,
    /// The job identifier for job-scoped reads.
    pub job_id: Option<String>,
    /// The payload for `create` and `update`, sent as `{ "data": payload }`.
    pub payload: Option<Value>,
    /// Query parameters for GET operations.
    pub list: ListParams,
}

impl RequestParams {
    /// Creates empty request parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the primary resource identifier.
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the job identifier.
    #[must_use]
    pub fn job_id(mut self, job_id: impl Into<String>) -> Self {
        self.job_id = Some(job_id.into());
        self
    }

    /// Sets the payload.
    #[must_use]
    pub fn payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Sets the list query parameters.
    #[must_use]
    pub fn list(mut self, list: ListParams) -> Self {
        self.list = list;
        self
    }

    fn identifier(&self, field: &str) -> Option<&str> {
        match field {
            "id" => self.id.as_deref(),
            "job_id" => self.job_id.as_deref(),
            _ => None,
        }
    }
}

/// Builds the request for one resource operation.
///
/// Checks run in order: the operation must be declared by the resource,
/// every identifier its path needs must be non-blank, and `create`/`update`
/// must carry a payload.
///
/// # Errors
///
/// Returns [`ValidationError`] if any check fails.
///
/// # Example
///
/// ```rust
/// use moltin_api::rest::{build_request, RequestParams, ResourceOperation, INTEGRATIONS};
/// use moltin_api::clients::HttpMethod;
///
/// let request = build_request(
///     &INTEGRATIONS,
///     ResourceOperation::GetJobs,
///     &RequestParams::new().id("123"),
/// )
/// .unwrap();
///
/// assert_eq!(request.http_method, HttpMethod::Get);
/// assert_eq!(request.path, "integrations/123/jobs");
/// assert!(request.body.is_none());
/// ```
pub fn build_request(
    resource: &ResourceDefinition,
    operation: ResourceOperation,
    params: &RequestParams,
) -> Result<HttpRequest, ValidationError> {
    if !resource.supports(operation) {
        return Err(ValidationError::UnsupportedOperation {
            resource: resource.name,
            operation: operation.as_str(),
        });
    }

    let path = operation.path();
    let mut ids = HashMap::with_capacity(path.id_count());
    for &field in path.ids {
        let value = params
            .identifier(field)
            .filter(|value| !value.trim().is_empty())
            .ok_or(ValidationError::MissingIdentifier {
                resource: resource.name,
                operation: operation.as_str(),
                field,
            })?;
        ids.insert(field, value);
    }

    let mut builder = HttpRequest::builder(
        path.http_method,
        build_path(resource.name, path.template, &ids),
    );

    if operation.has_body() {
        let payload = params
            .payload
            .clone()
            .ok_or(ValidationError::MissingPayload {
                resource: resource.name,
                operation: operation.as_str(),
            })?;
        builder = builder.body(json!({ "data": payload }));
    }

    if operation.accepts_query() {
        builder = builder.query(params.list.to_query());
    }

    Ok(builder.build()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::HttpMethod;
    use crate::rest::resource::{INTEGRATIONS, ORDERS, PRODUCTS};

    #[test]
    fn test_list_params_empty_by_default() {
        let params = ListParams::new();
        assert!(params.is_empty());
        assert!(params.to_query().is_empty());
    }

    #[test]
    fn test_list_params_all_fields() {
        let params = ListParams::new()
            .limit(5)
            .offset(10)
            .sort("name")
            .filter("eq(status,live)")
            .include("main_image");

        assert!(!params.is_empty());
        assert_eq!(
            params.to_query(),
            vec![
                ("page[limit]".to_string(), "5".to_string()),
                ("page[offset]".to_string(), "10".to_string()),
                ("sort".to_string(), "name".to_string()),
                ("filter".to_string(), "eq(status,live)".to_string()),
                ("include".to_string(), "main_image".to_string()),
            ]
        );
    }

    #[test]
    fn test_create_wraps_payload_in_data() {
        let request = build_request(
            &INTEGRATIONS,
            ResourceOperation::Create,
            &RequestParams::new().payload(json!({"name": "Order hook"})),
        )
        .unwrap();

        assert_eq!(request.http_method, HttpMethod::Post);
        assert_eq!(request.path, "integrations");
        assert_eq!(request.body, Some(json!({"data": {"name": "Order hook"}})));
    }

    #[test]
    fn test_update_requires_id_and_payload() {
        let missing_id = build_request(
            &INTEGRATIONS,
            ResourceOperation::Update,
            &RequestParams::new().payload(json!({})),
        );
        assert_eq!(
            missing_id,
            Err(ValidationError::MissingIdentifier {
                resource: "integrations",
                operation: "update",
                field: "id",
            })
        );

        let missing_payload = build_request(
            &INTEGRATIONS,
            ResourceOperation::Update,
            &RequestParams::new().id("123"),
        );
        assert_eq!(
            missing_payload,
            Err(ValidationError::MissingPayload {
                resource: "integrations",
                operation: "update",
            })
        );
    }

    #[test]
    fn test_blank_identifier_is_rejected() {
        let result = build_request(
            &INTEGRATIONS,
            ResourceOperation::Get,
            &RequestParams::new().id("   "),
        );
        assert!(matches!(
            result,
            Err(ValidationError::MissingIdentifier { field: "id", .. })
        ));
    }

    #[test]
    fn test_job_logs_require_job_id() {
        let result = build_request(
            &INTEGRATIONS,
            ResourceOperation::GetAllLogsForJob,
            &RequestParams::new().id("123"),
        );
        assert!(matches!(
            result,
            Err(ValidationError::MissingIdentifier {
                field: "job_id",
                ..
            })
        ));
    }

    #[test]
    fn test_job_logs_path() {
        let request = build_request(
            &INTEGRATIONS,
            ResourceOperation::GetAllLogsForJob,
            &RequestParams::new().id("123").job_id("integration-job-1"),
        )
        .unwrap();
        assert_eq!(request.path, "integrations/123/jobs/integration-job-1/logs");
    }

    #[test]
    fn test_unsupported_operation_is_rejected() {
        let result = build_request(
            &PRODUCTS,
            ResourceOperation::GetLogs,
            &RequestParams::new().id("123"),
        );
        assert_eq!(
            result,
            Err(ValidationError::UnsupportedOperation {
                resource: "products",
                operation: "get_logs",
            })
        );

        let result = build_request(
            &ORDERS,
            ResourceOperation::Create,
            &RequestParams::new().payload(json!({})),
        );
        assert!(matches!(
            result,
            Err(ValidationError::UnsupportedOperation { .. })
        ));
    }

    #[test]
    fn test_list_params_applied_to_reads_only() {
        let list = ListParams::new().limit(3);

        let all = build_request(
            &PRODUCTS,
            ResourceOperation::All,
            &RequestParams::new().list(list.clone()),
        )
        .unwrap();
        assert_eq!(
            all.query,
            vec![("page[limit]".to_string(), "3".to_string())]
        );

        let delete = build_request(
            &PRODUCTS,
            ResourceOperation::Delete,
            &RequestParams::new().id("1").list(list),
        )
        .unwrap();
        assert!(delete.query.is_empty());
    }

    #[test]
    fn test_payload_ignored_for_reads() {
        let request = build_request(
            &INTEGRATIONS,
            ResourceOperation::Get,
            &RequestParams::new().id("1").payload(json!({"x": 1})),
        )
        .unwrap();
        assert!(request.body.is_none());
    }
}
