//! Path building infrastructure for Moltin resources.
//!
//! Every resource shares the same path shapes, relative to the versioned
//! base URL:
//!
//! | Operation | Method | Template |
//! |---|---|---|
//! | `Create` | POST | `{resource}` |
//! | `All` | GET | `{resource}` |
//! | `Get` | GET | `{resource}/{id}` |
//! | `Update` | PUT | `{resource}/{id}` |
//! | `Delete` | DELETE | `{resource}/{id}` |
//! | `GetLogs` | GET | `{resource}/{id}/logs` |
//! | `GetJobs` | GET | `{resource}/{id}/jobs` |
//! | `GetAllLogsForJob` | GET | `{resource}/{id}/jobs/{job_id}/logs` |
//!
//! # Example
//!
//! ```rust
//! use moltin_api::rest::{build_path, ResourceOperation};
//! use std::collections::HashMap;
//!
//! let path = ResourceOperation::GetAllLogsForJob.path();
//!
//! let mut ids = HashMap::new();
//! ids.insert("id", "123");
//! ids.insert("job_id", "integration-job-1");
//!
//! let url = build_path("integrations", path.template, &ids);
//! assert_eq!(url, "integrations/123/jobs/integration-job-1/logs");
//! ```

use std::collections::HashMap;
use std::fmt;

use crate::clients::HttpMethod;

/// Operations that can be performed on a Moltin resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceOperation {
    /// Create a new resource (POST /{resource}).
    Create,
    /// Update an existing resource (PUT /{resource}/{id}).
    Update,
    /// List all resources (GET /{resource}).
    All,
    /// Fetch a single resource by ID (GET /{resource}/{id}).
    Get,
    /// Delete a resource (DELETE /{resource}/{id}).
    Delete,
    /// List the logs of a resource (GET /{resource}/{id}/logs).
    GetLogs,
    /// List the jobs of a resource (GET /{resource}/{id}/jobs).
    GetJobs,
    /// List the logs of one job (GET /{resource}/{id}/jobs/{job_id}/logs).
    GetAllLogsForJob,
}

const CREATE_PATH: ResourcePath =
    ResourcePath::new(HttpMethod::Post, ResourceOperation::Create, &[], "{resource}");
const UPDATE_PATH: ResourcePath = ResourcePath::new(
    HttpMethod::Put,
    ResourceOperation::Update,
    &["id"],
    "{resource}/{id}",
);
const ALL_PATH: ResourcePath =
    ResourcePath::new(HttpMethod::Get, ResourceOperation::All, &[], "{resource}");
const GET_PATH: ResourcePath = ResourcePath::new(
    HttpMethod::Get,
    ResourceOperation::Get,
    &["id"],
    "{resource}/{id}",
);
const DELETE_PATH: ResourcePath = ResourcePath::new(
    HttpMethod::Delete,
    ResourceOperation::Delete,
    &["id"],
    "{resource}/{id}",
);
const GET_LOGS_PATH: ResourcePath = ResourcePath::new(
    HttpMethod::Get,
    ResourceOperation::GetLogs,
    &["id"],
    "{resource}/{id}/logs",
);
const GET_JOBS_PATH: ResourcePath = ResourcePath::new(
    HttpMethod::Get,
    ResourceOperation::GetJobs,
    &["id"],
    "{resource}/{id}/jobs",
);
const GET_ALL_LOGS_FOR_JOB_PATH: ResourcePath = ResourcePath::new(
    HttpMethod::Get,
    ResourceOperation::GetAllLogsForJob,
    &["id", "job_id"],
    "{resource}/{id}/jobs/{job_id}/logs",
);

impl ResourceOperation {
    /// Returns the path configuration for this operation.
    #[must_use]
    pub const fn path(&self) -> ResourcePath {
        match self {
            Self::Create => CREATE_PATH,
            Self::Update => UPDATE_PATH,
            Self::All => ALL_PATH,
            Self::Get => GET_PATH,
            Self::Delete => DELETE_PATH,
            Self::GetLogs => GET_LOGS_PATH,
            Self::GetJobs => GET_JOBS_PATH,
            Self::GetAllLogsForJob => GET_ALL_LOGS_FOR_JOB_PATH,
        }
    }

    /// Returns the HTTP method for this operation.
    #[must_use]
    pub const fn http_method(&self) -> HttpMethod {
        self.path().http_method
    }

    /// Returns `true` if the operation sends a `{ "data": payload }` body.
    #[must_use]
    pub const fn has_body(&self) -> bool {
        matches!(self, Self::Create | Self::Update)
    }

    /// Returns `true` if list query parameters apply to the operation.
    #[must_use]
    pub const fn accepts_query(&self) -> bool {
        matches!(self.http_method(), HttpMethod::Get)
    }

    /// Returns the operation name as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::All => "all",
            Self::Get => "get",
            Self::Delete => "delete",
            Self::GetLogs => "get_logs",
            Self::GetJobs => "get_jobs",
            Self::GetAllLogsForJob => "get_all_logs_for_job",
        }
    }
}

impl fmt::Display for ResourceOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A path configuration for a resource operation.
///
/// Templates use `{resource}` for the collection name and `{id_name}`
/// placeholders for identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourcePath {
    /// The HTTP method for this path.
    pub http_method: HttpMethod,
    /// The operation this path is used for.
    pub operation: ResourceOperation,
    /// Required ID parameters in order (e.g., `["id", "job_id"]`).
    pub ids: &'static [&'static str],
    /// The URL template with placeholders.
    pub template: &'static str,
}

impl ResourcePath {
    /// Creates a new `ResourcePath`.
    #[must_use]
    pub const fn new(
        http_method: HttpMethod,
        operation: ResourceOperation,
        ids: &'static [&'static str],
        template: &'static str,
    ) -> Self {
        Self {
            http_method,
            operation,
            ids,
            template,
        }
    }

    /// Returns the number of required IDs for this path.
    #[must_use]
    pub const fn id_count(&self) -> usize {
        self.ids.len()
    }
}

/// Builds a relative URL from a template.
///
/// The resource name is inserted as-is, so it may itself contain `/` (for
/// example `flows/addresses/entries`). Identifier values are
/// percent-encoded.
///
/// # Example
///
/// ```rust
/// use moltin_api::rest::build_path;
/// use std::collections::HashMap;
///
/// let mut ids = HashMap::new();
/// ids.insert("id", "a b/c");
///
/// let url = build_path("integrations", "{resource}/{id}", &ids);
/// assert_eq!(url, "integrations/a%20b%2Fc");
/// ```
#[must_use]
#[allow(clippy::implicit_hasher)]
pub fn build_path(resource: &str, template: &str, ids: &HashMap<&str, &str>) -> String {
    let mut result = template.replace("{resource}", resource.trim_matches('/'));

    for (key, value) in ids {
        let placeholder = format!("{{{key}}}");
        result = result.replace(&placeholder, &urlencoding::encode(value));
    }

    result
}

// Verify types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceOperation>();
    assert_send_sync::<ResourcePath>();
};
