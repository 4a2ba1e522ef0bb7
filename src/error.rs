//! Connector error types
//!
//! Every failure mode surfaces as a `ConnectorError` variant. Errors are
//! raised at the point of detection and never retried here; retry policy
//! belongs to the calling workflow layer.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConnectorError {
    #[error("the resource \"{resource}\" is not supported (supported resources: {supported})")]
    UnsupportedResource { resource: String, supported: String },

    #[error(
        "the operation \"{operation}\" is not supported for resource \"{resource}\" (supported operations: {supported})"
    )]
    UnsupportedOperation {
        resource: String,
        operation: String,
        supported: String,
    },

    #[error("{field} is required")]
    MissingIdentifier { field: &'static str },

    #[error("missing required fields: {0}")]
    MissingFields(String),

    #[error("at least one field must be provided to update")]
    EmptyUpdate,

    #[error("failed to parse JSON: {0}")]
    InvalidJson(String),

    #[error("Tecnocall API request failed: {0}")]
    ApiRequest(String),

    #[error("credentials error: {0}")]
    Credentials(String),

    /// Context wrapper attached when a batch aborts on a failing item.
    #[error("failed to {operation} {resource} (item {item_index}): {source}")]
    Operation {
        resource: &'static str,
        operation: &'static str,
        item_index: usize,
        #[source]
        source: Box<ConnectorError>,
    },
}
