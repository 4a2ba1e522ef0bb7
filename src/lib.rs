//! Tecnocall bot-API connector
//!
//! A delegation layer between a workflow-automation host and the Tecnocall
//! REST API: the host declares one `(resource, operation)` pair per batch,
//! and the router runs every input item through the matching handler, one
//! authenticated HTTP call per item, reshaping the JSON response into output
//! records that keep a link back to their originating item.
//!
//! ```rust,no_run
//! use serde_json::{json, Map};
//! use tecnocall_connector::{route, BatchExecution, Credentials, HttpClient};
//!
//! # async fn run() -> Result<(), tecnocall_connector::ConnectorError> {
//! let client = HttpClient::new(Credentials::new("https://api.tecnocall.com", "bot-token"));
//!
//! let mut parameters = Map::new();
//! parameters.insert("customerId".to_string(), json!("42"));
//! let execution = BatchExecution::new(parameters, 1);
//!
//! let records = route(&client, &execution, "customer", "get").await?;
//! assert_eq!(records[0].source_item, 0);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod error;
pub mod execution;
pub mod resource;

pub use api::{format_connector_error, Credentials, HttpClient, DEFAULT_BASE_URL};
pub use error::ConnectorError;
pub use execution::{BatchExecution, Execution, OutputRecord};
pub use resource::{route, ListResponse, Operation, Resource};
