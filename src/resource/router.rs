//! Resource/operation routing and the per-item execution loop
//!
//! The operation set is fixed at build time, so dispatch is a pattern match
//! over `(Resource, Operation)` rather than a registration table. Items run
//! strictly sequentially; output order follows input order because of the
//! loop, not a sort.

use std::future::Future;

use tracing::debug;

use super::handlers::{catalog, communication, customer};
use crate::api::http::HttpClient;
use crate::error::ConnectorError;
use crate::execution::{Execution, OutputRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Customer,
    Communication,
    Source,
    Status,
    Product,
    Settings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Get,
    GetAll,
    Update,
}

impl Resource {
    pub const ALL: [Resource; 6] = [
        Resource::Customer,
        Resource::Communication,
        Resource::Source,
        Resource::Status,
        Resource::Product,
        Resource::Settings,
    ];

    pub fn parse(raw: &str) -> Result<Self, ConnectorError> {
        match raw {
            "customer" => Ok(Resource::Customer),
            "communication" => Ok(Resource::Communication),
            "source" => Ok(Resource::Source),
            "status" => Ok(Resource::Status),
            "product" => Ok(Resource::Product),
            "settings" => Ok(Resource::Settings),
            _ => Err(ConnectorError::UnsupportedResource {
                resource: raw.to_string(),
                supported: supported_names(&Resource::ALL.map(|r| r.name())),
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Resource::Customer => "customer",
            Resource::Communication => "communication",
            Resource::Source => "source",
            Resource::Status => "status",
            Resource::Product => "product",
            Resource::Settings => "settings",
        }
    }

    /// Operations available on this resource.
    pub fn operations(&self) -> &'static [Operation] {
        match self {
            Resource::Customer => &[
                Operation::Create,
                Operation::Get,
                Operation::GetAll,
                Operation::Update,
            ],
            Resource::Communication => &[Operation::Create, Operation::Get, Operation::GetAll],
            Resource::Source | Resource::Status | Resource::Product | Resource::Settings => {
                &[Operation::GetAll]
            }
        }
    }

    /// Parse an operation name in the context of this resource.
    pub fn parse_operation(&self, raw: &str) -> Result<Operation, ConnectorError> {
        self.operations()
            .iter()
            .copied()
            .find(|op| op.name() == raw)
            .ok_or_else(|| self.unsupported_operation(raw))
    }

    fn unsupported_operation(&self, raw: &str) -> ConnectorError {
        let names: Vec<&'static str> = self.operations().iter().map(|op| op.name()).collect();
        ConnectorError::UnsupportedOperation {
            resource: self.name().to_string(),
            operation: raw.to_string(),
            supported: supported_names(&names),
        }
    }

    /// Collection endpoint under the API base URL.
    pub fn collection_endpoint(&self) -> &'static str {
        match self {
            Resource::Customer => "/api/bot/customers",
            Resource::Communication => "/api/bot/communications",
            Resource::Source => "/api/bot/sources",
            Resource::Status => "/api/bot/statuses",
            Resource::Product => "/api/bot/products",
            Resource::Settings => "/api/bot/settings",
        }
    }
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::Get => "get",
            Operation::GetAll => "getAll",
            Operation::Update => "update",
        }
    }
}

fn supported_names(names: &[&str]) -> String {
    names.join(", ")
}

/// Resolve the batch's resource/operation pair and run every item through
/// the matching handler.
pub async fn route(
    client: &HttpClient,
    execution: &dyn Execution,
    resource: &str,
    operation: &str,
) -> Result<Vec<OutputRecord>, ConnectorError> {
    let resource = Resource::parse(resource)?;
    let operation = resource.parse_operation(operation)?;

    debug!(
        "Routing {} {} across {} items",
        resource.name(),
        operation.name(),
        execution.item_count()
    );

    run_items(execution, resource, operation, |index| {
        dispatch(client, execution, resource, operation, index)
    })
    .await
}

/// Per-item execution loop.
///
/// Items are processed one at a time in index order. A failing item either
/// becomes an error-carrying record (continue-on-fail) or aborts the batch
/// with resource/operation/item context, leaving later items unprocessed.
pub async fn run_items<F, Fut>(
    execution: &dyn Execution,
    resource: Resource,
    operation: Operation,
    mut handler: F,
) -> Result<Vec<OutputRecord>, ConnectorError>
where
    F: FnMut(usize) -> Fut,
    Fut: Future<Output = Result<Vec<OutputRecord>, ConnectorError>>,
{
    let mut output = Vec::new();

    for index in 0..execution.item_count() {
        match handler(index).await {
            Ok(records) => output.extend(records),
            Err(err) if execution.continue_on_fail() => {
                debug!("Item {} failed, continuing: {}", index, err);
                output.push(OutputRecord::error(&err, index));
            }
            Err(err) => {
                return Err(ConnectorError::Operation {
                    resource: resource.name(),
                    operation: operation.name(),
                    item_index: index,
                    source: Box::new(err),
                });
            }
        }
    }

    Ok(output)
}

async fn dispatch(
    client: &HttpClient,
    execution: &dyn Execution,
    resource: Resource,
    operation: Operation,
    index: usize,
) -> Result<Vec<OutputRecord>, ConnectorError> {
    match (resource, operation) {
        (Resource::Customer, Operation::Create) => customer::create(client, execution, index).await,
        (Resource::Customer, Operation::Get) => customer::get(client, execution, index).await,
        (Resource::Customer, Operation::GetAll) => {
            customer::get_all(client, execution, index).await
        }
        (Resource::Customer, Operation::Update) => customer::update(client, execution, index).await,
        (Resource::Communication, Operation::Create) => {
            communication::create(client, execution, index).await
        }
        (Resource::Communication, Operation::Get) => {
            communication::get(client, execution, index).await
        }
        (Resource::Communication, Operation::GetAll) => {
            communication::get_all(client, execution, index).await
        }
        (
            Resource::Source | Resource::Status | Resource::Product | Resource::Settings,
            Operation::GetAll,
        ) => catalog::get_all(client, execution, resource, index).await,
        (resource, operation) => Err(resource.unsupported_operation(operation.name())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::execution::BatchExecution;
    use serde_json::{json, Map};
    use std::cell::RefCell;

    fn batch(item_count: usize, continue_on_fail: bool) -> BatchExecution {
        BatchExecution::new(Map::new(), item_count).with_continue_on_fail(continue_on_fail)
    }

    #[test]
    fn unknown_resource_lists_all_supported() {
        let err = Resource::parse("invoice").unwrap_err();
        let message = err.to_string();

        assert!(matches!(err, ConnectorError::UnsupportedResource { .. }));
        for name in ["customer", "communication", "source", "status", "product", "settings"] {
            assert!(message.contains(name), "message should list {}: {}", name, message);
        }
    }

    #[test]
    fn unknown_operation_lists_resource_operations() {
        let err = Resource::Communication.parse_operation("update").unwrap_err();
        let message = err.to_string();

        assert!(matches!(err, ConnectorError::UnsupportedOperation { .. }));
        assert!(message.contains("create, get, getAll"));
        assert!(message.contains("communication"));
    }

    #[test]
    fn catalog_resources_only_support_get_all() {
        for resource in [Resource::Source, Resource::Status, Resource::Product, Resource::Settings] {
            assert_eq!(resource.operations(), &[Operation::GetAll]);
            assert!(resource.parse_operation("create").is_err());
        }
    }

    #[test]
    fn endpoint_table_matches_api() {
        assert_eq!(Resource::Customer.collection_endpoint(), "/api/bot/customers");
        assert_eq!(
            Resource::Communication.collection_endpoint(),
            "/api/bot/communications"
        );
        assert_eq!(Resource::Source.collection_endpoint(), "/api/bot/sources");
        assert_eq!(Resource::Status.collection_endpoint(), "/api/bot/statuses");
        assert_eq!(Resource::Product.collection_endpoint(), "/api/bot/products");
        assert_eq!(Resource::Settings.collection_endpoint(), "/api/bot/settings");
    }

    #[tokio::test]
    async fn abort_mode_stops_after_failing_item() {
        let execution = batch(4, false);
        let invoked = RefCell::new(Vec::new());

        let result = run_items(&execution, Resource::Customer, Operation::Get, |index| {
            invoked.borrow_mut().push(index);
            async move {
                if index == 1 {
                    Err(ConnectorError::MissingIdentifier { field: "customerId" })
                } else {
                    Ok(vec![OutputRecord::new(json!({ "id": index }), index)])
                }
            }
        })
        .await;

        let err = result.unwrap_err();
        assert!(matches!(
            err,
            ConnectorError::Operation { item_index: 1, .. }
        ));
        assert_eq!(*invoked.borrow(), vec![0, 1]);
    }

    #[tokio::test]
    async fn continue_mode_records_failure_and_proceeds() {
        let execution = batch(3, true);

        let output = run_items(&execution, Resource::Customer, Operation::Get, |index| async move {
            if index == 1 {
                Err(ConnectorError::ApiRequest("500: boom".to_string()))
            } else {
                Ok(vec![OutputRecord::new(json!({ "id": index }), index)])
            }
        })
        .await
        .unwrap();

        assert_eq!(output.len(), 3);
        assert_eq!(output[0].source_item, 0);
        assert_eq!(output[1].source_item, 1);
        assert_eq!(
            output[1].json,
            json!({ "error": "Tecnocall API request failed: 500: boom" })
        );
        assert_eq!(output[2].source_item, 2);
    }

    #[tokio::test]
    async fn fan_out_records_stay_contiguous_and_ordered() {
        let execution = batch(2, false);

        let output = run_items(&execution, Resource::Source, Operation::GetAll, |index| async move {
            Ok(vec![
                OutputRecord::new(json!({ "id": format!("{}-a", index) }), index),
                OutputRecord::new(json!({ "id": format!("{}-b", index) }), index),
            ])
        })
        .await
        .unwrap();

        let ids: Vec<&str> = output
            .iter()
            .filter_map(|record| record.json["id"].as_str())
            .collect();
        assert_eq!(ids, vec!["0-a", "0-b", "1-a", "1-b"]);

        let sources: Vec<usize> = output.iter().map(|record| record.source_item).collect();
        assert_eq!(sources, vec![0, 0, 1, 1]);
    }

    #[tokio::test]
    async fn abort_error_carries_context() {
        let execution = batch(1, false);

        let err = run_items(&execution, Resource::Customer, Operation::Update, |_| async {
            Err(ConnectorError::EmptyUpdate)
        })
        .await
        .unwrap_err();

        assert_eq!(
            err.to_string(),
            "failed to update customer (item 0): at least one field must be provided to update"
        );
    }
}
