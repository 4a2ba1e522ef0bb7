//! Customer operations
//!
//! create / get / getAll / update against `/api/bot/customers`. Request
//! construction is factored out of the async calls so the cleaning and
//! validation rules are testable without a network.

use reqwest::Method;
use serde_json::{Map, Value};

use super::{base_list_fields, list_records};
use crate::api::http::HttpClient;
use crate::error::ConnectorError;
use crate::execution::{Execution, OutputRecord};
use crate::resource::params;
use crate::resource::router::Resource;

/// Fields accepted on create and update bodies.
const BODY_FIELDS: &[&str] = &[
    "name",
    "username",
    "phone",
    "email",
    "agent_code",
    "source_id",
    "product_id",
    "status_id",
];

/// Filters accepted by the list endpoint.
const FILTER_FIELDS: &[&str] = &["page", "search", "agent_code", "source_id"];

fn item_endpoint(id: &str) -> String {
    format!("{}/{}", Resource::Customer.collection_endpoint(), id)
}

fn required_id(execution: &dyn Execution, index: usize) -> Result<String, ConnectorError> {
    params::non_empty_string(execution.parameter("customerId", index))
        .ok_or(ConnectorError::MissingIdentifier {
            field: "customerId",
        })
}

/// Create body: the declared fields of `additionalFields`, cleaned.
fn build_create_body(execution: &dyn Execution, index: usize) -> Map<String, Value> {
    let additional = params::object_value(execution.parameter("additionalFields", index));
    params::clean_object(params::pick_fields(additional, BODY_FIELDS))
}

/// Update body: the declared fields of `updateFields`, cleaned.
fn build_update_body(execution: &dyn Execution, index: usize) -> Map<String, Value> {
    let update = params::object_value(execution.parameter("updateFields", index));
    params::clean_object(params::pick_fields(update, BODY_FIELDS))
}

/// List query: limit plus the cleaned filter fields.
fn build_list_query(execution: &dyn Execution, index: usize) -> Vec<(String, String)> {
    let mut fields = base_list_fields(execution, index);
    let filters = params::object_value(execution.parameter("filters", index));
    fields.extend(params::pick_fields(filters, FILTER_FIELDS));
    params::build_query(fields)
}

pub(crate) async fn create(
    client: &HttpClient,
    execution: &dyn Execution,
    index: usize,
) -> Result<Vec<OutputRecord>, ConnectorError> {
    let body = build_create_body(execution, index);
    let response = client
        .request(
            Method::POST,
            Resource::Customer.collection_endpoint(),
            Some(&Value::Object(body)),
            None,
        )
        .await?;

    Ok(vec![OutputRecord::new(response, index)])
}

pub(crate) async fn get(
    client: &HttpClient,
    execution: &dyn Execution,
    index: usize,
) -> Result<Vec<OutputRecord>, ConnectorError> {
    let id = required_id(execution, index)?;
    let response = client
        .request(Method::GET, &item_endpoint(&id), None, None)
        .await?;

    Ok(vec![OutputRecord::new(response, index)])
}

pub(crate) async fn get_all(
    client: &HttpClient,
    execution: &dyn Execution,
    index: usize,
) -> Result<Vec<OutputRecord>, ConnectorError> {
    let query = build_list_query(execution, index);
    let response = client
        .request(
            Method::GET,
            Resource::Customer.collection_endpoint(),
            None,
            Some(&query),
        )
        .await?;

    Ok(list_records(response, index))
}

pub(crate) async fn update(
    client: &HttpClient,
    execution: &dyn Execution,
    index: usize,
) -> Result<Vec<OutputRecord>, ConnectorError> {
    let id = required_id(execution, index)?;
    let body = build_update_body(execution, index);
    if body.is_empty() {
        return Err(ConnectorError::EmptyUpdate);
    }

    let response = client
        .request(
            Method::PUT,
            &item_endpoint(&id),
            Some(&Value::Object(body)),
            None,
        )
        .await?;

    Ok(vec![OutputRecord::new(response, index)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Credentials;
    use crate::execution::BatchExecution;
    use serde_json::json;

    fn execution_with(pairs: &[(&str, Value)]) -> BatchExecution {
        let parameters: Map<String, Value> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        BatchExecution::new(parameters, 1)
    }

    // Loopback address with a closed port; requests here would fail fast,
    // and the validation paths under test must never reach it.
    fn offline_client() -> HttpClient {
        HttpClient::new(Credentials::new("http://127.0.0.1:9", "test-token"))
    }

    #[test]
    fn create_body_drops_empty_fields() {
        let execution = execution_with(&[(
            "additionalFields",
            json!({ "name": "Ana", "phone": "", "email": null }),
        )]);

        let body = build_create_body(&execution, 0);
        assert_eq!(body.len(), 1);
        assert_eq!(body["name"], json!("Ana"));
        assert!(!body.contains_key("phone"));
    }

    #[test]
    fn create_body_keeps_zero_valued_ids() {
        let execution = execution_with(&[(
            "additionalFields",
            json!({ "source_id": 0, "agent_code": "A7" }),
        )]);

        let body = build_create_body(&execution, 0);
        assert_eq!(body["source_id"], json!(0));
        assert_eq!(body["agent_code"], json!("A7"));
    }

    #[test]
    fn list_query_merges_cleaned_filters() {
        let execution = execution_with(&[
            ("limit", json!(25)),
            (
                "filters",
                json!({ "search": "ana", "agent_code": "", "page": 2 }),
            ),
        ]);

        let query = build_list_query(&execution, 0);
        assert_eq!(
            query,
            vec![
                ("limit".to_string(), "25".to_string()),
                ("page".to_string(), "2".to_string()),
                ("search".to_string(), "ana".to_string()),
            ]
        );
    }

    #[test]
    fn list_query_return_all_forces_cap() {
        let execution = execution_with(&[("returnAll", json!(true)), ("limit", json!(3))]);

        let query = build_list_query(&execution, 0);
        assert_eq!(query, vec![("limit".to_string(), "1000".to_string())]);
    }

    #[tokio::test]
    async fn get_rejects_missing_id_before_any_request() {
        let execution = execution_with(&[("customerId", json!(""))]);

        let err = get(&offline_client(), &execution, 0).await.unwrap_err();
        assert!(matches!(
            err,
            ConnectorError::MissingIdentifier { field: "customerId" }
        ));
    }

    #[tokio::test]
    async fn update_rejects_empty_field_set_before_any_request() {
        let execution = execution_with(&[
            ("customerId", json!("42")),
            ("updateFields", json!({ "phone": "", "email": null })),
        ]);

        let err = update(&offline_client(), &execution, 0).await.unwrap_err();
        assert!(matches!(err, ConnectorError::EmptyUpdate));
    }

    #[test]
    fn item_endpoint_embeds_id() {
        assert_eq!(item_endpoint("42"), "/api/bot/customers/42");
    }
}
