//! Communication operations
//!
//! create / get / getAll against `/api/bot/communications`. The create body
//! carries a free-form `data` field that the API expects as a JSON string.

use reqwest::Method;
use serde_json::{Map, Value};

use super::{base_list_fields, list_records};
use crate::api::http::HttpClient;
use crate::error::ConnectorError;
use crate::execution::{Execution, OutputRecord};
use crate::resource::params;
use crate::resource::router::Resource;

/// Filters accepted by the list endpoint.
const FILTER_FIELDS: &[&str] = &["page", "type", "agent_code", "customer_code"];

fn item_endpoint(id: &str) -> String {
    format!("{}/{}", Resource::Communication.collection_endpoint(), id)
}

/// Create body: the three required scalars plus `data` re-serialized as a
/// compact JSON string.
fn build_create_body(
    execution: &dyn Execution,
    index: usize,
) -> Result<Map<String, Value>, ConnectorError> {
    let comm_type = params::non_empty_string(execution.parameter("type", index));
    let agent_code = params::non_empty_string(execution.parameter("agentCode", index));
    let customer_code = params::non_empty_string(execution.parameter("customerCode", index));

    match (comm_type, agent_code, customer_code) {
        (Some(comm_type), Some(agent_code), Some(customer_code)) => {
            let raw_data = execution
                .parameter("data", index)
                .unwrap_or_else(|| Value::Object(Map::new()));
            let data = params::parse_json_field(&raw_data)?;
            let serialized = serde_json::to_string(&data)
                .map_err(|err| ConnectorError::InvalidJson(err.to_string()))?;

            let mut body = Map::new();
            body.insert("type".to_string(), Value::String(comm_type));
            body.insert("agent_code".to_string(), Value::String(agent_code));
            body.insert("customer_code".to_string(), Value::String(customer_code));
            body.insert("data".to_string(), Value::String(serialized));
            Ok(body)
        }
        (comm_type, agent_code, customer_code) => {
            let mut missing = Vec::new();
            if comm_type.is_none() {
                missing.push("type");
            }
            if agent_code.is_none() {
                missing.push("agentCode");
            }
            if customer_code.is_none() {
                missing.push("customerCode");
            }
            Err(ConnectorError::MissingFields(missing.join(", ")))
        }
    }
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
    let body = build_create_body(execution, index)?;
    let response = client
        .request(
            Method::POST,
            Resource::Communication.collection_endpoint(),
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
    let id = params::non_empty_string(execution.parameter("communicationId", index)).ok_or(
        ConnectorError::MissingIdentifier {
            field: "communicationId",
        },
    )?;
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
            Resource::Communication.collection_endpoint(),
            None,
            Some(&query),
        )
        .await?;

    Ok(list_records(response, index))
}
