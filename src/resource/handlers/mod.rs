//! Per-resource operation handlers
//!
//! Each handler reads its declared parameters for one item index, performs
//! exactly one outbound call through the shared HTTP helper, and normalizes
//! the response into output records.

pub(crate) mod catalog;
pub(crate) mod communication;
pub(crate) mod customer;

use serde_json::{Map, Value};

use super::params;
use super::response::ListResponse;
use crate::execution::{Execution, OutputRecord};

/// One output record per element of a list response, all tied to the
/// requesting item.
pub(crate) fn list_records(response: Value, index: usize) -> Vec<OutputRecord> {
    ListResponse::decode(response)
        .into_items()
        .into_iter()
        .map(|item| OutputRecord::new(item, index))
        .collect()
}

/// Base query fields shared by every getAll operation: the effective limit,
/// honoring the return-all switch.
pub(crate) fn base_list_fields(execution: &dyn Execution, index: usize) -> Map<String, Value> {
    let return_all = params::bool_value(execution.parameter("returnAll", index), false);
    let limit = params::effective_limit(
        return_all,
        params::u64_value(execution.parameter("limit", index)),
    );

    let mut fields = Map::new();
    fields.insert("limit".to_string(), Value::from(limit));
    fields
}
