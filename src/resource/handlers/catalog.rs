//! Catalog lookups: sources, statuses, products, settings
//!
//! Read-only resources that share one handler shape: a limit-bounded GET on
//! the collection endpoint, fanned out into one record per element.

use reqwest::Method;

use super::{base_list_fields, list_records};
use crate::api::http::HttpClient;
use crate::error::ConnectorError;
use crate::execution::{Execution, OutputRecord};
use crate::resource::params;
use crate::resource::router::Resource;

pub(crate) async fn get_all(
    client: &HttpClient,
    execution: &dyn Execution,
    resource: Resource,
    index: usize,
) -> Result<Vec<OutputRecord>, ConnectorError> {
    let query = params::build_query(base_list_fields(execution, index));
    let response = client
        .request(
            Method::GET,
            resource.collection_endpoint(),
            None,
            Some(&query),
        )
        .await?;

    Ok(list_records(response, index))
}
