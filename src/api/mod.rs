//! Tecnocall API client
//!
//! Bearer-token HTTP access to the bot endpoints, plus credential loading.

pub mod credentials;
pub mod http;

pub use credentials::{Credentials, DEFAULT_BASE_URL};
pub use http::{HttpClient, ME_ENDPOINT};

use crate::error::ConnectorError;

/// Format connector errors into user-friendly messages
pub fn format_connector_error(err: &ConnectorError) -> String {
    let err_str = err.to_string();

    if err_str.contains("401") || err_str.contains("403") || err_str.contains("Unauthenticated") {
        return "Authentication failed - check the bot token".to_string();
    }
    if err_str.contains("dns error") || err_str.contains("connection") {
        return "Connection failed - check the base URL and network".to_string();
    }
    if err_str.contains("timed out") || err_str.contains("timeout") {
        return "Request timed out - check connection".to_string();
    }

    err_str
}
