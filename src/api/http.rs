//! Authenticated HTTP helper for the Tecnocall bot API
//!
//! One thin wrapper over reqwest: composes the request URL from the
//! credential's base URL, attaches bearer-token auth, and decodes the JSON
//! response. No retries and no timeout beyond the client default; the
//! workflow layer owns both.

use reqwest::{Client, Method};
use serde_json::Value;
use tracing::{debug, trace, warn};

use super::credentials::{mask_credential, Credentials};
use crate::error::ConnectorError;

/// Probe endpoint used to validate a credential.
pub const ME_ENDPOINT: &str = "/api/bot/me";

/// HTTP client bound to one set of credentials.
pub struct HttpClient {
    http: Client,
    credentials: Credentials,
}

impl HttpClient {
    pub fn new(credentials: Credentials) -> Self {
        debug!(
            "Creating Tecnocall client for {}, token: {}",
            credentials.base_url,
            mask_credential(&credentials.bot_token)
        );
        Self {
            http: Client::new(),
            credentials,
        }
    }

    /// Compose the full request URL: base URL with any trailing slash
    /// stripped, the endpoint path, and an encoded query string when one is
    /// supplied.
    fn compose_url(&self, endpoint: &str, query: Option<&[(String, String)]>) -> String {
        let base = self.credentials.base_url.trim_end_matches('/');
        let url = format!("{}{}", base, endpoint);

        match query {
            Some(pairs) if !pairs.is_empty() => {
                let query_string: String = pairs
                    .iter()
                    .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
                    .collect::<Vec<_>>()
                    .join("&");
                format!("{}?{}", url, query_string)
            }
            _ => url,
        }
    }

    /// Send one authenticated request and decode the JSON response.
    ///
    /// Body and query are omitted from the wire entirely when not supplied.
    pub async fn request(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&Value>,
        query: Option<&[(String, String)]>,
    ) -> Result<Value, ConnectorError> {
        let url = self.compose_url(endpoint, query);
        debug!("{} {}", method, url);

        let mut request = self
            .http
            .request(method, &url)
            .header("Accept", "application/json")
            .header("Content-Type", "application/json")
            .header(
                "Authorization",
                format!("Bearer {}", self.credentials.bot_token),
            );

        if let Some(body) = body {
            trace!("Request body: {}", body);
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|err| ConnectorError::ApiRequest(err.to_string()))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|err| ConnectorError::ApiRequest(err.to_string()))?;

        debug!("Response status: {}", status);
        trace!("Response body (first 2000 chars): {}", preview(&text, 2000));

        if !status.is_success() {
            warn!(
                "Tecnocall request failed: status={}, body={}",
                status,
                preview(&text, 500)
            );
            return Err(ConnectorError::ApiRequest(format!(
                "{}: {}",
                status,
                preview(&text, 500)
            )));
        }

        if text.is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&text)
            .map_err(|err| ConnectorError::ApiRequest(format!("invalid JSON response: {}", err)))
    }

    /// Probe `GET /api/bot/me` to check that the credential is accepted.
    pub async fn verify_credentials(&self) -> Result<Value, ConnectorError> {
        self.request(Method::GET, ME_ENDPOINT, None, None).await
    }
}

/// Truncate to at most `max` characters without splitting a code point.
fn preview(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_with_base(base_url: &str) -> HttpClient {
        HttpClient::new(Credentials::new(base_url, "test-token"))
    }

    #[test]
    fn compose_url_joins_base_and_endpoint() {
        let client = client_with_base("https://api.tecnocall.com");
        assert_eq!(
            client.compose_url("/api/bot/customers", None),
            "https://api.tecnocall.com/api/bot/customers"
        );
    }

    #[test]
    fn compose_url_strips_trailing_slash() {
        let client = client_with_base("https://api.tecnocall.com/");
        assert_eq!(
            client.compose_url("/api/bot/me", None),
            "https://api.tecnocall.com/api/bot/me"
        );
    }

    #[test]
    fn compose_url_encodes_query_values() {
        let client = client_with_base("https://api.tecnocall.com");
        let query = vec![
            ("limit".to_string(), "50".to_string()),
            ("search".to_string(), "Ana Silva".to_string()),
        ];
        assert_eq!(
            client.compose_url("/api/bot/customers", Some(&query)),
            "https://api.tecnocall.com/api/bot/customers?limit=50&search=Ana%20Silva"
        );
    }

    #[test]
    fn compose_url_omits_empty_query() {
        let client = client_with_base("https://api.tecnocall.com");
        assert_eq!(
            client.compose_url("/api/bot/sources", Some(&[])),
            "https://api.tecnocall.com/api/bot/sources"
        );
    }

    #[test]
    fn preview_respects_char_boundaries() {
        assert_eq!(preview("héllo", 2), "hé");
        assert_eq!(preview("short", 2000), "short");
    }
}
