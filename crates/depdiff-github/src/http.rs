//! Shared HTTP plumbing

use std::time::Duration;

use reqwest::{Client, Response};
use serde::Deserialize;

use crate::error::{AdapterError, Result};

pub(crate) const USER_AGENT: &str = concat!("depdiff/", env!("CARGO_PKG_VERSION"));

/// Build an HTTP client with the shared user agent and a request timeout
pub(crate) fn build_client(timeout: Duration) -> Result<Client> {
    if timeout.is_zero() {
        return Err(AdapterError::config_error("Timeout must be greater than 0"));
    }
    Ok(Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()?)
}

/// Normalize a base URL, rejecting empty ones
pub(crate) fn base_url(url: &str, what: &str) -> Result<String> {
    let url = url.trim().trim_end_matches('/');
    if url.is_empty() {
        return Err(AdapterError::config_error(format!("{} URL is required", what)));
    }
    Ok(url.to_string())
}

#[derive(Deserialize)]
struct ApiMessage {
    message: String,
}

/// Best-effort error message from a failed response
pub(crate) async fn error_message(response: Response) -> String {
    let status = response.status();
    match response.text().await {
        Ok(body) => match serde_json::from_str::<ApiMessage>(&body) {
            Ok(api) => api.message,
            Err(_) if body.trim().is_empty() => status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string(),
            Err(_) => body,
        },
        Err(e) => e.to_string(),
    }
}
