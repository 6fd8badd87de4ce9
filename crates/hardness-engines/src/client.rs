// crates/hardness-engines/src/client.rs
//! HTTP client for the remote reasoning endpoints.

use crate::extract::json_to_text;
use hardness_core::error::{ApiError, HardnessError, HardnessResult, TransportError};
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

/// Fixed tenant identifier sent on every reasoning call.
pub const TENANT_ID: &str = "talos";

/// Per-call timeout. The only bound on an in-flight call; there is no
/// cancellation mechanism beyond it.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

const BODY_SNIPPET_LEN: usize = 200;

pub struct ReasoningClient {
    client: Client,
    auth_token: Option<String>,
}

impl ReasoningClient {
    /// `auth_token` comes from the environment; anonymous calls omit the
    /// Authorization header, matching the endpoints' optional-bearer scheme.
    pub fn new(auth_token: Option<String>) -> Self {
        ReasoningClient {
            client: Client::new(),
            auth_token: auth_token.filter(|t| !t.is_empty()),
        }
    }

    /// POST one prompt to one endpoint and extract the response text.
    ///
    /// No automatic retry, backoff, or circuit breaking: a failure is
    /// surfaced to the caller, who marks the stage failed and lets the user
    /// re-run it.
    pub async fn call(&self, endpoint: &str, prompt: &str) -> HardnessResult<String> {
        let payload = json!({ "agency_goal": prompt });
        debug!("reasoning call: endpoint={} prompt_len={}", endpoint, prompt.len());

        let mut request = self
            .client
            .post(endpoint)
            .timeout(REQUEST_TIMEOUT)
            .header("Content-Type", "application/json")
            .header("Tenant-ID", TENANT_ID)
            .header("X-Tenant-ID", TENANT_ID)
            .json(&payload);

        if let Some(token) = &self.auth_token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        let response = request.send().await.map_err(classify_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let body_snippet: String = body.chars().take(BODY_SNIPPET_LEN).collect();
            return Err(ApiError {
                status: status.as_u16(),
                body_snippet,
            }
            .into());
        }

        let body: Value = response.json().await.map_err(|e| {
            HardnessError::Transport(TransportError::InvalidResponse(e.to_string()))
        })?;
        debug!("reasoning response: {} bytes of JSON", body.to_string().len());

        Ok(json_to_text(&body))
    }
}

fn classify_transport_error(e: reqwest::Error) -> HardnessError {
    if e.is_timeout() {
        HardnessError::Transport(TransportError::Timeout(format!(
            "no response within {}s: {}",
            REQUEST_TIMEOUT.as_secs(),
            e
        )))
    } else {
        HardnessError::Transport(TransportError::Connection(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_token_means_anonymous() {
        let client = ReasoningClient::new(Some(String::new()));
        assert!(client.auth_token.is_none());

        let client = ReasoningClient::new(Some("tok".to_string()));
        assert_eq!(client.auth_token.as_deref(), Some("tok"));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        let client = ReasoningClient::new(None);
        // Reserved TEST-NET-1 address; nothing listens there
        let err = client
            .call("http://192.0.2.1:9/reasoning_api", "prompt")
            .await
            .unwrap_err();
        assert!(matches!(err, HardnessError::Transport(_)), "{}", err);
    }
}
