//! HTTP transport for the Notion API
//!
//! A thin synchronous client: one agent, bearer authentication, and a
//! single `post` operation. Everything above this layer works with JSON
//! values and typed errors; nothing here retries or interprets payloads.

use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

/// Base URL for all Notion API endpoints
pub const NOTION_API_URL: &str = "https://api.notion.com/v1/";

/// API version sent with every request
pub const NOTION_VERSION: &str = "2022-06-28";

/// Timeout applied to every request
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors from talking to the API
#[derive(Error, Debug)]
pub enum ApiError {
    /// The API answered with a non-success status
    #[error("API request failed with status {status}: {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Message extracted from the error response body
        message: String,
    },

    /// The request never produced a response
    #[error("network error: {0}")]
    Transport(String),

    /// The response body was not the expected JSON
    #[error("could not decode API response: {0}")]
    InvalidResponse(String),
}

/// Synchronous API client holding the agent and credentials
pub struct ApiClient {
    agent: ureq::Agent,
    base_url: String,
    token: String,
}

impl ApiClient {
    /// Create a client against the default API base URL
    pub fn new(token: String) -> Self {
        Self::with_base_url(NOTION_API_URL.to_string(), token)
    }

    /// Create a client against a custom base URL
    pub fn with_base_url(base_url: String, token: String) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(REQUEST_TIMEOUT).build();
        Self {
            agent,
            base_url,
            token,
        }
    }

    /// Send a POST request to an API endpoint.
    ///
    /// # Parameters
    /// * `endpoint` - Endpoint path relative to the base URL (e.g., "search")
    /// * `body` - Request body, serialized as JSON
    ///
    /// # Returns
    /// * `Ok(Value)` - Decoded JSON response body
    /// * `Err(ApiError)` - Non-success status, transport failure, or
    ///   undecodable response
    pub fn post(&self, endpoint: &str, body: &impl Serialize) -> Result<serde_json::Value, ApiError> {
        let url = format!("{}{}", self.base_url, endpoint);
        log::debug!("POST {}", url);

        let response = self
            .agent
            .post(&url)
            .set("Authorization", &format!("Bearer {}", self.token))
            .set("Content-Type", "application/json")
            .set("Notion-Version", NOTION_VERSION)
            .send_json(body);

        match response {
            Ok(response) => response
                .into_json()
                .map_err(|e| ApiError::InvalidResponse(e.to_string())),
            Err(ureq::Error::Status(status, response)) => Err(ApiError::Status {
                status,
                message: error_message(response),
            }),
            Err(ureq::Error::Transport(transport)) => {
                Err(ApiError::Transport(transport.to_string()))
            }
        }
    }
}

/// Extract a human-readable message from an error response.
///
/// The API reports failures as JSON with a `message` field; fall back to
/// the raw body when the shape differs.
fn error_message(response: ureq::Response) -> String {
    match response.into_string() {
        Ok(body) => match serde_json::from_str::<serde_json::Value>(&body) {
            Ok(value) => value
                .get("message")
                .and_then(|message| message.as_str())
                .map(str::to_string)
                .unwrap_or(body),
            Err(_) => body,
        },
        Err(_) => String::from("(unreadable response body)"),
    }
}
