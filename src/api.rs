use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::AppConfig;
use crate::listing::Listing;

/// Failure taxonomy for backend calls. Network covers connection-level
/// failures (backend unreachable), Agent covers a reachable backend that
/// returned a structured error payload, Unknown covers everything else.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("backend unreachable: {0}")]
    Network(#[source] reqwest::Error),
    #[error("agent error: {detail}")]
    Agent { detail: String },
    #[error("unexpected backend failure: {0}")]
    Unknown(String),
}

impl ApiError {
    fn from_transport(error: reqwest::Error) -> Self {
        if error.is_connect() || error.is_timeout() || error.is_request() {
            ApiError::Network(error)
        } else {
            ApiError::Unknown(error.to_string())
        }
    }

    /// The chat-bubble rendering of this failure. Every error resolves to a
    /// displayable message at the channel boundary; nothing propagates past it.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(_) => {
                "I couldn't reach the search backend. Please make sure it is running, \
                 then try again."
                    .to_string()
            }
            ApiError::Agent { detail } => {
                format!("Sorry, the search agent hit a problem: {detail}")
            }
            ApiError::Unknown(reason) => {
                format!("Sorry, something unexpected went wrong: {reason}")
            }
        }
    }
}

/// One conversational turn: the agent's natural-language reply plus any
/// newly found properties.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatReply {
    pub response: String,
    #[serde(default)]
    pub properties: Vec<Listing>,
}

#[derive(Debug, Deserialize)]
struct ListingsResponse {
    #[serde(default)]
    listings: Vec<Listing>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: String,
}

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn from_env() -> Self {
        Self::new(AppConfig::from_env().api_url)
    }

    pub fn new(base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: crate::config::normalize_base_url(&base_url),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send one user utterance to the agent. The agent performs web search
    /// and browser automation, so this may legitimately run long; there is
    /// deliberately no client-side timeout.
    pub async fn chat(&self, message: &str) -> Result<ChatReply, ApiError> {
        #[derive(Serialize)]
        struct ChatRequest<'a> {
            message: &'a str,
        }

        let response = self
            .http
            .post(format!("{}/api/chat", self.base_url))
            .json(&ChatRequest { message })
            .send()
            .await
            .map_err(ApiError::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(decode_error_body(status, &body));
        }

        response
            .json::<ChatReply>()
            .await
            .map_err(|error| ApiError::Unknown(format!("bad /api/chat payload: {error}")))
    }

    /// Pull the full persisted listing catalog.
    pub async fn listings(&self) -> Result<Vec<Listing>, ApiError> {
        let response = self
            .http
            .get(format!("{}/api/listings", self.base_url))
            .send()
            .await
            .map_err(ApiError::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(decode_error_body(status, &body));
        }

        response
            .json::<ListingsResponse>()
            .await
            .map(|body| body.listings)
            .map_err(|error| ApiError::Unknown(format!("bad /api/listings payload: {error}")))
    }

    /// Plain file fetch for listing photos; the body is handed to the media
    /// cache undecoded.
    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(ApiError::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Unknown(format!("HTTP {status} fetching {url}")));
        }

        response
            .bytes()
            .await
            .map(|bytes| bytes.to_vec())
            .map_err(|error| ApiError::Unknown(error.to_string()))
    }
}

fn decode_error_body(status: reqwest::StatusCode, body: &str) -> ApiError {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => ApiError::Agent {
            detail: parsed.detail,
        },
        Err(_) => ApiError::Unknown(format!("HTTP {status}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_base_url_on_construction() {
        let client = ApiClient::new("http://127.0.0.1:8000/".to_string());
        assert_eq!(client.base_url(), "http://127.0.0.1:8000");
    }

    #[test]
    fn structured_error_body_maps_to_agent_error() {
        let error = decode_error_body(
            reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"detail": "Invalid OpenAI API key."}"#,
        );
        match error {
            ApiError::Agent { detail } => assert_eq!(detail, "Invalid OpenAI API key."),
            other => panic!("expected Agent error, got {other:?}"),
        }
    }

    #[test]
    fn unstructured_error_body_maps_to_unknown() {
        let error = decode_error_body(reqwest::StatusCode::BAD_GATEWAY, "<html>oops</html>");
        assert!(matches!(error, ApiError::Unknown(_)));
    }

    #[test]
    fn chat_reply_defaults_to_no_properties() {
        let payload = serde_json::json!({"response": "Nothing new to show."});
        let parsed: ChatReply = serde_json::from_value(payload).expect("decode reply");
        assert_eq!(parsed.response, "Nothing new to show.");
        assert!(parsed.properties.is_empty());
    }

    #[test]
    fn chat_reply_carries_properties() {
        let payload = serde_json::json!({
            "response": "Found 1 place.",
            "properties": [{"title": "Loft", "address": "1 A St", "price": 2000}]
        });
        let parsed: ChatReply = serde_json::from_value(payload).expect("decode reply");
        assert_eq!(parsed.properties.len(), 1);
        assert_eq!(parsed.properties[0].title, "Loft");
    }

    #[test]
    fn listings_response_defaults_to_empty() {
        let parsed: ListingsResponse =
            serde_json::from_str("{}").expect("decode listings envelope");
        assert!(parsed.listings.is_empty());
    }

    #[test]
    fn every_error_variant_renders_a_user_message() {
        let agent = ApiError::Agent {
            detail: "rate limited".to_string(),
        };
        assert!(agent.user_message().contains("rate limited"));

        let unknown = ApiError::Unknown("HTTP 502".to_string());
        assert!(unknown.user_message().contains("HTTP 502"));
    }
}
