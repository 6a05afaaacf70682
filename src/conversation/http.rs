//! reqwest-backed client for `POST /v1/conversations`.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};

use crate::conversation::{ClientError, ConversationApi, ConversationRequest, ConversationResponse};

/// Default endpoint of the conversations service.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/v1/conversations";

/// HTTP client for the conversations endpoint.
pub struct HttpConversationClient {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpConversationClient {
    /// Build a client for `endpoint`. `timeout` of `None` means no client-side limit.
    pub fn new(endpoint: String, timeout: Option<Duration>) -> Result<Self, ClientError> {
        let url = reqwest::Url::parse(&endpoint)
            .map_err(|e| ClientError::Config(format!("invalid endpoint '{endpoint}': {e}")))?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ClientError::Config(e.to_string()))?;

        Ok(Self {
            endpoint: url.to_string(),
            client,
        })
    }
}

#[async_trait]
impl ConversationApi for HttpConversationClient {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn send(
        &self,
        request: &ConversationRequest,
    ) -> Result<ConversationResponse, ClientError> {
        info!(
            "POST {} (session_id={}, content_len={})",
            self.endpoint,
            request.session_id,
            request.payload.content.len()
        );

        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let status = response.status();
        debug!("Conversation response status: {}", status);

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Conversation API error: {} - {}", status.as_u16(), message);
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        let parsed: ConversationResponse =
            serde_json::from_str(&body).map_err(|e| ClientError::Parse(e.to_string()))?;

        if let Some(server_session) = parsed.session_id.as_deref()
            && server_session != request.session_id
        {
            warn!(
                "Server answered for session {} but client session is {}",
                server_session, request.session_id
            );
        }
        debug!(
            "Conversation response: status={:?}, messages={}, context_keys={}",
            parsed.status,
            parsed.messages.as_ref().map_or(0, Vec::len),
            parsed.context.as_ref().map_or(0, |c| c.len())
        );

        Ok(parsed)
    }
}
