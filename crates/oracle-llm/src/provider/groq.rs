//! Groq provider, speaking the `OpenAI` chat completions protocol

use async_trait::async_trait;
use oracle_config::{ProviderConfig, ProviderKind};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use super::{Provider, status_error, transport_error};
use crate::error::OracleError;
use crate::protocol::openai::{OpenAiErrorResponse, OpenAiMessage, OpenAiRequest, OpenAiResponse};
use crate::types::CompletionRequest;

/// Default Groq API base URL
const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Default chat model
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Instruction used when the caller sends no system prompt
pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You are a mystical relationship oracle. Always respond in valid JSON only. No markdown.";

/// Groq chat completions provider
pub struct GroqProvider {
    client: Client,
    base_url: Url,
    model: String,
}

impl GroqProvider {
    /// Create from provider configuration
    ///
    /// # Panics
    ///
    /// Panics if the hardcoded default base URL is invalid (should never happen).
    pub fn new(config: &ProviderConfig, client: Client) -> Self {
        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| Url::parse(DEFAULT_BASE_URL).expect("valid default URL"));

        Self {
            client,
            base_url,
            model: config.model.clone().unwrap_or_else(|| DEFAULT_MODEL.to_owned()),
        }
    }

    /// Build the chat completions URL
    fn completions_url(&self) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        format!("{base}/chat/completions")
    }

    fn wire_request(&self, request: &CompletionRequest) -> OpenAiRequest {
        let system = request.system_prompt.as_deref().unwrap_or(DEFAULT_SYSTEM_PROMPT);

        OpenAiRequest {
            model: self.model.clone(),
            messages: vec![OpenAiMessage::system(system), OpenAiMessage::user(&*request.prompt)],
            temperature: Some(request.temperature),
            max_tokens: Some(request.max_tokens),
        }
    }
}

#[async_trait]
impl Provider for GroqProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Groq
    }

    async fn complete(&self, request: &CompletionRequest, api_key: &SecretString) -> Result<String, OracleError> {
        let kind = self.kind();

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(api_key.expose_secret())
            .json(&self.wire_request(request))
            .send()
            .await
            .map_err(|e| transport_error(kind, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<OpenAiErrorResponse>(&body)
                .ok()
                .and_then(|e| e.error.message);
            return Err(status_error(kind, status, message));
        }

        let wire_response: OpenAiResponse = response
            .json()
            .await
            .map_err(|e| OracleError::upstream(kind, format!("failed to parse Groq response: {}", e.without_url())))?;

        wire_response
            .into_text()
            .ok_or_else(|| OracleError::upstream(kind, "Groq returned no completion"))
    }
}
