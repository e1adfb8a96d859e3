//! Google Gemini provider, speaking the `generateContent` protocol

use async_trait::async_trait;
use oracle_config::{ProviderConfig, ProviderKind};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use super::{Provider, status_error, transport_error};
use crate::error::OracleError;
use crate::protocol::google::{
    GoogleContent, GoogleErrorResponse, GoogleGenerationConfig, GoogleRequest, GoogleResponse,
};
use crate::types::CompletionRequest;

/// Default Google Generative Language API base URL
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Instruction used when the caller sends no system prompt
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a mystical relationship oracle. Always respond in valid JSON only. \
                                         No markdown, no backticks, no explanation.";

/// Gemini `generateContent` provider
pub struct GeminiProvider {
    client: Client,
    base_url: Url,
    model: String,
}

impl GeminiProvider {
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

    /// Build the `generateContent` URL with the key in the query string
    fn generate_url(&self, api_key: &SecretString) -> Result<Url, OracleError> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let mut url = Url::parse(&format!("{base}/models/{}:generateContent", self.model))
            .map_err(|e| OracleError::Internal(anyhow::anyhow!("invalid Gemini URL: {e}")))?;

        url.query_pairs_mut().append_pair("key", api_key.expose_secret());
        Ok(url)
    }

    fn wire_request(request: &CompletionRequest) -> GoogleRequest {
        let system = request.system_prompt.as_deref().unwrap_or(DEFAULT_SYSTEM_PROMPT);

        let mut user = GoogleContent::text(&*request.prompt);
        user.role = Some("user".to_owned());

        GoogleRequest {
            contents: vec![user],
            system_instruction: Some(GoogleContent::text(system)),
            generation_config: Some(GoogleGenerationConfig {
                temperature: Some(request.temperature),
                max_output_tokens: Some(request.max_tokens),
                response_mime_type: Some("application/json".to_owned()),
            }),
        }
    }
}

#[async_trait]
impl Provider for GeminiProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Gemini
    }

    async fn complete(&self, request: &CompletionRequest, api_key: &SecretString) -> Result<String, OracleError> {
        let kind = self.kind();
        let url = self.generate_url(api_key)?;

        let response = self
            .client
            .post(url)
            .json(&Self::wire_request(request))
            .send()
            .await
            .map_err(|e| transport_error(kind, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GoogleErrorResponse>(&body)
                .ok()
                .and_then(|e| e.error.message);
            return Err(status_error(kind, status, message));
        }

        let wire_response: GoogleResponse = response.json().await.map_err(|e| {
            OracleError::upstream(kind, format!("failed to parse Gemini response: {}", e.without_url()))
        })?;

        wire_response
            .into_text()
            .ok_or_else(|| OracleError::upstream(kind, "Gemini returned no candidates"))
    }
}
