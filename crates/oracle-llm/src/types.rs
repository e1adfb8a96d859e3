use oracle_config::ProviderKind;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::OracleError;

/// Inbound oracle request, built by [`OracleRequest::from_body`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OracleRequest {
    /// User prompt (`prompt`)
    pub prompt: String,
    /// Optional system prompt replacing the built-in instruction (`systemPrompt`)
    pub system_prompt: Option<String>,
}

impl OracleRequest {
    /// Parse a raw request body
    ///
    /// Anything other than a JSON object with a non-empty string `prompt`
    /// is a missing prompt. A non-string or empty `systemPrompt` is ignored.
    pub fn from_body(body: &[u8]) -> Result<Self, OracleError> {
        let value: Value = serde_json::from_slice(body).map_err(|_| OracleError::MissingPrompt)?;

        let prompt = value
            .get("prompt")
            .and_then(Value::as_str)
            .filter(|prompt| !prompt.is_empty())
            .ok_or(OracleError::MissingPrompt)?;

        let system_prompt = value
            .get("systemPrompt")
            .and_then(Value::as_str)
            .filter(|system| !system.is_empty())
            .map(str::to_owned);

        Ok(Self {
            prompt: prompt.to_owned(),
            system_prompt,
        })
    }
}

/// Provider-neutral completion request handed to each adapter
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub prompt: String,
    pub system_prompt: Option<String>,
    pub temperature: f64,
    pub max_tokens: u32,
}

/// Successful oracle response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OracleResponse {
    /// JSON extracted from the model output
    pub result: Value,
    /// Provider that produced it
    pub provider: ProviderKind,
}
