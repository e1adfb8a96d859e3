//! Provider trait and the two backend implementations

pub mod gemini;
pub mod groq;

use async_trait::async_trait;
use oracle_config::ProviderKind;
use reqwest::StatusCode;
use secrecy::SecretString;

use crate::error::OracleError;
use crate::types::CompletionRequest;

/// Trait implemented by each LLM provider backend
///
/// Implementations are stateless apart from their HTTP client and never
/// retry internally.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Which provider this is
    fn kind(&self) -> ProviderKind;

    /// Send the prompt and return the raw text completion
    async fn complete(&self, request: &CompletionRequest, api_key: &SecretString) -> Result<String, OracleError>;
}

/// Map a transport-level failure to an upstream error
///
/// The URL is stripped since Gemini carries its key in the query string.
pub(crate) fn transport_error(kind: ProviderKind, error: reqwest::Error) -> OracleError {
    let error = error.without_url();

    if error.is_timeout() {
        tracing::error!(provider = %kind, "upstream request timed out");
        return OracleError::upstream(kind, format!("{} request timed out", kind.display_name()));
    }

    tracing::error!(provider = %kind, error = %error, "upstream request failed");
    OracleError::upstream(kind, error.to_string())
}

/// Build the upstream error for a non-success status
///
/// Prefers the provider's own `error.message`, else a generic status line.
pub(crate) fn status_error(kind: ProviderKind, status: StatusCode, message: Option<String>) -> OracleError {
    tracing::warn!(provider = %kind, status = %status, "upstream returned error");

    let message = message
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| format!("{} error {}", kind.display_name(), status.as_u16()));

    OracleError::upstream(kind, message)
}
