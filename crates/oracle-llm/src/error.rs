use http::StatusCode;
use oracle_config::ProviderKind;
use thiserror::Error;

/// Trait for domain errors that can be converted to HTTP responses
///
/// The handler turns these into `{ "error": message }` bodies.
pub trait HttpError: std::error::Error {
    /// HTTP status code for this error
    fn status_code(&self) -> StatusCode;

    /// Machine-readable error type, used in logs
    fn error_type(&self) -> &str;

    /// Message safe to expose to API consumers
    fn client_message(&self) -> String;
}

/// Errors that can occur while answering an oracle request
#[derive(Debug, Error)]
pub enum OracleError {
    /// Request used a method other than `POST` or `OPTIONS`
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Neither provider has a credential
    #[error("No AI provider configured. Set GROQ_API_KEY or GEMINI_API_KEY.")]
    NotConfigured,

    /// Request body has no usable `prompt`
    #[error("Missing prompt")]
    MissingPrompt,

    /// Request body could not be read (over the size limit, aborted upload)
    #[error("{message}")]
    BodyRejected { status: StatusCode, message: String },

    /// Provider call failed: network, timeout, non-success status or an
    /// unexpected response shape
    #[error("{message}")]
    Upstream { provider: ProviderKind, message: String },

    /// Provider answered but the text holds no parseable JSON
    #[error("Could not parse Oracle response")]
    Extraction,

    /// Unexpected internal error
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl OracleError {
    /// Shorthand for an upstream failure
    pub fn upstream(provider: ProviderKind, message: impl Into<String>) -> Self {
        Self::Upstream {
            provider,
            message: message.into(),
        }
    }

    /// Whether this error should trigger the fallback provider
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Upstream { .. } | Self::Extraction)
    }
}

impl HttpError for OracleError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::MissingPrompt => StatusCode::BAD_REQUEST,
            Self::BodyRejected { status, .. } => *status,
            Self::NotConfigured | Self::Upstream { .. } | Self::Extraction | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::MethodNotAllowed => "method_not_allowed",
            Self::NotConfigured => "configuration_error",
            Self::MissingPrompt | Self::BodyRejected { .. } => "invalid_request_error",
            Self::Upstream { .. } => "upstream_error",
            Self::Extraction => "extraction_error",
            Self::Internal(_) => "internal_error",
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::Internal(_) => "an internal error occurred".to_owned(),
            other => other.to_string(),
        }
    }
}
