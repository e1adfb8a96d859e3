//! Oracle state: provider registry, selection and single failover

use std::collections::HashMap;
use std::sync::Arc;

use oracle_config::{Credentials, OracleConfig, ProviderKind};
use serde_json::Value;

use crate::error::OracleError;
use crate::extract::extract_json;
use crate::http_client::http_client;
use crate::provider::Provider;
use crate::provider::gemini::GeminiProvider;
use crate::provider::groq::GroqProvider;
use crate::selection::{Selection, select};
use crate::types::{CompletionRequest, OracleRequest, OracleResponse};

/// Shared state for the oracle route
#[derive(Clone)]
pub struct OracleState {
    inner: Arc<OracleStateInner>,
}

struct OracleStateInner {
    config: OracleConfig,
    providers: HashMap<ProviderKind, Arc<dyn Provider>>,
}

impl OracleState {
    /// Build state from configuration, constructing both providers over one
    /// shared HTTP client
    ///
    /// # Errors
    ///
    /// Returns `OracleError::Internal` if the HTTP client cannot be built.
    pub fn from_config(config: OracleConfig) -> Result<Self, OracleError> {
        let client = http_client(config.timeout())
            .map_err(|e| OracleError::Internal(anyhow::Error::new(e).context("failed to build HTTP client")))?;

        let providers: [Arc<dyn Provider>; 2] = [
            Arc::new(GroqProvider::new(&config.groq, client.clone())),
            Arc::new(GeminiProvider::new(&config.gemini, client)),
        ];

        Ok(Self::with_providers(config, providers))
    }

    /// Build state around already constructed providers, keyed by their kind
    pub fn with_providers(config: OracleConfig, providers: impl IntoIterator<Item = Arc<dyn Provider>>) -> Self {
        let providers = providers
            .into_iter()
            .map(|provider| (provider.kind(), provider))
            .collect();

        Self {
            inner: Arc::new(OracleStateInner { config, providers }),
        }
    }

    pub fn config(&self) -> &OracleConfig {
        &self.inner.config
    }

    /// Credentials as of this moment
    ///
    /// Environment-backed keys are re-read on every call.
    pub fn credentials(&self) -> Credentials {
        self.inner.config.credentials()
    }

    /// Answer a validated request using whichever providers hold a credential
    ///
    /// The primary is chosen by weight. If it fails with a retryable error
    /// the fallback is tried exactly once, and its error is the one returned
    /// when both fail.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::NotConfigured` when `credentials` is empty,
    /// otherwise the error of the last provider attempted.
    pub async fn answer(
        &self,
        request: OracleRequest,
        credentials: &Credentials,
    ) -> Result<OracleResponse, OracleError> {
        let Selection { primary, fallback } = self.select(credentials).ok_or(OracleError::NotConfigured)?;

        tracing::info!(
            primary = %primary,
            fallback = fallback.map_or("none", ProviderKind::as_str),
            "oracle provider selected"
        );

        let completion = CompletionRequest {
            prompt: request.prompt,
            system_prompt: request.system_prompt,
            temperature: self.inner.config.temperature,
            max_tokens: self.inner.config.max_tokens,
        };

        let error = match self.attempt(primary, &completion, credentials).await {
            Ok(result) => return Ok(OracleResponse { result, provider: primary }),
            Err(e) => e,
        };

        tracing::warn!(provider = %primary, error = %error, "primary provider failed");

        let Some(fallback) = fallback.filter(|_| error.is_retryable()) else {
            return Err(error);
        };

        tracing::warn!(from_provider = %primary, to_provider = %fallback, "switching to fallback provider");

        match self.attempt(fallback, &completion, credentials).await {
            Ok(result) => Ok(OracleResponse {
                result,
                provider: fallback,
            }),
            Err(e) => {
                tracing::warn!(provider = %fallback, error = %e, "fallback provider also failed");
                Err(e)
            }
        }
    }

    fn select(&self, credentials: &Credentials) -> Option<Selection> {
        let available: Vec<ProviderKind> = credentials
            .available()
            .into_iter()
            .filter(|kind| self.inner.providers.contains_key(kind))
            .collect();

        select(&available, self.inner.config.primary_weight, &mut rand::rng())
    }

    /// One provider call followed by JSON extraction
    async fn attempt(
        &self,
        kind: ProviderKind,
        completion: &CompletionRequest,
        credentials: &Credentials,
    ) -> Result<Value, OracleError> {
        let provider = self
            .inner
            .providers
            .get(&kind)
            .ok_or_else(|| OracleError::Internal(anyhow::anyhow!("provider {kind} is not registered")))?;

        let api_key = credentials.get(kind).ok_or(OracleError::NotConfigured)?;

        let text = provider.complete(completion, api_key).await?;

        extract_json(&text).inspect_err(|_| {
            tracing::warn!(provider = %kind, "provider output holds no parseable JSON");
        })
    }
}
