use std::fmt;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use url::Url;

/// Oracle endpoint configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OracleConfig {
    /// Path the oracle endpoint is mounted at
    #[serde(default = "default_path")]
    pub path: String,
    /// Probability of choosing Groq as primary when both providers are usable
    #[serde(default = "default_primary_weight")]
    pub primary_weight: f64,
    /// Deadline for each outbound provider call
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    /// Sampling temperature sent to both providers
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// Output token cap sent to both providers
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Groq (`OpenAI`-compatible chat completions)
    #[serde(default)]
    pub groq: ProviderConfig,
    /// Google Gemini (`generateContent`)
    #[serde(default)]
    pub gemini: ProviderConfig,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            primary_weight: default_primary_weight(),
            timeout_seconds: default_timeout_seconds(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            groq: ProviderConfig::default(),
            gemini: ProviderConfig::default(),
        }
    }
}

impl OracleConfig {
    /// Per-call deadline as a `Duration`
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Resolve the credentials of both providers as of now
    pub fn credentials(&self) -> Credentials {
        Credentials {
            groq: self.groq.resolve_api_key(ProviderKind::Groq),
            gemini: self.gemini.resolve_api_key(ProviderKind::Gemini),
        }
    }
}

/// Configuration for one of the two providers
///
/// Unset fields fall back to the provider's defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    /// Static API key, takes precedence over `api_key_env`
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Environment variable read on every request; empty disables the lookup
    #[serde(default)]
    pub api_key_env: Option<String>,
    /// Base URL override
    #[serde(default)]
    pub base_url: Option<Url>,
    /// Model identifier override
    #[serde(default)]
    pub model: Option<String>,
}

impl ProviderConfig {
    /// Resolve the API key, consulting the environment at call time
    ///
    /// Empty strings are treated as absent.
    pub fn resolve_api_key(&self, kind: ProviderKind) -> Option<SecretString> {
        if let Some(key) = &self.api_key
            && !key.expose_secret().is_empty()
        {
            return Some(key.clone());
        }

        let var = self.api_key_env.as_deref().unwrap_or_else(|| kind.default_api_key_env());
        if var.is_empty() {
            return None;
        }

        std::env::var(var)
            .ok()
            .filter(|value| !value.is_empty())
            .map(SecretString::from)
    }
}

/// The two interchangeable providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// Groq chat completions, the favoured primary
    Groq,
    /// Google Gemini
    Gemini,
}

impl ProviderKind {
    /// Both providers, primary preference first
    pub const ALL: [Self; 2] = [Self::Groq, Self::Gemini];

    /// Wire tag used in responses and logs
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Groq => "groq",
            Self::Gemini => "gemini",
        }
    }

    /// Name used in provider error messages
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Groq => "Groq",
            Self::Gemini => "Gemini",
        }
    }

    /// Environment variable holding the key when none is configured
    pub const fn default_api_key_env(self) -> &'static str {
        match self {
            Self::Groq => "GROQ_API_KEY",
            Self::Gemini => "GEMINI_API_KEY",
        }
    }

    /// The other provider
    pub const fn other(self) -> Self {
        match self {
            Self::Groq => Self::Gemini,
            Self::Gemini => Self::Groq,
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Credentials resolved for a single request
#[derive(Debug, Default, Clone)]
pub struct Credentials {
    pub groq: Option<SecretString>,
    pub gemini: Option<SecretString>,
}

impl Credentials {
    pub const fn get(&self, kind: ProviderKind) -> Option<&SecretString> {
        match kind {
            ProviderKind::Groq => self.groq.as_ref(),
            ProviderKind::Gemini => self.gemini.as_ref(),
        }
    }

    /// Providers holding a credential, primary preference first
    pub fn available(&self) -> Vec<ProviderKind> {
        ProviderKind::ALL
            .into_iter()
            .filter(|kind| self.get(*kind).is_some())
            .collect()
    }
}

fn default_path() -> String {
    "/api/oracle".to_owned()
}

#[allow(clippy::missing_const_for_fn)]
fn default_primary_weight() -> f64 {
    0.85
}

#[allow(clippy::missing_const_for_fn)]
fn default_timeout_seconds() -> u64 {
    30
}

#[allow(clippy::missing_const_for_fn)]
fn default_temperature() -> f64 {
    0.9
}

#[allow(clippy::missing_const_for_fn)]
fn default_max_tokens() -> u32 {
    1024
}
