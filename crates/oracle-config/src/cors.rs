use serde::Deserialize;

/// Cross-origin headers stamped onto every oracle response
///
/// Values are written verbatim into the `Access-Control-Allow-*` headers.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CorsConfig {
    /// `Access-Control-Allow-Origin`
    #[serde(default = "default_allow_origin")]
    pub allow_origin: String,
    /// `Access-Control-Allow-Methods`
    #[serde(default = "default_allow_methods")]
    pub allow_methods: String,
    /// `Access-Control-Allow-Headers`
    #[serde(default = "default_allow_headers")]
    pub allow_headers: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allow_origin: default_allow_origin(),
            allow_methods: default_allow_methods(),
            allow_headers: default_allow_headers(),
        }
    }
}

fn default_allow_origin() -> String {
    "*".to_owned()
}

fn default_allow_methods() -> String {
    "POST, OPTIONS".to_owned()
}

fn default_allow_headers() -> String {
    "Content-Type".to_owned()
}
