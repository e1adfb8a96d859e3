use anyhow::Context;
use axum::Router;
use http::HeaderValue;
use http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN, HeaderName,
};
use oracle_config::CorsConfig;
use tower_http::set_header::SetResponseHeaderLayer;

/// Validated `Access-Control-Allow-*` values
///
/// Unlike a negotiating CORS layer these are written unconditionally, so
/// error responses and preflights carry the same headers as successes.
#[derive(Debug, Clone)]
pub struct CorsHeaders {
    origin: HeaderValue,
    methods: HeaderValue,
    headers: HeaderValue,
}

impl CorsHeaders {
    /// Parse the configured values into header values
    pub fn from_config(config: &CorsConfig) -> anyhow::Result<Self> {
        Ok(Self {
            origin: header_value(ACCESS_CONTROL_ALLOW_ORIGIN, &config.allow_origin)?,
            methods: header_value(ACCESS_CONTROL_ALLOW_METHODS, &config.allow_methods)?,
            headers: header_value(ACCESS_CONTROL_ALLOW_HEADERS, &config.allow_headers)?,
        })
    }

    /// Stamp the headers onto every response of `router`
    pub fn apply(self, router: Router) -> Router {
        router
            .layer(SetResponseHeaderLayer::overriding(ACCESS_CONTROL_ALLOW_ORIGIN, self.origin))
            .layer(SetResponseHeaderLayer::overriding(ACCESS_CONTROL_ALLOW_METHODS, self.methods))
            .layer(SetResponseHeaderLayer::overriding(ACCESS_CONTROL_ALLOW_HEADERS, self.headers))
    }
}

fn header_value(name: HeaderName, value: &str) -> anyhow::Result<HeaderValue> {
    HeaderValue::from_str(value).with_context(|| format!("invalid value for {name}: {value:?}"))
}
