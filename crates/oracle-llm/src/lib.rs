//! Core oracle crate
//!
//! Answers free-text prompts with structured JSON by calling one of two LLM
//! providers (Groq or Google Gemini), chosen by weight, with a single
//! failover to the other.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod error;
pub mod extract;
pub mod handler;
mod http_client;
pub mod protocol;
pub mod provider;
pub mod selection;
pub mod state;
pub mod types;

pub use error::{HttpError, OracleError};
pub use extract::extract_json;
pub use handler::oracle_router;
pub use provider::Provider;
pub use selection::{Selection, select};
pub use state::OracleState;
pub use types::{CompletionRequest, OracleRequest, OracleResponse};
