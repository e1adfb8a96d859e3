//! Axum handler for the oracle endpoint

use std::time::Instant;

use axum::body::Bytes;
use axum::extract::State;
use axum::extract::rejection::BytesRejection;
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};

use crate::error::{HttpError, OracleError};
use crate::state::OracleState;
use crate::types::{OracleRequest, OracleResponse};

/// Build the router serving the oracle at its configured path
///
/// Every method is routed to the handler so that non-`POST` requests get
/// the oracle's own JSON 405 body.
pub fn oracle_router(state: OracleState) -> Router {
    let path = state.config().path.clone();

    Router::new().route(&path, routing::any(oracle)).with_state(state)
}

/// Handle any request to the oracle path
async fn oracle(
    State(state): State<OracleState>,
    method: Method,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    if method == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }

    let start = Instant::now();

    match respond(&state, &method, &body).await {
        Ok(response) => {
            tracing::info!(
                provider = %response.provider,
                elapsed_ms = start.elapsed().as_millis(),
                "oracle answered"
            );
            Json(response).into_response()
        }
        Err(e) => error_response(&e),
    }
}

/// Method gate, credential check, body validation, then the provider call
async fn respond(
    state: &OracleState,
    method: &Method,
    body: &Result<Bytes, BytesRejection>,
) -> Result<OracleResponse, OracleError> {
    if *method != Method::POST {
        return Err(OracleError::MethodNotAllowed);
    }

    let credentials = state.credentials();
    if credentials.available().is_empty() {
        return Err(OracleError::NotConfigured);
    }

    let body = body.as_ref().map_err(|rejection| OracleError::BodyRejected {
        status: rejection.status(),
        message: rejection.body_text(),
    })?;
    let request = OracleRequest::from_body(body)?;

    state.answer(request, &credentials).await
}

/// Convert an error into a `{ "error": message }` response
fn error_response(error: &OracleError) -> Response {
    let status = error.status_code();

    if status.is_server_error() {
        tracing::error!(error_type = error.error_type(), error = %error, "oracle request failed");
    } else {
        tracing::debug!(error_type = error.error_type(), error = %error, "oracle request rejected");
    }

    let body = serde_json::json!({ "error": error.client_message() });

    (status, Json(body)).into_response()
}
