//! `/api/proxy` handler.
//!
//! ERROR HANDLING
//! ==============
//! Every failure is rendered as `{ "error": <message> }` with the status
//! chosen by [`ProxyError::status`]. Handler failures are logged here, at the
//! single catch-all, and never retried.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use proto::{ErrorBody, RawEnvelope};
use serde_json::Value;
use tracing::{Instrument, error, info_span, warn};
use uuid::Uuid;

use crate::services::proxy::{self, ProxyError};
use crate::state::AppState;

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (self.status(), Json(ErrorBody::new(self.message()))).into_response()
    }
}

/// `POST /api/proxy` — dispatch one operation to the hosted model.
pub async fn handle(State(state): State<AppState>, body: Result<Json<Value>, JsonRejection>) -> Response {
    let request_id = Uuid::new_v4();
    let span = info_span!("proxy", %request_id);
    match run(&state, body).instrument(span).await {
        Ok(value) => (StatusCode::OK, Json(value)).into_response(),
        Err(e) => {
            if e.status().is_server_error() {
                let retryable = matches!(&e, ProxyError::Llm(inner) if inner.retryable());
                error!(%request_id, error = %e, retryable, "proxy: handler failed");
            } else {
                warn!(%request_id, error = %e, tag = e.rejected_tag(), "proxy: rejected request");
            }
            e.into_response()
        }
    }
}

async fn run(state: &AppState, body: Result<Json<Value>, JsonRejection>) -> Result<Value, ProxyError> {
    let Json(body) = body.map_err(|_| ProxyError::InvalidRequest)?;
    let envelope: RawEnvelope = serde_json::from_value(body).map_err(|_| ProxyError::InvalidRequest)?;
    let request = envelope.into_request()?;
    proxy::dispatch(state.llm(), request).await
}

/// Any other method on `/api/proxy`.
pub async fn method_not_allowed() -> ProxyError {
    ProxyError::MethodNotAllowed
}

#[cfg(test)]
#[path = "proxy_test.rs"]
mod tests;
