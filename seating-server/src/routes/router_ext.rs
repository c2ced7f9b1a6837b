//! In-process calls into the seating app
//!
//! Drives the router as a plain `tower::Service`, so tests and tools can hit
//! the same handlers the listener serves without opening a socket.

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use http::{Method, Request, Response, StatusCode, header};
use serde_json::Value;
use shared::models::GenerateResponse;
use tower::Service;

use crate::core::ServerState;

/// Largest reply body decoded by the JSON helpers
const MAX_REPLY_BYTES: usize = 4 * 1024 * 1024;

pub type OneshotResult<T = Response<Body>> = anyhow::Result<T>;

#[async_trait]
pub trait OneshotRouter {
    /// Serve one request against `state`
    async fn oneshot(&self, state: &ServerState, request: Request<Body>) -> OneshotResult;

    /// Send an optional JSON body and decode the JSON reply
    ///
    /// An empty reply decodes as `Value::Null`.
    async fn call_json(
        &self,
        state: &ServerState,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> OneshotResult<(StatusCode, Value)>;

    /// `POST /api/seating/generate`, decoded into the generate contract
    ///
    /// ```ignore
    /// let (status, reply) = build_app().generate_seating(&state).await?;
    /// assert!(reply.success);
    /// ```
    async fn generate_seating(&self, state: &ServerState) -> OneshotResult<(StatusCode, GenerateResponse)>;
}

#[async_trait]
impl OneshotRouter for Router<ServerState> {
    async fn oneshot(&self, state: &ServerState, request: Request<Body>) -> OneshotResult {
        let mut svc = self.clone().with_state(state.clone());
        Ok(svc.call(request).await?)
    }

    async fn call_json(
        &self,
        state: &ServerState,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> OneshotResult<(StatusCode, Value)> {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))?,
            None => builder.body(Body::empty())?,
        };

        let response = self.oneshot(state, request).await?;
        let status = response.status();
        let bytes = to_bytes(response.into_body(), MAX_REPLY_BYTES).await?;
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)?
        };
        Ok((status, value))
    }

    async fn generate_seating(&self, state: &ServerState) -> OneshotResult<(StatusCode, GenerateResponse)> {
        let (status, value) = self
            .call_json(state, Method::POST, "/api/seating/generate", None)
            .await?;
        Ok((status, serde_json::from_value(value)?))
    }
}
