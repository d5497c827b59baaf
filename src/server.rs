//! HTTP layer of the rehash service: one POST endpoint at the server root.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::{Request, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use tracing::{error, info, warn};

use crate::SecretKey;
use crate::rehash;

pub mod wire;

use wire::WireFormat;

/// Shared state for the HTTP server: the decoded key held for the process
/// lifetime plus the injected wire codec. Nothing here mutates after startup.
#[derive(Clone)]
pub struct ServerState {
    pub(crate) key: SecretKey,
    pub(crate) wire: Arc<dyn WireFormat>,
}

impl ServerState {
    pub fn new(key: SecretKey, wire: Arc<dyn WireFormat>) -> Self {
        Self { key, wire }
    }
}

/// Construct the router with the rehash endpoint installed. Every path
/// reaches the same handler; POST is the only routed method, and anything
/// else gets 405 with `Allow: POST`. The service never emits a 404.
pub fn build_router(state: ServerState) -> Router {
    let shared = Arc::new(state);
    Router::new()
        .route("/", post(post_rehash))
        .route("/*path", post(post_rehash))
        .with_state(shared)
}

async fn post_rehash(State(state): State<Arc<ServerState>>, request: Request) -> Response {
    // The whole body is read with no size cap. Known gap: a caller can make
    // the process buffer an arbitrarily large request.
    let body = match axum::body::to_bytes(request.into_body(), usize::MAX).await {
        Ok(body) => body,
        Err(err) => {
            error!(error = %err, "request body read failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("read error: {err}\n"),
            )
                .into_response();
        }
    };

    let input = match state.wire.decode_request(&body) {
        Ok(input) => input,
        Err(err) => {
            warn!(codec = state.wire.name(), error = %err, "request rejected");
            return (StatusCode::BAD_REQUEST, format!("{err}\n")).into_response();
        }
    };

    let out = rehash(&state.key, &input);
    let (content_type, body) = state.wire.encode_response(&out);
    ([(header::CONTENT_TYPE, content_type)], body).into_response()
}

/// Convenience function to run the server on the provided socket address.
pub async fn run_server(state: ServerState, addr: SocketAddr) -> Result<(), std::io::Error> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let local = listener.local_addr()?;
    info!(addr = %local, codec = state.wire.name(), "rehash service listening");
    axum::serve(listener, build_router(state)).await
}
