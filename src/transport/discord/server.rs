//! Axum endpoint Discord posts interactions to.

use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;

use super::interaction::Interaction;
use super::signature::{InteractionVerifier, SIGNATURE_HEADER, TIMESTAMP_HEADER};
use super::types::InteractionCallbackType;

/// Maximum request body size (64KB)
pub const MAX_BODY_SIZE: usize = 65_536;
/// Discord drops interactions not answered within 3s; give up shortly after.
pub const REQUEST_TIMEOUT_SECS: u64 = 5;

/// What the endpoint hands verified interactions to.
///
/// Returns the callback body, or `None` to ignore the interaction.
pub trait InteractionHandler: Send + Sync {
    fn handle<'a>(
        &'a self,
        interaction: Interaction,
    ) -> Pin<Box<dyn Future<Output = Option<Value>> + Send + 'a>>;
}

/// Shared state for all axum handlers
#[derive(Clone)]
pub struct ServerState {
    pub verifier: Arc<InteractionVerifier>,
    pub handler: Arc<dyn InteractionHandler>,
}

pub fn build_app(state: ServerState) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route("/interactions", post(handle_interaction))
        .with_state(state)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(REQUEST_TIMEOUT_SECS),
        ))
}

/// Bind `host:port` and serve until `shutdown` resolves.
pub async fn run_server(
    host: &str,
    port: u16,
    state: ServerState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<()> {
    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .context("parse interactions endpoint bind address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("bind interactions endpoint socket")?;
    run_server_with_listener(listener, state, shutdown).await
}

/// Serve on a pre-bound listener until `shutdown` resolves.
pub async fn run_server_with_listener(
    listener: tokio::net::TcpListener,
    state: ServerState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<()> {
    let local = listener
        .local_addr()
        .context("get interactions endpoint local address")?;
    tracing::info!(%local, "interactions endpoint listening (POST /interactions, GET /health)");

    axum::serve(listener, build_app(state))
        .with_graceful_shutdown(shutdown)
        .await
        .context("serve interactions endpoint")?;
    Ok(())
}

/// GET /health
async fn handle_health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// POST /interactions
async fn handle_interaction(
    State(state): State<ServerState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
    };

    if let Err(e) = state
        .verifier
        .verify(header(SIGNATURE_HEADER), header(TIMESTAMP_HEADER), &body)
    {
        tracing::warn!("rejected interaction: {e}");
        return (StatusCode::UNAUTHORIZED, "invalid request signature").into_response();
    }

    let interaction = match Interaction::decode(&body) {
        Ok(interaction) => interaction,
        Err(e) => {
            tracing::warn!("{e}");
            let err = json!({ "error": e.to_string() });
            return (StatusCode::BAD_REQUEST, Json(err)).into_response();
        }
    };

    if interaction == Interaction::Ping {
        return Json(json!({ "type": InteractionCallbackType::Pong as u8 })).into_response();
    }

    match state.handler.handle(interaction).await {
        Some(response) => Json(response).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}
