//! Axum router for the MCP HTTP/JSON-RPC transport.
//! Routes: `POST /mcp` (requests), `GET /sse` (event stream), `GET /` (banner),
//! `GET /health` (liveness), `GET /health/ready` (readiness).

use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Response,
    },
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tokio_stream::{wrappers::IntervalStream, StreamExt};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{debug, error};

use twin_mcp::{Inbound, McpHandler};

use crate::auth::{self, ApiKeys};

const EVENT_STREAM: &str = "text/event-stream";
const PING_INTERVAL: Duration = Duration::from_secs(15);

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState {
    /// The MCP request dispatcher.
    pub handler: Arc<McpHandler>,
    /// Accepted API keys.
    pub api_keys: Arc<ApiKeys>,
    /// Upper bound on a single dispatch.
    pub request_timeout: Duration,
    /// Whether to attach a permissive CORS layer.
    pub cors: bool,
}

/// Builds the axum `Router` with all MCP routes.
pub fn build_router(state: AppState) -> Router {
    let cors = state.cors;
    let router = Router::new()
        .route("/", get(handle_root))
        .route("/health", get(handle_health))
        .route("/health/ready", get(handle_ready))
        .route("/mcp", post(handle_mcp))
        .route("/sse", get(handle_sse))
        .with_state(state)
        .layer(TraceLayer::new_for_http());
    if cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

async fn handle_root() -> impl IntoResponse {
    Json(json!({
        "message": "Simple MCP Server is running",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn handle_health(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "api_keys_configured": !state.api_keys.is_empty(),
    }))
}

async fn handle_ready(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "ready",
        "tools": state.handler.registry().len(),
    }))
}

async fn handle_mcp(State(state): State<AppState>, headers: HeaderMap, body: String) -> Response {
    if let Err(rejection) = auth::authorize(&headers, &state.api_keys) {
        debug!(?rejection, "rejected MCP request");
        return rejection.into_response();
    }

    let output = match Inbound::parse(&body) {
        Inbound::Request(request) => {
            state
                .handler
                .dispatch_within(&request, state.request_timeout)
                .await
        }
        Inbound::Notification(notification) => {
            state.handler.handle_notification(&notification);
            return StatusCode::NO_CONTENT.into_response();
        }
        Inbound::Rejected(output) => output,
    };

    let json_str = match output.to_json() {
        Ok(s) => s,
        Err(e) => {
            error!(error = %e, "failed to serialize response");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    if wants_event_stream(&headers) {
        sse_reply(json_str)
    } else {
        (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            json_str,
        )
            .into_response()
    }
}

/// Announces the message endpoint, then pings until the client goes away.
async fn handle_sse(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Err(rejection) = auth::authorize(&headers, &state.api_keys) {
        return rejection.into_response();
    }

    let endpoint = tokio_stream::iter([Ok::<_, Infallible>(
        Event::default().event("endpoint").data("/mcp"),
    )]);
    let pings = IntervalStream::new(tokio::time::interval(PING_INTERVAL))
        .skip(1)
        .map(|_| Ok::<_, Infallible>(Event::default().event("ping").data("{}")));

    Sse::new(endpoint.chain(pings))
        .keep_alive(KeepAlive::new().interval(Duration::from_secs(30)).text("keep-alive"))
        .into_response()
}

fn sse_reply(json_str: String) -> Response {
    let event = tokio_stream::once(Ok::<_, Infallible>(
        Event::default().event("message").data(json_str),
    ));
    Sse::new(event).into_response()
}

/// True when every media type the client accepts is `text/event-stream`.
fn wants_event_stream(headers: &HeaderMap) -> bool {
    let Some(accept) = headers.get(header::ACCEPT).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let mut types = accept
        .split(',')
        .map(|t| t.split(';').next().unwrap_or_default().trim())
        .filter(|t| !t.is_empty())
        .peekable();
    types.peek().is_some() && types.all(|t| t.eq_ignore_ascii_case(EVENT_STREAM))
}
