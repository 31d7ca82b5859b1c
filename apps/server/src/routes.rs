//! HTTP endpoints for bank and Telegram webhooks.
//!
//! Every webhook endpoint answers 200 regardless of what happened inside;
//! callers are never told about internal failures.

use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Router,
};
use expense_alerts::parse_update;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info};

/// Create the HTTP router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/webhook", post(webhook_handler).get(webhook_check_handler))
        .route("/telegram", post(telegram_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check handler.
async fn health_handler() -> &'static str {
    "OK"
}

/// The bank probes the webhook URL with a GET before accepting it.
async fn webhook_check_handler() -> StatusCode {
    StatusCode::OK
}

/// Statement event from the bank. The body is not inspected.
async fn webhook_handler(State(state): State<AppState>, body: Bytes) -> StatusCode {
    debug!("Received webhook: {}", String::from_utf8_lossy(&body));

    // Run on its own task so a dropped connection does not cancel the cycle.
    let gate = state.gate.clone();
    let cycle = tokio::spawn(async move { gate.trigger().await });

    match cycle.await {
        Ok(outcome) => debug!(?outcome, "Webhook handled"),
        Err(e) => error!("Expense cycle task failed: {}", e),
    }

    StatusCode::OK
}

/// Telegram update for the bot.
async fn telegram_handler(State(state): State<AppState>, body: Bytes) -> StatusCode {
    let Some(update) = parse_update(&body) else {
        debug!("Ignoring unrecognised Telegram payload");
        return StatusCode::OK;
    };

    // Registration and the callback answer must not be cut off by a disconnect.
    let unfreeze = state.unfreeze.clone();
    let flow = tokio::spawn(async move {
        let outcome = unfreeze.handle(&update).await;
        debug!(?outcome, update_id = ?update.id, "Telegram update handled");
    });

    if let Err(e) = flow.await {
        error!("Telegram update task failed: {}", e);
    }

    StatusCode::OK
}

/// Bind and serve until the process exits.
pub async fn serve(state: AppState, port: u16) -> std::io::Result<()> {
    let app = create_router(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server running on port {}", port);

    axum::serve(listener, app).await
}
