//! HTTP surface of the chat agent.
//!
//! # Endpoints
//! - `POST /api/v1/chat`: takes a [`Question`] and returns an [`Answer`].
//!
//! Failures are rendered by [`ApiError`] as a 500 with an [`ErrorResponse`].

pub mod error;

use crate::{
    core::Agent,
    types::{Answer, Question},
};
use axum::{extract::State, routing::post, Json, Router};
use std::sync::Arc;
use tokio::sync::oneshot;
use tracing::info;

pub use error::{ApiError, ErrorResponse};

pub const CHAT_PATH: &str = "/api/v1/chat";

#[derive(Clone)]
struct AppState {
    agent: Arc<Agent>,
}

/// Build the axum router serving the chat endpoint
pub fn router(agent: Arc<Agent>) -> Router {
    Router::new()
        .route(CHAT_PATH, post(chat))
        .with_state(AppState { agent })
}

async fn chat(
    State(state): State<AppState>,
    Json(question): Json<Question>,
) -> Result<Json<Answer>, ApiError> {
    info!("Received question: {}", question.question);
    let answer = state.agent.answer(&question).await?;
    Ok(Json(answer))
}

/// Handle returned by [`serve`]: the bound port and a shutdown trigger.
pub struct ServeHandle {
    pub port: u16,
    shutdown_tx: Option<oneshot::Sender<()>>,
    join: Option<tokio::task::JoinHandle<std::io::Result<()>>>,
}

impl ServeHandle {
    /// Trigger graceful shutdown and wait for the server to stop.
    pub async fn shutdown(mut self) -> anyhow::Result<()> {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(join) = self.join.take() {
            join.await??;
        }
        Ok(())
    }
}

/// Bind `bind` and serve the chat endpoint in a spawned task.
pub async fn serve(agent: Arc<Agent>, bind: &str) -> anyhow::Result<ServeHandle> {
    let app = router(agent);
    let listener = tokio::net::TcpListener::bind(bind).await?;
    let port = listener.local_addr()?.port();
    info!("chat server listening on {bind} (port {port})");

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let join = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
                info!("received shutdown signal");
            })
            .await
    });

    Ok(ServeHandle {
        port,
        shutdown_tx: Some(shutdown_tx),
        join: Some(join),
    })
}
