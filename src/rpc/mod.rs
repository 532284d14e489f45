pub mod handlers;
pub mod signals;
pub mod types;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::{Arc, Mutex};
use tokio::sync::broadcast;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::account::AccountChanged;
use crate::manager::Manager;

#[derive(Clone)]
pub struct RpcState {
    /// One lock per call: calls never overlap.
    pub manager: Arc<Mutex<Manager>>,
    pub changes: broadcast::Sender<AccountChanged>,
}

impl RpcState {
    pub fn new(manager: Manager) -> Self {
        let changes = manager.change_sender();
        Self {
            manager: Arc::new(Mutex::new(manager)),
            changes,
        }
    }
}

pub fn router(state: RpcState) -> Router {
    Router::new()
        .route("/", post(handlers::handle_manager_request))
        .route("/mock", post(handlers::handle_mock_request))
        .route("/signals", get(signals::handle_signals))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub struct RpcServer {
    state: RpcState,
    bind_addr: String,
}

impl RpcServer {
    pub fn new(manager: Manager, bind_addr: String) -> Self {
        Self {
            state: RpcState::new(manager),
            bind_addr,
        }
    }

    pub async fn start(self) -> std::io::Result<()> {
        let app = router(self.state);
        let listener = tokio::net::TcpListener::bind(&self.bind_addr).await?;

        info!("RPC server listening on {}", self.bind_addr);
        axum::serve(listener, app).await
    }
}
