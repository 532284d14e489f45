//! `AccountChanged` delivery over WebSocket

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, warn};

use super::types::SignalFrame;
use super::RpcState;
use crate::account::AccountChanged;

pub const SIGNAL_ACCOUNT_CHANGED: &str = "AccountChanged";

pub async fn handle_signals(ws: WebSocketUpgrade, State(state): State<RpcState>) -> Response {
    let rx = state.changes.subscribe();
    ws.on_upgrade(move |socket| forward_changes(socket, rx))
}

pub fn encode_frame(change: AccountChanged) -> Result<String, serde_json::Error> {
    serde_json::to_string(&SignalFrame {
        signal: SIGNAL_ACCOUNT_CHANGED.to_string(),
        change,
    })
}

/// Next notification for a subscriber. A lagging subscriber skips what it
/// missed and carries on; `None` once the service is gone.
pub async fn next_change(rx: &mut broadcast::Receiver<AccountChanged>) -> Option<AccountChanged> {
    loop {
        match rx.recv().await {
            Ok(change) => return Some(change),
            Err(RecvError::Lagged(skipped)) => {
                warn!("signal subscriber lagged, {} notifications dropped", skipped);
            }
            Err(RecvError::Closed) => return None,
        }
    }
}

async fn forward_changes(mut socket: WebSocket, mut rx: broadcast::Receiver<AccountChanged>) {
    debug!("signal subscriber connected");
    loop {
        tokio::select! {
            change = next_change(&mut rx) => {
                let Some(change) = change else { break };
                let text = match encode_frame(change) {
                    Ok(text) => text,
                    Err(e) => {
                        warn!("Failed to encode AccountChanged: {}", e);
                        continue;
                    }
                };
                if socket.send(Message::Text(text)).await.is_err() {
                    break;
                }
            }
            incoming = socket.recv() => match incoming {
                None | Some(Err(_)) | Some(Ok(Message::Close(_))) => break,
                // subscribers have nothing to say
                Some(Ok(_)) => {}
            },
        }
    }
    debug!("signal subscriber disconnected");
}
