//! Route handlers: viewer page and snapshot WebSocket

use axum::{
    Router,
    extract::{
        State, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::{Html, Response},
    routing::get,
};
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use super::AppState;
use super::page::PAGE;
use crate::bus::SubscriberHandle;

/// Build the router with all snapshot endpoints
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handle_page))
        .route("/data", get(handle_websocket))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serves the viewer page and marks the session ready on first request
async fn handle_page(State(state): State<AppState>) -> Html<&'static str> {
    if state.ready.fire() {
        info!("Viewer connected, session ready");
    }
    Html(PAGE)
}

/// Handles WebSocket upgrade requests to `/data`
async fn handle_websocket(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    // Subscribe before the handshake so nothing published meanwhile is missed
    let subscriber = state.bus.subscribe();
    ws.on_upgrade(move |socket| stream_snapshots(socket, subscriber))
}

/// Pushes snapshots to one viewer until the bus closes or the viewer leaves
async fn stream_snapshots(mut socket: WebSocket, mut subscriber: SubscriberHandle) {
    debug!("stream_snapshots: viewer attached");

    loop {
        tokio::select! {
            next = subscriber.recv() => {
                let Some(snapshot) = next else {
                    debug!("stream_snapshots: bus closed, ending stream");
                    let _ = socket.send(Message::Close(None)).await;
                    break;
                };

                let text = match serde_json::to_string(&*snapshot) {
                    Ok(text) => text,
                    Err(e) => {
                        warn!(n = snapshot.n, error = %e, "Failed to serialize snapshot");
                        continue;
                    }
                };

                debug!(title = %snapshot.title(), "stream_snapshots: sending snapshot");
                if let Err(e) = socket.send(Message::Text(text.into())).await {
                    warn!("error sending data: {}", e);
                    break; // Client disconnected
                }
            }
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    _ => {} // Ignore pings and client text
                }
            }
        }
    }

    debug!("stream_snapshots: viewer detached");
}
