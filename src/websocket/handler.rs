use axum::{
    extract::{ws::{Message, WebSocket, WebSocketUpgrade}, State},
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use tracing::{debug, error, info};

use crate::models::ReceivedMessage;
use crate::state::AppState;
use crate::ws::SessionHub;
use crate::websocket::msg_change_handler::{handle_content_change_message, handle_language_change_message};
use crate::websocket::msg_join_handler::handle_join_message;
use crate::websocket::msg_ping_handler::handle_ping_message;
use crate::websocket::msg_sync_handler::{handle_sync_content_message, handle_sync_language_message};


/// WebSocket handler
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(app_state): State<AppState>,
) -> Response {
    info!("New WebSocket connection attempt");
    ws.on_upgrade(move |socket| handle_socket(socket, app_state.hub))
}

/// Handle WebSocket connection
async fn handle_socket(socket: WebSocket, hub: SessionHub) {

    // Register the connection; the hub assigns its id and hands back the mailbox
    let (connection_id, mut mailbox) = hub.connect().await;
    info!("WebSocket connection established with connection_id: {}", connection_id);

    // Split the socket into sender and receiver
    let (mut sender, mut receiver) = socket.split();

    // Drain the mailbox into the socket. The loop ends when the hub drops the
    // mailbox or the peer stops accepting frames.
    let mut send_task = tokio::spawn(async move {
        while let Some(event) = mailbox.recv().await {
            let text = match serde_json::to_string(&event) {
                Ok(text) => text,
                Err(e) => {
                    error!("Failed to serialize outbound event: {}", e);
                    continue;
                }
            };
            if sender.send(Message::Text(text)).await.is_err() {
                break;
            }
        }
    });

    // Read frames from the client and dispatch them, one at a time
    let recv_hub = hub.clone();
    let recv_connection_id = connection_id.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            match msg {
                Message::Text(text) => dispatch_message(&text, &recv_connection_id, &recv_hub).await,
                Message::Close(_) => break,
                _ => {}
            }
        }
    });

    // Wait for either task to finish (and finish the other)
    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    };

    hub.leave(&connection_id).await;
    info!("WebSocket connection {} terminated", connection_id);
}

/// Parse one text frame and route it to its handler
async fn dispatch_message(text: &str, connection_id: &str, hub: &SessionHub) {
    let json_msg: ReceivedMessage = match serde_json::from_str(text) {
        Ok(json_msg) => json_msg,
        Err(e) => {
            error!("Failed to parse message from {}: {}", connection_id, e);
            return;
        }
    };
    debug!("Received {:?} from {}", json_msg, connection_id);

    match json_msg {
        ReceivedMessage::Join(join_msg) => handle_join_message(&join_msg, connection_id, hub).await,
        ReceivedMessage::ContentChange(change_msg) => handle_content_change_message(&change_msg, connection_id, hub).await,
        ReceivedMessage::SyncContent(sync_msg) => handle_sync_content_message(&sync_msg, connection_id, hub).await,
        ReceivedMessage::LanguageChange(change_msg) => handle_language_change_message(&change_msg, connection_id, hub).await,
        ReceivedMessage::SyncLanguage(sync_msg) => handle_sync_language_message(&sync_msg, connection_id, hub).await,
        ReceivedMessage::Ping => handle_ping_message(connection_id, hub).await,
    }
}
