use tracing::debug;
use chrono::Utc;

use crate::models::{PongEvent, SendMessage};
use crate::ws::SessionHub;

/// Handle a ping - send a pong back to the same connection
pub async fn handle_ping_message(connection_id: &str, hub: &SessionHub) {
    debug!("Ping message received from {}", connection_id);

    let pong = SendMessage::Pong(PongEvent { date: Utc::now().to_rfc3339() });
    hub.unicast(connection_id, pong).await;
}
