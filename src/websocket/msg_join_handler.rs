use tracing::{info, warn};

use crate::models::JoinMessage;
use crate::ws::SessionHub;

/// Handle JoinMessage
pub async fn handle_join_message(join_msg: &JoinMessage, connection_id: &str, hub: &SessionHub) {
    info!("Join message received from {}: session={:?}, name={:?}", connection_id, join_msg.session_key, join_msg.display_name);

    if let Err(e) = hub
        .join(connection_id, join_msg.session_key.as_deref(), join_msg.display_name.as_deref())
        .await
    {
        warn!("Rejected join from {}: {}", connection_id, e);
    }
}
