use tracing::warn;

use crate::models::{SyncContentMessage, SyncLanguageMessage};
use crate::ws::SessionHub;

/// Handle SyncContentMessage - catch-up content for a single newcomer
pub async fn handle_sync_content_message(sync_msg: &SyncContentMessage, connection_id: &str, hub: &SessionHub) {
    if let Err(e) = hub
        .send_sync(connection_id, sync_msg.target_connection_id.as_deref(), sync_msg.content.as_deref())
        .await
    {
        warn!("Rejected content sync from {}: {}", connection_id, e);
    }
}

/// Handle SyncLanguageMessage - catch-up language for a single newcomer
pub async fn handle_sync_language_message(sync_msg: &SyncLanguageMessage, connection_id: &str, hub: &SessionHub) {
    if let Err(e) = hub
        .send_language_sync(connection_id, sync_msg.target_connection_id.as_deref(), sync_msg.language.as_deref())
        .await
    {
        warn!("Rejected language sync from {}: {}", connection_id, e);
    }
}
