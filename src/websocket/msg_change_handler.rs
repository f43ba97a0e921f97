use tracing::warn;

use crate::models::{ContentChangeMessage, LanguageChangeMessage};
use crate::ws::SessionHub;

/// Handle ContentChangeMessage - relay to the rest of the session
pub async fn handle_content_change_message(change_msg: &ContentChangeMessage, connection_id: &str, hub: &SessionHub) {
    if let Err(e) = hub
        .broadcast_content_change(connection_id, change_msg.session_key.as_deref(), change_msg.content.as_deref())
        .await
    {
        warn!("Rejected content change from {}: {}", connection_id, e);
    }
}

/// Handle LanguageChangeMessage - relay to the rest of the session
pub async fn handle_language_change_message(change_msg: &LanguageChangeMessage, connection_id: &str, hub: &SessionHub) {
    if let Err(e) = hub
        .broadcast_language_change(connection_id, change_msg.session_key.as_deref(), change_msg.language.as_deref())
        .await
    {
        warn!("Rejected language change from {}: {}", connection_id, e);
    }
}
