//! Content and language relay.
//!
//! Receivers replace their local buffer with whatever arrives last. Two
//! senders editing at once can overwrite each other; nothing here detects it.

use tracing::debug;

use crate::models::{ContentChangedEvent, LanguageChangedEvent, SendMessage};
use super::error::RelayError;
use super::hub::SessionHub;

impl SessionHub {
    /// Send new document content to every other member of the session.
    /// Returns how many members it was queued for.
    pub async fn broadcast_content_change(
        &self,
        sender_id: &str,
        session_key: Option<&str>,
        content: Option<&str>,
    ) -> Result<usize, RelayError> {
        let session_key = session_key.ok_or(RelayError::MissingField("sessionKey"))?;
        let content = content.ok_or(RelayError::MissingField("content"))?;

        let event = SendMessage::ContentChanged(ContentChangedEvent {
            content: content.to_string(),
        });
        let delivered = self.relay(sender_id, session_key, &event).await?;
        debug!(
            "Relayed {} bytes of content from {} to {} members of {}",
            content.len(),
            sender_id,
            delivered,
            session_key
        );
        Ok(delivered)
    }

    /// Send a new language mode to every other member of the session.
    pub async fn broadcast_language_change(
        &self,
        sender_id: &str,
        session_key: Option<&str>,
        language: Option<&str>,
    ) -> Result<usize, RelayError> {
        let session_key = session_key.ok_or(RelayError::MissingField("sessionKey"))?;
        let language = language.ok_or(RelayError::MissingField("language"))?;

        let event = SendMessage::LanguageChanged(LanguageChangedEvent {
            language: language.to_string(),
        });
        let delivered = self.relay(sender_id, session_key, &event).await?;
        debug!(
            "Relayed language {} from {} to {} members of {}",
            language, sender_id, delivered, session_key
        );
        Ok(delivered)
    }

    /// Catch-up: hand one connection the sender's current content.
    ///
    /// Returns whether the target still had an open mailbox. A closed target
    /// is not an error.
    pub async fn send_sync(
        &self,
        sender_id: &str,
        target_connection_id: Option<&str>,
        content: Option<&str>,
    ) -> Result<bool, RelayError> {
        let target = target_connection_id.ok_or(RelayError::MissingField("targetConnectionId"))?;
        let content = content.ok_or(RelayError::MissingField("content"))?;

        let delivered = self
            .unicast(
                target,
                SendMessage::ContentChanged(ContentChangedEvent {
                    content: content.to_string(),
                }),
            )
            .await;
        debug!("Catch-up content from {} to {} (delivered: {})", sender_id, target, delivered);
        Ok(delivered)
    }

    /// Catch-up: hand one connection the sender's current language mode.
    pub async fn send_language_sync(
        &self,
        sender_id: &str,
        target_connection_id: Option<&str>,
        language: Option<&str>,
    ) -> Result<bool, RelayError> {
        let target = target_connection_id.ok_or(RelayError::MissingField("targetConnectionId"))?;
        let language = language.ok_or(RelayError::MissingField("language"))?;

        let delivered = self
            .unicast(
                target,
                SendMessage::LanguageChanged(LanguageChangedEvent {
                    language: language.to_string(),
                }),
            )
            .await;
        debug!("Catch-up language {} from {} to {} (delivered: {})", language, sender_id, target, delivered);
        Ok(delivered)
    }

    async fn relay(
        &self,
        sender_id: &str,
        session_key: &str,
        event: &SendMessage,
    ) -> Result<usize, RelayError> {
        let mut state = self.lock().await;
        if !state.subscriptions.is_subscribed(sender_id, session_key) || sender_id == session_key {
            return Err(RelayError::NotMember {
                connection_id: sender_id.to_string(),
                session_key: session_key.to_string(),
            });
        }
        Ok(state.emit(session_key, event, Some(sender_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ws::hub::test_support::drain;

    async fn two_member_session(hub: &SessionHub) -> (
        String,
        tokio::sync::mpsc::Receiver<SendMessage>,
        String,
        tokio::sync::mpsc::Receiver<SendMessage>,
    ) {
        let (c1, mut rx1) = hub.connect().await;
        let (c2, mut rx2) = hub.connect().await;
        hub.join(&c1, Some("S"), Some("Alice")).await.unwrap();
        hub.join(&c2, Some("S"), Some("Bob")).await.unwrap();
        drain(&mut rx1);
        drain(&mut rx2);
        (c1, rx1, c2, rx2)
    }

    fn content(text: &str) -> SendMessage {
        SendMessage::ContentChanged(ContentChangedEvent { content: text.to_string() })
    }

    #[tokio::test]
    async fn test_content_change_excludes_sender() {
        let hub = SessionHub::new();
        let (c1, mut rx1, _c2, mut rx2) = two_member_session(&hub).await;

        let delivered = hub
            .broadcast_content_change(&c1, Some("S"), Some("x = 1"))
            .await
            .unwrap();
        assert_eq!(delivered, 1);
        assert_eq!(drain(&mut rx2), vec![content("x = 1")]);
        assert!(drain(&mut rx1).is_empty());
    }

    #[tokio::test]
    async fn test_language_change_excludes_sender() {
        let hub = SessionHub::new();
        let (_c1, mut rx1, c2, mut rx2) = two_member_session(&hub).await;

        hub.broadcast_language_change(&c2, Some("S"), Some("rust")).await.unwrap();
        assert_eq!(
            drain(&mut rx1),
            vec![SendMessage::LanguageChanged(LanguageChangedEvent {
                language: "rust".to_string()
            })]
        );
        assert!(drain(&mut rx2).is_empty());
    }

    #[tokio::test]
    async fn test_changes_stay_inside_session() {
        let hub = SessionHub::new();
        let (c1, _rx1, _c2, _rx2) = two_member_session(&hub).await;
        let (c3, mut rx3) = hub.connect().await;
        hub.join(&c3, Some("other"), Some("Carol")).await.unwrap();
        drain(&mut rx3);

        hub.broadcast_content_change(&c1, Some("S"), Some("secret")).await.unwrap();
        assert!(drain(&mut rx3).is_empty());
    }

    #[tokio::test]
    async fn test_sender_order_is_preserved() {
        let hub = SessionHub::new();
        let (c1, _rx1, _c2, mut rx2) = two_member_session(&hub).await;

        for text in ["a", "ab", "abc"] {
            hub.broadcast_content_change(&c1, Some("S"), Some(text)).await.unwrap();
        }
        assert_eq!(drain(&mut rx2), vec![content("a"), content("ab"), content("abc")]);
    }

    #[tokio::test]
    async fn test_missing_fields_are_rejected() {
        let hub = SessionHub::new();
        let (c1, _rx1, _c2, mut rx2) = two_member_session(&hub).await;

        assert_eq!(
            hub.broadcast_content_change(&c1, Some("S"), None).await,
            Err(RelayError::MissingField("content"))
        );
        assert_eq!(
            hub.broadcast_language_change(&c1, None, Some("go")).await,
            Err(RelayError::MissingField("sessionKey"))
        );
        assert_eq!(
            hub.send_sync(&c1, None, Some("x")).await,
            Err(RelayError::MissingField("targetConnectionId"))
        );
        assert!(drain(&mut rx2).is_empty());
    }

    #[tokio::test]
    async fn test_non_member_cannot_broadcast() {
        let hub = SessionHub::new();
        let (_c1, _rx1, _c2, mut rx2) = two_member_session(&hub).await;
        let (outsider, _rx) = hub.connect().await;

        let err = hub
            .broadcast_content_change(&outsider, Some("S"), Some("spam"))
            .await
            .unwrap_err();
        assert!(matches!(err, RelayError::NotMember { .. }));

        // The private channel is not a session either.
        assert!(hub
            .broadcast_content_change(&outsider, Some(outsider.as_str()), Some("x"))
            .await
            .is_err());
        assert!(drain(&mut rx2).is_empty());
    }

    #[tokio::test]
    async fn test_catch_up_comes_from_existing_member() {
        let hub = SessionHub::new();
        let (c1, mut rx1) = hub.connect().await;
        hub.join(&c1, Some("S"), Some("Alice")).await.unwrap();
        drain(&mut rx1);

        let (c3, mut rx3) = hub.connect().await;
        hub.join(&c3, Some("S"), Some("Carol")).await.unwrap();
        drain(&mut rx3);

        // c1 is prompted by the joined event naming c3.
        match drain(&mut rx1).as_slice() {
            [SendMessage::Joined(joined)] => assert_eq!(joined.connection_id, c3),
            other => panic!("unexpected events: {other:?}"),
        }

        // The server holds no document; nothing arrives until c1 answers.
        assert!(drain(&mut rx3).is_empty());

        assert!(hub.send_sync(&c1, Some(c3.as_str()), Some("doc")).await.unwrap());
        assert!(hub
            .send_language_sync(&c1, Some(c3.as_str()), Some("python"))
            .await
            .unwrap());
        assert_eq!(
            drain(&mut rx3),
            vec![
                content("doc"),
                SendMessage::LanguageChanged(LanguageChangedEvent {
                    language: "python".to_string()
                })
            ]
        );
        assert!(drain(&mut rx1).is_empty());
    }

    #[tokio::test]
    async fn test_sync_to_departed_target_is_silent() {
        let hub = SessionHub::new();
        let (c1, _rx1, c2, _rx2) = two_member_session(&hub).await;
        hub.leave(&c2).await;

        assert_eq!(hub.send_sync(&c1, Some(c2.as_str()), Some("doc")).await, Ok(false));
    }
}
