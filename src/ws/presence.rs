//! Join and leave handling.
//!
//! Member lists in `joined` and `disconnected` events are read from the
//! subscription table at emit time, never from a separate list.

use tracing::info;

use crate::models::{DisconnectedEvent, JoinedEvent, Participant, SendMessage};
use super::error::RelayError;
use super::hub::SessionHub;

impl SessionHub {
    /// Put a connection into a session under a display name.
    ///
    /// Every member, the joiner included, receives a `joined` event. Members
    /// other than the joiner treat that event as their cue to send the joiner
    /// their document and language with `sync-content` / `sync-language`.
    pub async fn join(
        &self,
        connection_id: &str,
        session_key: Option<&str>,
        display_name: Option<&str>,
    ) -> Result<Vec<Participant>, RelayError> {
        let session_key = session_key.ok_or(RelayError::MissingField("sessionKey"))?;
        let display_name = display_name.ok_or(RelayError::MissingField("displayName"))?;

        let mut state = self.lock().await;
        if !state.is_open(connection_id) {
            return Err(RelayError::UnknownConnection(connection_id.to_string()));
        }
        // A key naming a live connection would alias its private channel.
        if session_key.trim().is_empty() || state.is_open(session_key) {
            return Err(RelayError::InvalidSessionKey(session_key.to_string()));
        }
        if let Some(current) = state.subscriptions.session_of(connection_id) {
            return Err(RelayError::AlreadyJoined {
                connection_id: connection_id.to_string(),
                session_key: current.to_string(),
            });
        }

        state.registry.set_name(connection_id, display_name);
        state.subscriptions.subscribe(connection_id, session_key);

        let members = state.participants_of(session_key);
        let event = SendMessage::Joined(JoinedEvent {
            members: members.clone(),
            display_name: display_name.to_string(),
            connection_id: connection_id.to_string(),
        });
        state.emit(session_key, &event, None);

        info!(
            "{} ({}) joined session {} ({} members)",
            display_name,
            connection_id,
            session_key,
            members.len()
        );
        Ok(members)
    }

    /// Clean up after a closed connection.
    ///
    /// The name is read before the registry entry goes away so it can be
    /// reported in the `disconnected` payload, while the member lists sent to
    /// the remaining participants no longer include the departed connection.
    /// Returns the sessions that were notified.
    pub async fn leave(&self, connection_id: &str) -> Vec<String> {
        let mut state = self.lock().await;

        let display_name = state.registry.get_name(connection_id).to_string();
        state.registry.remove(connection_id);
        state.mailboxes.remove(connection_id);
        let channels = state.subscriptions.unsubscribe_all(connection_id);

        let mut notified = Vec::new();
        for session_key in channels {
            // Private channel: nobody else is listening on it.
            if session_key == connection_id {
                continue;
            }

            let members = state.participants_of(&session_key);
            let event = SendMessage::Disconnected(DisconnectedEvent {
                connection_id: connection_id.to_string(),
                display_name: display_name.clone(),
                members,
            });
            let delivered = state.emit(&session_key, &event, None);
            info!(
                "{} ({}) left session {} ({} notified)",
                display_name, connection_id, session_key, delivered
            );
            notified.push(session_key);
        }

        info!("Connection {} closed ({} live)", connection_id, state.mailboxes.len());
        notified
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ConnectedEvent;
    use crate::ws::hub::test_support::drain;
    use crate::ws::hub::HubStats;
    use crate::ws::registry::UNKNOWN_DISPLAY_NAME;

    fn participant(connection_id: &str, display_name: &str) -> Participant {
        Participant {
            connection_id: connection_id.to_string(),
            display_name: display_name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_two_joins_list_both_members() {
        let hub = SessionHub::new();
        let (c1, mut rx1) = hub.connect().await;
        let (c2, mut rx2) = hub.connect().await;

        hub.join(&c1, Some("S"), Some("n1")).await.unwrap();
        hub.join(&c2, Some("S"), Some("n2")).await.unwrap();

        assert_eq!(hub.members_of("S").await, vec![c1.clone(), c2.clone()]);

        let both = vec![participant(&c1, "n1"), participant(&c2, "n2")];
        let expected = SendMessage::Joined(JoinedEvent {
            members: both,
            display_name: "n2".to_string(),
            connection_id: c2.clone(),
        });

        let events1 = drain(&mut rx1);
        assert_eq!(events1.len(), 3); // connected, own join, c2's join
        assert_eq!(events1[2], expected);

        let events2 = drain(&mut rx2);
        assert_eq!(
            events2,
            vec![
                SendMessage::Connected(ConnectedEvent { connection_id: c2.clone() }),
                expected
            ]
        );
    }

    #[tokio::test]
    async fn test_joiner_sees_itself_in_first_member_list() {
        let hub = SessionHub::new();
        let (c1, mut rx1) = hub.connect().await;
        drain(&mut rx1);

        let members = hub.join(&c1, Some("room42"), Some("Alice")).await.unwrap();
        assert_eq!(members, vec![participant(&c1, "Alice")]);

        match drain(&mut rx1).as_slice() {
            [SendMessage::Joined(joined)] => {
                assert_eq!(joined.connection_id, c1);
                assert_eq!(joined.members, members);
            }
            other => panic!("unexpected events: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_join_changes_nothing() {
        let hub = SessionHub::new();
        let (c1, mut rx1) = hub.connect().await;
        let (c2, _rx2) = hub.connect().await;
        drain(&mut rx1);

        assert_eq!(
            hub.join(&c1, None, Some("Alice")).await,
            Err(RelayError::MissingField("sessionKey"))
        );
        assert_eq!(
            hub.join(&c1, Some("room42"), None).await,
            Err(RelayError::MissingField("displayName"))
        );
        assert!(matches!(
            hub.join(&c1, Some("  "), Some("Alice")).await,
            Err(RelayError::InvalidSessionKey(_))
        ));
        assert!(matches!(
            hub.join(&c1, Some(c2.as_str()), Some("Alice")).await,
            Err(RelayError::InvalidSessionKey(_))
        ));
        assert!(matches!(
            hub.join("ghost", Some("room42"), Some("Alice")).await,
            Err(RelayError::UnknownConnection(_))
        ));

        assert!(hub.members_of("room42").await.is_empty());
        assert_eq!(hub.stats().await.participants, 0);
        assert!(drain(&mut rx1).is_empty());
    }

    #[tokio::test]
    async fn test_second_join_is_rejected() {
        let hub = SessionHub::new();
        let (c1, _rx1) = hub.connect().await;
        hub.join(&c1, Some("room42"), Some("Alice")).await.unwrap();

        let err = hub.join(&c1, Some("room7"), Some("Alice")).await.unwrap_err();
        assert_eq!(
            err,
            RelayError::AlreadyJoined {
                connection_id: c1.clone(),
                session_key: "room42".to_string()
            }
        );
        assert!(hub.members_of("room7").await.is_empty());
    }

    #[tokio::test]
    async fn test_empty_and_duplicate_names_are_accepted() {
        let hub = SessionHub::new();
        let (c1, _rx1) = hub.connect().await;
        let (c2, _rx2) = hub.connect().await;
        let (c3, _rx3) = hub.connect().await;

        hub.join(&c1, Some("room42"), Some("")).await.unwrap();
        hub.join(&c2, Some("room42"), Some("Bob")).await.unwrap();
        let members = hub.join(&c3, Some("room42"), Some("Bob")).await.unwrap();

        assert_eq!(
            members,
            vec![participant(&c1, ""), participant(&c2, "Bob"), participant(&c3, "Bob")]
        );
    }

    #[tokio::test]
    async fn test_leave_notifies_remaining_members() {
        let hub = SessionHub::new();
        let (c1, _rx1) = hub.connect().await;
        let (c2, mut rx2) = hub.connect().await;
        hub.join(&c1, Some("S"), Some("Alice")).await.unwrap();
        hub.join(&c2, Some("S"), Some("Bob")).await.unwrap();
        drain(&mut rx2);

        let notified = hub.leave(&c1).await;
        assert_eq!(notified, vec!["S".to_string()]);
        assert_eq!(hub.members_of("S").await, vec![c2.clone()]);

        assert_eq!(
            drain(&mut rx2),
            vec![SendMessage::Disconnected(DisconnectedEvent {
                connection_id: c1.clone(),
                display_name: "Alice".to_string(),
                members: vec![participant(&c2, "Bob")],
            })]
        );
    }

    #[tokio::test]
    async fn test_leave_without_join_broadcasts_nothing() {
        let hub = SessionHub::new();
        let (c1, _rx1) = hub.connect().await;
        let (c2, mut rx2) = hub.connect().await;
        hub.join(&c2, Some("S"), Some("Bob")).await.unwrap();
        drain(&mut rx2);

        // Only the private channel is left behind; it is skipped.
        assert!(hub.leave(&c1).await.is_empty());
        assert!(drain(&mut rx2).is_empty());
        assert!(hub.members_of(&c1).await.is_empty());
    }

    #[tokio::test]
    async fn test_last_member_leaving_ends_session() {
        let hub = SessionHub::new();
        let (c1, _rx1) = hub.connect().await;
        hub.join(&c1, Some("S"), Some("Alice")).await.unwrap();
        assert_eq!(hub.stats().await.sessions, 1);

        assert_eq!(hub.leave(&c1).await, vec!["S".to_string()]);
        assert!(hub.members_of("S").await.is_empty());
        assert_eq!(hub.stats().await, HubStats::default());
    }

    #[tokio::test]
    async fn test_leave_reports_unknown_name_for_anonymous() {
        let hub = SessionHub::new();
        let (c1, _rx1) = hub.connect().await;
        let (c2, mut rx2) = hub.connect().await;
        hub.join(&c1, Some("S"), Some("Alice")).await.unwrap();
        hub.join(&c2, Some("S"), Some("Bob")).await.unwrap();

        // Registry entry already gone, subscription still live.
        hub.lock().await.registry.remove(&c1);
        drain(&mut rx2);

        hub.leave(&c1).await;
        match drain(&mut rx2).as_slice() {
            [SendMessage::Disconnected(event)] => {
                assert_eq!(event.display_name, UNKNOWN_DISPLAY_NAME);
            }
            other => panic!("unexpected events: {other:?}"),
        }
    }
}
