use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::models::{ConnectedEvent, Participant, SendMessage};
use super::membership::SubscriptionTable;
use super::registry::ConnectionRegistry;

/// Outbound queue of one connection, drained by its socket writer.
pub type Mailbox = mpsc::Sender<SendMessage>;

/// Events a connection may have queued before it counts as stalled.
pub const MAILBOX_CAPACITY: usize = 100;

/// Counters for the diagnostics endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HubStats {
    pub connections: usize,
    pub participants: usize,
    pub sessions: usize,
}

/// Mutable coordination state. Only ever touched under the hub lock, so a
/// join or leave is applied and fanned out before the next one starts.
#[derive(Debug, Default)]
pub(super) struct HubState {
    pub(super) registry: ConnectionRegistry,
    pub(super) subscriptions: SubscriptionTable,
    pub(super) mailboxes: HashMap<String, Mailbox>,
}

impl HubState {
    pub(super) fn is_open(&self, connection_id: &str) -> bool {
        self.mailboxes.contains_key(connection_id)
    }

    /// Members of a session resolved to participants through the registry.
    pub(super) fn participants_of(&self, session_key: &str) -> Vec<Participant> {
        self.subscriptions
            .members_of(session_key)
            .into_iter()
            .map(|connection_id| Participant {
                display_name: self.registry.get_name(&connection_id).to_string(),
                connection_id,
            })
            .collect()
    }

    /// Queue an event for one connection. A closed or unknown mailbox
    /// swallows the event.
    ///
    /// A full mailbox means the peer stopped reading. Its mailbox is dropped,
    /// which ends the socket writer and sends the connection through `leave`.
    pub(super) fn deliver(&mut self, connection_id: &str, event: SendMessage) -> bool {
        let Some(mailbox) = self.mailboxes.get(connection_id) else {
            return false;
        };
        match mailbox.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Closed(_)) => false,
            Err(TrySendError::Full(_)) => {
                warn!(
                    "Mailbox of {} is full ({} events), dropping the connection",
                    connection_id, MAILBOX_CAPACITY
                );
                self.mailboxes.remove(connection_id);
                false
            }
        }
    }

    /// Queue an event for every member of a channel, optionally skipping one.
    /// Returns how many mailboxes accepted it.
    pub(super) fn emit(&mut self, channel: &str, event: &SendMessage, except: Option<&str>) -> usize {
        let mut delivered = 0;
        for member in self.subscriptions.members_of(channel) {
            if Some(member.as_str()) == except {
                continue;
            }
            if self.deliver(&member, event.clone()) {
                delivered += 1;
            }
        }
        delivered
    }
}

/// Owner of the connection registry, the subscription table and the
/// per-connection mailboxes.
///
/// Cloning is cheap; all clones share the same state.
#[derive(Debug, Clone, Default)]
pub struct SessionHub {
    state: Arc<Mutex<HubState>>,
}

impl SessionHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub(super) async fn lock(&self) -> MutexGuard<'_, HubState> {
        self.state.lock().await
    }

    /// Register a newly opened connection.
    ///
    /// Assigns an id, subscribes the connection to its private channel and
    /// queues a `connected` event telling the client its id.
    pub async fn connect(&self) -> (String, mpsc::Receiver<SendMessage>) {
        let connection_id = Uuid::new_v4().to_string();
        let (tx, rx) = mpsc::channel(MAILBOX_CAPACITY);

        let mut state = self.lock().await;
        state.mailboxes.insert(connection_id.clone(), tx);
        state.subscriptions.subscribe(&connection_id, &connection_id);
        state.deliver(
            &connection_id,
            SendMessage::Connected(ConnectedEvent {
                connection_id: connection_id.clone(),
            }),
        );
        info!("Connection {} opened ({} live)", connection_id, state.mailboxes.len());

        (connection_id, rx)
    }

    /// Connection ids currently subscribed to a session.
    pub async fn members_of(&self, session_key: &str) -> Vec<String> {
        self.lock().await.subscriptions.members_of(session_key)
    }

    /// Members of a session with their display names.
    pub async fn participants_of(&self, session_key: &str) -> Vec<Participant> {
        self.lock().await.participants_of(session_key)
    }

    /// Session a connection has joined, if any.
    pub async fn session_of(&self, connection_id: &str) -> Option<String> {
        self.lock()
            .await
            .subscriptions
            .session_of(connection_id)
            .map(str::to_string)
    }

    /// Queue an event for a single connection.
    pub async fn unicast(&self, connection_id: &str, event: SendMessage) -> bool {
        let delivered = self.lock().await.deliver(connection_id, event);
        if !delivered {
            debug!("Dropped unicast to closed connection {}", connection_id);
        }
        delivered
    }

    pub async fn stats(&self) -> HubStats {
        let state = self.lock().await;
        HubStats {
            connections: state.mailboxes.len(),
            participants: state.registry.len(),
            sessions: state.subscriptions.session_count(),
        }
    }
}
