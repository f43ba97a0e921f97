use std::collections::HashMap;

/// Channel subscriptions of live connections.
///
/// This is the transport's own grouping table. Every open connection is
/// subscribed to a private channel named after its id; joining a session
/// adds a second subscription. Sessions have no other representation: a
/// session exists while its channel has at least one subscriber.
#[derive(Debug, Default)]
pub struct SubscriptionTable {
    /// channel -> subscribers, in subscription order
    channels: HashMap<String, Vec<String>>,
    /// connection -> channels, in subscription order
    by_connection: HashMap<String, Vec<String>>,
}

impl SubscriptionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe a connection to a channel. Returns false if it already was.
    pub fn subscribe(&mut self, connection_id: &str, channel: &str) -> bool {
        let channels = self.by_connection.entry(connection_id.to_string()).or_default();
        if channels.iter().any(|c| c == channel) {
            return false;
        }
        channels.push(channel.to_string());
        self.channels
            .entry(channel.to_string())
            .or_default()
            .push(connection_id.to_string());
        true
    }

    /// Drop every subscription of a connection and return the channels it
    /// was subscribed to. Channels left without subscribers disappear.
    pub fn unsubscribe_all(&mut self, connection_id: &str) -> Vec<String> {
        let channels = self.by_connection.remove(connection_id).unwrap_or_default();
        for channel in &channels {
            if let Some(members) = self.channels.get_mut(channel) {
                members.retain(|m| m != connection_id);
                if members.is_empty() {
                    self.channels.remove(channel);
                }
            }
        }
        channels
    }

    /// Connection ids currently subscribed to a channel.
    ///
    /// Computed from the live table on every call; nothing is cached.
    pub fn members_of(&self, channel: &str) -> Vec<String> {
        self.channels.get(channel).cloned().unwrap_or_default()
    }

    pub fn channels_of(&self, connection_id: &str) -> &[String] {
        self.by_connection
            .get(connection_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_subscribed(&self, connection_id: &str, channel: &str) -> bool {
        self.channels_of(connection_id).iter().any(|c| c == channel)
    }

    /// Session a connection has joined, ignoring its private channel.
    pub fn session_of(&self, connection_id: &str) -> Option<&str> {
        self.channels_of(connection_id)
            .iter()
            .find(|c| c.as_str() != connection_id)
            .map(String::as_str)
    }

    /// Number of live session channels. Private channels are not counted.
    pub fn session_count(&self) -> usize {
        self.channels
            .keys()
            .filter(|channel| !self.by_connection.contains_key(channel.as_str()))
            .count()
    }
}
