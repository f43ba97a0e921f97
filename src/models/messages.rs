use serde::{Deserialize, Serialize};

/// A connection paired with the display name it joined with.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub connection_id: String,
    pub display_name: String,
}

// Inbound payload fields are optional so that a missing field is reported as
// a rejected operation instead of an unparsable frame.

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct JoinMessage {
    pub session_key: Option<String>,
    pub display_name: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ContentChangeMessage {
    pub session_key: Option<String>,
    pub content: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SyncContentMessage {
    pub content: Option<String>,
    pub target_connection_id: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LanguageChangeMessage {
    pub session_key: Option<String>,
    pub language: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SyncLanguageMessage {
    pub language: Option<String>,
    pub target_connection_id: Option<String>,
}

/// Frames a client may send.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ReceivedMessage {
    Join(JoinMessage),
    ContentChange(ContentChangeMessage),
    SyncContent(SyncContentMessage),
    LanguageChange(LanguageChangeMessage),
    SyncLanguage(SyncLanguageMessage),
    Ping,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConnectedEvent {
    pub connection_id: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct JoinedEvent {
    pub members: Vec<Participant>,
    pub display_name: String,
    pub connection_id: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DisconnectedEvent {
    pub connection_id: String,
    pub display_name: String,
    pub members: Vec<Participant>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ContentChangedEvent {
    pub content: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LanguageChangedEvent {
    pub language: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PongEvent {
    pub date: String,
}

/// Frames the server sends.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum SendMessage {
    Connected(ConnectedEvent),
    Joined(JoinedEvent),
    Disconnected(DisconnectedEvent),
    ContentChanged(ContentChangedEvent),
    LanguageChanged(LanguageChangedEvent),
    Pong(PongEvent),
}
