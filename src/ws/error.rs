use thiserror::Error;

/// Why a coordination operation was rejected.
///
/// A rejected operation leaves the registry and the subscriptions untouched
/// and emits no event.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RelayError {
    #[error("missing field '{0}'")]
    MissingField(&'static str),

    #[error("session key '{0}' cannot be used")]
    InvalidSessionKey(String),

    #[error("connection {0} is not open")]
    UnknownConnection(String),

    #[error("connection {connection_id} already joined session '{session_key}'")]
    AlreadyJoined {
        connection_id: String,
        session_key: String,
    },

    #[error("connection {connection_id} is not a member of session '{session_key}'")]
    NotMember {
        connection_id: String,
        session_key: String,
    },
}
