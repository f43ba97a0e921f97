use std::collections::HashMap;

/// Name reported for a connection that never announced one.
pub const UNKNOWN_DISPLAY_NAME: &str = "unknown";

/// Display names of live connections, keyed by connection id.
///
/// Names are not validated: empty and duplicate names are accepted.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    names: HashMap<String, String>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the name of a connection.
    pub fn set_name(&mut self, connection_id: &str, name: impl Into<String>) {
        self.names.insert(connection_id.to_string(), name.into());
    }

    /// Name of a connection, or [`UNKNOWN_DISPLAY_NAME`] when absent.
    pub fn get_name(&self, connection_id: &str) -> &str {
        self.names
            .get(connection_id)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_DISPLAY_NAME)
    }

    pub fn contains(&self, connection_id: &str) -> bool {
        self.names.contains_key(connection_id)
    }

    /// Drop the mapping and hand back the name it held.
    pub fn remove(&mut self, connection_id: &str) -> Option<String> {
        self.names.remove(connection_id)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
