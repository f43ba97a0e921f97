pub mod error;
pub mod hub;
pub mod membership;
pub mod presence;
pub mod registry;
pub mod relay;

pub use error::RelayError;
pub use hub::{HubStats, Mailbox, SessionHub, MAILBOX_CAPACITY};
pub use membership::SubscriptionTable;
pub use registry::{ConnectionRegistry, UNKNOWN_DISPLAY_NAME};
