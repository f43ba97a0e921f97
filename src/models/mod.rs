pub mod health;
pub mod diagnostics;
pub mod invite;
pub mod messages;
pub mod error;

pub use health::*;
pub use diagnostics::*;
pub use invite::*;
pub use messages::*;
pub use error::*;
