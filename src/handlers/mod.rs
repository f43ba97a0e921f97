pub mod health;
pub mod invite;
pub mod diagnostics;

pub use health::*;
pub use invite::*;
pub use diagnostics::*;
