pub mod invite_service;

pub use invite_service::{InviteClaims, InviteError, InviteService};
