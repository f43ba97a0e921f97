use std::sync::Arc;

use crate::config::Config;
use crate::services::InviteService;
use crate::ws::SessionHub;

/// Everything the router needs, built once at startup and shared by clone.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub hub: SessionHub,
    pub invites: Option<Arc<InviteService>>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let invites = InviteService::from_config(&config).map(Arc::new);
        Self {
            config: Arc::new(config),
            hub: SessionHub::new(),
            invites,
        }
    }
}
