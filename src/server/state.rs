// Application state module
// Everything a connection task needs, shared behind one Arc

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::config::Config;
use crate::mux::Router;

/// Shared server state
///
/// `router` is fully built before the state is created and never mutated again,
/// so connection tasks read it without locking.
pub struct AppState {
    pub config: Config,
    pub router: Router,
    pub active_connections: AtomicUsize,
}

impl AppState {
    pub fn new(config: Config, router: Router) -> Self {
        Self {
            config,
            router,
            active_connections: AtomicUsize::new(0),
        }
    }

    pub fn active_connections(&self) -> usize {
        self.active_connections.load(Ordering::SeqCst)
    }
}
