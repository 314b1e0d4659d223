//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::services::UserService;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// user service that owns the store.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    users: UserService,
}

impl AppState {
    /// Create application state with an empty user store.
    #[must_use]
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                users: UserService::new(config.min_age),
            }),
        }
    }

    /// Get a reference to the user service.
    #[must_use]
    pub fn users(&self) -> &UserService {
        &self.inner.users
    }
}
