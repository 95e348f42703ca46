//! Application State
//!
//! All cart state lives in the upstream store; the shared state is just the
//! engine wired to a repository.

use std::sync::Arc;

use super::engine::CartEngine;
use super::repository::OrderRepository;

/// Shared application state that can be safely passed between threads
pub type SharedState = Arc<AppState>;

/// Core application state holding the cart engine.
pub struct AppState {
    pub engine: CartEngine,
}

impl AppState {
    /// Creates the state around any repository implementation; tests inject
    /// a mock here.
    pub fn new(repo: Arc<dyn OrderRepository>) -> Self {
        Self {
            engine: CartEngine::new(repo),
        }
    }
}
