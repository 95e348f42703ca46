//! Cart Domain Module
//!
//! This module implements a shopping cart on top of WooCommerce pending
//! orders, including:
//! - Domain models (item keys, metadata flags, inputs, responses)
//! - The order repository seam over the upstream store
//! - Duplicate matching and quantity/price reconciliation
//! - The mutation engine (add/update/remove) and read-only view projection
//! - REST API handlers

pub mod engine;
pub mod handlers;
pub mod matcher;
pub mod models;
pub mod reconcile;
pub mod repository;
pub mod state;
pub mod view;

// Re-export commonly used types for convenience
pub use engine::CartEngine;
pub use handlers::routes;
pub use repository::{OrderRepository, WooOrderRepository};
pub use state::{AppState, SharedState};

use thiserror::Error;

use crate::woo::WooError;

/// Errors surfaced by cart operations.
///
/// The three variants mirror how they are reported to the caller: bad input,
/// a missing target, or a failed upstream call (the only retried case is the
/// explicit create-then-replace fallback inside the merge path).
#[derive(Debug, Error)]
pub enum CartError {
    /// A required request field is absent.
    #[error("missing required field: {0}")]
    Validation(&'static str),

    /// The addressed order or line item does not exist.
    #[error("{0}")]
    NotFound(String),

    /// A repository call failed; carries the upstream diagnostics.
    #[error("upstream request failed: {0}")]
    Upstream(#[from] WooError),
}
