//! WooCommerce REST API client
//!
//! This module contains the thin client layer over the upstream store:
//! - Wire models for the WC REST v3 payloads this service exchanges
//! - The authenticated HTTP client
//!
//! WooCommerce is the sole source of truth; nothing is cached or synced
//! locally.

pub mod client;
pub mod models;

pub use client::WooClient;

use thiserror::Error;

/// Errors that can occur when talking to the WooCommerce API.
#[derive(Debug, Error)]
pub enum WooError {
    /// Transport-level failure (connection, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response from the store. The body is kept verbatim so the
    /// caller can surface the upstream diagnostics.
    #[error("upstream returned {status}: {body}")]
    Api { status: u16, body: String },

    /// Response body could not be decoded.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Requested resource does not exist upstream.
    #[error("not found: {0}")]
    NotFound(String),
}
