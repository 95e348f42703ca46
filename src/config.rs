//! Upstream connection settings, loaded once at startup and injected into
//! the client constructor.

use anyhow::Context;

/// Credentials and location of the WooCommerce store this service fronts.
#[derive(Debug, Clone)]
pub struct WooConfig {
    /// Store root, e.g. `https://shop.example.com` (no trailing slash needed).
    pub base_url: String,
    pub consumer_key: String,
    pub consumer_secret: String,
}

impl WooConfig {
    /// Reads the configuration from `WOO_BASE_URL`, `WOO_CONSUMER_KEY` and
    /// `WOO_CONSUMER_SECRET`. Missing variables fail startup with a
    /// descriptive error.
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            base_url: require("WOO_BASE_URL")?,
            consumer_key: require("WOO_CONSUMER_KEY")?,
            consumer_secret: require("WOO_CONSUMER_SECRET")?,
        })
    }
}

fn require(name: &str) -> anyhow::Result<String> {
    std::env::var(name).with_context(|| format!("missing required environment variable {name}"))
}
