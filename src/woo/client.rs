//! Authenticated HTTP client for the WooCommerce REST v3 API.

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;

use super::models::{NewLineItem, NewOrder, Order, Product, STATUS_PENDING};
use super::WooError;
use crate::config::WooConfig;

/// Client for a single WooCommerce store.
///
/// Holds one connection-pooled `reqwest::Client`; the credentials come from
/// the injected [`WooConfig`], never from ambient process state.
pub struct WooClient {
    http: reqwest::Client,
    config: WooConfig,
}

impl WooClient {
    pub fn new(config: WooConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/wp-json/wc/v3{}",
            self.config.base_url.trim_end_matches('/'),
            path
        )
    }

    /// Lists pending orders, newest first, capped to one page.
    pub async fn list_pending_orders(&self, per_page: u32) -> Result<Vec<Order>, WooError> {
        let path = format!(
            "/orders?status={STATUS_PENDING}&per_page={per_page}&orderby=date&order=desc"
        );
        tracing::debug!(%path, "GET");
        let response = self
            .http
            .get(self.url(&path))
            .basic_auth(&self.config.consumer_key, Some(&self.config.consumer_secret))
            .send()
            .await?;
        decode(&path, response).await
    }

    pub async fn get_order(&self, order_id: u64) -> Result<Order, WooError> {
        let path = format!("/orders/{order_id}");
        tracing::debug!(%path, "GET");
        let response = self
            .http
            .get(self.url(&path))
            .basic_auth(&self.config.consumer_key, Some(&self.config.consumer_secret))
            .send()
            .await?;
        decode(&path, response).await
    }

    pub async fn create_order(&self, order: &NewOrder) -> Result<Order, WooError> {
        let path = "/orders";
        tracing::debug!(%path, items = order.line_items.len(), "POST");
        let response = self
            .http
            .post(self.url(path))
            .basic_auth(&self.config.consumer_key, Some(&self.config.consumer_secret))
            .json(order)
            .send()
            .await?;
        decode(path, response).await
    }

    /// Replaces the order's entire line-item list. This is a full overwrite:
    /// any item omitted from `items` is dropped from the order.
    pub async fn replace_order_items(
        &self,
        order_id: u64,
        items: &[NewLineItem],
    ) -> Result<Order, WooError> {
        let path = format!("/orders/{order_id}");
        tracing::debug!(%path, items = items.len(), "PUT");
        let response = self
            .http
            .put(self.url(&path))
            .basic_auth(&self.config.consumer_key, Some(&self.config.consumer_secret))
            .json(&serde_json::json!({ "line_items": items }))
            .send()
            .await?;
        decode(&path, response).await
    }

    /// Deletes an order permanently (`force=true` bypasses the trash).
    pub async fn delete_order(&self, order_id: u64) -> Result<(), WooError> {
        let path = format!("/orders/{order_id}?force=true");
        tracing::debug!(%path, "DELETE");
        let response = self
            .http
            .delete(self.url(&path))
            .basic_auth(&self.config.consumer_key, Some(&self.config.consumer_secret))
            .send()
            .await?;
        check_status(&path, response).await?;
        Ok(())
    }

    pub async fn get_product(&self, product_id: u64) -> Result<Product, WooError> {
        let path = format!("/products/{product_id}");
        tracing::debug!(%path, "GET");
        let response = self
            .http
            .get(self.url(&path))
            .basic_auth(&self.config.consumer_key, Some(&self.config.consumer_secret))
            .send()
            .await?;
        decode(&path, response).await
    }
}

/// Maps the response status to the error taxonomy, returning the response
/// for further decoding when it is a success.
async fn check_status(path: &str, response: Response) -> Result<Response, WooError> {
    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return Err(WooError::NotFound(path.to_string()));
    }
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(WooError::Api {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response)
}

async fn decode<T: DeserializeOwned>(path: &str, response: Response) -> Result<T, WooError> {
    let response = check_status(path, response).await?;
    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}
