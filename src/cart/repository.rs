//! Order repository seam over the upstream store.
//!
//! The cart is modelled on whole-order primitives because WooCommerce has no
//! line-item patch API: the only mutations available are "replace an order's
//! entire item list" and "delete an order". Keeping that adaptation behind
//! this trait lets a backend with real cart semantics replace it without
//! touching the matcher, reconciler or engine.

use async_trait::async_trait;

use super::models::PENDING_PAGE_SIZE;
use crate::woo::models::{NewLineItem, NewOrder, Order, Product};
use crate::woo::{WooClient, WooError};

/// The order and catalog operations the cart engine needs.
///
/// All calls are network requests: fallible, non-atomic, no multi-order
/// transaction.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Pending orders, newest first, capped to one bounded page.
    async fn list_pending(&self) -> Result<Vec<Order>, WooError>;

    /// Creates a pending order; the store assigns ids and prices the items.
    async fn create_order(&self, items: Vec<NewLineItem>) -> Result<Order, WooError>;

    /// Replaces the order's whole item list (full overwrite, not a patch).
    async fn replace_items(&self, order_id: u64, items: Vec<NewLineItem>)
        -> Result<Order, WooError>;

    /// Permanently deletes an order.
    async fn delete_order(&self, order_id: u64) -> Result<(), WooError>;

    /// Fetches one order; `WooError::NotFound` when absent.
    async fn get_order(&self, order_id: u64) -> Result<Order, WooError>;

    /// Catalog lookup used for variation parent-id resolution.
    async fn product(&self, product_id: u64) -> Result<Product, WooError>;
}

/// Production repository backed by the WooCommerce client.
pub struct WooOrderRepository {
    client: WooClient,
}

impl WooOrderRepository {
    pub fn new(client: WooClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl OrderRepository for WooOrderRepository {
    async fn list_pending(&self) -> Result<Vec<Order>, WooError> {
        self.client.list_pending_orders(PENDING_PAGE_SIZE).await
    }

    async fn create_order(&self, items: Vec<NewLineItem>) -> Result<Order, WooError> {
        self.client.create_order(&NewOrder::pending(items)).await
    }

    async fn replace_items(
        &self,
        order_id: u64,
        items: Vec<NewLineItem>,
    ) -> Result<Order, WooError> {
        self.client.replace_order_items(order_id, &items).await
    }

    async fn delete_order(&self, order_id: u64) -> Result<(), WooError> {
        self.client.delete_order(order_id).await
    }

    async fn get_order(&self, order_id: u64) -> Result<Order, WooError> {
        self.client.get_order(order_id).await
    }

    async fn product(&self, product_id: u64) -> Result<Product, WooError> {
        self.client.get_product(product_id).await
    }
}
