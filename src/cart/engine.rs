//! Cart mutation engine: add, update and remove built on whole-order
//! primitives.
//!
//! Every operation re-reads the pending-order set before deciding; no state
//! is held between requests. That also means there is no cross-request
//! atomicity: two concurrent adds for the same item key can both see a
//! "no duplicate yet" snapshot and each create an order. The upstream store
//! is the only source of truth and offers no conditional update, so the race
//! is inherent to this design and is documented rather than masked.
//!
//! Multi-step mutations (create the replacement order, then delete the old
//! one) are non-atomic as well. A failed delete leaves the superseded order
//! behind as an orphan; the request that caused it still succeeds, the
//! orphan is logged and becomes visible cart state on the next listing.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde_json::json;

use super::matcher;
use super::models::{
    AddToCartInput, CartMutationResponse, CartView, ItemKey, RemoveResponse, UpdateCartItemInput,
    VariationRef, META_IS_SAMPLE, META_M2_QUANTITY,
};
use super::reconcile::{self, MergedItem};
use super::repository::OrderRepository;
use super::view;
use super::CartError;
use crate::woo::models::{LineItem, MetaData, NewLineItem};
use crate::woo::WooError;

/// Orchestrates cart operations over the order repository.
pub struct CartEngine {
    repo: Arc<dyn OrderRepository>,
}

impl CartEngine {
    pub fn new(repo: Arc<dyn OrderRepository>) -> Self {
        Self { repo }
    }

    /// Adds an item to the cart.
    ///
    /// With duplicate checking on (the default), an existing line item with
    /// the same key absorbs the incoming quantities: the owning order is
    /// rebuilt with the combined item via create-new-then-delete-old, and a
    /// failed creation falls back to replacing the order's items in place.
    /// Otherwise a new single-item order is created.
    pub async fn add(&self, input: AddToCartInput) -> Result<CartMutationResponse, CartError> {
        let product_id = input.product_id.ok_or(CartError::Validation("product_id"))?;
        let quantity = input.quantity.ok_or(CartError::Validation("quantity"))?;

        // Parent resolution happens regardless of duplicate checking so new
        // orders are created against the real product id too.
        let product_id =
            matcher::resolve_product_id(self.repo.as_ref(), product_id, input.variation_id.as_ref())
                .await;
        let sample = input.is_sample
            || input
                .variation_id
                .as_ref()
                .is_some_and(VariationRef::has_sample_marker);
        let variation_id = input.variation_id.as_ref().and_then(VariationRef::as_id);

        if !input.check_duplicates {
            return self
                .create_single(product_id, variation_id, quantity, input.m2_quantity, sample)
                .await;
        }

        let orders = self.repo.list_pending().await?;
        let key = ItemKey { product_id, variation_id, is_sample: sample };
        let Some((order, existing)) = matcher::find_match(&orders, &key) else {
            return self
                .create_single(product_id, variation_id, quantity, input.m2_quantity, sample)
                .await;
        };

        let merged = reconcile::merge(existing, quantity, input.m2_quantity);
        let mut items: Vec<NewLineItem> = order
            .line_items
            .iter()
            .filter(|item| item.id != existing.id)
            .map(NewLineItem::from_existing)
            .collect();
        items.push(merged_line_item(existing, &merged));

        match self.repo.create_order(items.clone()).await {
            Ok(new_order) => {
                self.delete_superseded(order.id).await;
                Ok(CartMutationResponse {
                    line_items: new_order.line_items,
                    order_id: new_order.id,
                })
            }
            Err(err) => {
                tracing::warn!(
                    order_id = order.id,
                    error = %err,
                    "replacement order creation failed, replacing items in place"
                );
                let replaced = self.repo.replace_items(order.id, items).await?;
                Ok(CartMutationResponse {
                    line_items: replaced.line_items,
                    order_id: replaced.id,
                })
            }
        }
    }

    /// Applies quantity deltas to the order addressed by `order_id`.
    ///
    /// The endpoint addresses orders, not individual line items, and only
    /// the first line item is touched; the replacement list contains just
    /// that item.
    pub async fn update_by_id(
        &self,
        order_id: u64,
        input: UpdateCartItemInput,
    ) -> Result<CartMutationResponse, CartError> {
        let quantity = input.quantity.ok_or(CartError::Validation("quantity"))?;

        let order = match self.repo.get_order(order_id).await {
            Ok(order) => order,
            Err(WooError::NotFound(_)) => {
                return Err(CartError::NotFound(format!("cart item {order_id} not found")))
            }
            Err(err) => return Err(err.into()),
        };
        let Some(first) = order.line_items.first() else {
            return Err(CartError::NotFound(format!(
                "order {order_id} has no line items"
            )));
        };

        let merged = reconcile::merge(first, quantity, input.m2_quantity);
        let items = vec![merged_line_item(first, &merged)];
        let updated = self.repo.replace_items(order.id, items).await?;
        Ok(CartMutationResponse {
            line_items: updated.line_items,
            order_id: updated.id,
        })
    }

    /// Removes the line item with `item_id` from the cart.
    ///
    /// A sole item takes its order down with it. Otherwise the remaining
    /// items move to a freshly created order and the old order is deleted.
    pub async fn remove_by_id(&self, item_id: u64) -> Result<RemoveResponse, CartError> {
        let orders = self.repo.list_pending().await?;
        let Some(order) = orders
            .iter()
            .find(|order| order.line_items.iter().any(|item| item.id == item_id))
        else {
            return Err(CartError::NotFound(format!("cart item {item_id} not found")));
        };

        if order.line_items.len() <= 1 {
            self.repo.delete_order(order.id).await?;
            return Ok(RemoveResponse {
                message: format!("item {item_id} removed"),
                order_id: None,
            });
        }

        let remaining: Vec<NewLineItem> = order
            .line_items
            .iter()
            .filter(|item| item.id != item_id)
            .map(NewLineItem::from_existing)
            .collect();
        let new_order = self.repo.create_order(remaining).await?;
        self.delete_superseded(order.id).await;
        Ok(RemoveResponse {
            message: format!("item {item_id} removed"),
            order_id: Some(new_order.id),
        })
    }

    /// The flattened cart across all pending orders. Pure read.
    pub async fn list(&self) -> Result<CartView, CartError> {
        let orders = self.repo.list_pending().await?;
        Ok(view::project(&orders))
    }

    /// Creates a new single-item order. Sample items never carry the
    /// secondary-quantity metadata, even when the caller supplied one.
    async fn create_single(
        &self,
        product_id: u64,
        variation_id: Option<u64>,
        quantity: u32,
        m2: Option<Decimal>,
        sample: bool,
    ) -> Result<CartMutationResponse, CartError> {
        let mut meta = Vec::new();
        if sample {
            meta.push(MetaData::new(META_IS_SAMPLE, json!(true)));
        } else if let Some(m2) = m2 {
            meta.push(MetaData::new(
                META_M2_QUANTITY,
                json!(reconcile::round_m2(m2).to_string()),
            ));
        }

        let item = NewLineItem {
            product_id,
            variation_id,
            quantity,
            meta_data: meta,
            subtotal: None,
            total: None,
        };
        let order = self.repo.create_order(vec![item]).await?;
        Ok(CartMutationResponse {
            line_items: order.line_items,
            order_id: order.id,
        })
    }

    /// Deletes an order that has been superseded by a replacement. Failure
    /// is not fatal to the request that triggered it; the orphan is logged.
    async fn delete_superseded(&self, order_id: u64) {
        if let Err(err) = self.repo.delete_order(order_id).await {
            tracing::warn!(
                order_id,
                error = %err,
                "failed to delete superseded order, duplicate left in cart"
            );
        }
    }
}

/// Builds the combined line item carrying the merged values. The unit price
/// travels through `subtotal`/`total` computed from the existing item, so
/// the store never reprices it from the catalog.
fn merged_line_item(existing: &LineItem, merged: &MergedItem) -> NewLineItem {
    let mut meta: Vec<MetaData> = existing
        .meta_data
        .iter()
        .filter(|entry| entry.key != META_M2_QUANTITY)
        .map(|entry| MetaData::new(entry.key.clone(), entry.value.clone()))
        .collect();
    if let Some(m2) = merged.m2_quantity {
        meta.push(MetaData::new(META_M2_QUANTITY, json!(m2.to_string())));
    }

    NewLineItem {
        product_id: existing.product_id,
        variation_id: existing.variation_id,
        quantity: merged.quantity,
        meta_data: meta,
        subtotal: Some(merged.subtotal.clone()),
        total: Some(merged.total.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merged_line_item_replaces_m2_metadata() {
        let existing = LineItem {
            id: 7,
            product_id: 10,
            variation_id: Some(4),
            quantity: 2,
            name: String::new(),
            price: "10".parse().unwrap(),
            subtotal: "20.00".into(),
            total: "20.00".into(),
            meta_data: vec![
                MetaData::new(META_M2_QUANTITY, json!("1.0")),
                MetaData::new("_custom", json!("kept")),
            ],
        };
        let merged = MergedItem {
            quantity: 3,
            m2_quantity: Some("1.5".parse::<Decimal>().unwrap()),
            subtotal: "15.00".into(),
            total: "15.00".into(),
        };

        let item = merged_line_item(&existing, &merged);
        assert_eq!(item.quantity, 3);
        assert_eq!(item.subtotal.as_deref(), Some("15.00"));
        let m2_entries: Vec<_> = item
            .meta_data
            .iter()
            .filter(|entry| entry.key == META_M2_QUANTITY)
            .collect();
        assert_eq!(m2_entries.len(), 1);
        assert_eq!(m2_entries[0].value, json!("1.5"));
        assert!(item.meta_data.iter().any(|entry| entry.key == "_custom"));
    }
}
