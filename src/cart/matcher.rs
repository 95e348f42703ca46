//! Duplicate line-item matching across the pending-order set.

use super::models::{ItemKey, VariationRef};
use super::repository::OrderRepository;
use crate::woo::models::{LineItem, Order};

/// Resolves the product id an operation should act on.
///
/// Some storefront callers pass a variation's own id as if it were the
/// parent product id. That case is detectable because the two supplied ids
/// are then equal: the product record is fetched and its `parent_id`
/// substituted. A failed lookup falls back to the supplied id rather than
/// failing the whole operation.
pub async fn resolve_product_id(
    repo: &dyn OrderRepository,
    product_id: u64,
    variation: Option<&VariationRef>,
) -> u64 {
    if variation.and_then(VariationRef::as_id) != Some(product_id) {
        return product_id;
    }
    match repo.product(product_id).await {
        Ok(product) if product.parent_id != 0 => product.parent_id,
        Ok(_) => product_id,
        Err(err) => {
            tracing::warn!(
                product_id,
                error = %err,
                "parent lookup failed, keeping supplied product id"
            );
            product_id
        }
    }
}

/// Finds the first line item matching `key`, scanning orders in listing
/// order and items in order position.
///
/// At most one match is ever acted upon: the store keeps at most one line
/// item per distinct key, so the scan stops at the first hit rather than
/// deduplicating exhaustively.
pub fn find_match<'a>(orders: &'a [Order], key: &ItemKey) -> Option<(&'a Order, &'a LineItem)> {
    orders.iter().find_map(|order| {
        order
            .line_items
            .iter()
            .find(|item| ItemKey::of(item) == *key)
            .map(|item| (order, item))
    })
}
