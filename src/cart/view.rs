//! Read-only projection of the pending-order set into the flat cart list
//! the storefront displays.

use rust_decimal::Decimal;

use super::models::{is_sample, m2_quantity, CartItemView, CartView};
use super::reconcile::format_money;
use crate::woo::models::{LineItem, Order};

/// Flattens every line item of every pending order into one display list.
pub fn project(orders: &[Order]) -> CartView {
    let line_items = orders
        .iter()
        .flat_map(|order| order.line_items.iter().map(|item| project_item(order, item)))
        .collect();
    CartView {
        line_items,
        orders_found: orders.len(),
    }
}

/// Samples display and price by unit count; everything else prices by the
/// secondary quantity when one is present.
fn project_item(order: &Order, item: &LineItem) -> CartItemView {
    let sample = is_sample(item);
    let m2 = m2_quantity(item);
    let display_quantity = if sample {
        Decimal::from(item.quantity)
    } else {
        m2.filter(|value| !value.is_zero())
            .unwrap_or_else(|| Decimal::from(item.quantity))
    };

    CartItemView {
        id: item.id,
        order_id: order.id,
        product_id: item.product_id,
        variation_id: item.variation_id,
        name: item.name.clone(),
        quantity: item.quantity,
        is_sample: sample,
        m2_quantity: m2,
        display_quantity,
        display_price: item.price,
        total: format_money(item.price * display_quantity),
    }
}
