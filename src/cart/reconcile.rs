//! Quantity/price reconciliation for merging an incoming add into an
//! existing line item.
//!
//! Pricing is asymmetric by domain rule, not by accident: area-priced items
//! are totalled as unit price × secondary (m²) quantity, while samples and
//! count-priced items are totalled as unit price × unit count. The unit
//! price itself always comes from the existing item and is never recomputed
//! from the catalog.

use rust_decimal::{Decimal, RoundingStrategy};

use super::models;
use crate::woo::models::LineItem;

/// The merged values a combined line item carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedItem {
    pub quantity: u32,
    /// Merged secondary quantity; `None` for samples and for items that
    /// never carried one.
    pub m2_quantity: Option<Decimal>,
    pub subtotal: String,
    pub total: String,
}

/// Merges an incoming quantity (and optional secondary-quantity) delta into
/// `existing`.
///
/// Quantities are plain sums with no cap. The secondary quantity is
/// (existing or 0) + (delta or 0), rounded to 3 decimals; sample items never
/// accrue one regardless of the incoming delta. Subtotal and total are the
/// same value (no tax modelling), formatted to 2 decimals.
pub fn merge(existing: &LineItem, quantity_delta: u32, m2_delta: Option<Decimal>) -> MergedItem {
    let quantity = existing.quantity + quantity_delta;

    if models::is_sample(existing) {
        let line_total = format_money(existing.price * Decimal::from(quantity));
        return MergedItem {
            quantity,
            m2_quantity: None,
            subtotal: line_total.clone(),
            total: line_total,
        };
    }

    let merged_m2 = round_m2(
        models::m2_quantity(existing).unwrap_or_default() + m2_delta.unwrap_or_default(),
    );
    let priced_quantity = if merged_m2 > Decimal::ZERO {
        merged_m2
    } else {
        Decimal::from(quantity)
    };
    let line_total = format_money(existing.price * priced_quantity);
    MergedItem {
        quantity,
        m2_quantity: (merged_m2 > Decimal::ZERO).then_some(merged_m2),
        subtotal: line_total.clone(),
        total: line_total,
    }
}

/// Rounds a secondary quantity to its stored precision (3 decimals).
pub fn round_m2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats a monetary value as the 2-decimal string the store uses.
pub fn format_money(value: Decimal) -> String {
    format!(
        "{:.2}",
        value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}
