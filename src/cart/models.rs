//! Cart Domain Models
//!
//! Data structures and metadata conventions for the cart built on pending
//! orders. The two line-item metadata flags are the domain's own:
//! `_m2_quantity` carries a continuous unit-of-measure quantity (area) used
//! for pricing, and `_is_sample` marks sample requests that are exempt from
//! it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::woo::models::LineItem;

// =============================================================================
// Constants
// =============================================================================

/// Metadata key for the secondary (area) quantity, stored at 3 decimals.
pub const META_M2_QUANTITY: &str = "_m2_quantity";
/// Metadata key marking a sample request.
pub const META_IS_SAMPLE: &str = "_is_sample";
/// Upper bound on the pending orders fetched per cart operation.
pub const PENDING_PAGE_SIZE: u32 = 50;
/// Tokens in a variation slug that identify a sample request.
pub const SAMPLE_MARKERS: [&str; 2] = ["free-sample", "full-size-sample"];

// =============================================================================
// Item identity
// =============================================================================

/// The loosely typed `variation_id` the storefront sends: a numeric
/// variation id for real variations, or a marker-bearing slug (e.g.
/// `free-sample-18`) for sample requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VariationRef {
    Id(u64),
    Slug(String),
}

impl VariationRef {
    /// The numeric variation id, if the reference carries one.
    pub fn as_id(&self) -> Option<u64> {
        match self {
            Self::Id(id) => Some(*id),
            Self::Slug(slug) => slug.trim().parse().ok(),
        }
    }

    /// Whether the slug form carries a sample marker token.
    pub fn has_sample_marker(&self) -> bool {
        match self {
            Self::Id(_) => false,
            Self::Slug(slug) => SAMPLE_MARKERS.iter().any(|marker| slug.contains(marker)),
        }
    }
}

/// The identity two line items must agree on to count as the same cart
/// entry. Equality is exact on all three fields; there is no fuzzy matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemKey {
    pub product_id: u64,
    pub variation_id: Option<u64>,
    pub is_sample: bool,
}

impl ItemKey {
    /// Derives the key of a stored line item (sample flag from metadata).
    pub fn of(item: &LineItem) -> Self {
        Self {
            product_id: item.product_id,
            variation_id: item.variation_id,
            is_sample: is_sample(item),
        }
    }
}

// =============================================================================
// Metadata readers
// =============================================================================

/// Reads the sample flag. The storage layer round-trips metadata values
/// through several JSON shapes, so boolean, string and numeric truthy forms
/// are all accepted.
pub fn is_sample(item: &LineItem) -> bool {
    match item.meta_value(META_IS_SAMPLE) {
        Some(Value::Bool(flag)) => *flag,
        Some(Value::String(text)) => matches!(text.as_str(), "true" | "1" | "yes"),
        Some(Value::Number(number)) => number.as_i64() == Some(1),
        _ => false,
    }
}

/// Reads the secondary quantity, accepting string or numeric value forms.
pub fn m2_quantity(item: &LineItem) -> Option<Decimal> {
    decimal_meta(item.meta_value(META_M2_QUANTITY)?)
}

fn decimal_meta(value: &Value) -> Option<Decimal> {
    match value {
        Value::String(text) => text.trim().parse().ok(),
        Value::Number(number) => number.to_string().parse().ok(),
        _ => None,
    }
}

// =============================================================================
// Requests
// =============================================================================

/// Input for adding an item to the cart.
///
/// `product_id` and `quantity` are required; they are optional here so the
/// engine, not the JSON layer, reports the missing field.
#[derive(Debug, Deserialize)]
pub struct AddToCartInput {
    pub product_id: Option<u64>,
    pub variation_id: Option<VariationRef>,
    pub quantity: Option<u32>,
    pub m2_quantity: Option<Decimal>,
    #[serde(default)]
    pub is_sample: bool,
    #[serde(default = "default_check_duplicates")]
    pub check_duplicates: bool,
}

/// Merging into an existing cart entry is the default behaviour.
fn default_check_duplicates() -> bool {
    true
}

/// Input for updating a cart item. Quantities are deltas added onto the
/// existing values, not replacements.
#[derive(Debug, Deserialize)]
pub struct UpdateCartItemInput {
    pub quantity: Option<u32>,
    pub m2_quantity: Option<Decimal>,
}

// =============================================================================
// Responses
// =============================================================================

/// Result of a cart mutation: the surviving order and its items.
#[derive(Debug, Serialize)]
pub struct CartMutationResponse {
    pub line_items: Vec<LineItem>,
    pub order_id: u64,
}

/// Result of removing a cart item. `order_id` is the replacement order when
/// other items remained, and absent when the whole order was deleted.
#[derive(Debug, Serialize)]
pub struct RemoveResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<u64>,
}

/// The flattened cart across all pending orders.
#[derive(Debug, Serialize)]
pub struct CartView {
    pub line_items: Vec<CartItemView>,
    pub orders_found: usize,
}

/// One display row of the cart.
///
/// `display_quantity` is what the storefront shows and prices by: the area
/// for area-priced items, the unit count for samples and count-priced items.
#[derive(Debug, Serialize)]
pub struct CartItemView {
    pub id: u64,
    pub order_id: u64,
    pub product_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variation_id: Option<u64>,
    pub name: String,
    pub quantity: u32,
    pub is_sample: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub m2_quantity: Option<Decimal>,
    pub display_quantity: Decimal,
    pub display_price: Decimal,
    pub total: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item_with_meta(meta: Vec<(&str, Value)>) -> LineItem {
        LineItem {
            id: 1,
            product_id: 10,
            variation_id: None,
            quantity: 1,
            name: String::new(),
            price: Decimal::ZERO,
            subtotal: String::new(),
            total: String::new(),
            meta_data: meta
                .into_iter()
                .map(|(key, value)| crate::woo::models::MetaData::new(key, value))
                .collect(),
        }
    }

    #[test]
    fn test_variation_ref_as_id() {
        assert_eq!(VariationRef::Id(5).as_id(), Some(5));
        assert_eq!(VariationRef::Slug("5".into()).as_id(), Some(5));
        assert_eq!(VariationRef::Slug("free-sample-18".into()).as_id(), None);
    }

    #[test]
    fn test_variation_ref_sample_markers() {
        assert!(VariationRef::Slug("free-sample-18".into()).has_sample_marker());
        assert!(VariationRef::Slug("oak-full-size-sample".into()).has_sample_marker());
        assert!(!VariationRef::Slug("oak-classic".into()).has_sample_marker());
        assert!(!VariationRef::Id(18).has_sample_marker());
    }

    #[test]
    fn test_variation_ref_deserializes_both_forms() {
        assert_eq!(
            serde_json::from_value::<VariationRef>(json!(7)).unwrap(),
            VariationRef::Id(7)
        );
        assert_eq!(
            serde_json::from_value::<VariationRef>(json!("free-sample")).unwrap(),
            VariationRef::Slug("free-sample".into())
        );
    }

    #[test]
    fn test_is_sample_value_forms() {
        assert!(is_sample(&item_with_meta(vec![(META_IS_SAMPLE, json!(true))])));
        assert!(is_sample(&item_with_meta(vec![(META_IS_SAMPLE, json!("true"))])));
        assert!(is_sample(&item_with_meta(vec![(META_IS_SAMPLE, json!("1"))])));
        assert!(is_sample(&item_with_meta(vec![(META_IS_SAMPLE, json!(1))])));
        assert!(!is_sample(&item_with_meta(vec![(META_IS_SAMPLE, json!(false))])));
        assert!(!is_sample(&item_with_meta(vec![])));
    }

    #[test]
    fn test_m2_quantity_value_forms() {
        let from_string = item_with_meta(vec![(META_M2_QUANTITY, json!("1.5"))]);
        assert_eq!(m2_quantity(&from_string), Some("1.5".parse().unwrap()));

        let from_number = item_with_meta(vec![(META_M2_QUANTITY, json!(2.25))]);
        assert_eq!(m2_quantity(&from_number), Some("2.25".parse().unwrap()));

        assert_eq!(m2_quantity(&item_with_meta(vec![])), None);
    }

    #[test]
    fn test_check_duplicates_defaults_to_true() {
        let input: AddToCartInput =
            serde_json::from_value(json!({"product_id": 1, "quantity": 1})).unwrap();
        assert!(input.check_duplicates);
        assert!(!input.is_sample);
    }
}
