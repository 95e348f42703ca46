//! Wire models for the WooCommerce REST v3 payloads this service exchanges.
//!
//! Only the fields the cart engine reads are modelled; everything else the
//! store returns is ignored on deserialization.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// =============================================================================
// Constants
// =============================================================================

/// Payment method recorded on orders created by this service.
pub const PAYMENT_METHOD: &str = "other";
/// Human-readable title for the payment method.
pub const PAYMENT_METHOD_TITLE: &str = "Manual payment";
/// Order status used as the cart container.
pub const STATUS_PENDING: &str = "pending";

// =============================================================================
// Inbound models
// =============================================================================

/// An order as returned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: u64,
    pub status: String,
    #[serde(default)]
    pub payment_method: String,
    #[serde(default)]
    pub line_items: Vec<LineItem>,
}

/// One product/variation entry inside an order.
///
/// `price` is the unit price as set by the store from the product's catalog
/// price; this service never computes it. `subtotal`/`total` are the decimal
/// strings WooCommerce stores them as.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    pub id: u64,
    pub product_id: u64,
    #[serde(default, deserialize_with = "zero_as_none")]
    pub variation_id: Option<u64>,
    pub quantity: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "flexible_decimal")]
    pub price: Decimal,
    #[serde(default)]
    pub subtotal: String,
    #[serde(default)]
    pub total: String,
    #[serde(default)]
    pub meta_data: Vec<MetaData>,
}

impl LineItem {
    /// Looks up a metadata value by key. Keys are unique by convention but
    /// not enforced upstream; the first match wins.
    pub fn meta_value(&self, key: &str) -> Option<&Value> {
        self.meta_data
            .iter()
            .find(|meta| meta.key == key)
            .map(|meta| &meta.value)
    }
}

/// One key/value metadata entry on a line item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub key: String,
    pub value: Value,
}

impl MetaData {
    /// A fresh entry without a store-assigned id, for outbound payloads.
    pub fn new(key: impl Into<String>, value: Value) -> Self {
        Self {
            id: None,
            key: key.into(),
            value,
        }
    }
}

/// The subset of a product record the cart engine needs: `parent_id` is
/// non-zero when the record is a variation of another product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    #[serde(default)]
    pub parent_id: u64,
}

// =============================================================================
// Outbound models
// =============================================================================

/// A line item for order create/replace payloads.
///
/// `subtotal`/`total` are only set when carrying forward an existing item's
/// pricing; for brand-new items they are omitted so the store prices the
/// item from the catalog.
#[derive(Debug, Clone, Serialize)]
pub struct NewLineItem {
    pub product_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variation_id: Option<u64>,
    pub quantity: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub meta_data: Vec<MetaData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtotal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<String>,
}

impl NewLineItem {
    /// Carries an existing item into a new order unchanged: same product,
    /// variation, quantity, metadata (store-assigned ids stripped) and
    /// pricing.
    pub fn from_existing(item: &LineItem) -> Self {
        Self {
            product_id: item.product_id,
            variation_id: item.variation_id,
            quantity: item.quantity,
            meta_data: item
                .meta_data
                .iter()
                .map(|meta| MetaData::new(meta.key.clone(), meta.value.clone()))
                .collect(),
            subtotal: Some(item.subtotal.clone()),
            total: Some(item.total.clone()),
        }
    }
}

/// Payload for creating a cart order.
#[derive(Debug, Serialize)]
pub struct NewOrder {
    pub payment_method: &'static str,
    pub payment_method_title: &'static str,
    pub status: &'static str,
    pub line_items: Vec<NewLineItem>,
}

impl NewOrder {
    /// A pending order with the constant manual payment method.
    pub fn pending(line_items: Vec<NewLineItem>) -> Self {
        Self {
            payment_method: PAYMENT_METHOD,
            payment_method_title: PAYMENT_METHOD_TITLE,
            status: STATUS_PENDING,
            line_items,
        }
    }
}

// =============================================================================
// Deserialization helpers
// =============================================================================

/// WooCommerce encodes "no variation" as `variation_id: 0`.
fn zero_as_none<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let id = Option::<u64>::deserialize(deserializer)?;
    Ok(id.filter(|value| *value != 0))
}

/// The store sends `price` as a JSON number but quotes most other monetary
/// fields; accept both forms.
fn flexible_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(text) => text.trim().parse().map_err(serde::de::Error::custom),
        Value::Number(number) => number
            .to_string()
            .parse()
            .map_err(serde::de::Error::custom),
        Value::Null => Ok(Decimal::ZERO),
        other => Err(serde::de::Error::custom(format!(
            "expected number or string for price, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_order_deserialization() {
        let order: Order = serde_json::from_value(json!({
            "id": 812,
            "status": "pending",
            "payment_method": "other",
            "line_items": [{
                "id": 17,
                "product_id": 42,
                "variation_id": 0,
                "quantity": 2,
                "name": "Oak parquet",
                "price": 24.9,
                "subtotal": "49.80",
                "total": "49.80",
                "meta_data": [{"id": 3, "key": "_m2_quantity", "value": "1.5"}]
            }]
        }))
        .unwrap();

        let item = &order.line_items[0];
        assert_eq!(item.variation_id, None, "variation_id 0 means no variation");
        assert_eq!(item.price, "24.9".parse().unwrap());
        assert_eq!(item.meta_value("_m2_quantity"), Some(&json!("1.5")));
        assert_eq!(item.meta_value("_is_sample"), None);
    }

    #[test]
    fn test_price_accepts_string_form() {
        let item: LineItem = serde_json::from_value(json!({
            "id": 1, "product_id": 2, "quantity": 1, "price": "10.00"
        }))
        .unwrap();
        assert_eq!(item.price, "10".parse().unwrap());
    }

    #[test]
    fn test_new_line_item_omits_absent_fields() {
        let item = NewLineItem {
            product_id: 42,
            variation_id: None,
            quantity: 1,
            meta_data: vec![],
            subtotal: None,
            total: None,
        };
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value, json!({"product_id": 42, "quantity": 1}));
    }

    #[test]
    fn test_new_order_payload_shape() {
        let order = NewOrder::pending(vec![NewLineItem {
            product_id: 42,
            variation_id: Some(7),
            quantity: 3,
            meta_data: vec![MetaData::new("_is_sample", json!(true))],
            subtotal: None,
            total: None,
        }]);
        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(value["payment_method"], "other");
        assert_eq!(value["status"], "pending");
        assert_eq!(value["line_items"][0]["variation_id"], 7);
        assert_eq!(value["line_items"][0]["meta_data"][0]["key"], "_is_sample");
    }
}
