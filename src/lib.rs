//! WooCommerce Cart Backend
//!
//! Backend-for-frontend that exposes a shopping-cart API on top of a
//! WooCommerce store. WooCommerce has no native cart object, so orders in
//! "pending" status are repurposed as cart containers; the cart module
//! reconciles line items across them.

// Domain modules
pub mod cart;
pub mod woo;

// Infrastructure
pub mod config;
pub mod router;
