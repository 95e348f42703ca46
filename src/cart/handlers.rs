//! REST API handlers for cart operations
//!
//! This module implements the HTTP endpoints over the cart engine and the
//! mapping from the error taxonomy to response statuses.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde_json::json;

use super::models::{
    AddToCartInput, CartMutationResponse, CartView, RemoveResponse, UpdateCartItemInput,
};
use super::state::SharedState;
use super::CartError;
use crate::woo::WooError;

/// Creates routes for cart-related operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/cart", get(list_cart))
        .route("/cart/items", post(add_item))
        .route("/cart/items/:id", put(update_item).delete(remove_item))
}

/// Endpoint: GET /cart
/// Flattens all pending orders into the display list.
async fn list_cart(State(state): State<SharedState>) -> Result<Json<CartView>, CartError> {
    state.engine.list().await.map(Json)
}

/// Endpoint: POST /cart/items
/// Adds an item, merging into an existing duplicate unless disabled.
async fn add_item(
    State(state): State<SharedState>,
    Json(input): Json<AddToCartInput>,
) -> Result<Json<CartMutationResponse>, CartError> {
    state.engine.add(input).await.map(Json)
}

/// Endpoint: PUT /cart/items/{id}
/// Applies quantity deltas to the addressed order's first line item.
async fn update_item(
    State(state): State<SharedState>,
    Path(id): Path<u64>,
    Json(input): Json<UpdateCartItemInput>,
) -> Result<Json<CartMutationResponse>, CartError> {
    state.engine.update_by_id(id, input).await.map(Json)
}

/// Endpoint: DELETE /cart/items/{id}
/// Removes the line item, deleting or rebuilding its order as needed.
async fn remove_item(
    State(state): State<SharedState>,
    Path(id): Path<u64>,
) -> Result<Json<RemoveResponse>, CartError> {
    state.engine.remove_by_id(id).await.map(Json)
}

impl IntoResponse for CartError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            CartError::Validation(_) => {
                (StatusCode::BAD_REQUEST, json!({ "error": self.to_string() }))
            }
            CartError::NotFound(_) => (StatusCode::NOT_FOUND, json!({ "error": self.to_string() })),
            // The upstream body is passed through for diagnostics.
            CartError::Upstream(WooError::Api { status, body }) => (
                StatusCode::BAD_GATEWAY,
                json!({
                    "error": "upstream request failed",
                    "upstream_status": status,
                    "upstream_body": body,
                }),
            ),
            CartError::Upstream(_) => {
                (StatusCode::BAD_GATEWAY, json!({ "error": self.to_string() }))
            }
        };
        (status, Json(body)).into_response()
    }
}
