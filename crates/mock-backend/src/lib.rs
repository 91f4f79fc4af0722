//! Mock burger joint order service.
//!
//! Stands in for the real fulfillment backend during development and tests:
//! `GET /api/catalog` serves a fixed menu, `POST /api/orders` prices the
//! submitted lines against that menu and confirms with a generated order id.

pub mod menu;

use axum::routing::{get, post};
use axum::{Json, Router};
use griddle_api::models::{CatalogResponse, CreateOrderRequest, OrderConfirmation};
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

pub fn router() -> Router {
    Router::new().route("/api/catalog", get(get_catalog)).route("/api/orders", post(create_order))
}

async fn get_catalog() -> Json<CatalogResponse> {
    let items = menu::menu_items();
    info!(item_count = items.len(), "serving catalog");
    Json(CatalogResponse { items })
}

async fn create_order(Json(request): Json<CreateOrderRequest>) -> Json<OrderConfirmation> {
    let menu = menu::menu_items();

    // Unknown item ids contribute nothing to the total.
    let total: Decimal = request
        .items
        .iter()
        .filter_map(|line| {
            menu.iter()
                .find(|item| item.id.0 == line.item_id)
                .map(|item| item.price * Decimal::from(line.quantity))
        })
        .sum();

    let confirmation = OrderConfirmation {
        order_id: Uuid::new_v4().to_string(),
        total: total.round_dp(2),
        status: "confirmed".to_string(),
    };

    info!(
        order_id = %confirmation.order_id,
        line_count = request.items.len(),
        total = %confirmation.total,
        "created mock order"
    );
    Json(confirmation)
}
