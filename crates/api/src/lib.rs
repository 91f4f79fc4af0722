//! HTTP client for the order-fulfillment backend.
//!
//! Two calls cross the process boundary: the one-time catalog fetch at
//! session start and the single-attempt order submission. Both live here;
//! everything above this crate works with domain types only.

pub mod client;
pub mod models;

pub use client::{ApiError, OrderApiClient, OrderSubmitter};
pub use models::{CatalogResponse, CreateOrderRequest, OrderConfirmation, OrderRequestLine};
