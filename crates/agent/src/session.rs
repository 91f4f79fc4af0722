use std::sync::Arc;

use griddle_api::client::OrderSubmitter;
use griddle_core::cart::Cart;
use griddle_core::menu::Catalog;
use tokio::sync::Mutex;

use crate::tools::{
    AddItemToOrder, CalculateOrderTotal, CreateOrder, ReadCurrentOrder, RemoveItemFromOrder,
    ToolRegistry,
};

/// Per-conversation state: one cart, one immutable catalog. Tools receive
/// cloned handles at construction, so concurrent sessions never share state.
/// The cart mutex serializes mutations even if the calling environment ever
/// overlaps function calls; under the normal one-call-at-a-time contract it
/// is uncontended.
pub struct OrderSession {
    cart: Arc<Mutex<Cart>>,
    catalog: Arc<Catalog>,
}

impl OrderSession {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { cart: Arc::new(Mutex::new(Cart::new())), catalog }
    }

    pub fn cart(&self) -> Arc<Mutex<Cart>> {
        self.cart.clone()
    }

    pub fn catalog(&self) -> Arc<Catalog> {
        self.catalog.clone()
    }
}

/// Wires the five order tools for one session.
pub fn build_registry(session: &OrderSession, submitter: Arc<dyn OrderSubmitter>) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(AddItemToOrder::new(session.cart(), session.catalog()));
    registry.register(RemoveItemFromOrder::new(session.cart()));
    registry.register(ReadCurrentOrder::new(session.cart()));
    registry.register(CalculateOrderTotal::new(session.cart()));
    registry.register(CreateOrder::new(session.cart(), submitter));
    registry
}
