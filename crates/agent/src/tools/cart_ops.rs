//! Tools that read and mutate the session cart without leaving the process.

use std::sync::Arc;

use async_trait::async_trait;
use griddle_core::cart::{Cart, OrderLine};
use griddle_core::currency::format_usd;
use griddle_core::menu::{Catalog, ItemId};
use serde_json::json;
use tokio::sync::Mutex;
use tracing::info;

use crate::outcome::{RefusalKind, ToolOutcome};
use crate::schema::{ParameterKind, ParameterSpec, ToolSchema};
use crate::tools::{AgentTool, ToolArgs};

pub struct AddItemToOrder {
    cart: Arc<Mutex<Cart>>,
    catalog: Arc<Catalog>,
}

impl AddItemToOrder {
    pub fn new(cart: Arc<Mutex<Cart>>, catalog: Arc<Catalog>) -> Self {
        Self { cart, catalog }
    }
}

#[async_trait]
impl AgentTool for AddItemToOrder {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "add_item_to_order",
            description: "Add menu items to the customer's order. Use this when the customer \
                          wants to order something.",
            parameters: vec![
                ParameterSpec {
                    name: "item_id",
                    description: "The ID of the menu item to add (e.g., 'burger-001', \
                                  'side-001', 'drink-001')",
                    kind: ParameterKind::String,
                    required: true,
                    default: None,
                },
                ParameterSpec {
                    name: "quantity",
                    description: "The number of items to add (default: 1)",
                    kind: ParameterKind::Integer,
                    required: false,
                    default: Some(json!(1)),
                },
            ],
        }
    }

    async fn invoke(&self, args: &ToolArgs) -> ToolOutcome {
        let Some(item_id) = args.string("item_id") else {
            return ToolOutcome::refused(RefusalKind::InvalidArguments, "Error: item_id is required");
        };

        // The schema default makes "quantity" always present at this point;
        // None means the caller sent something that is not an integer.
        let quantity = match args.integer("quantity") {
            Some(value) if value >= 1 => match u32::try_from(value) {
                Ok(value) => value,
                Err(_) => {
                    return ToolOutcome::refused(
                        RefusalKind::InvalidArguments,
                        "Error: quantity is too large",
                    )
                }
            },
            Some(_) => {
                return ToolOutcome::refused(
                    RefusalKind::InvalidArguments,
                    "Error: quantity must be at least 1",
                )
            }
            None => {
                return ToolOutcome::refused(
                    RefusalKind::InvalidArguments,
                    "Error: quantity must be a whole number",
                )
            }
        };

        let item_id = ItemId(item_id.to_string());
        let Some(menu_item) = self.catalog.find(&item_id) else {
            let available = self.catalog.sample_ids(5).join(", ");
            return ToolOutcome::refused(
                RefusalKind::UnknownMenuItem,
                format!(
                    "Error: Item '{item_id}' not found in menu. Available items include: {available}"
                ),
            );
        };

        let mut cart = self.cart.lock().await;
        cart.add(OrderLine {
            item_id: item_id.clone(),
            quantity,
            name: menu_item.name.clone(),
            unit_price: menu_item.price,
        });
        let total = cart.total();
        drop(cart);

        info!(item_id = %item_id, quantity, "added item to order");
        ToolOutcome::spoken(format!(
            "Added {quantity} {name}(s) to your order. Current order total: {total}",
            name = menu_item.name,
            total = format_usd(total),
        ))
    }
}

pub struct RemoveItemFromOrder {
    cart: Arc<Mutex<Cart>>,
}

impl RemoveItemFromOrder {
    pub fn new(cart: Arc<Mutex<Cart>>) -> Self {
        Self { cart }
    }
}

#[async_trait]
impl AgentTool for RemoveItemFromOrder {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "remove_item_from_order",
            description: "Remove items from the customer's order. Use this when the customer \
                          wants to remove or change items.",
            parameters: vec![
                ParameterSpec {
                    name: "item_id",
                    description: "The ID of the menu item to remove",
                    kind: ParameterKind::String,
                    required: true,
                    default: None,
                },
                ParameterSpec {
                    name: "quantity",
                    description: "The number of items to remove. If not specified, removes all \
                                  of that item.",
                    kind: ParameterKind::Integer,
                    required: false,
                    default: None,
                },
            ],
        }
    }

    async fn invoke(&self, args: &ToolArgs) -> ToolOutcome {
        let Some(item_id) = args.string("item_id") else {
            return ToolOutcome::refused(RefusalKind::InvalidArguments, "Error: item_id is required");
        };

        let quantity = if args.contains("quantity") {
            match args.integer("quantity") {
                // A request beyond u32 range removes everything anyway.
                Some(value) if value >= 1 => Some(u32::try_from(value).unwrap_or(u32::MAX)),
                _ => {
                    return ToolOutcome::refused(
                        RefusalKind::InvalidArguments,
                        "Error: quantity to remove must be at least 1",
                    )
                }
            }
        } else {
            None
        };

        let item_id = ItemId(item_id.to_string());
        let mut cart = self.cart.lock().await;
        let Some(removed) = cart.remove(&item_id, quantity) else {
            return ToolOutcome::refused(
                RefusalKind::NotInOrder,
                format!("Error: Item '{item_id}' not found in your order"),
            );
        };
        let now_empty = cart.is_empty();
        let total = cart.total();
        drop(cart);

        info!(
            item_id = %item_id,
            removed_quantity = removed.removed_quantity,
            fully_removed = removed.fully_removed,
            "removed item from order"
        );

        if now_empty {
            return ToolOutcome::spoken(format!(
                "Removed all {} from your order. Your order is now empty.",
                removed.name
            ));
        }

        let total = format_usd(total);
        if removed.fully_removed {
            ToolOutcome::spoken(format!(
                "Removed all {} from your order. Current order total: {total}",
                removed.name
            ))
        } else {
            ToolOutcome::spoken(format!(
                "Removed {} {}(s) from your order. Current order total: {total}",
                removed.removed_quantity, removed.name
            ))
        }
    }
}

pub struct ReadCurrentOrder {
    cart: Arc<Mutex<Cart>>,
}

impl ReadCurrentOrder {
    pub fn new(cart: Arc<Mutex<Cart>>) -> Self {
        Self { cart }
    }
}

#[async_trait]
impl AgentTool for ReadCurrentOrder {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "read_current_order",
            description: "Read back the current order to confirm what the customer has ordered. \
                          Use this when the customer asks to review their order or when you need \
                          to confirm items.",
            parameters: vec![],
        }
    }

    async fn invoke(&self, _args: &ToolArgs) -> ToolOutcome {
        let cart = self.cart.lock().await;
        if cart.is_empty() {
            return ToolOutcome::spoken("Your order is currently empty.");
        }

        let mut lines = vec!["Here's your current order:".to_string()];
        for line in cart.lines() {
            lines.push(format!(
                "  {}x {} - {}",
                line.quantity,
                line.name,
                format_usd(line.subtotal())
            ));
        }
        lines.push(format!("\nTotal: {}", format_usd(cart.total())));

        ToolOutcome::spoken(lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use griddle_core::cart::Cart;
    use griddle_core::menu::{Catalog, ItemId, MenuItem};
    use rust_decimal::Decimal;
    use serde_json::json;
    use tokio::sync::Mutex;

    use super::{AddItemToOrder, ReadCurrentOrder, RemoveItemFromOrder};
    use crate::outcome::{RefusalKind, ToolOutcome};
    use crate::tools::{AgentTool, ToolArgs};

    fn catalog_fixture() -> Arc<Catalog> {
        let item = |id: &str, name: &str, cents: i64| MenuItem {
            id: ItemId(id.to_string()),
            name: name.to_string(),
            description: format!("{name} from the grill"),
            price: Decimal::new(cents, 2),
            category: "burger".to_string(),
        };
        Arc::new(Catalog::new(vec![
            item("burger-001", "Classic Burger", 599),
            item("side-001", "French Fries", 249),
        ]))
    }

    // Tests invoke tools directly, bypassing dispatch, so the quantity
    // default is passed explicitly where a scenario needs it.
    fn args(value: serde_json::Value) -> ToolArgs {
        ToolArgs::new(value)
    }

    fn refusal_kind(outcome: &ToolOutcome) -> Option<RefusalKind> {
        match outcome {
            ToolOutcome::Refused { kind, .. } => Some(*kind),
            ToolOutcome::Spoken(_) => None,
        }
    }

    #[tokio::test]
    async fn add_merges_quantities_and_reports_running_total() {
        let cart = Arc::new(Mutex::new(Cart::new()));
        let tool = AddItemToOrder::new(cart.clone(), catalog_fixture());

        let first = tool.invoke(&args(json!({"item_id": "burger-001", "quantity": 2}))).await;
        assert_eq!(
            first.text(),
            "Added 2 Classic Burger(s) to your order. Current order total: $11.98"
        );

        let second = tool.invoke(&args(json!({"item_id": "burger-001", "quantity": 1}))).await;
        assert_eq!(
            second.text(),
            "Added 1 Classic Burger(s) to your order. Current order total: $17.97"
        );

        let cart = cart.lock().await;
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].quantity, 3);
    }

    #[tokio::test]
    async fn add_rejects_invalid_quantity_without_mutation() {
        let cart = Arc::new(Mutex::new(Cart::new()));
        let tool = AddItemToOrder::new(cart.clone(), catalog_fixture());

        let outcome = tool.invoke(&args(json!({"item_id": "burger-001", "quantity": 0}))).await;
        assert_eq!(refusal_kind(&outcome), Some(RefusalKind::InvalidArguments));
        assert_eq!(outcome.text(), "Error: quantity must be at least 1");
        assert!(cart.lock().await.is_empty());
    }

    #[tokio::test]
    async fn add_rejects_missing_item_id() {
        let cart = Arc::new(Mutex::new(Cart::new()));
        let tool = AddItemToOrder::new(cart.clone(), catalog_fixture());

        let outcome = tool.invoke(&args(json!({"quantity": 1}))).await;
        assert_eq!(refusal_kind(&outcome), Some(RefusalKind::InvalidArguments));
        assert_eq!(outcome.text(), "Error: item_id is required");
    }

    #[tokio::test]
    async fn add_lists_available_ids_for_unknown_item() {
        let cart = Arc::new(Mutex::new(Cart::new()));
        let tool = AddItemToOrder::new(cart.clone(), catalog_fixture());

        let outcome = tool.invoke(&args(json!({"item_id": "pizza-001", "quantity": 1}))).await;
        assert_eq!(refusal_kind(&outcome), Some(RefusalKind::UnknownMenuItem));
        assert_eq!(
            outcome.text(),
            "Error: Item 'pizza-001' not found in menu. Available items include: burger-001, side-001"
        );
        assert!(cart.lock().await.is_empty());
    }

    #[tokio::test]
    async fn remove_distinguishes_partial_and_full_removal() {
        let cart = Arc::new(Mutex::new(Cart::new()));
        let add = AddItemToOrder::new(cart.clone(), catalog_fixture());
        let remove = RemoveItemFromOrder::new(cart.clone());

        add.invoke(&args(json!({"item_id": "burger-001", "quantity": 3}))).await;
        add.invoke(&args(json!({"item_id": "side-001", "quantity": 1}))).await;

        let partial = remove.invoke(&args(json!({"item_id": "burger-001", "quantity": 1}))).await;
        assert_eq!(
            partial.text(),
            "Removed 1 Classic Burger(s) from your order. Current order total: $14.47"
        );

        let full = remove.invoke(&args(json!({"item_id": "burger-001"}))).await;
        assert_eq!(
            full.text(),
            "Removed all Classic Burger from your order. Current order total: $2.49"
        );

        let last = remove.invoke(&args(json!({"item_id": "side-001", "quantity": 9}))).await;
        assert_eq!(
            last.text(),
            "Removed all French Fries from your order. Your order is now empty."
        );
        assert!(cart.lock().await.is_empty());
    }

    #[tokio::test]
    async fn remove_reports_items_not_in_the_order() {
        let cart = Arc::new(Mutex::new(Cart::new()));
        let remove = RemoveItemFromOrder::new(cart.clone());

        let outcome = remove.invoke(&args(json!({"item_id": "burger-001"}))).await;
        assert_eq!(refusal_kind(&outcome), Some(RefusalKind::NotInOrder));
        assert_eq!(outcome.text(), "Error: Item 'burger-001' not found in your order");
    }

    #[tokio::test]
    async fn remove_rejects_zero_quantity_without_mutation() {
        let cart = Arc::new(Mutex::new(Cart::new()));
        let add = AddItemToOrder::new(cart.clone(), catalog_fixture());
        let remove = RemoveItemFromOrder::new(cart.clone());

        add.invoke(&args(json!({"item_id": "burger-001", "quantity": 2}))).await;
        let outcome = remove.invoke(&args(json!({"item_id": "burger-001", "quantity": 0}))).await;

        assert_eq!(refusal_kind(&outcome), Some(RefusalKind::InvalidArguments));
        assert_eq!(outcome.text(), "Error: quantity to remove must be at least 1");
        assert_eq!(cart.lock().await.lines()[0].quantity, 2);
    }

    #[tokio::test]
    async fn read_renders_lines_and_grand_total() {
        let cart = Arc::new(Mutex::new(Cart::new()));
        let add = AddItemToOrder::new(cart.clone(), catalog_fixture());
        let read = ReadCurrentOrder::new(cart.clone());

        let empty = read.invoke(&ToolArgs::default()).await;
        assert_eq!(empty.text(), "Your order is currently empty.");

        add.invoke(&args(json!({"item_id": "burger-001", "quantity": 2}))).await;
        add.invoke(&args(json!({"item_id": "side-001", "quantity": 1}))).await;

        let outcome = read.invoke(&ToolArgs::default()).await;
        assert_eq!(
            outcome.text(),
            "Here's your current order:\n  2x Classic Burger - $11.98\n  1x French Fries - $2.49\n\nTotal: $14.47"
        );
    }
}
