//! Tools for pricing the order and submitting it to the fulfillment
//! backend. `create_order` is the only tool that crosses the process
//! boundary.

use std::sync::Arc;

use async_trait::async_trait;
use griddle_api::client::OrderSubmitter;
use griddle_api::models::OrderRequestLine;
use griddle_core::cart::Cart;
use griddle_core::currency::format_usd;
use tokio::sync::Mutex;
use tracing::{error, info};

use crate::outcome::{RefusalKind, ToolOutcome};
use crate::schema::ToolSchema;
use crate::tools::{AgentTool, ToolArgs};

pub struct CalculateOrderTotal {
    cart: Arc<Mutex<Cart>>,
}

impl CalculateOrderTotal {
    pub fn new(cart: Arc<Mutex<Cart>>) -> Self {
        Self { cart }
    }
}

#[async_trait]
impl AgentTool for CalculateOrderTotal {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "calculate_order_total",
            description: "Calculate the total price of the current order. Use this when the \
                          customer asks about the price or total.",
            parameters: vec![],
        }
    }

    async fn invoke(&self, _args: &ToolArgs) -> ToolOutcome {
        let cart = self.cart.lock().await;
        if cart.is_empty() {
            return ToolOutcome::refused(
                RefusalKind::EmptyOrder,
                "Your order is empty. Please add some items first.",
            );
        }

        let mut lines = vec!["Here's the breakdown of your order:".to_string()];
        for line in cart.lines() {
            lines.push(format!(
                "  {}x {} @ {} each = {}",
                line.quantity,
                line.name,
                format_usd(line.unit_price),
                format_usd(line.subtotal())
            ));
        }
        lines.push(format!("\nTotal: {}", format_usd(cart.total())));

        ToolOutcome::spoken(lines.join("\n"))
    }
}

pub struct CreateOrder {
    cart: Arc<Mutex<Cart>>,
    submitter: Arc<dyn OrderSubmitter>,
}

impl CreateOrder {
    pub fn new(cart: Arc<Mutex<Cart>>, submitter: Arc<dyn OrderSubmitter>) -> Self {
        Self { cart, submitter }
    }
}

#[async_trait]
impl AgentTool for CreateOrder {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "create_order",
            description: "Finalize and submit the order to the burger joint. Use this when the \
                          customer confirms they are ready to place their order.",
            parameters: vec![],
        }
    }

    async fn invoke(&self, _args: &ToolArgs) -> ToolOutcome {
        // The lock is held across the submission await: the cart observed in
        // the payload is exactly the cart cleared on success or preserved on
        // failure, and no other call can slip a mutation in between.
        let mut cart = self.cart.lock().await;
        if cart.is_empty() {
            return ToolOutcome::refused(
                RefusalKind::EmptyOrder,
                "Error: Your order is empty. Please add some items before placing your order.",
            );
        }

        let items: Vec<OrderRequestLine> = cart
            .lines()
            .iter()
            .map(|line| OrderRequestLine {
                item_id: line.item_id.0.clone(),
                quantity: line.quantity,
            })
            .collect();

        // Single attempt. Retrying here could double-submit an order the
        // backend already accepted.
        match self.submitter.create_order(&items).await {
            Ok(confirmation) => {
                cart.clear();
                info!(order_id = %confirmation.order_id, total = %confirmation.total, "order placed");
                ToolOutcome::spoken(format!(
                    "Order confirmed! Your order ID is {}. Total: {}. Thank you for your order!",
                    confirmation.order_id,
                    format_usd(confirmation.total),
                ))
            }
            Err(submission_error) => {
                error!(error = %submission_error, "order submission failed; cart preserved");
                ToolOutcome::refused(
                    RefusalKind::SubmissionFailed,
                    "Sorry, there was an error processing your order. Your items are still in \
                     your cart. Please try again in a moment.",
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Arc;

    use async_trait::async_trait;
    use griddle_api::client::{ApiError, OrderSubmitter};
    use griddle_api::models::{OrderConfirmation, OrderRequestLine};
    use griddle_core::cart::{Cart, OrderLine};
    use griddle_core::menu::ItemId;
    use rust_decimal::Decimal;
    use tokio::sync::Mutex;

    use super::{CalculateOrderTotal, CreateOrder};
    use crate::outcome::{RefusalKind, ToolOutcome};
    use crate::tools::{AgentTool, ToolArgs};

    #[derive(Default)]
    struct ScriptedSubmitter {
        state: Mutex<ScriptedState>,
    }

    #[derive(Default)]
    struct ScriptedState {
        responses: VecDeque<Result<OrderConfirmation, ApiError>>,
        submissions: Vec<Vec<OrderRequestLine>>,
    }

    impl ScriptedSubmitter {
        fn with_responses(responses: Vec<Result<OrderConfirmation, ApiError>>) -> Self {
            Self {
                state: Mutex::new(ScriptedState {
                    responses: responses.into(),
                    submissions: Vec::new(),
                }),
            }
        }

        async fn submissions(&self) -> Vec<Vec<OrderRequestLine>> {
            self.state.lock().await.submissions.clone()
        }
    }

    #[async_trait]
    impl OrderSubmitter for ScriptedSubmitter {
        async fn create_order(
            &self,
            items: &[OrderRequestLine],
        ) -> Result<OrderConfirmation, ApiError> {
            let mut state = self.state.lock().await;
            state.submissions.push(items.to_vec());
            state.responses.pop_front().unwrap_or(Err(ApiError::Status {
                endpoint: "orders",
                status: 500,
            }))
        }
    }

    fn cart_fixture() -> Arc<Mutex<Cart>> {
        let mut cart = Cart::new();
        cart.add(OrderLine {
            item_id: ItemId("burger-001".to_string()),
            quantity: 2,
            name: "Classic Burger".to_string(),
            unit_price: Decimal::new(599, 2),
        });
        cart.add(OrderLine {
            item_id: ItemId("side-001".to_string()),
            quantity: 1,
            name: "French Fries".to_string(),
            unit_price: Decimal::new(249, 2),
        });
        Arc::new(Mutex::new(cart))
    }

    fn confirmation(order_id: &str, cents: i64) -> OrderConfirmation {
        OrderConfirmation {
            order_id: order_id.to_string(),
            total: Decimal::new(cents, 2),
            status: "confirmed".to_string(),
        }
    }

    fn refusal_kind(outcome: &ToolOutcome) -> Option<RefusalKind> {
        match outcome {
            ToolOutcome::Refused { kind, .. } => Some(*kind),
            ToolOutcome::Spoken(_) => None,
        }
    }

    #[tokio::test]
    async fn calculate_total_renders_a_price_breakdown() {
        let tool = CalculateOrderTotal::new(cart_fixture());

        let outcome = tool.invoke(&ToolArgs::default()).await;
        let expected = [
            "Here's the breakdown of your order:",
            "  2x Classic Burger @ $5.99 each = $11.98",
            "  1x French Fries @ $2.49 each = $2.49",
            "",
            "Total: $14.47",
        ]
        .join("\n");
        assert_eq!(outcome.text(), expected);
    }

    #[tokio::test]
    async fn calculate_total_on_empty_order_asks_for_items() {
        let tool = CalculateOrderTotal::new(Arc::new(Mutex::new(Cart::new())));

        let outcome = tool.invoke(&ToolArgs::default()).await;
        assert_eq!(refusal_kind(&outcome), Some(RefusalKind::EmptyOrder));
        assert_eq!(outcome.text(), "Your order is empty. Please add some items first.");
    }

    #[tokio::test]
    async fn empty_cart_submission_makes_no_external_call() {
        let submitter = Arc::new(ScriptedSubmitter::default());
        let tool = CreateOrder::new(Arc::new(Mutex::new(Cart::new())), submitter.clone());

        let outcome = tool.invoke(&ToolArgs::default()).await;

        assert_eq!(refusal_kind(&outcome), Some(RefusalKind::EmptyOrder));
        assert_eq!(
            outcome.text(),
            "Error: Your order is empty. Please add some items before placing your order."
        );
        assert!(submitter.submissions().await.is_empty());
    }

    #[tokio::test]
    async fn successful_submission_clears_the_cart() {
        let cart = cart_fixture();
        let expected_total = cart.lock().await.total();
        let submitter =
            Arc::new(ScriptedSubmitter::with_responses(vec![Ok(confirmation("ord-42", 1447))]));
        let tool = CreateOrder::new(cart.clone(), submitter.clone());

        let outcome = tool.invoke(&ToolArgs::default()).await;

        assert_eq!(
            outcome.text(),
            "Order confirmed! Your order ID is ord-42. Total: $14.47. Thank you for your order!"
        );
        assert_eq!(expected_total, Decimal::new(1447, 2));
        assert!(cart.lock().await.is_empty(), "cart should be cleared after confirmation");
    }

    #[tokio::test]
    async fn payload_mirrors_cart_order() {
        let cart = cart_fixture();
        let submitter =
            Arc::new(ScriptedSubmitter::with_responses(vec![Ok(confirmation("ord-7", 1447))]));
        let tool = CreateOrder::new(cart, submitter.clone());

        tool.invoke(&ToolArgs::default()).await;

        let submissions = submitter.submissions().await;
        assert_eq!(
            submissions,
            vec![vec![
                OrderRequestLine { item_id: "burger-001".to_string(), quantity: 2 },
                OrderRequestLine { item_id: "side-001".to_string(), quantity: 1 },
            ]]
        );
    }

    #[tokio::test]
    async fn failed_submission_preserves_the_cart() {
        let cart = cart_fixture();
        let before = cart.lock().await.clone();
        let submitter = Arc::new(ScriptedSubmitter::with_responses(vec![Err(ApiError::Status {
            endpoint: "orders",
            status: 503,
        })]));
        let tool = CreateOrder::new(cart.clone(), submitter.clone());

        let outcome = tool.invoke(&ToolArgs::default()).await;

        assert_eq!(refusal_kind(&outcome), Some(RefusalKind::SubmissionFailed));
        assert_eq!(
            outcome.text(),
            "Sorry, there was an error processing your order. Your items are still in your \
             cart. Please try again in a moment."
        );
        assert_eq!(*cart.lock().await, before, "cart should be untouched after a failure");
        assert_eq!(submitter.submissions().await.len(), 1, "submission is single-attempt");
    }

    #[tokio::test]
    async fn retry_after_failure_can_succeed_with_the_same_items() {
        let cart = cart_fixture();
        let submitter = Arc::new(ScriptedSubmitter::with_responses(vec![
            Err(ApiError::Status { endpoint: "orders", status: 500 }),
            Ok(confirmation("ord-second", 1447)),
        ]));
        let tool = CreateOrder::new(cart.clone(), submitter.clone());

        let first = tool.invoke(&ToolArgs::default()).await;
        assert!(first.is_refusal());

        let second = tool.invoke(&ToolArgs::default()).await;
        assert!(!second.is_refusal());
        assert!(cart.lock().await.is_empty());

        let submissions = submitter.submissions().await;
        assert_eq!(submissions.len(), 2);
        assert_eq!(submissions[0], submissions[1], "retry should submit the preserved cart");
    }
}
