use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::menu::ItemId;

/// One cart entry. `name` and `unit_price` are copied from the menu item at
/// add-time so catalog changes never retroactively reprice an open order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub item_id: ItemId,
    pub quantity: u32,
    pub name: String,
    pub unit_price: Decimal,
}

impl OrderLine {
    pub fn subtotal(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Outcome of a successful removal, carrying what the spoken confirmation
/// needs: the snapshot name and whether the whole line went away.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemovedLine {
    pub name: String,
    pub removed_quantity: u32,
    pub fully_removed: bool,
}

/// The per-conversation order. Lines are unique by item id and every line
/// keeps `quantity >= 1`; a line reduced to zero is deleted, never retained.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Cart {
    lines: Vec<OrderLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a line. An existing line with the same item id absorbs the
    /// quantity (merge, not overwrite); otherwise the line is appended.
    pub fn add(&mut self, line: OrderLine) {
        match self.lines.iter_mut().find(|existing| existing.item_id == line.item_id) {
            Some(existing) => existing.quantity += line.quantity,
            None => self.lines.push(line),
        }
    }

    /// Removes `quantity` of an item, or the whole line when `quantity` is
    /// `None` or at least the current quantity. `None` result means the item
    /// was not in the cart and nothing changed.
    pub fn remove(&mut self, item_id: &ItemId, quantity: Option<u32>) -> Option<RemovedLine> {
        let index = self.lines.iter().position(|line| &line.item_id == item_id)?;
        let current = self.lines[index].quantity;

        match quantity {
            Some(requested) if requested < current => {
                self.lines[index].quantity = current - requested;
                Some(RemovedLine {
                    name: self.lines[index].name.clone(),
                    removed_quantity: requested,
                    fully_removed: false,
                })
            }
            _ => {
                let line = self.lines.remove(index);
                Some(RemovedLine {
                    name: line.name,
                    removed_quantity: current,
                    fully_removed: true,
                })
            }
        }
    }

    pub fn total(&self) -> Decimal {
        self.lines.iter().map(OrderLine::subtotal).sum()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{Cart, OrderLine};
    use crate::menu::ItemId;

    fn line(id: &str, name: &str, quantity: u32, cents: i64) -> OrderLine {
        OrderLine {
            item_id: ItemId(id.to_string()),
            quantity,
            name: name.to_string(),
            unit_price: Decimal::new(cents, 2),
        }
    }

    #[test]
    fn adding_same_item_merges_into_one_line() {
        let mut cart = Cart::new();
        cart.add(line("burger-001", "Classic Burger", 2, 599));
        cart.add(line("burger-001", "Classic Burger", 3, 599));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].quantity, 5);
    }

    #[test]
    fn adding_distinct_items_preserves_order() {
        let mut cart = Cart::new();
        cart.add(line("burger-001", "Classic Burger", 1, 599));
        cart.add(line("side-001", "Fries", 1, 249));

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.lines()[0].item_id, ItemId("burger-001".to_string()));
        assert_eq!(cart.lines()[1].item_id, ItemId("side-001".to_string()));
    }

    #[test]
    fn partial_removal_decrements_and_retains_line() {
        let mut cart = Cart::new();
        cart.add(line("burger-001", "Classic Burger", 3, 599));

        let removed = cart
            .remove(&ItemId("burger-001".to_string()), Some(1))
            .expect("line should be found");

        assert!(!removed.fully_removed);
        assert_eq!(removed.removed_quantity, 1);
        assert_eq!(cart.lines()[0].quantity, 2);
    }

    #[test]
    fn removing_at_least_current_quantity_deletes_line() {
        let mut cart = Cart::new();
        cart.add(line("burger-001", "Classic Burger", 2, 599));

        let removed = cart
            .remove(&ItemId("burger-001".to_string()), Some(5))
            .expect("line should be found");

        assert!(removed.fully_removed);
        assert_eq!(removed.removed_quantity, 2);
        assert!(cart.is_empty());
    }

    #[test]
    fn omitted_quantity_deletes_line() {
        let mut cart = Cart::new();
        cart.add(line("burger-001", "Classic Burger", 4, 599));

        let removed =
            cart.remove(&ItemId("burger-001".to_string()), None).expect("line should be found");

        assert!(removed.fully_removed);
        assert_eq!(removed.removed_quantity, 4);
        assert!(cart.is_empty());
    }

    #[test]
    fn removing_absent_item_is_a_noop() {
        let mut cart = Cart::new();
        cart.add(line("burger-001", "Classic Burger", 1, 599));
        let before = cart.clone();

        assert!(cart.remove(&ItemId("drink-001".to_string()), Some(1)).is_none());
        assert_eq!(cart, before);
    }

    #[test]
    fn total_follows_the_worked_example() {
        let mut cart = Cart::new();

        cart.add(line("burger-001", "Classic Burger", 2, 599));
        assert_eq!(cart.total(), Decimal::new(1198, 2));

        cart.add(line("burger-001", "Classic Burger", 1, 599));
        assert_eq!(cart.total(), Decimal::new(1797, 2));

        cart.remove(&ItemId("burger-001".to_string()), Some(1)).expect("line should be found");
        assert_eq!(cart.total(), Decimal::new(1198, 2));

        cart.add(line("side-001", "Fries", 1, 249));
        assert_eq!(cart.total(), Decimal::new(1447, 2));
    }

    #[test]
    fn clear_empties_the_cart() {
        let mut cart = Cart::new();
        cart.add(line("burger-001", "Classic Burger", 2, 599));
        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.total(), Decimal::ZERO);
    }
}
