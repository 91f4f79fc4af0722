use griddle_core::menu::{ItemId, MenuItem};
use rust_decimal::Decimal;

fn entry(id: &str, name: &str, description: &str, cents: i64, category: &str) -> MenuItem {
    MenuItem {
        id: ItemId(id.to_string()),
        name: name.to_string(),
        description: description.to_string(),
        price: Decimal::new(cents, 2),
        category: category.to_string(),
    }
}

/// The fixed burger joint menu served by the mock backend. Ordered by
/// category so the catalog-driven system prompt groups naturally.
pub fn menu_items() -> Vec<MenuItem> {
    vec![
        entry(
            "burger-001",
            "Classic Burger",
            "Quarter-pound beef patty with lettuce, tomato, and house sauce",
            599,
            "burger",
        ),
        entry(
            "burger-002",
            "Cheeseburger",
            "Classic burger topped with melted cheddar",
            649,
            "burger",
        ),
        entry(
            "burger-003",
            "Bacon Smash",
            "Smashed double patty with crispy bacon and smoked aioli",
            799,
            "burger",
        ),
        entry(
            "burger-004",
            "Veggie Burger",
            "Grilled black-bean patty with avocado spread",
            629,
            "burger",
        ),
        entry("side-001", "French Fries", "Crinkle-cut fries with sea salt", 249, "side"),
        entry("side-002", "Onion Rings", "Beer-battered onion rings", 329, "side"),
        entry("side-003", "Side Salad", "Mixed greens with ranch dressing", 399, "side"),
        entry("drink-001", "Fountain Soda", "Your choice of fountain drink", 199, "drink"),
        entry("drink-002", "Milkshake", "Hand-spun vanilla milkshake", 449, "drink"),
        entry("drink-003", "Iced Tea", "Fresh-brewed unsweetened iced tea", 229, "drink"),
        entry("dessert-001", "Apple Pie", "Warm hand pie with cinnamon", 299, "dessert"),
    ]
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::menu_items;

    #[test]
    fn menu_ids_are_unique() {
        let items = menu_items();
        let ids: HashSet<_> = items.iter().map(|item| item.id.0.as_str()).collect();
        assert_eq!(ids.len(), items.len());
    }

    #[test]
    fn menu_prices_are_positive() {
        for item in menu_items() {
            assert!(item.price.is_sign_positive(), "{} should have a positive price", item.id);
        }
    }
}
