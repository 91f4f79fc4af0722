use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(pub String);

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
}

/// The menu as fetched at session start. Immutable for the session's
/// lifetime; prices already in a cart are snapshots and never re-read here.
#[derive(Default)]
pub struct Catalog {
    items: Vec<MenuItem>,
}

impl Catalog {
    pub fn new(items: Vec<MenuItem>) -> Self {
        Self { items }
    }

    pub fn find(&self, item_id: &ItemId) -> Option<&MenuItem> {
        self.items.iter().find(|item| &item.id == item_id)
    }

    /// First `limit` item ids, for "unknown item" guidance messages.
    pub fn sample_ids(&self, limit: usize) -> Vec<&str> {
        self.items.iter().take(limit).map(|item| item.id.0.as_str()).collect()
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
