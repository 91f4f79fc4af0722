pub mod cart;
pub mod config;
pub mod currency;
pub mod menu;

pub use cart::{Cart, OrderLine, RemovedLine};
pub use currency::format_usd;
pub use menu::{Catalog, ItemId, MenuItem};
