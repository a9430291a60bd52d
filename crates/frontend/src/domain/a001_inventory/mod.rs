//! Inventory page: stock mutations, navigation and mobile helpers

pub mod bindings;
pub mod controller;
pub mod mobile;
pub mod model;
pub mod page;
pub mod ui;
pub mod web_page;

#[cfg(test)]
pub(crate) mod testing;

pub use controller::{ActionOutcome, InventoryPageController};
pub use model::{GlooTransport, InventoryTransport};
pub use page::InventoryPage;
pub use web_page::WebInventoryPage;
