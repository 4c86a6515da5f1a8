//! Command implementations for xtask
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod inspect_item;
mod migrate_item;

pub use inspect_item::InspectItem;
pub use migrate_item::MigrateItem;
