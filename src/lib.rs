pub mod catalog;
pub mod cli;
pub mod error;
pub mod interface;
pub mod models;
pub mod planner;

pub use error::{DietError, Result};
pub use models::{Bundle, Item, Plan, Slot, SlotHint, Totals};
