mod bundle;
mod item;
mod plan;

pub use bundle::{Bundle, Totals};
pub use item::{Item, Slot, SlotHint};
pub use plan::Plan;
