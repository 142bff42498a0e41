mod persistence;
mod store;

pub use persistence::{load_items, save_items};
pub use store::Catalog;
