pub mod aggregation;
pub mod categorization;

pub use aggregation::{ShoppingItem, ShoppingList};
pub use categorization::{Aisle, categorize};
