pub mod config;
pub mod observability;
pub mod render;

pub use weekplate_mealplan as mealplan;
pub use weekplate_recipe as recipe;
pub use weekplate_shopping as shopping;
