pub mod commands;
pub mod dataset;
pub mod error;
pub mod repository;
pub mod types;

pub use commands::{CreateRecipeCommand, UpdateRecipeCommand};
pub use dataset::{recipes_from_csv, recipes_from_json};
pub use error::{RecipeError, RecipeResult};
pub use repository::{ListFilter, RecipeRepository};
pub use types::{
    Category, CookingMethod, Cuisine, Difficulty, MealTime, Recipe, split_ingredients,
};
