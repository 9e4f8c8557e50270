use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::{RecipeError, RecipeResult};
use crate::types::{Category, CookingMethod, Cuisine, Difficulty, Recipe, split_ingredients};

/// Helper function to parse a cuisine label, skipping blanks with a warning.
fn parse_cuisine(s: &str) -> Option<Cuisine> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        tracing::warn!("Failed to parse cuisine: empty string provided");
        return None;
    }
    Some(Cuisine::from(trimmed))
}

fn validate_ingredients(raw: &str) -> Result<(), validator::ValidationError> {
    if split_ingredients(raw).is_empty() {
        let mut error = validator::ValidationError::new("empty_ingredients");
        error.message = Some(std::borrow::Cow::from(
            "At least 1 ingredient is required",
        ));
        return Err(error);
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateRecipeCommand {
    #[validate(length(
        min = 3,
        max = 200,
        message = "Name must be between 3 and 200 characters"
    ))]
    pub name: String,

    pub category: String,

    #[validate(length(min = 1, message = "At least 1 cuisine is required"))]
    pub cuisines: Vec<String>,

    pub cooking_method: String,
    pub difficulty: String,

    #[validate(range(min = 1, message = "Prep time must be at least 1 minute"))]
    pub prep_time_minutes: u32,

    #[validate(range(min = 1, message = "Cook time must be at least 1 minute"))]
    pub cook_time_minutes: u32,

    #[validate(range(min = 1, message = "Servings must be at least 1"))]
    pub servings: u32,

    pub calories_per_serving: u32,

    #[validate(range(min = 0.0, max = 5.0, message = "Rating must be between 0 and 5"))]
    pub rating: f32,

    /// Raw comma-separated ingredient field, exactly as typed into the form.
    #[validate(custom(function = "validate_ingredients"))]
    pub ingredients: String,

    #[validate(length(min = 1, message = "Instructions must not be empty"))]
    pub instructions: String,

    pub author: String,

    pub is_vegetarian: bool,
    pub is_vegan: bool,
    pub is_gluten_free: bool,
    pub is_dairy_free: bool,
    pub is_full_meal: bool,
    pub is_lunch: bool,
    pub is_dinner: bool,
    pub is_sweet: bool,
}

impl CreateRecipeCommand {
    /// Validates the command and builds a catalog entry from it.
    ///
    /// The new recipe gets a fresh UUID, today's creation date and a total
    /// time derived from prep plus cook time.
    pub fn into_recipe(self) -> RecipeResult<Recipe> {
        self.validate()
            .map_err(|e| RecipeError::ValidationError(e.to_string()))?;

        let cuisines: Vec<Cuisine> = self
            .cuisines
            .iter()
            .filter_map(|s| parse_cuisine(s))
            .collect();
        if cuisines.is_empty() {
            return Err(RecipeError::ValidationError(
                "At least 1 cuisine is required".to_string(),
            ));
        }

        Ok(Recipe {
            id: Uuid::new_v4().to_string(),
            name: self.name,
            category: Category::from(self.category.trim()),
            cuisines,
            cooking_method: CookingMethod::from(self.cooking_method.trim()),
            difficulty: Difficulty::parse(&self.difficulty),
            prep_time_minutes: self.prep_time_minutes,
            cook_time_minutes: self.cook_time_minutes,
            total_time_minutes: self.prep_time_minutes + self.cook_time_minutes,
            servings: self.servings,
            calories_per_serving: self.calories_per_serving,
            rating: self.rating,
            ingredients: split_ingredients(&self.ingredients),
            instructions: self.instructions,
            author: self.author,
            date_created: Utc::now().date_naive(),
            is_vegetarian: self.is_vegetarian,
            is_vegan: self.is_vegan,
            is_gluten_free: self.is_gluten_free,
            is_dairy_free: self.is_dairy_free,
            is_full_meal: self.is_full_meal,
            is_lunch: self.is_lunch,
            is_dinner: self.is_dinner,
            is_sweet: self.is_sweet,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateRecipeCommand {
    pub id: String,

    #[validate(length(
        min = 3,
        max = 200,
        message = "Name must be between 3 and 200 characters"
    ))]
    pub name: String,

    pub category: String,

    #[validate(length(min = 1, message = "At least 1 cuisine is required"))]
    pub cuisines: Vec<String>,

    pub cooking_method: String,
    pub difficulty: String,

    #[validate(range(min = 1, message = "Prep time must be at least 1 minute"))]
    pub prep_time_minutes: u32,

    #[validate(range(min = 1, message = "Cook time must be at least 1 minute"))]
    pub cook_time_minutes: u32,

    #[validate(range(min = 1, message = "Servings must be at least 1"))]
    pub servings: u32,

    pub calories_per_serving: u32,

    #[validate(range(min = 0.0, max = 5.0, message = "Rating must be between 0 and 5"))]
    pub rating: f32,

    #[validate(custom(function = "validate_ingredients"))]
    pub ingredients: String,

    #[validate(length(min = 1, message = "Instructions must not be empty"))]
    pub instructions: String,

    pub author: String,

    pub is_vegetarian: bool,
    pub is_vegan: bool,
    pub is_gluten_free: bool,
    pub is_dairy_free: bool,
    pub is_full_meal: bool,
    pub is_lunch: bool,
    pub is_dinner: bool,
    pub is_sweet: bool,
}

impl UpdateRecipeCommand {
    /// Validates the command and builds the replacement record for
    /// `existing`. Identifier and creation date carry over unchanged.
    pub fn apply_to(self, existing: &Recipe) -> RecipeResult<Recipe> {
        self.validate()
            .map_err(|e| RecipeError::ValidationError(e.to_string()))?;

        if self.id != existing.id {
            return Err(RecipeError::ValidationError(format!(
                "Command targets recipe '{}' but was applied to '{}'",
                self.id, existing.id
            )));
        }

        let cuisines: Vec<Cuisine> = self
            .cuisines
            .iter()
            .filter_map(|s| parse_cuisine(s))
            .collect();
        if cuisines.is_empty() {
            return Err(RecipeError::ValidationError(
                "At least 1 cuisine is required".to_string(),
            ));
        }

        Ok(Recipe {
            id: existing.id.clone(),
            name: self.name,
            category: Category::from(self.category.trim()),
            cuisines,
            cooking_method: CookingMethod::from(self.cooking_method.trim()),
            difficulty: Difficulty::parse(&self.difficulty),
            prep_time_minutes: self.prep_time_minutes,
            cook_time_minutes: self.cook_time_minutes,
            total_time_minutes: self.prep_time_minutes + self.cook_time_minutes,
            servings: self.servings,
            calories_per_serving: self.calories_per_serving,
            rating: self.rating,
            ingredients: split_ingredients(&self.ingredients),
            instructions: self.instructions,
            author: self.author,
            date_created: existing.date_created,
            is_vegetarian: self.is_vegetarian,
            is_vegan: self.is_vegan,
            is_gluten_free: self.is_gluten_free,
            is_dairy_free: self.is_dairy_free,
            is_full_meal: self.is_full_meal,
            is_lunch: self.is_lunch,
            is_dinner: self.is_dinner,
            is_sweet: self.is_sweet,
        })
    }
}
