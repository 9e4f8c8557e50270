use std::collections::HashMap;

use rand::prelude::IndexedRandom;

use crate::error::{RecipeError, RecipeResult};
use crate::types::{Category, Cuisine, MealTime, Recipe};

/// Optional criteria for `RecipeRepository::list`. Empty filter matches every
/// recipe.
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    pub category: Option<Category>,
    pub cuisine: Option<Cuisine>,
    pub search: Option<String>,
}

/// In-memory recipe catalog. Owns its recipes; every read path hands out
/// borrows so a generated plan can reference recipes without cloning them.
#[derive(Debug, Default)]
pub struct RecipeRepository {
    recipes: Vec<Recipe>,
    index: HashMap<String, usize>,
}

impl RecipeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a repository from parsed dataset rows. Rows that reuse an id
    /// already in the catalog are skipped with a warning, first row wins.
    pub fn from_recipes(recipes: Vec<Recipe>) -> Self {
        let mut repository = Self::new();
        for recipe in recipes {
            if let Err(RecipeError::DuplicateId(id)) = repository.insert(recipe) {
                tracing::warn!("Skipping recipe with duplicate id '{}'", id);
            }
        }
        repository
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes.iter()
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Recipe> {
        self.index.get(id).map(|&position| &self.recipes[position])
    }

    pub fn insert(&mut self, recipe: Recipe) -> RecipeResult<()> {
        if self.index.contains_key(&recipe.id) {
            return Err(RecipeError::DuplicateId(recipe.id));
        }
        self.index.insert(recipe.id.clone(), self.recipes.len());
        self.recipes.push(recipe);
        Ok(())
    }

    /// Replaces the stored recipe with the same id. The stored creation date
    /// survives the update, the rest of the record is taken from `recipe`.
    pub fn update(&mut self, recipe: Recipe) -> RecipeResult<()> {
        let position = *self
            .index
            .get(&recipe.id)
            .ok_or_else(|| RecipeError::NotFound(recipe.id.clone()))?;
        let date_created = self.recipes[position].date_created;
        self.recipes[position] = Recipe {
            date_created,
            ..recipe
        };
        Ok(())
    }

    pub fn remove(&mut self, id: &str) -> RecipeResult<Recipe> {
        let position = self
            .index
            .remove(id)
            .ok_or_else(|| RecipeError::NotFound(id.to_string()))?;
        let removed = self.recipes.remove(position);
        for entry in self.index.values_mut() {
            if *entry > position {
                *entry -= 1;
            }
        }
        Ok(removed)
    }

    /// All recipes flagged as suitable for the given meal time, in catalog
    /// order.
    pub fn suitable_for(&self, meal_time: MealTime) -> Vec<&Recipe> {
        self.recipes
            .iter()
            .filter(|recipe| recipe.is_suitable_for(meal_time))
            .collect()
    }

    /// Case-insensitive substring search over name, ingredient tokens and
    /// author.
    pub fn search(&self, query: &str) -> Vec<&Recipe> {
        self.list(&ListFilter {
            search: Some(query.to_string()),
            ..ListFilter::default()
        })
    }

    pub fn list(&self, filter: &ListFilter) -> Vec<&Recipe> {
        let needle = filter
            .search
            .as_deref()
            .map(|query| query.trim().to_lowercase());
        self.recipes
            .iter()
            .filter(|recipe| {
                filter
                    .category
                    .as_ref()
                    .is_none_or(|category| recipe.category == *category)
            })
            .filter(|recipe| {
                filter
                    .cuisine
                    .as_ref()
                    .is_none_or(|cuisine| recipe.cuisines.contains(cuisine))
            })
            .filter(|recipe| {
                needle
                    .as_deref()
                    .is_none_or(|needle| needle.is_empty() || matches_search(recipe, needle))
            })
            .collect()
    }

    /// Uniform random pick across the whole catalog.
    pub fn random_recipe(&self) -> Option<&Recipe> {
        let mut rng = rand::rng();
        self.recipes.choose(&mut rng)
    }
}

fn matches_search(recipe: &Recipe, needle: &str) -> bool {
    recipe.name.to_lowercase().contains(needle)
        || recipe.author.to_lowercase().contains(needle)
        || recipe
            .ingredients
            .iter()
            .any(|ingredient| ingredient.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn create_test_recipe(id: &str, name: &str) -> Recipe {
        Recipe {
            id: id.to_string(),
            name: name.to_string(),
            category: Category::MainCourse,
            cuisines: vec![Cuisine::Italian],
            cooking_method: crate::types::CookingMethod::Baking,
            difficulty: crate::types::Difficulty::Easy,
            prep_time_minutes: 10,
            cook_time_minutes: 20,
            total_time_minutes: 30,
            servings: 4,
            calories_per_serving: 450,
            rating: 4.2,
            ingredients: vec!["pasta".to_string(), "tomato sauce".to_string()],
            instructions: "Boil and combine.".to_string(),
            author: "Chef Rossi".to_string(),
            date_created: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            is_vegetarian: true,
            is_vegan: false,
            is_gluten_free: false,
            is_dairy_free: true,
            is_full_meal: true,
            is_lunch: true,
            is_dinner: true,
            is_sweet: false,
        }
    }

    #[test]
    fn test_insert_rejects_duplicate_id() {
        let mut repository = RecipeRepository::new();
        repository.insert(create_test_recipe("1", "First")).unwrap();

        let result = repository.insert(create_test_recipe("1", "Second"));
        assert!(matches!(result, Err(RecipeError::DuplicateId(_))));
        assert_eq!(repository.len(), 1);
        assert_eq!(repository.find_by_id("1").unwrap().name, "First");
    }

    #[test]
    fn test_from_recipes_keeps_first_on_duplicate() {
        let repository = RecipeRepository::from_recipes(vec![
            create_test_recipe("7", "Original"),
            create_test_recipe("7", "Copy"),
            create_test_recipe("8", "Second"),
        ]);

        assert_eq!(repository.len(), 2);
        assert_eq!(repository.find_by_id("7").unwrap().name, "Original");
    }

    #[test]
    fn test_update_preserves_creation_date() {
        let mut repository = RecipeRepository::new();
        repository.insert(create_test_recipe("1", "First")).unwrap();

        let mut updated = create_test_recipe("1", "Renamed");
        updated.date_created = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        repository.update(updated).unwrap();

        let stored = repository.find_by_id("1").unwrap();
        assert_eq!(stored.name, "Renamed");
        assert_eq!(
            stored.date_created,
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
    }

    #[test]
    fn test_update_unknown_id_fails() {
        let mut repository = RecipeRepository::new();
        let result = repository.update(create_test_recipe("404", "Ghost"));
        assert!(matches!(result, Err(RecipeError::NotFound(_))));
    }

    #[test]
    fn test_remove_keeps_lookups_consistent() {
        let mut repository = RecipeRepository::new();
        repository.insert(create_test_recipe("1", "First")).unwrap();
        repository.insert(create_test_recipe("2", "Second")).unwrap();
        repository.insert(create_test_recipe("3", "Third")).unwrap();

        let removed = repository.remove("2").unwrap();
        assert_eq!(removed.name, "Second");
        assert_eq!(repository.len(), 2);
        assert!(repository.find_by_id("2").is_none());
        assert_eq!(repository.find_by_id("3").unwrap().name, "Third");
    }

    #[test]
    fn test_suitable_for_filters_on_flags() {
        let mut lunch_only = create_test_recipe("1", "Lunch Only");
        lunch_only.is_dinner = false;
        let mut dinner_only = create_test_recipe("2", "Dinner Only");
        dinner_only.is_lunch = false;

        let repository = RecipeRepository::from_recipes(vec![lunch_only, dinner_only]);

        let lunches = repository.suitable_for(MealTime::Lunch);
        assert_eq!(lunches.len(), 1);
        assert_eq!(lunches[0].name, "Lunch Only");

        let dinners = repository.suitable_for(MealTime::Dinner);
        assert_eq!(dinners.len(), 1);
        assert_eq!(dinners[0].name, "Dinner Only");
    }

    #[test]
    fn test_search_covers_name_ingredients_and_author() {
        let mut by_ingredient = create_test_recipe("1", "Weeknight Bake");
        by_ingredient.ingredients = vec!["chicken thighs".to_string()];
        let mut by_author = create_test_recipe("2", "Simple Salad");
        by_author.author = "Maria Chicken".to_string();
        let unrelated = create_test_recipe("3", "Lentil Soup");

        let repository =
            RecipeRepository::from_recipes(vec![by_ingredient, by_author, unrelated]);

        let hits = repository.search("CHICKEN");
        let names: Vec<&str> = hits.iter().map(|recipe| recipe.name.as_str()).collect();
        assert_eq!(names, vec!["Weeknight Bake", "Simple Salad"]);
    }

    #[test]
    fn test_list_combines_filters() {
        let mut italian = create_test_recipe("1", "Margherita");
        italian.cuisines = vec![Cuisine::Italian];
        let mut thai = create_test_recipe("2", "Pad Krapow");
        thai.cuisines = vec![Cuisine::Thai];
        let mut thai_soup = create_test_recipe("3", "Tom Yum");
        thai_soup.cuisines = vec![Cuisine::Thai];
        thai_soup.category = Category::Soup;

        let repository = RecipeRepository::from_recipes(vec![italian, thai, thai_soup]);

        let filter = ListFilter {
            category: Some(Category::MainCourse),
            cuisine: Some(Cuisine::Thai),
            search: None,
        };
        let hits = repository.list(&filter);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Pad Krapow");
    }

    #[test]
    fn test_random_recipe_on_empty_catalog() {
        let repository = RecipeRepository::new();
        assert!(repository.random_recipe().is_none());
    }

    #[test]
    fn test_random_recipe_returns_catalog_member() {
        let repository = RecipeRepository::from_recipes(vec![
            create_test_recipe("1", "First"),
            create_test_recipe("2", "Second"),
        ]);

        let picked = repository.random_recipe().unwrap();
        assert!(repository.find_by_id(&picked.id).is_some());
    }
}
