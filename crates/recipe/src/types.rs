use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

/// The two meal services a recipe can be scheduled for. Every plan slot is
/// addressed by a day plus one of these.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    AsRefStr,
    VariantArray,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MealTime {
    Lunch,
    Dinner,
}

impl MealTime {
    pub fn as_str(&self) -> &'static str {
        match self {
            MealTime::Lunch => "lunch",
            MealTime::Dinner => "dinner",
        }
    }
}

#[derive(Debug, Clone, PartialEq, EnumString, Display, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Appetizer,
    #[strum(serialize = "Main Course")]
    MainCourse,
    Dessert,
    Soup,
    Salad,
    Breakfast,
    Lunch,
    Dinner,
    Snack,
    Beverage,
    #[strum(default)]
    Other(String),
}

#[derive(Debug, Clone, PartialEq, EnumString, Display, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Cuisine {
    Italian,
    Mexican,
    Chinese,
    Indian,
    American,
    French,
    Japanese,
    Thai,
    Greek,
    Korean,
    Spanish,
    Mediterranean,
    #[strum(serialize = "Middle Eastern")]
    MiddleEastern,
    Vietnamese,
    #[strum(default)]
    Other(String),
}

#[derive(Debug, Clone, PartialEq, EnumString, Display, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CookingMethod {
    Baking,
    Grilling,
    Frying,
    Boiling,
    Steaming,
    #[strum(serialize = "Sautéing")]
    Sauteing,
    Roasting,
    #[strum(serialize = "Slow Cooking")]
    SlowCooking,
    Raw,
    Microwaving,
    #[strum(default)]
    Other(String),
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    AsRefStr,
    VariantArray,
)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Parses a difficulty label, falling back to `Medium` for unknown input.
    pub fn parse(s: &str) -> Self {
        let trimmed = s.trim();
        trimmed.parse().unwrap_or_else(|_| {
            if !trimmed.is_empty() {
                tracing::warn!("Unknown difficulty '{}', defaulting to Medium", trimmed);
            }
            Difficulty::default()
        })
    }
}

// `From<&str>` is supplied by the `EnumString` derive: the `#[strum(default)]`
// variant makes parsing infallible. These arms only bridge owned strings for
// the serde `from`/`into` attributes.
macro_rules! impl_string_conversions {
    ($($name:ident),+) => {
        $(
            impl From<String> for $name {
                fn from(s: String) -> Self {
                    $name::from(s.as_str())
                }
            }

            impl From<$name> for String {
                fn from(value: $name) -> Self {
                    value.to_string()
                }
            }
        )+
    };
}

impl_string_conversions!(Category, Cuisine, CookingMethod);

/// A catalog entry. Identifiers are plain strings: dataset rows carry numeric
/// ids, recipes created through commands carry UUIDs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub cuisines: Vec<Cuisine>,
    pub cooking_method: CookingMethod,
    pub difficulty: Difficulty,
    pub prep_time_minutes: u32,
    pub cook_time_minutes: u32,
    pub total_time_minutes: u32,
    pub servings: u32,
    pub calories_per_serving: u32,
    pub rating: f32,
    /// Ingredient names in recipe order, already split and trimmed.
    pub ingredients: Vec<String>,
    pub instructions: String,
    pub author: String,
    pub date_created: NaiveDate,
    pub is_vegetarian: bool,
    pub is_vegan: bool,
    pub is_gluten_free: bool,
    pub is_dairy_free: bool,
    /// A full meal fills a slot alone; anything else needs a partner dish.
    pub is_full_meal: bool,
    pub is_lunch: bool,
    pub is_dinner: bool,
    pub is_sweet: bool,
}

impl Recipe {
    pub fn is_suitable_for(&self, meal_time: MealTime) -> bool {
        match meal_time {
            MealTime::Lunch => self.is_lunch,
            MealTime::Dinner => self.is_dinner,
        }
    }
}

/// Splits a raw comma-separated ingredient field into trimmed, non-empty
/// tokens.
pub fn split_ingredients(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|token| token.trim())
        .filter(|token| !token.is_empty())
        .map(|token| token.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parses_multi_word_label() {
        assert_eq!(Category::from("Main Course"), Category::MainCourse);
        assert_eq!(Category::MainCourse.to_string(), "Main Course");
    }

    #[test]
    fn test_unknown_category_is_preserved() {
        let category = Category::from("Fusion Bowl");
        assert_eq!(category, Category::Other("Fusion Bowl".to_string()));
        assert_eq!(category.to_string(), "Fusion Bowl");
    }

    #[test]
    fn test_cuisine_round_trips_through_strings() {
        for label in ["Middle Eastern", "Vietnamese", "Thai"] {
            assert_eq!(Cuisine::from(label).to_string(), label);
        }
    }

    #[test]
    fn test_owned_strings_convert_like_borrowed() {
        assert_eq!(Category::from("Dessert".to_string()), Category::Dessert);
        assert_eq!(
            Cuisine::from("Nordic".to_string()),
            Cuisine::Other("Nordic".to_string())
        );
        assert_eq!(
            CookingMethod::from("Slow Cooking".to_string()),
            CookingMethod::SlowCooking
        );
    }

    #[test]
    fn test_cooking_method_accented_label() {
        assert_eq!(CookingMethod::from("Sautéing"), CookingMethod::Sauteing);
        assert_eq!(CookingMethod::Sauteing.to_string(), "Sautéing");
    }

    #[test]
    fn test_difficulty_defaults_to_medium() {
        assert_eq!(Difficulty::parse("Hard"), Difficulty::Hard);
        assert_eq!(Difficulty::parse("impossible"), Difficulty::Medium);
        assert_eq!(Difficulty::parse(""), Difficulty::Medium);
    }

    #[test]
    fn test_meal_time_labels() {
        assert_eq!(MealTime::Lunch.as_str(), "lunch");
        assert_eq!(MealTime::Dinner.to_string(), "dinner");
    }

    #[test]
    fn test_split_ingredients_drops_blanks() {
        let tokens = split_ingredients("chicken, rice , , garlic,");
        assert_eq!(tokens, vec!["chicken", "rice", "garlic"]);
    }

    #[test]
    fn test_suitability_follows_flags() {
        let recipe = Recipe {
            id: "1".to_string(),
            name: "Test".to_string(),
            category: Category::MainCourse,
            cuisines: vec![Cuisine::Italian],
            cooking_method: CookingMethod::Baking,
            difficulty: Difficulty::Easy,
            prep_time_minutes: 10,
            cook_time_minutes: 20,
            total_time_minutes: 30,
            servings: 2,
            calories_per_serving: 400,
            rating: 4.0,
            ingredients: vec!["pasta".to_string()],
            instructions: "Cook.".to_string(),
            author: "Chef".to_string(),
            date_created: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            is_vegetarian: true,
            is_vegan: false,
            is_gluten_free: false,
            is_dairy_free: false,
            is_full_meal: true,
            is_lunch: true,
            is_dinner: false,
            is_sweet: false,
        };

        assert!(recipe.is_suitable_for(MealTime::Lunch));
        assert!(!recipe.is_suitable_for(MealTime::Dinner));
    }
}
