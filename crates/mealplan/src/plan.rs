use chrono::Weekday;
use serde::Serialize;
use weekplate_recipe::{MealTime, Recipe};

use crate::slots::MealSlot;
use crate::tracker::IngredientShortfall;

/// Everything a caller can ask of one generation run.
#[derive(Debug, Clone, Default)]
pub struct PlanRequest {
    /// `(keyword, target meal count)` pairs. Malformed pairs are filtered
    /// during generation, not rejected.
    pub ingredient_needs: Vec<(String, u32)>,
    /// Ids of recipes that must appear somewhere in the week.
    pub required_meal_ids: Vec<String>,
    /// Fixed seed for reproducible plans. `None` seeds from the clock.
    pub seed: Option<u64>,
}

/// One slot of a finished plan holding zero, one or two recipes. A second
/// recipe only ever appears as the half-meal partner of the first.
#[derive(Debug, Clone, Serialize)]
pub struct SlotAssignment<'a> {
    pub slot: MealSlot,
    pub first: Option<&'a Recipe>,
    pub second: Option<&'a Recipe>,
}

impl<'a> SlotAssignment<'a> {
    pub fn empty(slot: MealSlot) -> Self {
        Self {
            slot,
            first: None,
            second: None,
        }
    }

    pub fn recipes(&self) -> impl Iterator<Item = &'a Recipe> {
        self.first.into_iter().chain(self.second)
    }

    pub fn is_empty(&self) -> bool {
        self.first.is_none()
    }

    pub fn contains(&self, recipe_id: &str) -> bool {
        self.recipes().any(|recipe| recipe.id == recipe_id)
    }
}

/// A generated week: all fourteen slots in display order. Recipes are
/// borrowed from the repository the plan was generated against.
#[derive(Debug, Serialize)]
pub struct WeekPlan<'a> {
    pub assignments: Vec<SlotAssignment<'a>>,
}

impl<'a> WeekPlan<'a> {
    pub fn new(assignments: Vec<SlotAssignment<'a>>) -> Self {
        Self { assignments }
    }

    pub fn assignment(&self, day: Weekday, meal_time: MealTime) -> Option<&SlotAssignment<'a>> {
        self.assignments
            .iter()
            .find(|assignment| assignment.slot.day == day && assignment.slot.meal_time == meal_time)
    }

    /// Every recipe placed in the week, slot by slot. A recipe reused across
    /// slots appears once per placement.
    pub fn recipes(&self) -> impl Iterator<Item = &'a Recipe> {
        self.assignments
            .iter()
            .flat_map(|assignment| assignment.recipes())
    }

    pub fn contains_recipe(&self, recipe_id: &str) -> bool {
        self.assignments
            .iter()
            .any(|assignment| assignment.contains(recipe_id))
    }

    pub fn filled_slot_count(&self) -> usize {
        self.assignments
            .iter()
            .filter(|assignment| !assignment.is_empty())
            .count()
    }
}

/// What the generated week could not satisfy. An empty report means every
/// requirement was met.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ShortfallReport {
    pub unmet_ingredients: Vec<IngredientShortfall>,
    /// Names of required meals that did not make it into the plan. Unknown
    /// ids are reported verbatim since there is no name to show.
    pub unplaced_required_meals: Vec<String>,
}

impl ShortfallReport {
    pub fn is_empty(&self) -> bool {
        self.unmet_ingredients.is_empty() && self.unplaced_required_meals.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use weekplate_recipe::{Category, CookingMethod, Cuisine, Difficulty};

    fn create_test_recipe(id: &str, name: &str) -> Recipe {
        Recipe {
            id: id.to_string(),
            name: name.to_string(),
            category: Category::MainCourse,
            cuisines: vec![Cuisine::French],
            cooking_method: CookingMethod::Roasting,
            difficulty: Difficulty::Medium,
            prep_time_minutes: 10,
            cook_time_minutes: 30,
            total_time_minutes: 40,
            servings: 2,
            calories_per_serving: 600,
            rating: 4.1,
            ingredients: vec!["potatoes".to_string()],
            instructions: "Roast.".to_string(),
            author: "Tester".to_string(),
            date_created: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            is_vegetarian: true,
            is_vegan: false,
            is_gluten_free: true,
            is_dairy_free: true,
            is_full_meal: true,
            is_lunch: true,
            is_dinner: true,
            is_sweet: false,
        }
    }

    #[test]
    fn test_assignment_reports_its_recipes() {
        let soup = create_test_recipe("1", "Soup");
        let salad = create_test_recipe("2", "Salad");
        let slot = MealSlot::new(Weekday::Mon, MealTime::Lunch);

        let paired = SlotAssignment {
            slot,
            first: Some(&soup),
            second: Some(&salad),
        };
        let names: Vec<&str> = paired.recipes().map(|recipe| recipe.name.as_str()).collect();
        assert_eq!(names, vec!["Soup", "Salad"]);
        assert!(paired.contains("2"));
        assert!(!paired.contains("3"));
        assert!(!paired.is_empty());

        let empty = SlotAssignment::empty(slot);
        assert!(empty.is_empty());
        assert_eq!(empty.recipes().count(), 0);
    }

    #[test]
    fn test_week_plan_lookup_by_day_and_meal() {
        let roast = create_test_recipe("1", "Roast");
        let plan = WeekPlan::new(vec![
            SlotAssignment {
                slot: MealSlot::new(Weekday::Tue, MealTime::Dinner),
                first: Some(&roast),
                second: None,
            },
            SlotAssignment::empty(MealSlot::new(Weekday::Wed, MealTime::Lunch)),
        ]);

        let hit = plan.assignment(Weekday::Tue, MealTime::Dinner).unwrap();
        assert!(hit.contains("1"));
        assert!(plan.assignment(Weekday::Tue, MealTime::Lunch).is_none());
        assert!(plan.contains_recipe("1"));
        assert!(!plan.contains_recipe("99"));
        assert_eq!(plan.filled_slot_count(), 1);
    }

    #[test]
    fn test_empty_shortfall_report() {
        let report = ShortfallReport::default();
        assert!(report.is_empty());

        let with_miss = ShortfallReport {
            unmet_ingredients: vec![IngredientShortfall {
                ingredient: "kale".to_string(),
                remaining: 2,
            }],
            unplaced_required_meals: vec![],
        };
        assert!(!with_miss.is_empty());
    }
}
