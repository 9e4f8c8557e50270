use std::collections::{HashMap, HashSet};

use serde::Serialize;
use weekplate_mealplan::WeekPlan;

use crate::categorization::{Aisle, categorize};

/// One shopping list line: an ingredient, its aisle and the number of
/// planned meals that call for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShoppingItem {
    pub name: String,
    pub aisle: Aisle,
    pub meal_count: u32,
}

/// Shopping list for one weekly plan, sorted by aisle and then by
/// ingredient name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ShoppingList {
    pub items: Vec<ShoppingItem>,
}

impl ShoppingList {
    /// Builds the shopping list for a weekly plan.
    ///
    /// Every placement counts once per distinct ingredient: a recipe that
    /// lists an ingredient twice still adds one meal for it, while a recipe
    /// reused across several slots adds one meal per slot.
    ///
    /// # Arguments
    /// * `plan` - The assembled week to shop for
    ///
    /// # Returns
    /// * The aggregated list, sorted by aisle walk order then name
    pub fn from_plan(plan: &WeekPlan<'_>) -> Self {
        let mut meal_counts: HashMap<String, u32> = HashMap::new();

        for recipe in plan.recipes() {
            let distinct: HashSet<String> = recipe
                .ingredients
                .iter()
                .map(|ingredient| ingredient.trim().to_lowercase())
                .filter(|ingredient| !ingredient.is_empty())
                .collect();
            for ingredient in distinct {
                *meal_counts.entry(ingredient).or_insert(0) += 1;
            }
        }

        let mut items: Vec<ShoppingItem> = meal_counts
            .into_iter()
            .map(|(name, meal_count)| ShoppingItem {
                aisle: categorize(&name),
                name,
                meal_count,
            })
            .collect();
        items.sort_by(|a, b| a.aisle.cmp(&b.aisle).then_with(|| a.name.cmp(&b.name)));

        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Renders the list as CSV with an `ingredient,aisle,meals` header.
    /// Fields containing commas, quotes or newlines are quoted, with inner
    /// quotes doubled.
    pub fn to_csv(&self) -> String {
        let mut out = String::from("ingredient,aisle,meals\n");
        for item in &self.items {
            out.push_str(&csv_field(&item.name));
            out.push(',');
            out.push_str(item.aisle.as_str());
            out.push(',');
            out.push_str(&item.meal_count.to_string());
            out.push('\n');
        }
        out
    }
}

fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
