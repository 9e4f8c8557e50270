//! Text output for the CLI: the weekly plan, shortfall report, shopping
//! list and recipe listings.

use weekplate_mealplan::{MealTime, ShortfallReport, SlotAssignment, WeekPlan};
use weekplate_recipe::Recipe;
use weekplate_shopping::ShoppingList;

/// Renders the week as one block per day with lunch and dinner lines.
pub fn render_week_plan(plan: &WeekPlan<'_>) -> String {
    let mut out = String::new();
    for day in plan.assignments.chunks(2) {
        out.push_str(day[0].slot.day_name());
        out.push('\n');
        for assignment in day {
            let label = match assignment.slot.meal_time {
                MealTime::Lunch => "Lunch",
                MealTime::Dinner => "Dinner",
            };
            out.push_str(&format!("  {:<8}{}\n", label, slot_text(assignment)));
        }
    }
    out
}

fn slot_text(assignment: &SlotAssignment<'_>) -> String {
    let names: Vec<&str> = assignment
        .recipes()
        .map(|recipe| recipe.name.as_str())
        .collect();
    if names.is_empty() {
        "(empty)".to_string()
    } else {
        names.join(" + ")
    }
}

/// Renders unmet requests, or an empty string when everything was
/// satisfied.
pub fn render_shortfall(report: &ShortfallReport) -> String {
    if report.is_empty() {
        return String::new();
    }

    let mut out = String::from("Unmet requests:\n");
    for shortfall in &report.unmet_ingredients {
        let unit = if shortfall.remaining == 1 {
            "meal"
        } else {
            "meals"
        };
        out.push_str(&format!(
            "  {}: {} more {} needed\n",
            shortfall.ingredient, shortfall.remaining, unit
        ));
    }
    for name in &report.unplaced_required_meals {
        out.push_str(&format!("  could not place: {}\n", name));
    }
    out
}

/// Renders the shopping list grouped under aisle headers.
pub fn render_shopping_list(list: &ShoppingList) -> String {
    if list.is_empty() {
        return "(nothing to buy)\n".to_string();
    }

    let mut out = String::new();
    let mut current_aisle = None;
    for item in &list.items {
        if current_aisle != Some(item.aisle) {
            out.push_str(item.aisle.as_str());
            out.push('\n');
            current_aisle = Some(item.aisle);
        }
        let unit = if item.meal_count == 1 { "meal" } else { "meals" };
        out.push_str(&format!("  {} ({} {})\n", item.name, item.meal_count, unit));
    }
    out
}

/// One-line listing for search results.
pub fn render_recipe_row(recipe: &Recipe) -> String {
    format!(
        "{}  {} [{}] {:.1}/5",
        recipe.id, recipe.name, recipe.category, recipe.rating
    )
}

/// Full detail view for a single recipe.
pub fn render_recipe_detail(recipe: &Recipe) -> String {
    let cuisines: Vec<String> = recipe
        .cuisines
        .iter()
        .map(|cuisine| cuisine.to_string())
        .collect();

    let mut out = String::new();
    out.push_str(&recipe.name);
    out.push('\n');
    out.push_str(&format!("  Category:    {}\n", recipe.category));
    out.push_str(&format!("  Cuisines:    {}\n", cuisines.join(", ")));
    out.push_str(&format!("  Method:      {}\n", recipe.cooking_method));
    out.push_str(&format!("  Difficulty:  {}\n", recipe.difficulty));
    out.push_str(&format!(
        "  Time:        {} min prep + {} min cook = {} min\n",
        recipe.prep_time_minutes, recipe.cook_time_minutes, recipe.total_time_minutes
    ));
    out.push_str(&format!(
        "  Servings:    {} ({} kcal each)\n",
        recipe.servings, recipe.calories_per_serving
    ));
    out.push_str(&format!("  Rating:      {:.1}/5\n", recipe.rating));
    out.push_str(&format!("  Author:      {}\n", recipe.author));
    out.push_str(&format!("  Added:       {}\n", recipe.date_created));
    out.push_str(&format!("  Tags:        {}\n", tags_line(recipe)));
    out.push_str("  Ingredients:\n");
    for ingredient in &recipe.ingredients {
        out.push_str(&format!("    - {}\n", ingredient));
    }
    out.push_str("  Instructions:\n");
    out.push_str(&format!("    {}\n", recipe.instructions));
    out
}

fn tags_line(recipe: &Recipe) -> String {
    let mut tags = Vec::new();
    tags.push(if recipe.is_full_meal {
        "full meal"
    } else {
        "half meal"
    });
    if recipe.is_lunch {
        tags.push("lunch");
    }
    if recipe.is_dinner {
        tags.push("dinner");
    }
    if recipe.is_vegetarian {
        tags.push("vegetarian");
    }
    if recipe.is_vegan {
        tags.push("vegan");
    }
    if recipe.is_gluten_free {
        tags.push("gluten-free");
    }
    if recipe.is_dairy_free {
        tags.push("dairy-free");
    }
    if recipe.is_sweet {
        tags.push("sweet");
    }
    tags.join(", ")
}
