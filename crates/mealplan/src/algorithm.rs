use std::collections::{HashMap, HashSet};

use rand::SeedableRng;
use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use weekplate_recipe::{MealTime, Recipe, RecipeRepository};

use crate::error::{PlanningError, PlanningResult};
use crate::plan::{PlanRequest, ShortfallReport, SlotAssignment, WeekPlan};
use crate::slots::{MealSlot, build_week_slots};
use crate::tracker::IngredientTracker;

/// Mutable state threaded through one generation run: the seeded RNG, the
/// ingredient tracker and the sets of already placed recipe ids.
struct GenerationContext {
    rng: StdRng,
    tracker: IngredientTracker,
    used_ids: HashSet<String>,
    /// Ids fixed by required-meal placement. Excluded from reuse draws so a
    /// required meal cannot land in a second slot.
    required_placed: HashSet<String>,
}

impl GenerationContext {
    fn new(request: &PlanRequest) -> Self {
        let rng = match request.seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => {
                use std::time::SystemTime;
                let now = SystemTime::now()
                    .duration_since(SystemTime::UNIX_EPOCH)
                    .map(|elapsed| elapsed.as_secs())
                    .unwrap_or_default();
                StdRng::seed_from_u64(now)
            }
        };
        Self {
            rng,
            tracker: IngredientTracker::new(&request.ingredient_needs),
            used_ids: HashSet::new(),
            required_placed: HashSet::new(),
        }
    }

    /// Registers a placement. Runs for every recipe that lands in a slot,
    /// including reused ones, so repeated meals keep counting toward
    /// ingredient targets.
    fn mark_placed(&mut self, recipe: &Recipe) {
        self.used_ids.insert(recipe.id.clone());
        self.tracker.record_if_needed(recipe);
    }

    fn is_used(&self, recipe: &Recipe) -> bool {
        self.used_ids.contains(&recipe.id)
    }
}

/// One selected slot filling: a recipe plus, for half meals, its partner.
#[derive(Clone, Copy)]
struct PickedMeal<'a> {
    first: &'a Recipe,
    partner: Option<&'a Recipe>,
}

/// Generates a weekly meal plan: 14 slots (7 days, lunch and dinner)
/// filled from the repository under the request's constraints.
///
/// The run walks four phases:
/// 1. shuffle the fourteen slots,
/// 2. place required meals into the first compatible open slots,
/// 3. fill the remaining slots per meal time, preferring recipes that cover
///    unmet ingredient requirements and pairing half meals with a partner,
/// 4. assemble the assignments back into display order.
///
/// # Arguments
/// * `repository` - The catalog to plan from; assigned recipes are borrowed
///   from it
/// * `request` - Ingredient targets, required meal ids and an optional seed
///
/// # Returns
/// * `Ok((plan, shortfall))` - the finished week plus a report of anything
///   the run could not satisfy
/// * `Err(PlanningError::NoRecipesAvailable)` when the catalog is empty
pub fn generate_week_plan<'a>(
    repository: &'a RecipeRepository,
    request: &PlanRequest,
) -> PlanningResult<(WeekPlan<'a>, ShortfallReport)> {
    if repository.is_empty() {
        return Err(PlanningError::NoRecipesAvailable);
    }

    let mut ctx = GenerationContext::new(request);
    let required_ids = dedup_required_ids(&request.required_meal_ids);

    let mut open_slots = build_week_slots();
    open_slots.shuffle(&mut ctx.rng);

    let required_placements =
        place_required_meals(&mut ctx, repository, &mut open_slots, &required_ids);
    tracing::debug!(
        "Placed {} of {} required meals",
        required_placements.len(),
        required_ids.len()
    );

    let (lunch_slots, dinner_slots): (Vec<MealSlot>, Vec<MealSlot>) = open_slots
        .into_iter()
        .partition(|slot| slot.meal_time == MealTime::Lunch);

    let lunch_pool = repository.suitable_for(MealTime::Lunch);
    let dinner_pool = repository.suitable_for(MealTime::Dinner);
    tracing::debug!(
        "Candidate pools: {} lunch, {} dinner",
        lunch_pool.len(),
        dinner_pool.len()
    );

    let lunch_selections = select_meals(&mut ctx, &lunch_pool, lunch_slots.len());
    let dinner_selections = select_meals(&mut ctx, &dinner_pool, dinner_slots.len());

    let plan = assemble(
        required_placements,
        lunch_slots,
        lunch_selections,
        dinner_slots,
        dinner_selections,
    );
    let shortfall = build_shortfall(&ctx, repository, &required_ids, &plan);
    if !shortfall.is_empty() {
        tracing::debug!(
            "Plan finished with {} unmet ingredient targets, {} unplaced required meals",
            shortfall.unmet_ingredients.len(),
            shortfall.unplaced_required_meals.len()
        );
    }

    Ok((plan, shortfall))
}

/// Drops repeated required ids, keeping request order. Each required meal is
/// attempted at most once per run.
fn dedup_required_ids(ids: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut deduped = Vec::new();
    for id in ids {
        if seen.insert(id.as_str()) {
            deduped.push(id.clone());
        } else {
            tracing::warn!("Required meal '{}' listed more than once", id);
        }
    }
    deduped
}

/// Places each required meal into the first open slot whose meal time the
/// recipe suits, removing that slot from the open pool. Unknown ids and
/// recipes with no compatible slot left are logged and skipped; the final
/// shortfall report picks them up.
fn place_required_meals<'a>(
    ctx: &mut GenerationContext,
    repository: &'a RecipeRepository,
    open_slots: &mut Vec<MealSlot>,
    required_ids: &[String],
) -> Vec<(MealSlot, &'a Recipe)> {
    let mut placements = Vec::new();
    for id in required_ids {
        let Some(recipe) = repository.find_by_id(id) else {
            tracing::warn!("Required meal '{}' is not in the catalog", id);
            continue;
        };
        let position = open_slots
            .iter()
            .position(|slot| recipe.is_suitable_for(slot.meal_time));
        match position {
            Some(position) => {
                let slot = open_slots.remove(position);
                ctx.mark_placed(recipe);
                ctx.required_placed.insert(recipe.id.clone());
                placements.push((slot, recipe));
            }
            None => {
                tracing::warn!("No open slot fits required meal '{}' ({})", recipe.name, id);
            }
        }
    }
    placements
}

/// Fills `slot_count` selections from `pool`, then shuffles the finished
/// list so the selection order does not leak into the week layout.
fn select_meals<'a>(
    ctx: &mut GenerationContext,
    pool: &[&'a Recipe],
    slot_count: usize,
) -> Vec<Option<PickedMeal<'a>>> {
    let mut selections = Vec::with_capacity(slot_count);
    for _ in 0..slot_count {
        selections.push(select_one(ctx, pool));
    }
    selections.shuffle(&mut ctx.rng);
    selections
}

/// Picks one slot filling from the pool.
///
/// Candidates are tried in priority order: unused recipes that still cover
/// an unmet ingredient target, then any unused recipe, then a random reuse
/// from the pool. Reuse never draws a recipe fixed as a required meal, so a
/// slot stays unfilled when the pool is empty or holds only required
/// placements. A half meal gets a random unused half-meal partner when one
/// exists.
fn select_one<'a>(ctx: &mut GenerationContext, pool: &[&'a Recipe]) -> Option<PickedMeal<'a>> {
    if pool.is_empty() {
        return None;
    }

    let unused: Vec<&'a Recipe> = pool
        .iter()
        .copied()
        .filter(|recipe| !ctx.is_used(recipe))
        .collect();
    let priority: Vec<&'a Recipe> = unused
        .iter()
        .copied()
        .filter(|recipe| ctx.tracker.has_unmet_need(recipe))
        .collect();

    let first = priority
        .choose(&mut ctx.rng)
        .copied()
        .or_else(|| unused.choose(&mut ctx.rng).copied())
        .or_else(|| {
            let reusable: Vec<&'a Recipe> = pool
                .iter()
                .copied()
                .filter(|recipe| !ctx.required_placed.contains(&recipe.id))
                .collect();
            reusable.choose(&mut ctx.rng).copied()
        })?;
    ctx.mark_placed(first);

    let partner = if first.is_full_meal {
        None
    } else {
        let partners: Vec<&'a Recipe> = pool
            .iter()
            .copied()
            .filter(|recipe| !recipe.is_full_meal && !ctx.is_used(recipe))
            .collect();
        partners.choose(&mut ctx.rng).copied()
    };
    if let Some(partner) = partner {
        ctx.mark_placed(partner);
    }

    Some(PickedMeal { first, partner })
}

/// Merges required placements and per-meal-time selections, then lays the
/// fourteen slots back out in display order.
fn assemble<'a>(
    required_placements: Vec<(MealSlot, &'a Recipe)>,
    lunch_slots: Vec<MealSlot>,
    lunch_selections: Vec<Option<PickedMeal<'a>>>,
    dinner_slots: Vec<MealSlot>,
    dinner_selections: Vec<Option<PickedMeal<'a>>>,
) -> WeekPlan<'a> {
    let mut by_slot: HashMap<MealSlot, SlotAssignment<'a>> = HashMap::new();
    for (slot, recipe) in required_placements {
        by_slot.insert(
            slot,
            SlotAssignment {
                slot,
                first: Some(recipe),
                second: None,
            },
        );
    }

    let filled = lunch_slots
        .into_iter()
        .zip(lunch_selections)
        .chain(dinner_slots.into_iter().zip(dinner_selections));
    for (slot, selection) in filled {
        let assignment = match selection {
            Some(picked) => SlotAssignment {
                slot,
                first: Some(picked.first),
                second: picked.partner,
            },
            None => SlotAssignment::empty(slot),
        };
        by_slot.insert(slot, assignment);
    }

    let assignments = build_week_slots()
        .into_iter()
        .map(|slot| {
            by_slot
                .remove(&slot)
                .unwrap_or_else(|| SlotAssignment::empty(slot))
        })
        .collect();
    WeekPlan::new(assignments)
}

/// Builds the shortfall report against the assembled plan: ingredient
/// targets still short of their count, plus required meals that never made
/// it in. Known ids are reported by recipe name, unknown ids verbatim.
fn build_shortfall(
    ctx: &GenerationContext,
    repository: &RecipeRepository,
    required_ids: &[String],
    plan: &WeekPlan<'_>,
) -> ShortfallReport {
    let unplaced_required_meals = required_ids
        .iter()
        .filter(|id| !plan.contains_recipe(id))
        .map(|id| match repository.find_by_id(id) {
            Some(recipe) => recipe.name.clone(),
            None => id.clone(),
        })
        .collect();

    ShortfallReport {
        unmet_ingredients: ctx.tracker.shortfalls(),
        unplaced_required_meals,
    }
}
