pub mod algorithm;
pub mod error;
pub mod plan;
pub mod slots;
pub mod tracker;

pub use algorithm::generate_week_plan;
pub use error::{PlanningError, PlanningResult};
pub use plan::{PlanRequest, ShortfallReport, SlotAssignment, WeekPlan};
pub use slots::{MealSlot, WEEK_DAYS, build_week_slots, day_name};
pub use tracker::{IngredientShortfall, IngredientTracker, ingredient_matches};
pub use weekplate_recipe::MealTime;
