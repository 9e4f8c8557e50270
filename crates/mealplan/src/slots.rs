use chrono::Weekday;
use serde::{Serialize, Serializer};
use weekplate_recipe::MealTime;

/// Plan days in display order. Weeks run Monday through Sunday.
pub const WEEK_DAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// One of the fourteen positions in a weekly plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct MealSlot {
    #[serde(serialize_with = "serialize_day")]
    pub day: Weekday,
    pub meal_time: MealTime,
}

impl MealSlot {
    pub fn new(day: Weekday, meal_time: MealTime) -> Self {
        Self { day, meal_time }
    }

    pub fn day_name(&self) -> &'static str {
        day_name(self.day)
    }
}

pub fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

fn serialize_day<S>(day: &Weekday, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(day_name(*day))
}

/// All fourteen slots of one week in display order: Monday lunch, Monday
/// dinner, down to Sunday dinner.
pub fn build_week_slots() -> Vec<MealSlot> {
    WEEK_DAYS
        .iter()
        .flat_map(|&day| {
            [
                MealSlot::new(day, MealTime::Lunch),
                MealSlot::new(day, MealTime::Dinner),
            ]
        })
        .collect()
}
