use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

use crate::error::{RecipeError, RecipeResult};
use crate::types::{Category, CookingMethod, Cuisine, Difficulty, Recipe, split_ingredients};

const EXPECTED_COLUMNS: [&str; 24] = [
    "recipe_id",
    "name",
    "category",
    "cuisine",
    "cooking_method",
    "difficulty",
    "prep_time_minutes",
    "cook_time_minutes",
    "total_time_minutes",
    "servings",
    "calories_per_serving",
    "rating",
    "ingredients",
    "instructions",
    "author",
    "date_created",
    "is_vegetarian",
    "is_vegan",
    "is_gluten_free",
    "is_dairy_free",
    "is_full_meal",
    "is_lunch",
    "is_dinner",
    "is_sweet",
];

/// One raw dataset row before conversion into a `Recipe`. Shared between the
/// CSV and JSON forms of the dataset.
#[derive(Debug, Deserialize)]
struct DatasetRecord {
    #[serde(deserialize_with = "id_from_number_or_string")]
    recipe_id: String,
    name: String,
    category: String,
    cuisine: String,
    cooking_method: String,
    difficulty: String,
    prep_time_minutes: u32,
    cook_time_minutes: u32,
    total_time_minutes: u32,
    servings: u32,
    calories_per_serving: u32,
    rating: f32,
    ingredients: String,
    instructions: String,
    author: String,
    date_created: String,
    is_vegetarian: bool,
    is_vegan: bool,
    is_gluten_free: bool,
    is_dairy_free: bool,
    is_full_meal: bool,
    is_lunch: bool,
    is_dinner: bool,
    is_sweet: bool,
}

/// JSON exports carry numeric ids, user-facing forms send strings. Accept
/// both.
fn id_from_number_or_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IdRepr {
        Number(i64),
        Text(String),
    }

    Ok(match IdRepr::deserialize(deserializer)? {
        IdRepr::Number(id) => id.to_string(),
        IdRepr::Text(id) => id,
    })
}

impl DatasetRecord {
    fn into_recipe(self) -> Result<Recipe, String> {
        let id = self.recipe_id.trim().to_string();
        if id.is_empty() {
            return Err("blank recipe id".to_string());
        }
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err("blank name".to_string());
        }
        let date_created = NaiveDate::parse_from_str(self.date_created.trim(), "%Y-%m-%d")
            .map_err(|_| format!("invalid date '{}'", self.date_created))?;
        let ingredients = split_ingredients(&self.ingredients);
        if ingredients.is_empty() {
            return Err("no ingredients".to_string());
        }

        Ok(Recipe {
            id,
            name,
            category: Category::from(self.category.trim()),
            cuisines: vec![Cuisine::from(self.cuisine.trim())],
            cooking_method: CookingMethod::from(self.cooking_method.trim()),
            difficulty: Difficulty::parse(&self.difficulty),
            prep_time_minutes: self.prep_time_minutes,
            cook_time_minutes: self.cook_time_minutes,
            total_time_minutes: self.total_time_minutes,
            servings: self.servings,
            calories_per_serving: self.calories_per_serving,
            rating: self.rating,
            ingredients,
            instructions: self.instructions.trim().to_string(),
            author: self.author.trim().to_string(),
            date_created,
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

/// Parses the JSON form of the dataset, an array of row objects.
///
/// A malformed document is an error. A malformed row is not: it is skipped
/// with a warning so one bad export line cannot take the whole catalog down.
pub fn recipes_from_json(data: &str) -> RecipeResult<Vec<Recipe>> {
    let rows: Vec<serde_json::Value> = serde_json::from_str(data)?;
    let mut recipes = Vec::with_capacity(rows.len());
    for (position, row) in rows.into_iter().enumerate() {
        let record: DatasetRecord = match serde_json::from_value(row) {
            Ok(record) => record,
            Err(error) => {
                tracing::warn!("Skipping dataset record {}: {}", position + 1, error);
                continue;
            }
        };
        match record.into_recipe() {
            Ok(recipe) => recipes.push(recipe),
            Err(reason) => {
                tracing::warn!("Skipping dataset record {}: {}", position + 1, reason);
            }
        }
    }
    Ok(recipes)
}

/// Parses the CSV form of the dataset.
///
/// The header row is mandatory and must carry every expected column; rows
/// after it are matched to columns by header name. Blank lines and rows that
/// fail to parse are skipped with a warning.
pub fn recipes_from_csv(data: &str) -> RecipeResult<Vec<Recipe>> {
    let mut lines = data.lines();
    let header = lines
        .next()
        .ok_or_else(|| RecipeError::InvalidHeader("dataset is empty".to_string()))?;
    let columns = ColumnMap::build(header)?;

    let mut recipes = Vec::new();
    for (offset, line) in lines.enumerate() {
        // 1-based, counting the header
        let line_number = offset + 2;
        if line.trim().is_empty() {
            continue;
        }
        let record = match columns.parse_record(line) {
            Ok(record) => record,
            Err(reason) => {
                tracing::warn!("Skipping dataset line {}: {}", line_number, reason);
                continue;
            }
        };
        match record.into_recipe() {
            Ok(recipe) => recipes.push(recipe),
            Err(reason) => {
                tracing::warn!("Skipping dataset line {}: {}", line_number, reason);
            }
        }
    }
    Ok(recipes)
}

/// Header-name to field-index mapping for the CSV form.
struct ColumnMap {
    positions: HashMap<String, usize>,
    width: usize,
}

impl ColumnMap {
    fn build(header: &str) -> RecipeResult<Self> {
        let fields = split_csv_line(header);
        let positions: HashMap<String, usize> = fields
            .iter()
            .enumerate()
            .map(|(index, name)| (name.trim().to_string(), index))
            .collect();
        for column in EXPECTED_COLUMNS {
            if !positions.contains_key(column) {
                return Err(RecipeError::InvalidHeader(format!(
                    "missing column '{column}'"
                )));
            }
        }
        Ok(Self {
            positions,
            width: fields.len(),
        })
    }

    fn parse_record(&self, line: &str) -> Result<DatasetRecord, String> {
        let fields = split_csv_line(line);
        if fields.len() != self.width {
            return Err(format!(
                "expected {} fields, found {}",
                self.width,
                fields.len()
            ));
        }
        Ok(DatasetRecord {
            recipe_id: self.text(&fields, "recipe_id")?,
            name: self.text(&fields, "name")?,
            category: self.text(&fields, "category")?,
            cuisine: self.text(&fields, "cuisine")?,
            cooking_method: self.text(&fields, "cooking_method")?,
            difficulty: self.text(&fields, "difficulty")?,
            prep_time_minutes: self.number(&fields, "prep_time_minutes")?,
            cook_time_minutes: self.number(&fields, "cook_time_minutes")?,
            total_time_minutes: self.number(&fields, "total_time_minutes")?,
            servings: self.number(&fields, "servings")?,
            calories_per_serving: self.number(&fields, "calories_per_serving")?,
            rating: self.float(&fields, "rating")?,
            ingredients: self.text(&fields, "ingredients")?,
            instructions: self.text(&fields, "instructions")?,
            author: self.text(&fields, "author")?,
            date_created: self.text(&fields, "date_created")?,
            is_vegetarian: self.boolean(&fields, "is_vegetarian")?,
            is_vegan: self.boolean(&fields, "is_vegan")?,
            is_gluten_free: self.boolean(&fields, "is_gluten_free")?,
            is_dairy_free: self.boolean(&fields, "is_dairy_free")?,
            is_full_meal: self.boolean(&fields, "is_full_meal")?,
            is_lunch: self.boolean(&fields, "is_lunch")?,
            is_dinner: self.boolean(&fields, "is_dinner")?,
            is_sweet: self.boolean(&fields, "is_sweet")?,
        })
    }

    fn raw<'a>(&self, fields: &'a [String], column: &str) -> Result<&'a str, String> {
        self.positions
            .get(column)
            .and_then(|&index| fields.get(index))
            .map(|field| field.trim())
            .ok_or_else(|| format!("missing field '{column}'"))
    }

    fn text(&self, fields: &[String], column: &str) -> Result<String, String> {
        self.raw(fields, column).map(|field| field.to_string())
    }

    fn number(&self, fields: &[String], column: &str) -> Result<u32, String> {
        let raw = self.raw(fields, column)?;
        raw.parse()
            .map_err(|_| format!("invalid number '{raw}' in column '{column}'"))
    }

    fn float(&self, fields: &[String], column: &str) -> Result<f32, String> {
        let raw = self.raw(fields, column)?;
        raw.parse()
            .map_err(|_| format!("invalid number '{raw}' in column '{column}'"))
    }

    fn boolean(&self, fields: &[String], column: &str) -> Result<bool, String> {
        let raw = self.raw(fields, column)?;
        match raw.to_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(format!("invalid boolean '{raw}' in column '{column}'")),
        }
    }
}

/// Splits one CSV line into fields, honoring double quotes around fields and
/// doubled-quote escapes inside them.
fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}
