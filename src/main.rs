use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::Path;

use weekplate::config::Config;
use weekplate::mealplan::{PlanRequest, ShortfallReport, WeekPlan, generate_week_plan};
use weekplate::recipe::{
    Category, Cuisine, ListFilter, RecipeRepository, recipes_from_csv, recipes_from_json,
};
use weekplate::render;
use weekplate::shopping::ShoppingList;

/// weekplate - weekly meal planning from a recipe dataset
#[derive(Parser)]
#[command(name = "weekplate")]
#[command(about = "Weekly meal plans and shopping lists from a recipe dataset", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a weekly meal plan
    Plan {
        /// Recipe dataset, JSON or CSV by extension (overrides config file)
        #[arg(long)]
        dataset: Option<String>,

        /// Ingredient requirement as ingredient=count, repeatable
        #[arg(long = "need", value_name = "INGREDIENT=COUNT", value_parser = parse_need)]
        needs: Vec<(String, u32)>,

        /// Recipe id that must appear in the plan, repeatable
        #[arg(long = "require", value_name = "RECIPE_ID")]
        required: Vec<String>,

        /// Seed for reproducible plans (overrides config file)
        #[arg(long)]
        seed: Option<u64>,

        /// Also print the aggregated shopping list
        #[arg(long)]
        shopping: bool,

        /// Emit machine-readable JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Search the recipe catalog
    Search {
        /// Words matched against recipe names, authors and ingredients
        query: String,

        /// Only recipes in this category
        #[arg(long)]
        category: Option<String>,

        /// Only recipes of this cuisine
        #[arg(long)]
        cuisine: Option<String>,

        /// Recipe dataset, JSON or CSV by extension (overrides config file)
        #[arg(long)]
        dataset: Option<String>,
    },
    /// Show one random recipe from the catalog
    Random {
        /// Recipe dataset, JSON or CSV by extension (overrides config file)
        #[arg(long)]
        dataset: Option<String>,
    },
}

/// Parses one `--need` flag of the form `ingredient=count`.
fn parse_need(raw: &str) -> Result<(String, u32), String> {
    let (name, count) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected INGREDIENT=COUNT, got '{}'", raw))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing ingredient name in '{}'", raw));
    }
    let count: u32 = count
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a valid meal count", count))?;
    Ok((name.to_string(), count))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    weekplate::observability::init_observability(
        &config.observability.log_level,
        config.observability.json_logs,
    )?;

    match cli.command {
        Commands::Plan {
            dataset,
            needs,
            required,
            seed,
            shopping,
            json,
        } => plan_command(&config, dataset, needs, required, seed, shopping, json),
        Commands::Search {
            query,
            category,
            cuisine,
            dataset,
        } => search_command(&config, dataset, query, category, cuisine),
        Commands::Random { dataset } => random_command(&config, dataset),
    }
}

/// Reads the dataset named by `--dataset` or the config file, picking the
/// parser by file extension. An unreadable file or a catalog with no usable
/// recipes is a hard error.
fn load_repository(config: &Config, dataset_override: Option<String>) -> Result<RecipeRepository> {
    let path = dataset_override.unwrap_or_else(|| config.dataset.path.clone());
    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read dataset '{}'", path))?;

    let is_json = Path::new(&path)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let recipes = if is_json {
        recipes_from_json(&raw).with_context(|| format!("Failed to parse dataset '{}'", path))?
    } else {
        recipes_from_csv(&raw).with_context(|| format!("Failed to parse dataset '{}'", path))?
    };

    let repository = RecipeRepository::from_recipes(recipes);
    if repository.is_empty() {
        bail!("Dataset '{}' holds no usable recipes", path);
    }
    tracing::info!("Loaded {} recipes from '{}'", repository.len(), path);
    Ok(repository)
}

#[derive(Serialize)]
struct PlanOutput<'a> {
    plan: &'a WeekPlan<'a>,
    shortfall: &'a ShortfallReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    shopping: Option<ShoppingList>,
}

#[tracing::instrument(skip(config, needs, required))]
fn plan_command(
    config: &Config,
    dataset: Option<String>,
    needs: Vec<(String, u32)>,
    required: Vec<String>,
    seed: Option<u64>,
    shopping: bool,
    json: bool,
) -> Result<()> {
    let repository = load_repository(config, dataset)?;

    let request = PlanRequest {
        ingredient_needs: needs,
        required_meal_ids: required,
        seed: seed.or(config.planner.default_seed),
    };
    let (plan, shortfall) = generate_week_plan(&repository, &request)?;

    if json {
        let output = PlanOutput {
            plan: &plan,
            shortfall: &shortfall,
            shopping: shopping.then(|| ShoppingList::from_plan(&plan)),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    print!("{}", render::render_week_plan(&plan));
    let shortfall_text = render::render_shortfall(&shortfall);
    if !shortfall_text.is_empty() {
        println!();
        print!("{}", shortfall_text);
    }
    if shopping {
        println!();
        print!("{}", render::render_shopping_list(&ShoppingList::from_plan(&plan)));
    }

    Ok(())
}

#[tracing::instrument(skip(config))]
fn search_command(
    config: &Config,
    dataset: Option<String>,
    query: String,
    category: Option<String>,
    cuisine: Option<String>,
) -> Result<()> {
    let repository = load_repository(config, dataset)?;

    let filter = ListFilter {
        category: category.map(Category::from),
        cuisine: cuisine.map(Cuisine::from),
        search: Some(query),
    };
    let results = repository.list(&filter);

    if results.is_empty() {
        println!("No recipes match.");
        return Ok(());
    }
    for recipe in results {
        println!("{}", render::render_recipe_row(recipe));
    }

    Ok(())
}

#[tracing::instrument(skip(config))]
fn random_command(config: &Config, dataset: Option<String>) -> Result<()> {
    let repository = load_repository(config, dataset)?;

    if let Some(recipe) = repository.random_recipe() {
        print!("{}", render::render_recipe_detail(recipe));
    }

    Ok(())
}
