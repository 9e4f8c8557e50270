//! Tests for CLI commands (plan, search, random)

use std::fs;
use std::path::PathBuf;
use std::process::Command;

const HEADER: &str = "recipe_id,name,category,cuisine,cooking_method,difficulty,\
prep_time_minutes,cook_time_minutes,total_time_minutes,servings,calories_per_serving,\
rating,ingredients,instructions,author,date_created,is_vegetarian,is_vegan,\
is_gluten_free,is_dairy_free,is_full_meal,is_lunch,is_dinner,is_sweet";

fn write_dataset(file_name: &str) -> PathBuf {
    let row = "1,Weeknight Pasta,Main Course,Italian,Boiling,Easy,10,15,25,2,480,4.3,\
\"pasta, tomatoes, garlic\",Boil and toss.,Sam,2024-05-01,\
True,False,False,False,True,True,True,False";
    let path = std::env::temp_dir().join(file_name);
    fs::write(&path, format!("{}\n{}\n", HEADER, row)).expect("failed to write test dataset");
    path
}

#[test]
fn test_cli_help_shows_all_commands() {
    let output = Command::new(env!("CARGO_BIN_EXE_weekplate"))
        .arg("--help")
        .output()
        .expect("Failed to run weekplate --help");

    let help_text = String::from_utf8_lossy(&output.stdout);

    assert!(help_text.contains("plan"), "plan command not in help");
    assert!(help_text.contains("search"), "search command not in help");
    assert!(help_text.contains("random"), "random command not in help");
}

#[test]
fn test_plan_command_prints_week_and_exits_zero() {
    let dataset = write_dataset("weekplate_cli_plan.csv");

    let output = Command::new(env!("CARGO_BIN_EXE_weekplate"))
        .args(["plan", "--dataset"])
        .arg(&dataset)
        .args(["--seed", "7", "--shopping"])
        .output()
        .expect("Failed to run weekplate plan");
    let _ = fs::remove_file(&dataset);

    assert!(output.status.success(), "plan should exit zero");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Monday"));
    assert!(stdout.contains("Weeknight Pasta"));
    assert!(stdout.contains("Pantry"), "shopping list should print aisles");
}

#[test]
fn test_plan_command_json_output_is_parseable() {
    let dataset = write_dataset("weekplate_cli_json.csv");

    let output = Command::new(env!("CARGO_BIN_EXE_weekplate"))
        .args(["plan", "--dataset"])
        .arg(&dataset)
        .args(["--seed", "7", "--json"])
        .output()
        .expect("Failed to run weekplate plan --json");
    let _ = fs::remove_file(&dataset);

    assert!(output.status.success());
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(value["plan"]["assignments"].as_array().unwrap().len(), 14);
}

#[test]
fn test_missing_dataset_is_a_hard_error() {
    let output = Command::new(env!("CARGO_BIN_EXE_weekplate"))
        .args(["plan", "--dataset", "/nonexistent/weekplate.csv"])
        .output()
        .expect("Failed to run weekplate plan");

    assert!(
        !output.status.success(),
        "unreadable dataset must exit non-zero"
    );
}

#[test]
fn test_search_command_lists_matches() {
    let dataset = write_dataset("weekplate_cli_search.csv");

    let output = Command::new(env!("CARGO_BIN_EXE_weekplate"))
        .args(["search", "pasta", "--dataset"])
        .arg(&dataset)
        .output()
        .expect("Failed to run weekplate search");
    let _ = fs::remove_file(&dataset);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Weeknight Pasta"));
}
