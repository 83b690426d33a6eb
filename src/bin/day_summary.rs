//! Print totals, goals, and remaining budget for one day
//!
//! Usage: day_summary [YYYY-MM-DD]   (defaults to today)

use std::path::PathBuf;

use chrono::Local;
use tracing_subscriber::EnvFilter;

use nutrilog::aggregate;
use nutrilog::build_info;
use nutrilog::diary;
use nutrilog::store::{migrations, Database, SqliteStore};

fn get_database_path() -> PathBuf {
    std::env::var("NUTRILOG_DATABASE_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let mut path = std::env::current_exe()
                .ok()
                .and_then(|p| p.parent().map(|p| p.to_path_buf()))
                .unwrap_or_else(|| PathBuf::from("."));

            // Go up from target/release or target/debug to project root
            if path.ends_with("release") || path.ends_with("debug") {
                if let Some(parent) = path.parent() {
                    if let Some(grandparent) = parent.parent() {
                        path = grandparent.to_path_buf();
                    }
                }
            }

            path.push("data");
            std::fs::create_dir_all(&path).ok();
            path.push("nutrilog.db");
            path
        })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("nutrilog=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    build_info::print_startup_banner();

    let date = std::env::args()
        .nth(1)
        .unwrap_or_else(|| Local::now().date_naive().format("%Y-%m-%d").to_string());

    let db_path = get_database_path();
    eprintln!("Database path: {}", db_path.display());

    let database = Database::new(&db_path)?;
    database.with_conn(|conn| migrations::run_migrations(conn))?;
    let store = SqliteStore::new(database);

    let summary = diary::day_summary(&store, &date)?;
    let log = diary::load_day(&store, &date)?;
    let water = diary::water_settings(&store)?;

    println!("Summary for {}", summary.date);
    println!(
        "  Calories: {:.0} / {} kcal ({:.0}% of goal)",
        summary.totals.calories,
        summary.goals.daily_calorie_goal,
        aggregate::display_ratio(
            summary.totals.calories,
            f64::from(summary.goals.daily_calorie_goal)
        ) * 100.0
    );
    println!(
        "  Protein: {:.1} g / {} g",
        summary.totals.protein, summary.goals.macros.protein_goal_g
    );
    println!(
        "  Carbs:   {:.1} g / {} g",
        summary.totals.carbs, summary.goals.macros.carbs_goal_g
    );
    println!(
        "  Fat:     {:.1} g / {} g",
        summary.totals.fat, summary.goals.macros.fat_goal_g
    );
    println!(
        "  Exercise: {:.0} kcal burned",
        summary.totals.exercise_calories_burned
    );
    println!("  Remaining: {} kcal", summary.remaining_calories);
    println!("  Water: {} / {} cups", log.water, water.goal);
    if let Some(weight) = log.weight {
        println!("  Weight: {:.1} kg", weight);
    }

    Ok(())
}
