//! Utility to set the user profile in the database
//!
//! Usage: set_profile <gender> <birth-date> <height-cm> <weight-kg> <activity> <goal> [target-kg]

use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use nutrilog::goals;
use nutrilog::models::{ActivityLevel, GoalDirection, Sex, UserProfile};
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
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 7 {
        eprintln!(
            "Usage: {} <male|female> <YYYY-MM-DD> <height-cm> <weight-kg> <activity> <lose|maintain|gain> [target-kg]",
            args[0]
        );
        std::process::exit(2);
    }

    let gender = match args[1].to_lowercase().as_str() {
        "male" => Sex::Male,
        "female" => Sex::Female,
        other => return Err(format!("unknown gender '{other}'").into()),
    };
    let birth_date = NaiveDate::parse_from_str(&args[2], "%Y-%m-%d")?;
    let height: f64 = args[3].parse()?;
    let weight: f64 = args[4].parse()?;
    let activity_level = ActivityLevel::from_str(&args[5]);
    let goal = match args[6].to_lowercase().as_str() {
        "lose" => GoalDirection::Lose,
        "maintain" => GoalDirection::Maintain,
        "gain" => GoalDirection::Gain,
        other => return Err(format!("unknown goal '{other}'").into()),
    };
    let target_weight: Option<f64> = match args.get(7) {
        Some(raw) => Some(raw.parse()?),
        None => None,
    };

    let profile = UserProfile {
        first_name: String::new(),
        last_name: String::new(),
        email: String::new(),
        gender,
        birth_date,
        height,
        weight,
        goal,
        target_weight,
        activity_level,
        daily_goal: None,
    };

    // Validate and derive goals before touching the database; a bad profile
    // must not reach storage
    let today = Local::now().date_naive();
    goals::validate_profile(&profile)?;
    let derived = goals::derive_goals(&profile, today)?;

    let db_path = get_database_path();
    println!("Database path: {}", db_path.display());

    let database = Database::new(&db_path)?;
    database.with_conn(|conn| migrations::run_migrations(conn))?;

    let store = SqliteStore::new(database);
    nutrilog::diary::save_profile(&store, &profile)?;

    println!("Profile saved.");
    println!("  Daily calorie goal: {} kcal", derived.daily_calorie_goal);
    println!("  Protein: {} g", derived.macros.protein_goal_g);
    println!("  Carbs:   {} g", derived.macros.carbs_goal_g);
    println!("  Fat:     {} g", derived.macros.fat_goal_g);

    Ok(())
}
