//! Tracker dashboard commands.

use chrono::{DateTime, Utc};
use greenbasket_core::{GoalProgress, PeriodFilter};
use greenbasket_store::{StorageBackend, Store};

/// Totals and goal progress for a window.
#[allow(clippy::print_stdout)]
pub fn show<S: StorageBackend>(store: &Store<S>, period: PeriodFilter) {
    let totals = store.totals(period);
    let progress = store.progress(period);
    let goals = &store.preferences().nutrient_goals;

    println!(
        "Calories: {} / {} ({})",
        totals.calories,
        store.preferences().daily_calorie_goal,
        percent_label(&progress.calories)
    );
    println!(
        "Protein:  {}g / {}g ({})",
        totals.protein,
        goals.protein,
        percent_label(&progress.protein)
    );
    println!(
        "Carbs:    {}g / {}g ({})",
        totals.carbs,
        goals.carbs,
        percent_label(&progress.carbs)
    );
    println!(
        "Fat:      {}g / {}g ({})",
        totals.fat,
        goals.fat,
        percent_label(&progress.fat)
    );
}

/// Clamped percentage, with the unclamped ratio appended when over goal.
fn percent_label(progress: &GoalProgress) -> String {
    let percent = progress.percent().round();
    let ratio = progress.ratio().round();
    if ratio > percent {
        format!("{percent}%, {ratio}% of goal")
    } else {
        format!("{percent}%")
    }
}

/// Entries in a window, newest first.
#[allow(clippy::print_stdout)]
pub fn entries<S: StorageBackend>(store: &Store<S>, period: PeriodFilter) {
    let matching = store.filtered_entries(period);
    if matching.is_empty() {
        println!("No entries in this window.");
        return;
    }
    for entry in matching {
        let allergens: Vec<&str> = entry.allergens.iter().map(String::as_str).collect();
        println!(
            "{}  {:<40} {:>5} cal  P {}g C {}g F {}g  [{}]",
            entry.logged_at.to_rfc3339(),
            entry.name,
            entry.calories,
            entry.nutrients.protein,
            entry.nutrients.carbs,
            entry.nutrients.fat,
            allergens.join(", ")
        );
    }
}

/// Remove entries logged at an exact timestamp.
#[allow(clippy::print_stdout)]
pub fn remove<S: StorageBackend>(
    store: &mut Store<S>,
    timestamp: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let instant: DateTime<Utc> = DateTime::parse_from_rfc3339(timestamp)?.with_timezone(&Utc);
    let removed = store.remove_consumption_entry(instant)?;
    if removed == 0 {
        println!("No entries logged at {timestamp}; nothing to do.");
    } else {
        println!("Removed {removed} entry(ies).");
    }
    Ok(())
}

/// Clear the log, or just today's entries with `--today`.
#[allow(clippy::print_stdout)]
pub fn reset<S: StorageBackend>(
    store: &mut Store<S>,
    today_only: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let period = today_only.then_some(PeriodFilter::Today);
    let removed = store.clear_consumption_log(period)?;
    if today_only {
        println!("Cleared {removed} entry(ies) from today.");
    } else {
        println!("Cleared the whole tracker ({removed} entry(ies)).");
    }
    Ok(())
}

/// Print CSV rows for a window's entries, matching the classic export
/// columns.
#[allow(clippy::print_stdout)]
pub fn export_csv<S: StorageBackend>(store: &Store<S>, period: PeriodFilter) {
    println!("Date,Time,Item,Calories,Protein,Carbs,Fat,Allergens");
    for entry in store.filtered_entries(period) {
        let allergens: Vec<&str> = entry.allergens.iter().map(String::as_str).collect();
        println!(
            "{},{},\"{}\",{},{},{},{},\"{}\"",
            entry.logged_at.format("%Y-%m-%d"),
            entry.logged_at.format("%H:%M:%S"),
            entry.name.replace('"', "\"\""),
            entry.calories,
            entry.nutrients.protein,
            entry.nutrients.carbs,
            entry.nutrients.fat,
            allergens.join(", ")
        );
    }
}
