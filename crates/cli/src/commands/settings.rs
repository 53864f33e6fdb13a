//! Allergen and goal settings commands.

use greenbasket_core::{NutrientGoals, Preferences};
use greenbasket_store::{StorageBackend, Store};
use rust_decimal::Decimal;

/// Replace the flagged allergen set. Names are stored lowercase so that
/// catalog comparisons stay exact.
#[allow(clippy::print_stdout)]
pub fn set_allergens<S: StorageBackend>(
    store: &mut Store<S>,
    names: Vec<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let normalized = names.into_iter().map(|n| n.to_lowercase()).collect();
    store.set_allergens(normalized)?;
    show_allergens(store);
    Ok(())
}

/// Show the flagged allergen set.
#[allow(clippy::print_stdout)]
pub fn show_allergens<S: StorageBackend>(store: &Store<S>) {
    if store.allergens().is_empty() {
        println!("No flagged allergens.");
    } else {
        let names: Vec<&str> = store.allergens().iter().map(String::as_str).collect();
        println!("Flagged allergens: {}", names.join(", "));
    }
}

/// Replace the daily goals.
#[allow(clippy::print_stdout)]
pub fn set_goals<S: StorageBackend>(
    store: &mut Store<S>,
    calories: u32,
    protein: Decimal,
    carbs: Decimal,
    fat: Decimal,
) -> Result<(), Box<dyn std::error::Error>> {
    store.set_preferences(Preferences {
        daily_calorie_goal: calories,
        nutrient_goals: NutrientGoals {
            protein,
            carbs,
            fat,
        },
    })?;
    show_goals(store);
    Ok(())
}

/// Show the current goals.
#[allow(clippy::print_stdout)]
pub fn show_goals<S: StorageBackend>(store: &Store<S>) {
    let preferences = store.preferences();
    println!("Daily calories: {}", preferences.daily_calorie_goal);
    println!("Protein: {}g", preferences.nutrient_goals.protein);
    println!("Carbs:   {}g", preferences.nutrient_goals.carbs);
    println!("Fat:     {}g", preferences.nutrient_goals.fat);
}
