//! Windowed aggregation over the consumption log.

use chrono::{DateTime, Utc};
use greenbasket_core::{
    ConsumptionEntry, GoalProgress, NutrientTotals, PeriodFilter, Preferences,
};
use rust_decimal::Decimal;

/// Sum calories and macros over entries inside the window resolved at `now`.
///
/// An empty matching set yields all-zero totals. Entries whose stored record
/// omitted a nutrient field contribute zero for that field (the field
/// defaults apply at deserialization).
#[must_use]
pub fn totals_in(
    entries: &[ConsumptionEntry],
    period: PeriodFilter,
    now: DateTime<Utc>,
) -> NutrientTotals {
    let mut totals = NutrientTotals::default();
    for entry in entries {
        if period.contains(entry.logged_at, now) {
            totals.accumulate(entry);
        }
    }
    totals
}

/// Entries inside the window resolved at `now`, newest first.
#[must_use]
pub fn entries_in<'a>(
    entries: &'a [ConsumptionEntry],
    period: PeriodFilter,
    now: DateTime<Utc>,
) -> Vec<&'a ConsumptionEntry> {
    let mut matching: Vec<&ConsumptionEntry> = entries
        .iter()
        .filter(|entry| period.contains(entry.logged_at, now))
        .collect();
    matching.sort_by(|a, b| b.logged_at.cmp(&a.logged_at));
    matching
}

/// Windowed totals measured against the user's goals.
///
/// Each progress exposes both the display-clamped percentage and the
/// unclamped ratio, so overflowing a goal is observable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackerProgress {
    /// Calories against the daily calorie goal.
    pub calories: GoalProgress,
    /// Protein grams against the protein goal.
    pub protein: GoalProgress,
    /// Carbohydrate grams against the carbs goal.
    pub carbs: GoalProgress,
    /// Fat grams against the fat goal.
    pub fat: GoalProgress,
}

impl TrackerProgress {
    /// Measure `totals` against `preferences`.
    #[must_use]
    pub fn new(totals: NutrientTotals, preferences: &Preferences) -> Self {
        Self {
            calories: GoalProgress::new(
                Decimal::from(totals.calories),
                Decimal::from(preferences.daily_calorie_goal),
            ),
            protein: GoalProgress::new(totals.protein, preferences.nutrient_goals.protein),
            carbs: GoalProgress::new(totals.carbs, preferences.nutrient_goals.carbs),
            fat: GoalProgress::new(totals.fat, preferences.nutrient_goals.fat),
        }
    }
}
