//! User goals and goal-progress arithmetic.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Default daily calorie goal.
pub const DEFAULT_DAILY_CALORIE_GOAL: u32 = 2000;

/// Per-macro daily gram goals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutrientGoals {
    /// Daily protein goal in grams.
    pub protein: Decimal,
    /// Daily carbohydrate goal in grams.
    pub carbs: Decimal,
    /// Daily fat goal in grams.
    pub fat: Decimal,
}

impl Default for NutrientGoals {
    fn default() -> Self {
        Self {
            protein: Decimal::from(50),
            carbs: Decimal::from(250),
            fat: Decimal::from(70),
        }
    }
}

/// User-configurable tracking goals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Daily calorie goal.
    #[serde(default = "default_daily_goal")]
    pub daily_calorie_goal: u32,
    /// Per-macro daily goals.
    #[serde(default)]
    pub nutrient_goals: NutrientGoals,
}

fn default_daily_goal() -> u32 {
    DEFAULT_DAILY_CALORIE_GOAL
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            daily_calorie_goal: DEFAULT_DAILY_CALORIE_GOAL,
            nutrient_goals: NutrientGoals::default(),
        }
    }
}

/// Progress of a consumed total against a goal.
///
/// Keeps the raw consumed/goal pair so both the unclamped ratio (for
/// overflow detection) and the display-clamped percentage are available.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoalProgress {
    consumed: Decimal,
    goal: Decimal,
}

impl GoalProgress {
    /// Build progress from a consumed total and its goal.
    #[must_use]
    pub const fn new(consumed: Decimal, goal: Decimal) -> Self {
        Self { consumed, goal }
    }

    /// Unclamped percent-of-goal (`100 * consumed / goal`).
    ///
    /// A zero goal yields zero rather than a division error.
    #[must_use]
    pub fn ratio(&self) -> Decimal {
        self.consumed
            .checked_div(self.goal)
            .map_or(Decimal::ZERO, |r| r * Decimal::ONE_HUNDRED)
    }

    /// Percent-of-goal clamped to `[0, 100]` for display.
    #[must_use]
    pub fn percent(&self) -> Decimal {
        self.ratio().clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
    }

    /// How much of the goal remains, floored at zero.
    #[must_use]
    pub fn remaining(&self) -> Decimal {
        (self.goal - self.consumed).max(Decimal::ZERO)
    }
}
