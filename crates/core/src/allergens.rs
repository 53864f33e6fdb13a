//! Allergen-conflict checking.

use std::collections::BTreeSet;

/// Whether a product's allergens intersect the user's flagged set.
///
/// Pure set intersection; comparison is exact (allergen names are stored
/// lowercase by convention).
#[must_use]
pub fn has_conflict(item_allergens: &BTreeSet<String>, user_allergens: &BTreeSet<String>) -> bool {
    item_allergens
        .intersection(user_allergens)
        .next()
        .is_some()
}

/// The allergens shared between a product and the user's flagged set.
#[must_use]
pub fn conflicting(
    item_allergens: &BTreeSet<String>,
    user_allergens: &BTreeSet<String>,
) -> BTreeSet<String> {
    item_allergens
        .intersection(user_allergens)
        .cloned()
        .collect()
}
