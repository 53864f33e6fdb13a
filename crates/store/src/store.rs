//! The mutable state owner: cart, consumption log, preferences, allergens.
//!
//! A [`Store`] is constructed once per session over an injected
//! [`StorageBackend`] and passed to consumers; there is no global singleton.
//! It is the sole writer to persisted storage.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use greenbasket_core::{
    CartEntry, CartEntryId, ConsumptionEntry, NutrientTotals, PeriodFilter, Preferences, Product,
    allergens, MAX_QUANTITY, MIN_QUANTITY,
};
use rust_decimal::Decimal;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::aggregate::{self, TrackerProgress};
use crate::error::{StorageError, StoreError};
use crate::storage::{StorageBackend, StorageKey};

/// Caller's answer to an allergen conflict.
///
/// The store never prompts: it reports a conflict as
/// [`StoreError::AllergenConflict`] and the caller retries with [`Proceed`]
/// once the user has confirmed.
///
/// [`Proceed`]: AllergenAck::Proceed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllergenAck {
    /// Reject the add if the product conflicts with the user's allergens.
    Prompt,
    /// The user has confirmed; add despite a conflict.
    Proceed,
}

/// Outcome of restoring persisted state.
///
/// Each collection restores independently: a corrupted record resets that
/// collection alone to its default and is listed here, so a UI can warn the
/// user without the restore ever failing.
#[derive(Debug, Clone, Default)]
pub struct RestoreReport {
    /// Keys whose stored record was unreadable or unparseable.
    pub resets: Vec<StorageKey>,
}

impl RestoreReport {
    /// Whether every collection restored cleanly.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.resets.is_empty()
    }
}

/// Checkout arithmetic over the current cart.
///
/// Plain decimals; currency formatting belongs to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartSummary {
    /// Sum of line prices.
    pub subtotal: Decimal,
    /// Tax at the configured rate.
    pub tax: Decimal,
    /// Subtotal plus tax.
    pub total: Decimal,
    /// Total serving count across lines.
    pub item_count: u32,
}

/// Owner of all mutable session state and its persistence.
#[derive(Debug)]
pub struct Store<S: StorageBackend> {
    backend: S,
    cart: Vec<CartEntry>,
    log: Vec<ConsumptionEntry>,
    preferences: Preferences,
    allergens: BTreeSet<String>,
}

impl<S: StorageBackend> Store<S> {
    /// Restore a store from persisted state.
    ///
    /// Missing keys restore as empty/default. A key holding unparseable
    /// data resets that collection alone to its default; the other three
    /// are unaffected. Corruption never propagates as an error - it is
    /// logged and reported in the [`RestoreReport`].
    pub fn restore(backend: S) -> (Self, RestoreReport) {
        let mut report = RestoreReport::default();
        let cart = restore_key(&backend, StorageKey::Cart, &mut report);
        let log = restore_key(&backend, StorageKey::ConsumptionLog, &mut report);
        let preferences = restore_key(&backend, StorageKey::Preferences, &mut report);
        let allergens = restore_key(&backend, StorageKey::Allergens, &mut report);

        let store = Self {
            backend,
            cart,
            log,
            preferences,
            allergens,
        };
        (store, report)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Current cart lines, in add order.
    #[must_use]
    pub fn cart(&self) -> &[CartEntry] {
        &self.cart
    }

    /// The full consumption log, in logging order.
    #[must_use]
    pub fn consumption_log(&self) -> &[ConsumptionEntry] {
        &self.log
    }

    /// Current tracking goals.
    #[must_use]
    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    /// The user's flagged allergens.
    #[must_use]
    pub fn allergens(&self) -> &BTreeSet<String> {
        &self.allergens
    }

    // =========================================================================
    // Cart mutations
    // =========================================================================

    /// Add a product to the cart and log the matching consumption entry.
    ///
    /// Validation happens before any mutation. The cart uses an append
    /// model: adding the same product twice creates two lines. Cart and log
    /// share one timestamp per add event.
    ///
    /// # Errors
    ///
    /// - [`StoreError::InvalidQuantity`] outside 1..=99
    /// - [`StoreError::AllergenConflict`] if the product's allergens
    ///   intersect the user's set and `ack` is [`AllergenAck::Prompt`]
    /// - [`StoreError::Persistence`] if a write failed; the in-memory add
    ///   already took effect
    pub fn add_to_cart(
        &mut self,
        product: &Product,
        quantity: u32,
        ack: AllergenAck,
    ) -> Result<CartEntry, StoreError> {
        validate_quantity(quantity)?;

        if ack == AllergenAck::Prompt {
            let shared = allergens::conflicting(&product.allergens, &self.allergens);
            if !shared.is_empty() {
                return Err(StoreError::AllergenConflict { allergens: shared });
            }
        }

        let now = Utc::now();
        let entry = CartEntry::new(product, quantity, now);
        self.cart.push(entry.clone());
        self.log
            .push(ConsumptionEntry::from_product(product, quantity, now));

        tracing::debug!(product = %product.id, quantity, "added to cart and tracker");
        self.persist(StorageKey::Cart, &self.cart)?;
        self.persist(StorageKey::ConsumptionLog, &self.log)?;
        Ok(entry)
    }

    /// Remove a cart line. A miss is a no-op, not an error.
    ///
    /// Returns whether a line was removed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Persistence`] if the write failed.
    pub fn remove_from_cart(&mut self, id: CartEntryId) -> Result<bool, StoreError> {
        let before = self.cart.len();
        self.cart.retain(|entry| entry.id != id);
        if self.cart.len() == before {
            return Ok(false);
        }
        self.persist(StorageKey::Cart, &self.cart)?;
        Ok(true)
    }

    /// Change the quantity of an existing cart line.
    ///
    /// # Errors
    ///
    /// - [`StoreError::InvalidQuantity`] outside 1..=99 (checked before
    ///   touching the entry)
    /// - [`StoreError::UnknownCartEntry`] if no line has `id`
    /// - [`StoreError::Persistence`] if the write failed
    pub fn update_quantity(&mut self, id: CartEntryId, quantity: u32) -> Result<(), StoreError> {
        validate_quantity(quantity)?;
        let entry = self
            .cart
            .iter_mut()
            .find(|entry| entry.id == id)
            .ok_or(StoreError::UnknownCartEntry(id))?;
        entry.quantity = quantity;
        self.persist(StorageKey::Cart, &self.cart)?;
        Ok(())
    }

    /// Empty the cart. The consumption log is untouched.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Persistence`] if the write failed.
    pub fn clear_cart(&mut self) -> Result<(), StoreError> {
        self.cart.clear();
        self.persist(StorageKey::Cart, &self.cart)?;
        Ok(())
    }

    /// Subtotal, tax, and total over the current cart.
    #[must_use]
    pub fn cart_summary(&self, tax_rate: Decimal) -> CartSummary {
        let subtotal: Decimal = self.cart.iter().map(CartEntry::line_price).sum();
        let tax = subtotal * tax_rate;
        CartSummary {
            subtotal,
            tax,
            total: subtotal + tax,
            item_count: self.cart.iter().map(|entry| entry.quantity).sum(),
        }
    }

    // =========================================================================
    // Consumption log mutations
    // =========================================================================

    /// Remove every log entry with exactly this timestamp.
    ///
    /// Timestamps are the log's identity key; a miss is a no-op. Returns
    /// the number of entries removed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Persistence`] if the write failed.
    pub fn remove_consumption_entry(
        &mut self,
        timestamp: DateTime<Utc>,
    ) -> Result<usize, StoreError> {
        let before = self.log.len();
        self.log.retain(|entry| entry.logged_at != timestamp);
        let removed = before - self.log.len();
        if removed > 0 {
            self.persist(StorageKey::ConsumptionLog, &self.log)?;
        }
        Ok(removed)
    }

    /// Clear the consumption log, optionally only within a window.
    ///
    /// `Some(PeriodFilter::Today)` reproduces "reset today only". Returns
    /// the number of entries removed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Persistence`] if the write failed.
    pub fn clear_consumption_log(
        &mut self,
        period: Option<PeriodFilter>,
    ) -> Result<usize, StoreError> {
        self.clear_consumption_log_at(period, Utc::now())
    }

    /// [`clear_consumption_log`](Self::clear_consumption_log) with an
    /// explicit reference instant for window resolution.
    pub fn clear_consumption_log_at(
        &mut self,
        period: Option<PeriodFilter>,
        now: DateTime<Utc>,
    ) -> Result<usize, StoreError> {
        let before = self.log.len();
        match period {
            None => self.log.clear(),
            Some(filter) => self.log.retain(|entry| !filter.contains(entry.logged_at, now)),
        }
        let removed = before - self.log.len();
        if removed > 0 {
            self.persist(StorageKey::ConsumptionLog, &self.log)?;
        }
        Ok(removed)
    }

    // =========================================================================
    // Settings
    // =========================================================================

    /// Replace the user's flagged allergen set.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Persistence`] if the write failed.
    pub fn set_allergens(&mut self, allergens: BTreeSet<String>) -> Result<(), StoreError> {
        self.allergens = allergens;
        self.persist(StorageKey::Allergens, &self.allergens)?;
        Ok(())
    }

    /// Replace the user's tracking goals.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Persistence`] if the write failed.
    pub fn set_preferences(&mut self, preferences: Preferences) -> Result<(), StoreError> {
        self.preferences = preferences;
        self.persist(StorageKey::Preferences, &self.preferences)?;
        Ok(())
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Summed calories and macros over entries in the window.
    ///
    /// An empty matching set yields all-zero totals.
    #[must_use]
    pub fn totals(&self, period: PeriodFilter) -> NutrientTotals {
        self.totals_at(period, Utc::now())
    }

    /// [`totals`](Self::totals) with an explicit reference instant.
    #[must_use]
    pub fn totals_at(&self, period: PeriodFilter, now: DateTime<Utc>) -> NutrientTotals {
        aggregate::totals_in(&self.log, period, now)
    }

    /// Log entries in the window, newest first.
    #[must_use]
    pub fn filtered_entries(&self, period: PeriodFilter) -> Vec<&ConsumptionEntry> {
        self.filtered_entries_at(period, Utc::now())
    }

    /// [`filtered_entries`](Self::filtered_entries) with an explicit
    /// reference instant.
    #[must_use]
    pub fn filtered_entries_at(
        &self,
        period: PeriodFilter,
        now: DateTime<Utc>,
    ) -> Vec<&ConsumptionEntry> {
        aggregate::entries_in(&self.log, period, now)
    }

    /// Goal progress for the window, against current preferences.
    #[must_use]
    pub fn progress(&self, period: PeriodFilter) -> TrackerProgress {
        self.progress_at(period, Utc::now())
    }

    /// [`progress`](Self::progress) with an explicit reference instant.
    #[must_use]
    pub fn progress_at(&self, period: PeriodFilter, now: DateTime<Utc>) -> TrackerProgress {
        TrackerProgress::new(self.totals_at(period, now), &self.preferences)
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    fn persist<T: Serialize>(&self, key: StorageKey, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value)?;
        self.backend.write(key, &raw)
    }
}

/// Reject quantities outside 1..=99 before any mutation.
fn validate_quantity(quantity: u32) -> Result<(), StoreError> {
    if (MIN_QUANTITY..=MAX_QUANTITY).contains(&quantity) {
        Ok(())
    } else {
        Err(StoreError::InvalidQuantity(quantity))
    }
}

/// Restore one collection, falling back to its default on any failure.
fn restore_key<S, T>(backend: &S, key: StorageKey, report: &mut RestoreReport) -> T
where
    S: StorageBackend,
    T: DeserializeOwned + Default,
{
    match backend.read(key) {
        Ok(None) => T::default(),
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(%key, %err, "stored record is unparseable, resetting to default");
                report.resets.push(key);
                T::default()
            }
        },
        Err(err) => {
            tracing::warn!(%key, %err, "stored record is unreadable, resetting to default");
            report.resets.push(key);
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use greenbasket_core::Nutrients;

    fn product(id: &str, calories: u32, allergens: &[&str]) -> Product {
        Product {
            id: id.to_string(),
            name: id.to_uppercase(),
            price: Decimal::from(20),
            calories,
            nutrients: Nutrients {
                protein: Decimal::from(2),
                carbs: Decimal::from(15),
                fat: Decimal::from(10),
                fiber: Decimal::from(1),
                sugar: Decimal::ZERO,
            },
            allergens: allergens.iter().map(ToString::to_string).collect(),
            ingredients: Vec::new(),
            image: String::new(),
        }
    }

    fn fresh_store() -> Store<MemoryStorage> {
        let (store, report) = Store::restore(MemoryStorage::new());
        assert!(report.is_clean());
        store
    }

    #[test]
    fn test_add_to_cart_appends_cart_and_log() {
        let mut store = fresh_store();
        let p1 = product("p1", 150, &[]);

        store.add_to_cart(&p1, 2, AllergenAck::Prompt).unwrap();

        assert_eq!(store.cart().len(), 1);
        assert_eq!(store.cart()[0].quantity, 2);
        assert_eq!(store.consumption_log().len(), 1);

        let logged = &store.consumption_log()[0];
        assert_eq!(logged.calories, 300);
        assert_eq!(logged.nutrients.protein, Decimal::from(4));
        assert_eq!(logged.nutrients.carbs, Decimal::from(30));
        assert_eq!(logged.nutrients.fat, Decimal::from(20));
    }

    #[test]
    fn test_append_model_keeps_separate_lines() {
        let mut store = fresh_store();
        let p1 = product("p1", 100, &[]);

        store.add_to_cart(&p1, 1, AllergenAck::Prompt).unwrap();
        store.add_to_cart(&p1, 1, AllergenAck::Prompt).unwrap();

        assert_eq!(store.cart().len(), 2);
        assert_eq!(store.consumption_log().len(), 2);
        assert_ne!(store.cart()[0].id, store.cart()[1].id);
    }

    #[test]
    fn test_quantity_bounds() {
        let mut store = fresh_store();
        let p1 = product("p1", 100, &[]);

        for quantity in [0, 100, 500] {
            let err = store
                .add_to_cart(&p1, quantity, AllergenAck::Prompt)
                .unwrap_err();
            assert!(matches!(err, StoreError::InvalidQuantity(q) if q == quantity));
        }
        assert!(store.cart().is_empty());
        assert!(store.consumption_log().is_empty());

        for quantity in [1, 50, 99] {
            store.add_to_cart(&p1, quantity, AllergenAck::Prompt).unwrap();
        }
        assert_eq!(store.cart().len(), 3);
    }

    #[test]
    fn test_allergen_conflict_requires_proceed() {
        let mut store = fresh_store();
        store
            .set_allergens(["milk".to_string()].into())
            .unwrap();
        let risky = product("p1", 120, &["milk", "soy"]);

        let err = store.add_to_cart(&risky, 1, AllergenAck::Prompt).unwrap_err();
        match err {
            StoreError::AllergenConflict { allergens } => {
                assert!(allergens.contains("milk"));
                assert!(!allergens.contains("soy"));
            }
            other => panic!("expected allergen conflict, got {other}"),
        }
        assert!(store.cart().is_empty());
        assert!(store.consumption_log().is_empty());

        store.add_to_cart(&risky, 1, AllergenAck::Proceed).unwrap();
        assert_eq!(store.cart().len(), 1);
    }

    #[test]
    fn test_no_conflict_without_flagged_allergens() {
        let mut store = fresh_store();
        let risky = product("p1", 120, &["milk"]);
        store.add_to_cart(&risky, 1, AllergenAck::Prompt).unwrap();
        assert_eq!(store.cart().len(), 1);
    }

    #[test]
    fn test_remove_from_cart_is_idempotent() {
        let mut store = fresh_store();
        let p1 = product("p1", 100, &[]);
        let entry = store.add_to_cart(&p1, 1, AllergenAck::Prompt).unwrap();

        assert!(store.remove_from_cart(entry.id).unwrap());
        assert!(!store.remove_from_cart(entry.id).unwrap());
        assert!(store.cart().is_empty());
        // The log keeps its entry: removing from the cart is not un-eating.
        assert_eq!(store.consumption_log().len(), 1);
    }

    #[test]
    fn test_update_quantity() {
        let mut store = fresh_store();
        let p1 = product("p1", 100, &[]);
        let entry = store.add_to_cart(&p1, 1, AllergenAck::Prompt).unwrap();

        store.update_quantity(entry.id, 5).unwrap();
        assert_eq!(store.cart()[0].quantity, 5);

        let err = store.update_quantity(entry.id, 0).unwrap_err();
        assert!(matches!(err, StoreError::InvalidQuantity(0)));
        assert_eq!(store.cart()[0].quantity, 5);

        let missing = CartEntryId::generate();
        let err = store.update_quantity(missing, 3).unwrap_err();
        assert!(matches!(err, StoreError::UnknownCartEntry(_)));
    }

    #[test]
    fn test_clear_cart_leaves_log_alone() {
        let mut store = fresh_store();
        let p1 = product("p1", 100, &[]);
        store.add_to_cart(&p1, 1, AllergenAck::Prompt).unwrap();
        store.add_to_cart(&p1, 2, AllergenAck::Prompt).unwrap();

        store.clear_cart().unwrap();
        assert!(store.cart().is_empty());
        assert_eq!(store.consumption_log().len(), 2);
    }

    #[test]
    fn test_remove_consumption_entry_by_timestamp() {
        let mut store = fresh_store();
        let p1 = product("p1", 100, &[]);
        store.add_to_cart(&p1, 1, AllergenAck::Prompt).unwrap();
        let timestamp = store.consumption_log()[0].logged_at;

        assert_eq!(store.remove_consumption_entry(timestamp).unwrap(), 1);
        assert_eq!(store.remove_consumption_entry(timestamp).unwrap(), 0);
        assert!(store.consumption_log().is_empty());
    }

    #[test]
    fn test_clear_log_windowed() {
        let mut store = fresh_store();
        let p1 = product("p1", 100, &[]);
        store.add_to_cart(&p1, 1, AllergenAck::Prompt).unwrap();
        store.add_to_cart(&p1, 1, AllergenAck::Prompt).unwrap();

        // Resolve "today" a year from now: both entries fall outside it.
        let future = Utc::now() + chrono::Duration::days(365);
        let removed = store
            .clear_consumption_log_at(Some(PeriodFilter::Today), future)
            .unwrap();
        assert_eq!(removed, 0);
        assert_eq!(store.consumption_log().len(), 2);

        let removed = store
            .clear_consumption_log(Some(PeriodFilter::Today))
            .unwrap();
        assert_eq!(removed, 2);
        assert!(store.consumption_log().is_empty());
    }

    #[test]
    fn test_clear_log_unfiltered() {
        let mut store = fresh_store();
        let p1 = product("p1", 100, &[]);
        store.add_to_cart(&p1, 1, AllergenAck::Prompt).unwrap();

        assert_eq!(store.clear_consumption_log(None).unwrap(), 1);
        assert!(store.consumption_log().is_empty());
    }

    #[test]
    fn test_totals_over_empty_window_are_zero() {
        let store = fresh_store();
        let totals = store.totals(PeriodFilter::Month);
        assert_eq!(totals, NutrientTotals::default());
    }

    #[test]
    fn test_cart_summary_applies_tax_rate() {
        let mut store = fresh_store();
        let p1 = product("p1", 100, &[]); // price 20
        store.add_to_cart(&p1, 2, AllergenAck::Prompt).unwrap();
        store.add_to_cart(&p1, 3, AllergenAck::Prompt).unwrap();

        let summary = store.cart_summary(Decimal::new(7, 2)); // 0.07
        assert_eq!(summary.subtotal, Decimal::from(100));
        assert_eq!(summary.tax, Decimal::from(7));
        assert_eq!(summary.total, Decimal::from(107));
        assert_eq!(summary.item_count, 5);
    }

    #[test]
    fn test_persistence_failure_keeps_memory_state() {
        let (mut store, _) = Store::restore(MemoryStorage::new());
        let p1 = product("p1", 100, &[]);

        store.backend.set_fail_writes(true);
        let err = store.add_to_cart(&p1, 1, AllergenAck::Prompt).unwrap_err();
        assert!(matches!(err, StoreError::Persistence(_)));

        // Durability failed but the session state is intact and usable.
        assert_eq!(store.cart().len(), 1);
        assert_eq!(store.consumption_log().len(), 1);
        assert_eq!(store.totals(PeriodFilter::Today).calories, 100);
    }

    #[test]
    fn test_round_trip_through_backend() {
        let backend = MemoryStorage::new();
        let (mut store, _) = Store::restore(backend);
        let p1 = product("p1", 150, &["wheat"]);
        store.add_to_cart(&p1, 2, AllergenAck::Prompt).unwrap();
        store.set_allergens(["milk".to_string()].into()).unwrap();
        let preferences = Preferences {
            daily_calorie_goal: 1800,
            ..Preferences::default()
        };
        store.set_preferences(preferences.clone()).unwrap();

        let cart = store.cart().to_vec();
        let log = store.consumption_log().to_vec();

        // Rebuild a store over the same backend contents.
        let reborn_backend = MemoryStorage::new();
        for key in StorageKey::ALL {
            if let Some(raw) = store.backend.raw(key) {
                reborn_backend.seed(key, raw);
            }
        }
        let (reborn, report) = Store::restore(reborn_backend);

        assert!(report.is_clean());
        assert_eq!(reborn.cart(), cart.as_slice());
        assert_eq!(reborn.consumption_log(), log.as_slice());
        assert_eq!(reborn.preferences(), &preferences);
        assert_eq!(reborn.allergens(), store.allergens());
    }

    #[test]
    fn test_corrupted_cart_resets_alone() {
        let backend = MemoryStorage::new();
        backend.seed(StorageKey::Cart, "{definitely not json");
        backend.seed(
            StorageKey::ConsumptionLog,
            serde_json::to_string(&vec![ConsumptionEntry::from_product(
                &product("p1", 100, &[]),
                1,
                Utc::now(),
            )])
            .unwrap(),
        );

        let (store, report) = Store::restore(backend);

        assert!(store.cart().is_empty());
        assert_eq!(store.consumption_log().len(), 1);
        assert_eq!(report.resets, vec![StorageKey::Cart]);
        assert_eq!(store.preferences(), &Preferences::default());
    }
}
