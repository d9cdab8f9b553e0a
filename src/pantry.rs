//! # Pantry Store
//!
//! This module holds the in-memory pantry store: per-ingredient purchase
//! records keyed by canonical name, the relevance (activity) tracking, and
//! every operation of the tracking engine — purchase ingestion, consumption
//! rate estimation, daily decay, and shopping-list derivation.
//!
//! ## Control Flow
//!
//! receipt → line items → [`Pantry::add_item`] resolves each description and
//! updates the matched record → [`Pantry::update_amount`] decays on-hand
//! estimates on a periodic tick → [`Pantry::make_shopping_list`] reports what
//! is due for restocking.
//!
//! All mutating operations take `&mut self`; a concurrent deployment must
//! wrap the store in an exclusive lock around mutation.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::errors::PantryError;
use crate::matcher::find_closest;
use crate::pantry_model::{
    Activity, AddOutcome, IngredientRecord, PantryConfig, ParsedReceipt, RelevanceEntry,
};

/// The pantry inventory store
///
/// Maps canonical ingredient names to their purchase records and tracks which
/// ingredients are actively purchased. Iteration order over records and
/// relevance entries is alphabetical, so every derived result is
/// deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pantry {
    records: BTreeMap<String, IngredientRecord>,
    relevance: BTreeMap<String, RelevanceEntry>,
    config: PantryConfig,
}

impl Pantry {
    /// Create a pantry seeded with a fixed canonical ingredient set
    ///
    /// Every canonical name starts with an empty record. Names listed in
    /// `commonly_used` are marked Active immediately; anything else becomes
    /// relevant once a purchase resolves to it. `commonly_used` names that
    /// are not canonical are ignored, preserving the invariant that every
    /// relevance entry has a backing record.
    pub fn new<I, J, S, T>(ingredients: I, commonly_used: J) -> Self
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        Self::with_config(ingredients, commonly_used, PantryConfig::default())
    }

    /// Create a pantry with explicit engine configuration
    pub fn with_config<I, J, S, T>(ingredients: I, commonly_used: J, config: PantryConfig) -> Self
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        let records: BTreeMap<String, IngredientRecord> = ingredients
            .into_iter()
            .map(|name| (name.into(), IngredientRecord::default()))
            .collect();

        let mut pantry = Self {
            records,
            relevance: BTreeMap::new(),
            config,
        };
        for name in commonly_used {
            let name = name.into();
            if !pantry.mark_relevant(&name) {
                warn!("Ignoring unknown commonly-used ingredient '{}'", name);
            }
        }

        info!(
            "Initialized pantry with {} canonical ingredients ({} active)",
            pantry.records.len(),
            pantry.relevance.len()
        );
        pantry
    }

    /// The engine configuration in effect
    pub fn config(&self) -> &PantryConfig {
        &self.config
    }

    /// Number of canonical ingredients in the store
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no canonical ingredients
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up the record for a canonical ingredient
    pub fn record(&self, name: &str) -> Option<&IngredientRecord> {
        self.records.get(name)
    }

    /// Mutable access to the record for a canonical ingredient
    pub fn record_mut(&mut self, name: &str) -> Option<&mut IngredientRecord> {
        self.records.get_mut(name)
    }

    /// Canonical ingredient names, alphabetically
    pub fn ingredient_names(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    /// The activity state of an ingredient, or `None` when it is not a
    /// relevance member
    pub fn activity(&self, name: &str) -> Option<Activity> {
        self.relevance.get(name).map(|entry| entry.activity)
    }

    /// Manually mark an ingredient as actively purchased
    ///
    /// Idempotent for already-Active members; re-promotes Dormant ones and
    /// resets their dormancy counter. Returns `false` (and leaves the store
    /// unchanged) when the name is not a canonical ingredient.
    pub fn mark_relevant(&mut self, name: &str) -> bool {
        if !self.records.contains_key(name) {
            return false;
        }
        self.relevance
            .insert(name.to_string(), RelevanceEntry::active());
        true
    }

    /// Manually remove an ingredient from the relevance set
    ///
    /// The purchase record is kept; only the activity tracking is dropped.
    /// Returns `false` when the name was not a relevance member.
    pub fn retire(&mut self, name: &str) -> bool {
        let removed = self.relevance.remove(name).is_some();
        if removed {
            info!("Retired '{}' from the relevance set", name);
        }
        removed
    }

    /// Update the consumption-rate estimate for one ingredient
    ///
    /// Must be called while the record still holds the *previous* purchase's
    /// date and amount. The instantaneous estimate is
    /// `most_recent_amount / elapsed_days`; with no prior rate it is taken
    /// as-is, otherwise it is folded in with EWMA smoothing:
    /// `rate = alpha * instantaneous + (1 - alpha) * rate`.
    ///
    /// No-op (`Ok`) when the ingredient is not a relevance member or has no
    /// purchase history yet — rate is only tracked for relevant ingredients.
    ///
    /// # Errors
    ///
    /// [`PantryError::DegenerateInterval`] when `buy_date` is not strictly
    /// after the previous purchase date (e.g. a duplicate same-day entry);
    /// the record is left untouched.
    pub fn update_rate(
        &mut self,
        name: &str,
        buy_date: NaiveDate,
        alpha: f64,
    ) -> Result<(), PantryError> {
        if !self.relevance.contains_key(name) {
            return Ok(());
        }
        let Some(record) = self.records.get_mut(name) else {
            return Ok(());
        };
        let Some(previous_date) = record.most_recent_date else {
            return Ok(());
        };

        let elapsed_days = (buy_date - previous_date).num_days();
        if elapsed_days <= 0 {
            return Err(PantryError::DegenerateInterval {
                ingredient: name.to_string(),
                date: buy_date,
            });
        }

        let instantaneous = record.most_recent_amount / elapsed_days as f64;
        let updated = match record.rate {
            Some(rate) => alpha * instantaneous + (1.0 - alpha) * rate,
            None => instantaneous,
        };
        debug!(
            "Updated rate for '{}': {:.4}/day (instantaneous {:.4} over {} days)",
            name, updated, instantaneous, elapsed_days
        );
        record.rate = Some(updated);
        Ok(())
    }

    /// Record one purchase line item against the store
    ///
    /// The description is resolved against Active relevance members first,
    /// then against the full canonical set. A miss on both is a normal
    /// outcome ([`AddOutcome::NotApplicable`]) — non-food receipt lines are
    /// expected — and leaves the store unchanged.
    ///
    /// On a hit, the rate estimate is refreshed from the previous purchase
    /// (a same-day duplicate skips the refresh and keeps the old rate), the
    /// record's date/amount are overwritten, `current_amount` resets to the
    /// freshly bought amount, `total_amount` accumulates, and the ingredient
    /// is (re-)promoted to Active.
    pub fn add_item(&mut self, description: &str, date: NaiveDate, amount: f64) -> AddOutcome {
        let resolved = self
            .resolve_among_active(description)
            .or_else(|| self.resolve_among_all(description));
        let Some(name) = resolved else {
            debug!("No canonical ingredient matched '{}'; skipping", description);
            return AddOutcome::NotApplicable;
        };

        info!(
            "Recording purchase '{}' as '{}' ({} on {})",
            description, name, amount, date
        );

        // total_amount transitions from "never purchased" on first hit
        {
            let record = self
                .records
                .get_mut(&name)
                .expect("resolved name must have a record");
            if record.total_amount.is_none() {
                record.total_amount = Some(0.0);
            }
        }

        // Refresh the rate while the record still holds the previous
        // purchase. Same-day duplicates keep the existing rate.
        match self.update_rate(&name, date, self.config.smoothing_alpha) {
            Ok(()) => {}
            Err(PantryError::DegenerateInterval { .. }) => {
                warn!(
                    "Duplicate same-day purchase of '{}' on {}; keeping previous rate",
                    name, date
                );
            }
            Err(err) => {
                warn!("Rate update for '{}' failed: {}", name, err);
            }
        }

        let record = self
            .records
            .get_mut(&name)
            .expect("resolved name must have a record");
        record.most_recent_date = Some(date);
        record.most_recent_amount = amount;
        record.current_amount = amount;
        record.total_amount = Some(record.total_amount.unwrap_or(0.0) + amount);

        self.relevance
            .insert(name.clone(), RelevanceEntry::active());

        AddOutcome::Recorded { ingredient: name }
    }

    /// Ingest a whole parsed receipt, one [`Pantry::add_item`] per line item
    ///
    /// Returns the per-line outcomes in receipt order.
    pub fn record_receipt(&mut self, receipt: &ParsedReceipt) -> Vec<AddOutcome> {
        info!(
            "Ingesting receipt from {} with {} line items",
            receipt.purchased_on,
            receipt.items.len()
        );
        receipt
            .items
            .iter()
            .map(|item| self.add_item(&item.description, receipt.purchased_on, item.price))
            .collect()
    }

    /// Advance every ingredient's on-hand estimate by one time unit
    ///
    /// Each record with an established rate loses one day of estimated
    /// consumption; records without a rate are unaffected (zero decay).
    /// Also advances the dormancy tracking: an Active ingredient that stays
    /// due-for-restock for `dormancy_cycles` consecutive ticks without a
    /// purchase is demoted to Dormant.
    pub fn update_amount(&mut self) {
        for record in self.records.values_mut() {
            if let Some(rate) = record.rate {
                record.current_amount -= rate;
            }
        }

        for (name, entry) in self.relevance.iter_mut() {
            if entry.activity != Activity::Active {
                continue;
            }
            let due = self
                .records
                .get(name)
                .map(IngredientRecord::needs_restock)
                .unwrap_or(false);
            if due {
                entry.missed_cycles += 1;
                if entry.missed_cycles >= self.config.dormancy_cycles {
                    info!(
                        "Demoting '{}' to dormant after {} unrestocked cycles",
                        name, entry.missed_cycles
                    );
                    entry.activity = Activity::Dormant;
                }
            } else {
                entry.missed_cycles = 0;
            }
        }
    }

    /// Derive the shopping list: Active ingredients whose on-hand estimate
    /// has fallen below one day of consumption
    ///
    /// Ingredients without an established rate are never listed. The result
    /// is alphabetical, so repeated calls without intervening mutation are
    /// identical.
    pub fn make_shopping_list(&self) -> Vec<String> {
        self.relevance
            .iter()
            .filter(|(_, entry)| entry.activity == Activity::Active)
            .filter(|(name, _)| {
                self.records
                    .get(name.as_str())
                    .map(IngredientRecord::needs_restock)
                    .unwrap_or(false)
            })
            .map(|(name, _)| name.clone())
            .collect()
    }

    fn resolve_among_active(&self, description: &str) -> Option<String> {
        let active = self
            .relevance
            .iter()
            .filter(|(_, entry)| entry.activity == Activity::Active)
            .map(|(name, _)| name.as_str());
        find_closest(active, description, self.config.match_threshold).map(str::to_string)
    }

    fn resolve_among_all(&self, description: &str) -> Option<String> {
        find_closest(
            self.records.keys().map(String::as_str),
            description,
            self.config.match_threshold,
        )
        .map(str::to_string)
    }
}
