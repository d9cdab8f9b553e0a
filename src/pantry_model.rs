//! # Pantry Data Model
//!
//! This module defines the data structures for the pantry inventory store:
//! per-ingredient purchase records, the relevance (activity) state machine,
//! parsed receipt input types, and engine configuration.
//!
//! ## Core Concepts
//!
//! - **IngredientRecord**: purchase history and consumption estimate for one
//!   canonical ingredient
//! - **RelevanceEntry**: tracks whether an ingredient is actively purchased,
//!   with a dormancy counter for pruning one-off items
//! - **ParsedReceipt**: the structured output of an external receipt parser,
//!   consumed by [`crate::pantry::Pantry::record_receipt`]
//!
//! ## Usage
//!
//! ```rust
//! use pantry::pantry_model::IngredientRecord;
//!
//! let record = IngredientRecord::default();
//! assert!(record.most_recent_date.is_none());
//! assert!(!record.has_purchase_history());
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Purchase history and consumption estimate for one canonical ingredient.
///
/// All "no purchase yet" states are explicit `Option`s rather than sentinel
/// values; comparisons against unset fields are therefore impossible.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IngredientRecord {
    /// Date of the last recorded purchase; `None` until the first purchase
    pub most_recent_date: Option<NaiveDate>,

    /// Amount (price) of the most recent purchase
    pub most_recent_amount: f64,

    /// Running sum of all purchase amounts ever recorded; `None` until the
    /// first purchase
    pub total_amount: Option<f64>,

    /// Estimated consumption per day, EWMA-smoothed; `None` until two
    /// purchases spaced by at least one day exist
    pub rate: Option<f64>,

    /// Estimated amount currently on hand, decremented over time by `rate`
    pub current_amount: f64,
}

impl IngredientRecord {
    /// Whether at least one purchase has ever been recorded
    pub fn has_purchase_history(&self) -> bool {
        self.most_recent_date.is_some()
    }

    /// Whether this ingredient is due for restocking: on-hand stock is below
    /// one day of estimated consumption. `None` rate means "not due".
    pub fn needs_restock(&self) -> bool {
        match self.rate {
            Some(rate) => self.current_amount < rate,
            None => false,
        }
    }
}

/// Activity state of a tracked ingredient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Activity {
    /// Being actively purchased; eligible for the shopping list
    Active,
    /// Went unrestocked for too many cycles; kept in the store but excluded
    /// from the shopping list until purchased again
    Dormant,
}

/// Relevance-set entry: activity state plus the dormancy counter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelevanceEntry {
    /// Current activity state
    pub activity: Activity,
    /// Consecutive decay ticks spent due-for-restock without a purchase
    pub missed_cycles: u32,
}

impl RelevanceEntry {
    /// A freshly promoted, actively purchased entry
    pub fn active() -> Self {
        Self {
            activity: Activity::Active,
            missed_cycles: 0,
        }
    }
}

/// One line item of a parsed receipt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptItem {
    /// Free-text item description as printed on the receipt
    pub description: String,
    /// Price of the line item
    pub price: f64,
}

/// A parsed receipt: the shape produced by the external OCR/receipt-parsing
/// collaborator. All line items share the receipt's purchase date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedReceipt {
    /// Purchase date shared by every line item
    pub purchased_on: NaiveDate,
    /// Ordered line items
    pub items: Vec<ReceiptItem>,
}

/// Outcome of ingesting a single line item
#[derive(Debug, Clone, PartialEq)]
pub enum AddOutcome {
    /// The description resolved to a canonical ingredient and the purchase
    /// was recorded
    Recorded {
        /// The canonical ingredient the description resolved to
        ingredient: String,
    },
    /// No canonical ingredient matched closely enough; the line item was
    /// skipped and the store left unchanged
    NotApplicable,
}

impl AddOutcome {
    /// Whether the line item was recorded against the store
    pub fn is_recorded(&self) -> bool {
        matches!(self, AddOutcome::Recorded { .. })
    }
}

/// Configuration options for the pantry engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PantryConfig {
    /// Minimum partial-ratio score (0–100) for a fuzzy match to be accepted
    pub match_threshold: u32,
    /// EWMA smoothing factor for rate updates, in (0, 1]
    pub smoothing_alpha: f64,
    /// Consecutive due-for-restock decay ticks before an Active ingredient
    /// is demoted to Dormant
    pub dormancy_cycles: u32,
}

impl Default for PantryConfig {
    fn default() -> Self {
        Self {
            match_threshold: 60,
            smoothing_alpha: 0.2,
            dormancy_cycles: 14,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_record_is_empty() {
        let record = IngredientRecord::default();
        assert_eq!(record.most_recent_date, None);
        assert_eq!(record.total_amount, None);
        assert_eq!(record.rate, None);
        assert_eq!(record.current_amount, 0.0);
        assert!(!record.has_purchase_history());
    }

    #[test]
    fn test_needs_restock_requires_established_rate() {
        let mut record = IngredientRecord {
            current_amount: -3.0,
            ..Default::default()
        };
        assert!(!record.needs_restock());

        record.rate = Some(2.0);
        assert!(record.needs_restock());

        record.current_amount = 2.0;
        assert!(!record.needs_restock());
    }

    #[test]
    fn test_default_config() {
        let config = PantryConfig::default();
        assert_eq!(config.match_threshold, 60);
        assert_eq!(config.smoothing_alpha, 0.2);
        assert_eq!(config.dormancy_cycles, 14);
    }
}
