//! # Pantry Error Types Module
//!
//! This module defines the custom error types used throughout the pantry
//! tracking engine. Resolution misses are deliberately *not* errors — an
//! unrecognized receipt line is a normal outcome, reported through
//! [`crate::pantry_model::AddOutcome`] instead.

use chrono::NaiveDate;

/// Custom error types for pantry operations
#[derive(Debug, Clone, PartialEq)]
pub enum PantryError {
    /// Loading or saving the pantry store failed (bad path, I/O error,
    /// corrupt serialized data)
    Persistence(String),
    /// A rate update was requested with zero or negative elapsed days
    /// between purchases (e.g. a duplicate same-day receipt line)
    DegenerateInterval {
        /// The canonical ingredient the update targeted
        ingredient: String,
        /// The purchase date that collided with the previous one
        date: NaiveDate,
    },
}

impl std::fmt::Display for PantryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PantryError::Persistence(msg) => write!(f, "Persistence error: {msg}"),
            PantryError::DegenerateInterval { ingredient, date } => write!(
                f,
                "Degenerate purchase interval for '{ingredient}': {date} is not after the previous purchase"
            ),
        }
    }
}

impl std::error::Error for PantryError {}
