//! # Pantry Tracker
//!
//! A household grocery inventory engine that ingests parsed receipt line
//! items, fuzzy-matches free-text descriptions against a canonical ingredient
//! list, maintains exponentially-smoothed per-day consumption rates, and
//! derives a shopping list from on-hand estimates.
//!
//! OCR/receipt text extraction is an external collaborator: the engine
//! consumes already-structured line items and is agnostic to how they were
//! produced.
//!
//! The store is single-threaded and synchronous; all mutation goes through
//! `&mut Pantry`. Wrap the store in an exclusive lock if ingestion must run
//! concurrently.

pub mod errors;
pub mod matcher;
pub mod pantry;
pub mod pantry_model;
pub mod persistence;
