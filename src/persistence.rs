//! # Pantry Persistence
//!
//! This module saves and loads the whole pantry store (records, relevance
//! tracking, and configuration) as a single JSON file inside a caller-chosen
//! directory. Every failure — an uncreatable directory, an unreadable file,
//! corrupt JSON — surfaces as [`PantryError::Persistence`] with context;
//! nothing is swallowed.

use std::fs;
use std::path::Path;

use log::info;

use crate::errors::PantryError;
use crate::pantry::Pantry;

/// File name used inside the target directory
const STORE_FILE: &str = "pantry.json";

/// Save the pantry to `dir/pantry.json`, creating `dir` if needed
///
/// # Errors
///
/// [`PantryError::Persistence`] when the directory cannot be created, the
/// store cannot be serialized, or the file cannot be written.
pub fn save(pantry: &Pantry, dir: &Path) -> Result<(), PantryError> {
    fs::create_dir_all(dir).map_err(|e| {
        PantryError::Persistence(format!("Failed to create directory '{}': {e}", dir.display()))
    })?;

    let path = dir.join(STORE_FILE);
    let json = serde_json::to_string_pretty(pantry)
        .map_err(|e| PantryError::Persistence(format!("Failed to serialize pantry: {e}")))?;
    fs::write(&path, json).map_err(|e| {
        PantryError::Persistence(format!("Failed to write '{}': {e}", path.display()))
    })?;

    info!("Saved pantry to {}", path.display());
    Ok(())
}

/// Load a pantry previously written by [`save`]
///
/// # Errors
///
/// [`PantryError::Persistence`] when the file is missing, unreadable, or not
/// a valid serialized pantry.
pub fn load(dir: &Path) -> Result<Pantry, PantryError> {
    let path = dir.join(STORE_FILE);
    let json = fs::read_to_string(&path).map_err(|e| {
        PantryError::Persistence(format!("Failed to read '{}': {e}", path.display()))
    })?;
    let pantry: Pantry = serde_json::from_str(&json).map_err(|e| {
        PantryError::Persistence(format!("Failed to deserialize '{}': {e}", path.display()))
    })?;

    info!(
        "Loaded pantry with {} ingredients from {}",
        pantry.len(),
        path.display()
    );
    Ok(pantry)
}
