//! # Fuzzy Ingredient Matcher
//!
//! This module resolves free-text receipt descriptions to canonical
//! ingredient names using fuzzy string comparison.
//!
//! ## Features
//!
//! - Candidate normalization: runs of non-alphanumeric characters collapse to
//!   a single space, so "2% Milk" and "2  Milk" compare identically
//! - **Partial ratio** scoring: rewards the shorter string being a
//!   near-substring of the longer one, so "Organic Whole Milk 1L" still
//!   resolves to "Milk"
//! - Fixed acceptance threshold; anything below it is a deliberate miss
//!
//! All functions here are pure and deterministic for fixed inputs.

use lazy_static::lazy_static;
use log::{debug, trace};
use regex::Regex;

// Lazy static regex so the pattern is compiled once
lazy_static! {
    static ref NON_ALPHANUMERIC: Regex =
        Regex::new("[^0-9a-zA-Z]+").expect("Normalization pattern should be valid");
}

/// Normalize a candidate name for comparison
///
/// Replaces every run of non-alphanumeric characters with a single space,
/// stripping punctuation and symbols while preserving token boundaries.
///
/// # Examples
///
/// ```rust
/// use pantry::matcher::normalize_name;
///
/// assert_eq!(normalize_name("2% Milk"), "2 Milk");
/// assert_eq!(normalize_name("extra-virgin olive oil"), "extra virgin olive oil");
/// ```
pub fn normalize_name(name: &str) -> String {
    NON_ALPHANUMERIC.replace_all(name, " ").into_owned()
}

/// Score two strings with a partial fuzzy ratio in `[0, 100]`
///
/// The shorter string is slid over every equal-length window of the longer
/// one; the best normalized Levenshtein similarity across windows, scaled to
/// 0–100 and rounded, is the score. An exact substring therefore scores 100,
/// and small typos inside the matched window only dent the score
/// proportionally.
///
/// Either string being empty scores 0.
pub fn partial_ratio(a: &str, b: &str) -> u32 {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let (short, long) = if a_chars.len() <= b_chars.len() {
        (a_chars, b_chars)
    } else {
        (b_chars, a_chars)
    };

    let shorter: String = short.iter().collect();
    let window = short.len();
    let mut best = 0.0_f64;
    for start in 0..=(long.len() - window) {
        let slice: String = long[start..start + window].iter().collect();
        let similarity = strsim::normalized_levenshtein(&shorter, &slice);
        if similarity > best {
            best = similarity;
        }
        if best >= 1.0 {
            break;
        }
    }

    (best * 100.0).round() as u32
}

/// Find the canonical candidate closest to a query, or `None` when nothing
/// scores at or above `threshold`
///
/// Candidates are normalized before scoring; the returned name is the
/// original, non-normalized candidate. Ties resolve to the first candidate in
/// iteration order, so the result is deterministic for a fixed iteration
/// order.
///
/// # Examples
///
/// ```rust
/// use pantry::matcher::find_closest;
///
/// let canonical = ["Eggs", "Milk"];
/// let hit = find_closest(canonical.iter().copied(), "Organic Whole Milk 1L", 60);
/// assert_eq!(hit, Some("Milk"));
///
/// let miss = find_closest(canonical.iter().copied(), "Paper Towels", 60);
/// assert_eq!(miss, None);
/// ```
pub fn find_closest<'a, I>(candidates: I, query: &str, threshold: u32) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best_score = 0_u32;
    let mut closest: Option<&'a str> = None;

    for candidate in candidates {
        let normalized = normalize_name(candidate);
        let score = partial_ratio(&normalized, query);
        trace!("Scored candidate '{}' against '{}': {}", candidate, query, score);

        if closest.is_none() || score > best_score {
            best_score = score;
            closest = Some(candidate);
        }
    }

    if best_score < threshold {
        debug!(
            "No candidate scored >= {} against '{}' (best: {})",
            threshold, query, best_score
        );
        return None;
    }
    closest
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_punctuation_runs() {
        assert_eq!(normalize_name("2% Milk"), "2 Milk");
        assert_eq!(normalize_name("2  Milk"), "2 Milk");
        assert_eq!(normalize_name("salt&pepper--mix"), "salt pepper mix");
    }

    #[test]
    fn test_partial_ratio_exact_substring() {
        assert_eq!(partial_ratio("Milk", "Organic Whole Milk 1L"), 100);
        assert_eq!(partial_ratio("Milk", "Milk"), 100);
    }

    #[test]
    fn test_partial_ratio_tolerates_typos_in_window() {
        let score = partial_ratio("Cheddar Cheese", "Chedar Cheese 200g");
        assert!(score >= 60, "expected an accepting score, got {}", score);
        assert!(score < 100);
    }

    #[test]
    fn test_partial_ratio_unrelated_strings_score_low() {
        assert!(partial_ratio("Milk", "Paper Towels") < 60);
        assert_eq!(partial_ratio("", "Milk"), 0);
        assert_eq!(partial_ratio("Milk", ""), 0);
    }

    #[test]
    fn test_find_closest_returns_original_candidate() {
        let candidates = ["2% Milk", "Eggs"];
        let hit = find_closest(candidates.iter().copied(), "2 Milk half gallon", 60);
        assert_eq!(hit, Some("2% Milk"));
    }

    #[test]
    fn test_find_closest_rejects_below_threshold() {
        let candidates = ["Milk", "Eggs"];
        assert_eq!(
            find_closest(candidates.iter().copied(), "Paper Towels", 60),
            None
        );
    }

    #[test]
    fn test_find_closest_empty_candidates() {
        assert_eq!(find_closest(std::iter::empty(), "Milk", 60), None);
    }

    #[test]
    fn test_find_closest_tie_goes_to_first_candidate() {
        // Both candidates normalize to the same string and score identically.
        let candidates = ["Milk!", "Milk?"];
        let hit = find_closest(candidates.iter().copied(), "Milk", 60);
        assert_eq!(hit, Some("Milk!"));
    }

    #[test]
    fn test_punctuation_only_query_misses() {
        let candidates = ["Milk", "Eggs"];
        assert_eq!(find_closest(candidates.iter().copied(), "%%--!!", 60), None);
    }
}
