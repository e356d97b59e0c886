//! Deterministic daily word selection.

use chrono::NaiveDate;
use tracing::{debug, instrument};

use crate::db::Term;
use crate::game::{Difficulty, GameError};

/// Selects today's term for a difficulty tier.
///
/// The seed is the byte sum of the calendar date string concatenated with the
/// tier name, reduced modulo the number of active terms for the tier. Same
/// (date, difficulty, catalog) always yields the same term; the selection
/// changes only when the catalog changes or the calendar day rolls over.
///
/// # Errors
///
/// Returns [`GameError::EmptyCatalog`] when the tier has no active terms.
#[instrument(skip(terms), fields(count = terms.len()))]
pub fn select_todays_term(
    terms: &[Term],
    difficulty: Difficulty,
    date: NaiveDate,
) -> Result<&Term, GameError> {
    let active: Vec<&Term> = terms
        .iter()
        .filter(|t| *t.is_active() && t.difficulty() == difficulty.to_db_string())
        .collect();

    if active.is_empty() {
        return Err(GameError::EmptyCatalog);
    }

    let seed = daily_seed(difficulty, date);
    let index = seed % active.len();

    debug!(seed, index, word = %active[index].word(), "Selected today's term");
    Ok(active[index])
}

/// Byte-sum seed over the calendar date string plus the tier name.
///
/// The date renders in the fixed `"Sun Aug 24 2026"` shape, a calendar
/// representation rather than a timestamp, so the seed is stable for the
/// whole local day.
fn daily_seed(difficulty: Difficulty, date: NaiveDate) -> usize {
    let key = format!("{}{}", date.format("%a %b %d %Y"), difficulty.to_db_string());
    key.bytes().map(usize::from).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_is_stable_within_a_day() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 24).unwrap();
        let a = daily_seed(Difficulty::Beginner, date);
        let b = daily_seed(Difficulty::Beginner, date);
        assert_eq!(a, b);
    }

    #[test]
    fn test_seed_differs_across_tiers() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 24).unwrap();
        let beginner = daily_seed(Difficulty::Beginner, date);
        let advanced = daily_seed(Difficulty::Advanced, date);
        assert_ne!(beginner, advanced);
    }

    #[test]
    fn test_empty_catalog() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 24).unwrap();
        let result = select_todays_term(&[], Difficulty::Beginner, date);
        assert!(matches!(result, Err(GameError::EmptyCatalog)));
    }
}
