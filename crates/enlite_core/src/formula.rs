//! Carbon counting for chemical sum formulas.
//!
//! # Invariants
//! - `C` directly followed by a lowercase letter is a two-letter element
//!   symbol (Cl, Ca, Co, Cu, ...) and never counts as carbon.
//! - A formula with no carbon token is rejected, whether or not it contains
//!   a `C` character.
//! - Every carbon token in the formula contributes, not just the first.

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

// The optional lowercase group lets two-letter symbols match so they can be skipped.
static CARBON_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"C([a-z]?)([0-9]*)").expect("valid carbon token regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormulaError {
    /// The formula contains no `C` at all.
    MissingCarbon,
    /// A carbon count does not fit in `u32`.
    InvalidCount(String),
}

impl Display for FormulaError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingCarbon => write!(f, "formula contains no carbon atoms"),
            Self::InvalidCount(token) => write!(f, "carbon count `{token}` is out of range"),
        }
    }
}

impl Error for FormulaError {}

/// Returns the number of carbon atoms in a sum formula.
///
/// `"C6H12O6"` -> 6, `"C"` -> 1, `"CaCO3"` -> 1.
///
/// # Errors
/// - `FormulaError::MissingCarbon` when `formula` has no carbon token
///   (`"H2O"`, `"NaCl"`, `"CoCl2"`).
/// - `FormulaError::InvalidCount` when a count or the total overflows `u32`.
pub fn count_carbons(formula: &str) -> Result<u32, FormulaError> {
    if !formula.contains('C') {
        return Err(FormulaError::MissingCarbon);
    }

    let mut total: u32 = 0;
    let mut seen_carbon = false;
    for token in CARBON_TOKEN_RE.captures_iter(formula) {
        if !token[1].is_empty() {
            continue;
        }
        seen_carbon = true;

        let digits = &token[2];
        let count = if digits.is_empty() {
            1
        } else {
            digits
                .parse::<u32>()
                .map_err(|_| FormulaError::InvalidCount(token[0].to_string()))?
        };
        total = total
            .checked_add(count)
            .ok_or_else(|| FormulaError::InvalidCount(token[0].to_string()))?;
    }

    if !seen_carbon {
        return Err(FormulaError::MissingCarbon);
    }
    Ok(total)
}
