//! Typed read models for reference rows.
//!
//! # Invariants
//! - Records are built only from non-obsolete canonical rows.
//! - Optional fields mirror nullable reference columns; nothing is defaulted.

use super::namespace::Namespace;
use serde::{Deserialize, Serialize};

/// One row of the left-outer join across the three alias tables.
///
/// Aliases are `None` where the joined namespace has no entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasRow {
    pub canonical_id: String,
    pub metacyc_alias: Option<String>,
    pub bigg_alias: Option<String>,
    pub kegg_alias: Option<String>,
    pub name: Option<String>,
}

impl AliasRow {
    /// Returns this row's value for one namespace column.
    pub fn value(&self, namespace: Namespace) -> Option<&str> {
        match namespace {
            Namespace::ModelSeed => Some(self.canonical_id.as_str()),
            Namespace::MetaCyc => self.metacyc_alias.as_deref(),
            Namespace::Bigg => self.bigg_alias.as_deref(),
            Namespace::Kegg => self.kegg_alias.as_deref(),
        }
    }
}

/// Canonical compound record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundRecord {
    pub canonical_id: String,
    pub abbreviation: Option<String>,
    pub name: Option<String>,
    pub formula: Option<String>,
    pub inchikey: Option<String>,
    /// Stored as text by the import pipeline.
    pub charge: Option<String>,
    pub mass: Option<f64>,
}

/// Canonical reaction record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactionRecord {
    pub canonical_id: String,
    pub name: Option<String>,
    pub stoichiometry: Option<String>,
    pub equation: Option<String>,
    pub deltag: Option<f64>,
}
