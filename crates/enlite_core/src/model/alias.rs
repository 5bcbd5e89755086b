//! Deduplicated alias sets built from joined alias rows.
//!
//! # Responsibility
//! - Collapse the cross product produced by the alias join into one ordered,
//!   duplicate-free sequence per namespace.
//!
//! # Invariants
//! - Values keep first-appearance order.
//! - Nulls and exact repeats are dropped.
//! - Rows are grouped by canonical id; groups keep first-appearance order.

use super::entity::AliasRow;
use super::namespace::Namespace;
use serde::{Deserialize, Serialize};

/// All known aliases of one canonical entity, one sequence per namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasSet {
    pub modelseed: Vec<String>,
    pub metacyc: Vec<String>,
    pub bigg: Vec<String>,
    pub kegg: Vec<String>,
    /// First non-null canonical name seen in the group.
    pub name: Option<String>,
}

impl AliasSet {
    /// Ordered aliases for one namespace.
    pub fn aliases(&self, namespace: Namespace) -> &[String] {
        match namespace {
            Namespace::ModelSeed => &self.modelseed,
            Namespace::MetaCyc => &self.metacyc,
            Namespace::Bigg => &self.bigg,
            Namespace::Kegg => &self.kegg,
        }
    }

    /// First alias for one namespace, if any.
    pub fn first(&self, namespace: Namespace) -> Option<&str> {
        self.aliases(namespace).first().map(String::as_str)
    }

    /// Canonical id of the group. Empty only for a default-constructed set.
    pub fn canonical_id(&self) -> Option<&str> {
        self.first(Namespace::CANONICAL)
    }

    fn aliases_mut(&mut self, namespace: Namespace) -> &mut Vec<String> {
        match namespace {
            Namespace::ModelSeed => &mut self.modelseed,
            Namespace::MetaCyc => &mut self.metacyc,
            Namespace::Bigg => &mut self.bigg,
            Namespace::Kegg => &mut self.kegg,
        }
    }

    fn absorb(&mut self, row: &AliasRow) {
        for namespace in Namespace::ALL {
            if let Some(value) = row.value(namespace) {
                push_distinct(self.aliases_mut(namespace), value);
            }
        }
        if self.name.is_none() {
            self.name = row.name.clone();
        }
    }
}

/// Groups joined rows by canonical id and deduplicates every namespace column.
pub fn group_alias_rows(rows: &[AliasRow]) -> Vec<AliasSet> {
    let mut groups: Vec<AliasSet> = Vec::new();
    for row in rows {
        let position = groups
            .iter()
            .position(|group| group.canonical_id() == Some(row.canonical_id.as_str()));
        match position {
            Some(index) => groups[index].absorb(row),
            None => {
                let mut group = AliasSet::default();
                group.absorb(row);
                groups.push(group);
            }
        }
    }
    groups
}

fn push_distinct(values: &mut Vec<String>, value: &str) {
    if !values.iter().any(|existing| existing == value) {
        values.push(value.to_string());
    }
}
