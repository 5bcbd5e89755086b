//! MetaCyc identifier normalization.
//!
//! # Responsibility
//! - Translate between mangled ("altered") MetaCyc ids and their original form.
//!
//! # Invariants
//! - Translation is a lookup in the persisted mapping table, in both directions.
//!   The mangling written at import is not assumed to be injective, so it is
//!   never inverted as a string transform here.
//! - A missing mapping is `NotFound`, never an identity fallback.

use super::resolve_error::{ResolveError, ResolveResult};
use crate::model::namespace::{EntityKind, Namespace};
use crate::repo::reference_repo::{MappingDirection, ReferenceStore};
use log::debug;

/// Namespace whose identifiers have a mangled form.
pub const MANGLED_NAMESPACE: Namespace = Namespace::MetaCyc;

/// Bidirectional mangled/normal lookup for one entity kind.
#[derive(Clone)]
pub struct IdentifierNormalizer<S: ReferenceStore> {
    store: S,
    kind: EntityKind,
}

impl<S: ReferenceStore> IdentifierNormalizer<S> {
    pub fn new(store: S, kind: EntityKind) -> Self {
        Self { store, kind }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Returns the original MetaCyc id for a mangled id.
    ///
    /// # Errors
    /// - `ResolveError::NotFound` when the mangled id is not in the mapping table.
    pub fn to_normal_form(&self, mangled_id: &str) -> ResolveResult<String> {
        self.lookup(MappingDirection::MangledToNormal, mangled_id)
    }

    /// Returns the mangled id recorded for an original MetaCyc id.
    ///
    /// # Errors
    /// - `ResolveError::NotFound` when the id is not in the mapping table.
    pub fn to_mangled_form(&self, normal_id: &str) -> ResolveResult<String> {
        self.lookup(MappingDirection::NormalToMangled, normal_id)
    }

    fn lookup(&self, direction: MappingDirection, id: &str) -> ResolveResult<String> {
        match self
            .store
            .lookup_identifier_mapping(self.kind, direction, id)?
        {
            Some(counterpart) => Ok(counterpart),
            None => {
                debug!(
                    "event=id_mapping module=normalizer status=not_found kind={} direction={:?}",
                    self.kind, direction
                );
                Err(ResolveError::not_found(self.kind, MANGLED_NAMESPACE, id))
            }
        }
    }
}
