//! Cross-namespace alias resolution.
//!
//! # Responsibility
//! - Canonicalize an input identifier to its ModelSEED id.
//! - Gather, deduplicate and project all known aliases of that id.
//! - Resolve batches without letting one unknown identifier abort the rest.
//!
//! # Invariants
//! - Mangled MetaCyc input is recognized only through the explicit `mangled`
//!   flag, never guessed from the identifier text.
//! - `NotFound` is always surfaced for single lookups.
//! - Every call queries the store; nothing is cached.

use super::batch::{collect_batch, BatchResults};
use super::normalizer::IdentifierNormalizer;
use super::resolve_error::{ResolveError, ResolveResult};
use crate::model::alias::{group_alias_rows, AliasSet};
use crate::model::namespace::{EntityKind, Namespace, TargetNamespace};
use crate::repo::reference_repo::ReferenceStore;
use log::{debug, info};
use serde::Serialize;
use std::time::Instant;

/// Outcome of canonicalizing one input identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CanonicalRef {
    /// Identifier exactly as supplied.
    pub input_id: String,
    pub source: Namespace,
    /// Normal (original) MetaCyc id; `None` for other namespaces.
    pub normal_id: Option<String>,
    /// Mangled MetaCyc id, when known. Set from the input for mangled input;
    /// record lookups fill it from the mapping table otherwise.
    pub mangled_id: Option<String>,
    pub canonical_id: String,
}

/// Projection of one resolved identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Resolution {
    /// First alias in the requested namespace; `None` when it has none.
    Alias(Option<String>),
    All(AliasSet),
}

/// Projection of one identifier inside a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum BatchProjection {
    /// Every alias in the requested namespace, first-seen order.
    Aliases(Vec<String>),
    All(AliasSet),
}

impl BatchProjection {
    /// Whether the identifier resolved but has nothing in the target namespace.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Aliases(aliases) => aliases.is_empty(),
            Self::All(_) => false,
        }
    }
}

/// Resolves identifiers of one entity kind across namespaces.
pub struct AliasResolver<S: ReferenceStore> {
    store: S,
    normalizer: IdentifierNormalizer<S>,
    kind: EntityKind,
}

impl<S: ReferenceStore + Clone> AliasResolver<S> {
    /// Creates a resolver; the normalizer shares the same store handle.
    pub fn new(store: S, kind: EntityKind) -> Self {
        let normalizer = IdentifierNormalizer::new(store.clone(), kind);
        Self::with_normalizer(store, normalizer)
    }
}

impl<S: ReferenceStore> AliasResolver<S> {
    pub fn with_normalizer(store: S, normalizer: IdentifierNormalizer<S>) -> Self {
        let kind = normalizer.kind();
        Self {
            store,
            normalizer,
            kind,
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn normalizer(&self) -> &IdentifierNormalizer<S> {
        &self.normalizer
    }

    /// Maps an input identifier to its canonical id.
    ///
    /// The canonical namespace maps to itself without a query; existence is
    /// checked when aliases are gathered.
    ///
    /// # Errors
    /// - `ResolveError::NotFound` when the identifier (or its mangled-form
    ///   mapping) is unknown, or only maps to obsolete entities.
    pub fn canonicalize(
        &self,
        identifier: &str,
        source: Namespace,
        mangled: bool,
    ) -> ResolveResult<CanonicalRef> {
        if source.is_canonical() {
            return Ok(CanonicalRef {
                input_id: identifier.to_string(),
                source,
                normal_id: None,
                mangled_id: None,
                canonical_id: identifier.to_string(),
            });
        }

        let (normal_id, mangled_id) = match (source.has_mangled_form(), mangled) {
            (true, true) => (
                Some(self.normalizer.to_normal_form(identifier)?),
                Some(identifier.to_string()),
            ),
            (true, false) => (Some(identifier.to_string()), None),
            (false, _) => (None, None),
        };
        let lookup_id = normal_id.as_deref().unwrap_or(identifier);

        let canonical_id = self
            .store
            .lookup_canonical_by_alias(self.kind, source, lookup_id)?
            .ok_or_else(|| ResolveError::not_found(self.kind, source, lookup_id))?;

        Ok(CanonicalRef {
            input_id: identifier.to_string(),
            source,
            normal_id,
            mangled_id,
            canonical_id,
        })
    }

    /// Collects the deduplicated alias set of a canonical id.
    ///
    /// # Errors
    /// - `ResolveError::NotFound` when the canonical id is unknown or obsolete.
    pub fn gather(&self, canonical_id: &str) -> ResolveResult<AliasSet> {
        let rows = self.store.lookup_alias_rows(self.kind, canonical_id)?;
        group_alias_rows(&rows)
            .into_iter()
            .find(|set| set.canonical_id() == Some(canonical_id))
            .ok_or_else(|| ResolveError::not_found(self.kind, Namespace::CANONICAL, canonical_id))
    }

    /// Resolves one identifier and projects it onto `target`.
    ///
    /// # Errors
    /// - `ResolveError::NotFound` when the identifier cannot be resolved.
    /// - `ResolveError::Repo` on storage failure.
    pub fn resolve_one(
        &self,
        identifier: &str,
        source: Namespace,
        target: TargetNamespace,
        mangled: bool,
    ) -> ResolveResult<Resolution> {
        let started_at = Instant::now();
        let result = self.resolve_set(identifier, source, mangled).map(|set| match target {
            TargetNamespace::All => Resolution::All(set),
            TargetNamespace::Single(namespace) => {
                Resolution::Alias(set.first(namespace).map(str::to_string))
            }
        });

        match &result {
            Ok(_) => debug!(
                "event=alias_resolve module=resolver status=ok kind={} source={} target={} duration_ms={}",
                self.kind,
                source,
                target,
                started_at.elapsed().as_millis()
            ),
            Err(err) => debug!(
                "event=alias_resolve module=resolver status=error kind={} source={} target={} not_found={}",
                self.kind,
                source,
                target,
                err.is_not_found()
            ),
        }
        result
    }

    /// Resolves every identifier, omitting those that are not found.
    ///
    /// Single-namespace targets keep the full ordered alias list per identifier.
    ///
    /// # Errors
    /// - `ResolveError::Repo` on storage failure; `NotFound` never aborts.
    pub fn resolve_batch<I>(
        &self,
        identifiers: I,
        source: Namespace,
        target: TargetNamespace,
        mangled: bool,
    ) -> ResolveResult<BatchResults<BatchProjection>>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let started_at = Instant::now();
        let mut requested = 0usize;
        let results = collect_batch(identifiers, |identifier| {
            requested += 1;
            let set = self.resolve_set(identifier, source, mangled)?;
            Ok(match target {
                TargetNamespace::All => BatchProjection::All(set),
                TargetNamespace::Single(namespace) => {
                    BatchProjection::Aliases(set.aliases(namespace).to_vec())
                }
            })
        })?;

        info!(
            "event=alias_batch module=resolver status=ok kind={} source={} target={} requested={} resolved={} duration_ms={}",
            self.kind,
            source,
            target,
            requested,
            results.len(),
            started_at.elapsed().as_millis()
        );
        Ok(results)
    }

    fn resolve_set(
        &self,
        identifier: &str,
        source: Namespace,
        mangled: bool,
    ) -> ResolveResult<AliasSet> {
        let canonical = self.canonicalize(identifier, source, mangled)?;
        self.gather(&canonical.canonical_id)
    }
}
