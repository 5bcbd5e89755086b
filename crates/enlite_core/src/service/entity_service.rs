//! Compound/reaction record lookup by any namespace identifier.
//!
//! # Responsibility
//! - Canonicalize like alias resolution, then load the canonical record.
//!
//! # Invariants
//! - Obsolete canonical entities are reported as `NotFound`.
//! - MetaCyc lookups carry both the normal and the mangled id; a normal id
//!   without a mapping row keeps `mangled_id: None` instead of failing.
//! - Batch variants share the partial-failure semantics of alias batches.

use super::alias_resolver::{AliasResolver, CanonicalRef};
use super::batch::{collect_batch, BatchResults};
use super::resolve_error::{ResolveError, ResolveResult};
use crate::model::entity::{CompoundRecord, ReactionRecord};
use crate::model::namespace::{EntityKind, Namespace};
use crate::repo::reference_repo::ReferenceStore;
use serde::Serialize;

/// A canonical record together with how the input identifier reached it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityInfo<R> {
    pub lookup: CanonicalRef,
    pub record: R,
}

pub type CompoundInfo = EntityInfo<CompoundRecord>;
pub type ReactionInfo = EntityInfo<ReactionRecord>;

/// Use-case service for record lookups.
pub struct EntityService<S: ReferenceStore + Clone> {
    compounds: AliasResolver<S>,
    reactions: AliasResolver<S>,
    store: S,
}

impl<S: ReferenceStore + Clone> EntityService<S> {
    pub fn new(store: S) -> Self {
        Self {
            compounds: AliasResolver::new(store.clone(), EntityKind::Compound),
            reactions: AliasResolver::new(store.clone(), EntityKind::Reaction),
            store,
        }
    }

    /// Loads the compound an identifier of `source` refers to.
    pub fn compound_info(
        &self,
        identifier: &str,
        source: Namespace,
        mangled: bool,
    ) -> ResolveResult<CompoundInfo> {
        let lookup = self.compounds.canonicalize(identifier, source, mangled)?;
        let lookup = with_mangled_form(&self.compounds, lookup)?;
        let record = self
            .store
            .fetch_compound(&lookup.canonical_id)?
            .ok_or_else(|| {
                ResolveError::not_found(
                    EntityKind::Compound,
                    Namespace::CANONICAL,
                    lookup.canonical_id.as_str(),
                )
            })?;
        Ok(EntityInfo { lookup, record })
    }

    /// Loads the reaction an identifier of `source` refers to.
    pub fn reaction_info(
        &self,
        identifier: &str,
        source: Namespace,
        mangled: bool,
    ) -> ResolveResult<ReactionInfo> {
        let lookup = self.reactions.canonicalize(identifier, source, mangled)?;
        let lookup = with_mangled_form(&self.reactions, lookup)?;
        let record = self
            .store
            .fetch_reaction(&lookup.canonical_id)?
            .ok_or_else(|| {
                ResolveError::not_found(
                    EntityKind::Reaction,
                    Namespace::CANONICAL,
                    lookup.canonical_id.as_str(),
                )
            })?;
        Ok(EntityInfo { lookup, record })
    }

    pub fn compound_info_batch<I>(
        &self,
        identifiers: I,
        source: Namespace,
        mangled: bool,
    ) -> ResolveResult<BatchResults<CompoundInfo>>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        collect_batch(identifiers, |identifier| {
            self.compound_info(identifier, source, mangled)
        })
    }

    pub fn reaction_info_batch<I>(
        &self,
        identifiers: I,
        source: Namespace,
        mangled: bool,
    ) -> ResolveResult<BatchResults<ReactionInfo>>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        collect_batch(identifiers, |identifier| {
            self.reaction_info(identifier, source, mangled)
        })
    }
}

fn with_mangled_form<S: ReferenceStore>(
    resolver: &AliasResolver<S>,
    mut lookup: CanonicalRef,
) -> ResolveResult<CanonicalRef> {
    if lookup.mangled_id.is_some() {
        return Ok(lookup);
    }
    let Some(normal_id) = lookup.normal_id.as_deref() else {
        return Ok(lookup);
    };

    match resolver.normalizer().to_mangled_form(normal_id) {
        Ok(mangled_id) => lookup.mangled_id = Some(mangled_id),
        Err(err) if err.is_not_found() => {}
        Err(err) => return Err(err),
    }
    Ok(lookup)
}
