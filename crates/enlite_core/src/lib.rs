//! Core logic for enlite: chemical identifier resolution across ModelSEED,
//! MetaCyc, BiGG and KEGG, and carbon counting for sum formulas.
//! This crate only reads the reference database; it never mutates it.

pub mod db;
pub mod formula;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use formula::{count_carbons, FormulaError};
pub use logging::{default_log_level, init_logging, LoggingError};
pub use model::alias::AliasSet;
pub use model::entity::{AliasRow, CompoundRecord, ReactionRecord};
pub use model::namespace::{EntityKind, Namespace, NamespaceError, TargetNamespace};
pub use repo::reference_repo::{
    MappingDirection, ReferenceStore, RepoError, RepoResult, SqliteReferenceStore,
};
pub use service::alias_resolver::{AliasResolver, BatchProjection, CanonicalRef, Resolution};
pub use service::batch::BatchResults;
pub use service::entity_service::{CompoundInfo, EntityInfo, EntityService, ReactionInfo};
pub use service::normalizer::IdentifierNormalizer;
pub use service::resolve_error::{ResolveError, ResolveResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
