//! Use-case services for identifier resolution.
//!
//! # Responsibility
//! - Orchestrate canonicalization, alias gathering and projection.
//! - Turn absent store data into typed `NotFound` failures.
//!
//! # Invariants
//! - Services stay storage-agnostic and depend only on `ReferenceStore`.

pub mod alias_resolver;
pub mod batch;
pub mod entity_service;
pub mod normalizer;
pub mod resolve_error;
