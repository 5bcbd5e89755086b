//! Domain model for cross-namespace identifier resolution.
//!
//! # Responsibility
//! - Define namespaces, entity kinds and typed reference row shapes.
//! - Own the alias deduplication algorithm.
//!
//! # Invariants
//! - Rows are accessed through typed fields, never by column name.

pub mod alias;
pub mod entity;
pub mod namespace;
