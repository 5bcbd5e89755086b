//! Repository layer over the imported reference database.
//!
//! # Responsibility
//! - Define the read query contract consumed by resolution services.
//! - Isolate SQLite query details from resolution logic.
//!
//! # Invariants
//! - Repository APIs return `Option`/empty results for absent data; turning
//!   absence into `NotFound` is the service layer's job.
//! - Obsolete canonical entities are invisible through every query.

pub mod reference_repo;
