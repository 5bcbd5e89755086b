//! Reference store contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide the read queries the resolver and normalizer depend on.
//! - Keep table/column naming inside the persistence boundary.
//!
//! # Invariants
//! - Every query that touches canonical entities excludes obsolete rows.
//! - Table and column names come from static per-kind/per-namespace maps;
//!   only identifier values are bound as parameters.
//! - Nothing in this module writes to the database.

use crate::db::DbError;
use crate::model::entity::{AliasRow, CompoundRecord, ReactionRecord};
use crate::model::namespace::{EntityKind, Namespace};
use rusqlite::{Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// `is_obsolete` is free text written by the import; only `'1'` marks obsolete.
const NOT_OBSOLETE: &str = "COALESCE(c.is_obsolete, '0') <> '1'";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for reference queries.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid reference data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Direction of a mangled/normal identifier lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingDirection {
    MangledToNormal,
    NormalToMangled,
}

/// Read-only query contract over the imported reference data.
pub trait ReferenceStore {
    /// Maps an identifier of `namespace` to its non-obsolete canonical id.
    ///
    /// For the canonical namespace this is an existence check.
    fn lookup_canonical_by_alias(
        &self,
        kind: EntityKind,
        namespace: Namespace,
        external_id: &str,
    ) -> RepoResult<Option<String>>;

    /// Returns the left-outer join of all alias tables for one canonical id.
    ///
    /// Empty when the id is unknown or obsolete. Rows may repeat values.
    fn lookup_alias_rows(&self, kind: EntityKind, canonical_id: &str)
        -> RepoResult<Vec<AliasRow>>;

    /// Translates between mangled and normal MetaCyc identifiers.
    fn lookup_identifier_mapping(
        &self,
        kind: EntityKind,
        direction: MappingDirection,
        id: &str,
    ) -> RepoResult<Option<String>>;

    fn fetch_compound(&self, canonical_id: &str) -> RepoResult<Option<CompoundRecord>>;

    fn fetch_reaction(&self, canonical_id: &str) -> RepoResult<Option<ReactionRecord>>;
}

impl<T: ReferenceStore + ?Sized> ReferenceStore for &T {
    fn lookup_canonical_by_alias(
        &self,
        kind: EntityKind,
        namespace: Namespace,
        external_id: &str,
    ) -> RepoResult<Option<String>> {
        (**self).lookup_canonical_by_alias(kind, namespace, external_id)
    }

    fn lookup_alias_rows(
        &self,
        kind: EntityKind,
        canonical_id: &str,
    ) -> RepoResult<Vec<AliasRow>> {
        (**self).lookup_alias_rows(kind, canonical_id)
    }

    fn lookup_identifier_mapping(
        &self,
        kind: EntityKind,
        direction: MappingDirection,
        id: &str,
    ) -> RepoResult<Option<String>> {
        (**self).lookup_identifier_mapping(kind, direction, id)
    }

    fn fetch_compound(&self, canonical_id: &str) -> RepoResult<Option<CompoundRecord>> {
        (**self).fetch_compound(canonical_id)
    }

    fn fetch_reaction(&self, canonical_id: &str) -> RepoResult<Option<ReactionRecord>> {
        (**self).fetch_reaction(canonical_id)
    }
}

/// SQLite-backed reference store.
#[derive(Clone, Copy)]
pub struct SqliteReferenceStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteReferenceStore<'conn> {
    /// Wraps a connection obtained from [`crate::db::open_db`] or
    /// [`crate::db::open_db_in_memory`].
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ReferenceStore for SqliteReferenceStore<'_> {
    fn lookup_canonical_by_alias(
        &self,
        kind: EntityKind,
        namespace: Namespace,
        external_id: &str,
    ) -> RepoResult<Option<String>> {
        let canonical = canonical_table(kind);
        let key = canonical_key(kind);
        let sql = match alias_source(kind, namespace) {
            Some((aliases, column)) => format!(
                "SELECT a.{key}
                 FROM {aliases} a
                 JOIN {canonical} c ON c.{key} = a.{key}
                 WHERE a.{column} = ?1 AND {NOT_OBSOLETE}
                 ORDER BY a.rowid
                 LIMIT 1;"
            ),
            None => format!(
                "SELECT c.{key}
                 FROM {canonical} c
                 WHERE c.{key} = ?1 AND {NOT_OBSOLETE}
                 LIMIT 1;"
            ),
        };

        let canonical_id = self
            .conn
            .query_row(&sql, [external_id], |row| row.get::<_, String>(0))
            .optional()?;
        Ok(canonical_id)
    }

    fn lookup_alias_rows(
        &self,
        kind: EntityKind,
        canonical_id: &str,
    ) -> RepoResult<Vec<AliasRow>> {
        let canonical = canonical_table(kind);
        let key = canonical_key(kind);
        let [metacyc, bigg, kegg] = joined_alias_tables(kind);

        // Ordering by the joined rowids keeps first-seen order equal to import order.
        let sql = format!(
            "SELECT
                c.{key} AS canonical_id,
                m.linked_id_metacyc AS metacyc_alias,
                b.linked_id_bigg AS bigg_alias,
                k.linked_id_kegg AS kegg_alias,
                c.name AS name
             FROM {canonical} c
             LEFT JOIN {metacyc} m ON c.{key} = m.{key}
             LEFT JOIN {bigg} b ON c.{key} = b.{key}
             LEFT JOIN {kegg} k ON c.{key} = k.{key}
             WHERE c.{key} = ?1 AND {NOT_OBSOLETE}
             ORDER BY c.rowid, m.rowid, b.rowid, k.rowid;"
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query([canonical_id])?;
        let mut alias_rows = Vec::new();
        while let Some(row) = rows.next()? {
            alias_rows.push(parse_alias_row(row)?);
        }

        Ok(alias_rows)
    }

    fn lookup_identifier_mapping(
        &self,
        kind: EntityKind,
        direction: MappingDirection,
        id: &str,
    ) -> RepoResult<Option<String>> {
        let table = identifier_table(kind);
        let (wanted, by) = match direction {
            MappingDirection::MangledToNormal => ("linked_id_metacyc", "altered_id"),
            MappingDirection::NormalToMangled => ("altered_id", "linked_id_metacyc"),
        };

        let counterpart = self
            .conn
            .query_row(
                &format!("SELECT {wanted} FROM {table} WHERE {by} = ?1 ORDER BY rowid LIMIT 1;"),
                [id],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(counterpart)
    }

    fn fetch_compound(&self, canonical_id: &str) -> RepoResult<Option<CompoundRecord>> {
        let record = self
            .conn
            .query_row(
                &format!(
                    "SELECT cpd_id, abbreviation, name, formula, inchikey, charge, mass
                     FROM modelseed_compounds c
                     WHERE c.cpd_id = ?1 AND {NOT_OBSOLETE}
                     ORDER BY c.rowid
                     LIMIT 1;"
                ),
                [canonical_id],
                |row| {
                    Ok(CompoundRecord {
                        canonical_id: row.get("cpd_id")?,
                        abbreviation: row.get("abbreviation")?,
                        name: row.get("name")?,
                        formula: row.get("formula")?,
                        inchikey: row.get("inchikey")?,
                        charge: read_text_lossy(row, "charge")?,
                        mass: row.get("mass")?,
                    })
                },
            )
            .optional()?;
        Ok(record)
    }

    fn fetch_reaction(&self, canonical_id: &str) -> RepoResult<Option<ReactionRecord>> {
        let record = self
            .conn
            .query_row(
                &format!(
                    "SELECT rxn_id, name, stoichiometry, equation, deltag
                     FROM modelseed_reactions c
                     WHERE c.rxn_id = ?1 AND {NOT_OBSOLETE}
                     ORDER BY c.rowid
                     LIMIT 1;"
                ),
                [canonical_id],
                |row| {
                    Ok(ReactionRecord {
                        canonical_id: row.get("rxn_id")?,
                        name: row.get("name")?,
                        stoichiometry: row.get("stoichiometry")?,
                        equation: row.get("equation")?,
                        deltag: row.get("deltag")?,
                    })
                },
            )
            .optional()?;
        Ok(record)
    }
}

fn parse_alias_row(row: &Row<'_>) -> RepoResult<AliasRow> {
    let canonical_id: Option<String> = row.get("canonical_id")?;
    let canonical_id = canonical_id.ok_or_else(|| {
        RepoError::InvalidData("alias join returned a row without canonical id".to_string())
    })?;

    Ok(AliasRow {
        canonical_id,
        metacyc_alias: row.get("metacyc_alias")?,
        bigg_alias: row.get("bigg_alias")?,
        kegg_alias: row.get("kegg_alias")?,
        name: row.get("name")?,
    })
}

/// Charge is declared TEXT, but SQLite type affinity lets numbers through.
fn read_text_lossy(row: &Row<'_>, column: &str) -> rusqlite::Result<Option<String>> {
    use rusqlite::types::ValueRef;

    Ok(match row.get_ref(column)? {
        ValueRef::Null => None,
        ValueRef::Integer(value) => Some(value.to_string()),
        ValueRef::Real(value) => Some(value.to_string()),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
            Some(String::from_utf8_lossy(bytes).into_owned())
        }
    })
}

fn canonical_table(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Compound => "modelseed_compounds",
        EntityKind::Reaction => "modelseed_reactions",
    }
}

fn canonical_key(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Compound => "cpd_id",
        EntityKind::Reaction => "rxn_id",
    }
}

fn alias_source(kind: EntityKind, namespace: Namespace) -> Option<(&'static str, &'static str)> {
    let [metacyc, bigg, kegg] = joined_alias_tables(kind);
    match namespace {
        Namespace::ModelSeed => None,
        Namespace::MetaCyc => Some((metacyc, "linked_id_metacyc")),
        Namespace::Bigg => Some((bigg, "linked_id_bigg")),
        Namespace::Kegg => Some((kegg, "linked_id_kegg")),
    }
}

/// Alias tables in `Namespace::ALIASED` order.
fn joined_alias_tables(kind: EntityKind) -> [&'static str; 3] {
    match kind {
        EntityKind::Compound => [
            "metacyc_compound_aliases",
            "bigg_compound_aliases",
            "kegg_compound_aliases",
        ],
        EntityKind::Reaction => [
            "metacyc_reaction_aliases",
            "bigg_reaction_aliases",
            "kegg_reaction_aliases",
        ],
    }
}

fn identifier_table(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Compound => "metacyc_compound_ids",
        EntityKind::Reaction => "metacyc_reaction_ids",
    }
}
