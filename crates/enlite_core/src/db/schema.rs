//! Reference schema contract.
//!
//! The import pipeline owns the physical layout; this module records the
//! subset of tables and columns the core reads and checks it on open.

use super::{DbError, DbResult};
use rusqlite::Connection;
use std::collections::HashSet;

const SCHEMA_SQL: &str = include_str!("schema.sql");

struct RequiredTable {
    name: &'static str,
    columns: &'static [&'static str],
}

const REQUIRED_TABLES: &[RequiredTable] = &[
    RequiredTable {
        name: "modelseed_compounds",
        columns: &[
            "cpd_id",
            "abbreviation",
            "name",
            "charge",
            "formula",
            "mass",
            "inchikey",
            "is_obsolete",
        ],
    },
    RequiredTable {
        name: "modelseed_reactions",
        columns: &[
            "rxn_id",
            "name",
            "stoichiometry",
            "equation",
            "deltag",
            "is_obsolete",
        ],
    },
    RequiredTable {
        name: "metacyc_compound_aliases",
        columns: &["cpd_id", "linked_id_metacyc"],
    },
    RequiredTable {
        name: "bigg_compound_aliases",
        columns: &["cpd_id", "linked_id_bigg"],
    },
    RequiredTable {
        name: "kegg_compound_aliases",
        columns: &["cpd_id", "linked_id_kegg"],
    },
    RequiredTable {
        name: "metacyc_reaction_aliases",
        columns: &["rxn_id", "linked_id_metacyc"],
    },
    RequiredTable {
        name: "bigg_reaction_aliases",
        columns: &["rxn_id", "linked_id_bigg"],
    },
    RequiredTable {
        name: "kegg_reaction_aliases",
        columns: &["rxn_id", "linked_id_kegg"],
    },
    RequiredTable {
        name: "metacyc_compound_ids",
        columns: &["linked_id_metacyc", "altered_id"],
    },
    RequiredTable {
        name: "metacyc_reaction_ids",
        columns: &["linked_id_metacyc", "altered_id"],
    },
];

/// Returns the names of all tables the core reads from.
pub fn required_tables() -> impl Iterator<Item = &'static str> {
    REQUIRED_TABLES.iter().map(|table| table.name)
}

/// Creates the reference tables on an empty (writable) connection.
///
/// Statements are `IF NOT EXISTS`, so re-applying is a no-op.
pub fn apply_schema(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}

/// Checks that every required table and column is present.
pub fn verify_schema(conn: &Connection) -> DbResult<()> {
    for table in REQUIRED_TABLES {
        if !table_exists(conn, table.name)? {
            return Err(DbError::MissingRequiredTable(table.name));
        }

        let present = table_columns(conn, table.name)?;
        if let Some(column) = table
            .columns
            .iter()
            .find(|column| !present.contains(**column))
        {
            return Err(DbError::MissingRequiredColumn {
                table: table.name,
                column: *column,
            });
        }
    }
    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> DbResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_columns(conn: &Connection, table: &'static str) -> DbResult<HashSet<String>> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let columns = stmt
        .query_map([], |row| row.get::<_, String>("name"))?
        .collect::<Result<HashSet<_>, _>>()?;
    Ok(columns)
}
