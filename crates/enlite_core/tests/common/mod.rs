#![allow(dead_code)]

use enlite_core::db::open_db_in_memory;
use rusqlite::Connection;

/// Small reference dataset shaped like an imported ModelSEED/MetaCyc/BiGG/KEGG dump.
pub const FIXTURE_SQL: &str = "
INSERT INTO modelseed_compounds (cpd_id, abbreviation, name, charge, formula, mass, inchikey, is_obsolete) VALUES
    ('cpd00001', 'h2o', 'H2O', '0', 'H2O', 18.0, 'XLYOFNOQVPJJNP-UHFFFAOYSA-N', '0'),
    ('cpd00027', 'glc-D', 'D-Glucose', '0', 'C6H12O6', 180.0, 'WQZGKKKJIJFFOK-GASJEMHNSA-N', '0'),
    ('cpd00002', 'atp', 'ATP', '-3', 'C10H13N5O13P3', 504.0, NULL, '0'),
    ('cpd00100', 'lonely', 'Lonely compound', NULL, NULL, NULL, NULL, NULL),
    ('cpd00200', '3hb', '3-Hydroxybutanoate', '-1', 'C4H7O3', 103.0, NULL, '0'),
    ('cpd99999', 'old', 'Superseded compound', '0', 'C2H6', 30.0, NULL, '1');

INSERT INTO metacyc_compound_aliases (cpd_id, linked_id_metacyc) VALUES
    ('cpd00001', 'WATER'),
    ('cpd00027', 'Glucopyranose'),
    ('cpd00027', 'GLC'),
    ('cpd00002', 'ATP'),
    ('cpd00200', '3-HYDROXY-BUTANOATE'),
    ('cpd99999', 'OLD-CPD');

INSERT INTO bigg_compound_aliases (cpd_id, linked_id_bigg) VALUES
    ('cpd00001', 'h2o'),
    ('cpd00027', 'glc__D'),
    ('cpd00027', 'glc_D'),
    ('cpd99999', 'old_cpd');

INSERT INTO kegg_compound_aliases (cpd_id, linked_id_kegg) VALUES
    ('cpd00001', 'C00001'),
    ('cpd00027', 'C00031'),
    ('cpd99999', 'C99999');

INSERT INTO metacyc_compound_ids (linked_id_metacyc, altered_id) VALUES
    ('WATER', 'WATER'),
    ('Glucopyranose', 'Glucopyranose'),
    ('GLC', 'GLC'),
    ('ATP', 'ATP'),
    ('3-HYDROXY-BUTANOATE', 'c_3__HYDROXY__BUTANOATE'),
    ('OLD-CPD', 'OLD__CPD');

INSERT INTO modelseed_reactions (rxn_id, name, stoichiometry, equation, deltag, is_obsolete) VALUES
    ('rxn00001', 'diphosphate phosphohydrolase', '-1:cpd00001:0:0:\"H2O\";-1:cpd00012:0:0:\"PPi\"', '(1) cpd00001[0] + (1) cpd00012[0] => (2) cpd00009[0]', -3.46, '0'),
    ('rxn00003', 'alcohol dehydrogenase', NULL, NULL, NULL, '0'),
    ('rxn00002', 'superseded reaction', NULL, NULL, 1.0, '1');

INSERT INTO metacyc_reaction_aliases (rxn_id, linked_id_metacyc) VALUES
    ('rxn00001', 'INORGPYROPHOSPHAT-RXN'),
    ('rxn00003', '1.1.1.1-RXN');

INSERT INTO bigg_reaction_aliases (rxn_id, linked_id_bigg) VALUES
    ('rxn00001', 'PPA'),
    ('rxn00001', 'PPAm');

INSERT INTO kegg_reaction_aliases (rxn_id, linked_id_kegg) VALUES
    ('rxn00001', 'R00004'),
    ('rxn00002', 'R99999');

INSERT INTO metacyc_reaction_ids (linked_id_metacyc, altered_id) VALUES
    ('INORGPYROPHOSPHAT-RXN', 'INORGPYROPHOSPHAT__RXN'),
    ('1.1.1.1-RXN', 'v_1_1_1_1__RXN');
";

/// Opens an in-memory reference database seeded with [`FIXTURE_SQL`].
pub fn seeded_db() -> Connection {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch(FIXTURE_SQL).unwrap();
    conn
}

/// Mangled MetaCyc ids present in the fixture, per kind.
pub const MANGLED_COMPOUND_IDS: &[&str] = &[
    "WATER",
    "Glucopyranose",
    "GLC",
    "ATP",
    "c_3__HYDROXY__BUTANOATE",
    "OLD__CPD",
];
pub const MANGLED_REACTION_IDS: &[&str] = &["INORGPYROPHOSPHAT__RXN", "v_1_1_1_1__RXN"];
