mod common;

use common::seeded_db;
use enlite_core::{EntityKind, MappingDirection, Namespace, ReferenceStore, SqliteReferenceStore};

#[test]
fn alias_lookup_returns_canonical_id() {
    let conn = seeded_db();
    let store = SqliteReferenceStore::new(&conn);

    let by_kegg = store
        .lookup_canonical_by_alias(EntityKind::Compound, Namespace::Kegg, "C00031")
        .unwrap();
    assert_eq!(by_kegg.as_deref(), Some("cpd00027"));

    let by_bigg = store
        .lookup_canonical_by_alias(EntityKind::Reaction, Namespace::Bigg, "PPAm")
        .unwrap();
    assert_eq!(by_bigg.as_deref(), Some("rxn00001"));
}

#[test]
fn alias_lookup_misses_unknown_ids() {
    let conn = seeded_db();
    let store = SqliteReferenceStore::new(&conn);

    let missing = store
        .lookup_canonical_by_alias(EntityKind::Compound, Namespace::MetaCyc, "NOT-A-CPD")
        .unwrap();
    assert!(missing.is_none());

    // Kind matters: a compound alias is not a reaction alias.
    let wrong_kind = store
        .lookup_canonical_by_alias(EntityKind::Reaction, Namespace::Kegg, "C00001")
        .unwrap();
    assert!(wrong_kind.is_none());
}

#[test]
fn obsolete_entities_are_invisible() {
    let conn = seeded_db();
    let store = SqliteReferenceStore::new(&conn);

    for (namespace, alias) in [
        (Namespace::MetaCyc, "OLD-CPD"),
        (Namespace::Bigg, "old_cpd"),
        (Namespace::Kegg, "C99999"),
        (Namespace::ModelSeed, "cpd99999"),
    ] {
        let found = store
            .lookup_canonical_by_alias(EntityKind::Compound, namespace, alias)
            .unwrap();
        assert!(found.is_none(), "{namespace} {alias} should be hidden");
    }

    let rows = store
        .lookup_alias_rows(EntityKind::Compound, "cpd99999")
        .unwrap();
    assert!(rows.is_empty());
    assert!(store.fetch_compound("cpd99999").unwrap().is_none());

    let reaction_rows = store
        .lookup_alias_rows(EntityKind::Reaction, "rxn00002")
        .unwrap();
    assert!(reaction_rows.is_empty());
    assert!(store.fetch_reaction("rxn00002").unwrap().is_none());
}

#[test]
fn obsolete_row_is_still_stored() {
    let conn = seeded_db();
    let stored: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM modelseed_compounds WHERE cpd_id = 'cpd99999';",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(stored, 1);
}

#[test]
fn alias_rows_form_a_cross_product() {
    let conn = seeded_db();
    let store = SqliteReferenceStore::new(&conn);

    // 2 MetaCyc x 2 BiGG x 1 KEGG.
    let rows = store
        .lookup_alias_rows(EntityKind::Compound, "cpd00027")
        .unwrap();
    assert_eq!(rows.len(), 4);
    assert!(rows.iter().all(|row| row.canonical_id == "cpd00027"));
    assert!(rows.iter().all(|row| row.kegg_alias.as_deref() == Some("C00031")));
    assert_eq!(rows[0].metacyc_alias.as_deref(), Some("Glucopyranose"));
    assert_eq!(rows[0].bigg_alias.as_deref(), Some("glc__D"));
    assert_eq!(rows[1].bigg_alias.as_deref(), Some("glc_D"));
    assert_eq!(rows[0].name.as_deref(), Some("D-Glucose"));
}

#[test]
fn alias_rows_keep_entity_without_aliases() {
    let conn = seeded_db();
    let store = SqliteReferenceStore::new(&conn);

    let rows = store
        .lookup_alias_rows(EntityKind::Compound, "cpd00100")
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert!(rows[0].metacyc_alias.is_none());
    assert!(rows[0].bigg_alias.is_none());
    assert!(rows[0].kegg_alias.is_none());
}

#[test]
fn identifier_mapping_works_in_both_directions() {
    let conn = seeded_db();
    let store = SqliteReferenceStore::new(&conn);

    let normal = store
        .lookup_identifier_mapping(
            EntityKind::Reaction,
            MappingDirection::MangledToNormal,
            "v_1_1_1_1__RXN",
        )
        .unwrap();
    assert_eq!(normal.as_deref(), Some("1.1.1.1-RXN"));

    let mangled = store
        .lookup_identifier_mapping(
            EntityKind::Compound,
            MappingDirection::NormalToMangled,
            "3-HYDROXY-BUTANOATE",
        )
        .unwrap();
    assert_eq!(mangled.as_deref(), Some("c_3__HYDROXY__BUTANOATE"));

    let missing = store
        .lookup_identifier_mapping(
            EntityKind::Compound,
            MappingDirection::MangledToNormal,
            "v_1_1_1_1__RXN",
        )
        .unwrap();
    assert!(missing.is_none());
}

#[test]
fn fetch_compound_reads_typed_fields() {
    let conn = seeded_db();
    let store = SqliteReferenceStore::new(&conn);

    let record = store.fetch_compound("cpd00002").unwrap().unwrap();
    assert_eq!(record.name.as_deref(), Some("ATP"));
    assert_eq!(record.charge.as_deref(), Some("-3"));
    assert_eq!(record.mass, Some(504.0));
    assert!(record.inchikey.is_none());

    let lonely = store.fetch_compound("cpd00100").unwrap().unwrap();
    assert!(lonely.formula.is_none());
    assert!(lonely.mass.is_none());
}
