//! Insert, list and delete round trips against `PostgreSQL`.

use crate::postgres::helpers::{BindingDb, binding, binding_db};
use nexus_bot::event_role::{
    domain::{EventBinding, RoleId},
    ports::BindingRepository,
};
use rstest::rstest;

fn assert_same_binding(stored: &EventBinding, expected: &EventBinding) {
    assert_eq!(stored.id(), expected.id());
    assert_eq!(stored.guild_id(), expected.guild_id());
    assert_eq!(stored.channel_id(), expected.channel_id());
    assert_eq!(stored.message_id(), expected.message_id());
    assert_eq!(stored.role_id(), expected.role_id());
    // TIMESTAMPTZ keeps microseconds only.
    let drift = (stored.created_at() - expected.created_at())
        .num_microseconds()
        .map(i64::abs);
    assert!(drift <= Some(1), "created_at drifted by {drift:?}µs");
}

#[rstest]
fn list_all_is_empty_for_a_fresh_database(binding_db: BindingDb) {
    let db = binding_db;

    let stored = db.rt.block_on(db.repo.list_all()).expect("list bindings");

    assert!(stored.is_empty());
}

#[rstest]
fn inserted_binding_is_listed(binding_db: BindingDb) {
    let db = binding_db;
    let expected = binding("123456789012345678", "920000000000000001");

    db.rt
        .block_on(db.repo.insert(&expected))
        .expect("insert binding");
    let stored = db.rt.block_on(db.repo.list_all()).expect("list bindings");

    assert_eq!(stored.len(), 1);
    assert_same_binding(&stored[0], &expected);
}

#[rstest]
fn delete_by_role_id_removes_only_that_binding(binding_db: BindingDb) {
    let db = binding_db;
    let raid = binding("123456789012345678", "920000000000000001");
    let picnic = binding("123456789012345679", "920000000000000002");
    for entry in [&raid, &picnic] {
        db.rt.block_on(db.repo.insert(entry)).expect("insert binding");
    }

    db.rt
        .block_on(db.repo.delete_by_role_id(raid.role_id()))
        .expect("delete binding");
    let stored = db.rt.block_on(db.repo.list_all()).expect("list bindings");

    assert_eq!(stored.len(), 1);
    assert_same_binding(&stored[0], &picnic);
}

#[rstest]
fn deleting_an_unknown_role_is_a_no_op(binding_db: BindingDb) {
    let db = binding_db;
    let raid = binding("123456789012345678", "920000000000000001");
    db.rt.block_on(db.repo.insert(&raid)).expect("insert binding");

    db.rt
        .block_on(db.repo.delete_by_role_id(&RoleId::new("920000000000000099")))
        .expect("delete should succeed");
    let stored = db.rt.block_on(db.repo.list_all()).expect("list bindings");

    assert_eq!(stored.len(), 1);
}
