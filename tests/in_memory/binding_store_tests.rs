//! Persistence tests for [`InMemoryBindingRepository`].
//!
//! Tests insertion, uniqueness rules and deletion by role.

use crate::in_memory::helpers::{ANNOUNCEMENT, binding_for, repo, runtime};
use nexus_bot::event_role::{
    adapters::memory::InMemoryBindingRepository,
    domain::RoleId,
    ports::{BindingRepository, BindingRepositoryError},
};
use rstest::rstest;
use std::io;
use tokio::runtime::Runtime;

/// Tests that stored bindings are listed back unchanged.
#[rstest]
fn inserted_bindings_are_listed(runtime: io::Result<Runtime>, repo: InMemoryBindingRepository) {
    let rt = runtime.expect("runtime creation");
    let first = binding_for(ANNOUNCEMENT, "1");
    let second = binding_for("2000", "2");

    rt.block_on(repo.insert(&first)).expect("first insert");
    rt.block_on(repo.insert(&second)).expect("second insert");

    let listed = rt.block_on(repo.list_all()).expect("list");
    assert_eq!(listed.len(), 2);
    assert!(listed.contains(&first));
    assert!(listed.contains(&second));
}

/// Tests that a message can only be bound once.
#[rstest]
fn second_binding_for_message_is_rejected(
    runtime: io::Result<Runtime>,
    repo: InMemoryBindingRepository,
) {
    let rt = runtime.expect("runtime creation");
    rt.block_on(repo.insert(&binding_for(ANNOUNCEMENT, "1")))
        .expect("first insert");

    let result = rt.block_on(repo.insert(&binding_for(ANNOUNCEMENT, "2")));

    assert!(
        matches!(
            result,
            Err(BindingRepositoryError::DuplicateMessage(ref id)) if id.as_str() == ANNOUNCEMENT
        ),
        "Should reject a second binding for the same message"
    );
}

/// Tests that a role can only be bound once.
#[rstest]
fn second_binding_for_role_is_rejected(
    runtime: io::Result<Runtime>,
    repo: InMemoryBindingRepository,
) {
    let rt = runtime.expect("runtime creation");
    rt.block_on(repo.insert(&binding_for(ANNOUNCEMENT, "1")))
        .expect("first insert");

    let result = rt.block_on(repo.insert(&binding_for("2000", "1")));

    assert!(
        matches!(result, Err(BindingRepositoryError::DuplicateRole(ref id)) if id.as_str() == "1"),
        "Should reject a second binding for the same role"
    );
}

/// Tests that deleting by role leaves other bindings in place.
#[rstest]
fn delete_by_role_removes_only_that_binding(
    runtime: io::Result<Runtime>,
    repo: InMemoryBindingRepository,
) {
    let rt = runtime.expect("runtime creation");
    let kept = binding_for("2000", "2");
    rt.block_on(repo.insert(&binding_for(ANNOUNCEMENT, "1")))
        .expect("first insert");
    rt.block_on(repo.insert(&kept)).expect("second insert");

    rt.block_on(repo.delete_by_role_id(&RoleId::new("1")))
        .expect("delete");

    let listed = rt.block_on(repo.list_all()).expect("list");
    assert_eq!(listed, vec![kept]);
}

/// Tests that deleting an unknown role is not an error.
#[rstest]
fn delete_of_unknown_role_is_a_no_op(
    runtime: io::Result<Runtime>,
    repo: InMemoryBindingRepository,
) {
    let rt = runtime.expect("runtime creation");
    rt.block_on(repo.insert(&binding_for(ANNOUNCEMENT, "1")))
        .expect("insert");

    rt.block_on(repo.delete_by_role_id(&RoleId::new("404")))
        .expect("deleting an absent binding succeeds");

    assert_eq!(rt.block_on(repo.list_all()).expect("list").len(), 1);
}
