//! Tests for SnapshotService
//!
//! Snapshots live as `<store_dir>/<id>.json`, one record per file.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tempfile::TempDir;
use uuid::Uuid;

use bstviz::application::services::SnapshotService;
use bstviz::application::ApplicationError;
use bstviz::domain::{Algorithm, BinaryTree, DomainError, SnapshotUpdate, ANONYMOUS_USER};
use bstviz::infrastructure::traits::RealFileSystem;
use bstviz::util::testing::init_test_setup;

fn service(temp: &TempDir) -> SnapshotService {
    init_test_setup();
    SnapshotService::new(Arc::new(RealFileSystem), temp.path().join("trees"))
}

fn tree() -> BinaryTree {
    BinaryTree::from_values(&[5, 3, 8])
}

// ============================================================
// create() / get()
// ============================================================

#[test]
fn given_valid_tree_when_create_then_record_is_written_and_readable() {
    let temp = TempDir::new().unwrap();
    let service = service(&temp);

    let created = service
        .create("demo", tree(), Algorithm::Bfs, ANONYMOUS_USER)
        .unwrap();

    let path = temp.path().join("trees").join(format!("{}.json", created.id));
    assert!(path.is_file());
    let loaded = service.get(&created.id).unwrap();
    assert_eq!(loaded, created);
    assert_eq!(loaded.tree_data, tree());
}

#[test]
fn given_empty_tree_when_create_then_rejected() {
    let temp = TempDir::new().unwrap();
    let service = service(&temp);

    let err = service
        .create("demo", BinaryTree::new(), Algorithm::Insert, ANONYMOUS_USER)
        .unwrap_err();

    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::EmptyTree)
    ));
}

#[test]
fn given_blank_name_when_create_then_rejected() {
    let temp = TempDir::new().unwrap();
    let service = service(&temp);

    let err = service
        .create("   ", tree(), Algorithm::Insert, ANONYMOUS_USER)
        .unwrap_err();

    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::EmptyName)
    ));
}

#[test]
fn given_unknown_id_when_get_then_not_found() {
    let temp = TempDir::new().unwrap();
    let service = service(&temp);

    let err = service.get(&Uuid::new_v4()).unwrap_err();

    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::SnapshotNotFound(_))
    ));
}

#[test]
fn given_corrupt_record_when_get_then_operation_failed_names_the_file() {
    let temp = TempDir::new().unwrap();
    let service = service(&temp);
    let id = Uuid::new_v4();
    let store = temp.path().join("trees");
    std::fs::create_dir_all(&store).unwrap();
    std::fs::write(store.join(format!("{}.json", id)), "{ not json").unwrap();

    let err = service.get(&id).unwrap_err();

    match err {
        ApplicationError::OperationFailed { context, .. } => {
            assert!(context.contains(&id.to_string()), "{context}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

// ============================================================
// list() / find_by_name() / resolve()
// ============================================================

#[test]
fn given_missing_store_when_list_then_empty() {
    let temp = TempDir::new().unwrap();
    let service = service(&temp);

    assert!(service.list(ANONYMOUS_USER).unwrap().is_empty());
}

#[test]
fn given_several_snapshots_when_list_then_newest_first_and_filtered_by_user() {
    let temp = TempDir::new().unwrap();
    let service = service(&temp);

    let first = service
        .create("first", tree(), Algorithm::Insert, "alice")
        .unwrap();
    thread::sleep(Duration::from_millis(5));
    let second = service
        .create("second", tree(), Algorithm::Insert, "alice")
        .unwrap();
    service
        .create("other", tree(), Algorithm::Insert, "bob")
        .unwrap();

    let listed = service.list("alice").unwrap();

    let ids: Vec<_> = listed.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);
}

#[test]
fn given_snapshot_when_resolving_by_id_or_name_then_same_record() {
    let temp = TempDir::new().unwrap();
    let service = service(&temp);
    let created = service
        .create("demo", tree(), Algorithm::Insert, ANONYMOUS_USER)
        .unwrap();

    let by_id = service
        .resolve(ANONYMOUS_USER, &created.id.to_string())
        .unwrap();
    let by_name = service.resolve(ANONYMOUS_USER, " demo ").unwrap();

    assert_eq!(by_id.id, created.id);
    assert_eq!(by_name.id, created.id);
    assert!(service.resolve(ANONYMOUS_USER, "missing").is_err());
    assert!(service.find_by_name("someone-else", "demo").unwrap().is_none());
}

// ============================================================
// update() / delete() / delete_all()
// ============================================================

#[test]
fn given_snapshot_when_update_then_fields_change_and_created_at_stays() {
    let temp = TempDir::new().unwrap();
    let service = service(&temp);
    let created = service
        .create("demo", tree(), Algorithm::Insert, ANONYMOUS_USER)
        .unwrap();

    let renamed = service
        .update(&created.id, SnapshotUpdate::rename("renamed"))
        .unwrap();
    let emptied = service
        .update(
            &created.id,
            SnapshotUpdate::tree(BinaryTree::new(), Algorithm::Clear),
        )
        .unwrap();

    assert_eq!(renamed.name, "renamed");
    assert_eq!(renamed.tree_data, tree());
    assert_eq!(emptied.name, "renamed");
    assert!(emptied.tree_data.is_empty());
    assert_eq!(emptied.algorithm, Algorithm::Clear);
    assert_eq!(emptied.created_at, created.created_at);
    assert!(emptied.updated_at >= renamed.updated_at);
    assert_eq!(service.get(&created.id).unwrap(), emptied);
}

#[test]
fn given_blank_name_when_update_then_rejected_and_record_unchanged() {
    let temp = TempDir::new().unwrap();
    let service = service(&temp);
    let created = service
        .create("demo", tree(), Algorithm::Insert, ANONYMOUS_USER)
        .unwrap();

    assert!(service
        .update(&created.id, SnapshotUpdate::rename(" "))
        .is_err());
    assert_eq!(service.get(&created.id).unwrap().name, "demo");
}

#[test]
fn given_snapshot_when_delete_then_gone_and_second_delete_fails() {
    let temp = TempDir::new().unwrap();
    let service = service(&temp);
    let created = service
        .create("demo", tree(), Algorithm::Insert, ANONYMOUS_USER)
        .unwrap();

    service.delete(&created.id).unwrap();

    assert!(service.get(&created.id).is_err());
    assert!(matches!(
        service.delete(&created.id).unwrap_err(),
        ApplicationError::Domain(DomainError::SnapshotNotFound(_))
    ));
}

#[test]
fn given_two_users_when_delete_all_then_only_owner_records_removed() {
    let temp = TempDir::new().unwrap();
    let service = service(&temp);
    service.create("a", tree(), Algorithm::Insert, "alice").unwrap();
    service.create("b", tree(), Algorithm::Insert, "alice").unwrap();
    service.create("c", tree(), Algorithm::Insert, "bob").unwrap();

    let removed = service.delete_all("alice").unwrap();

    assert_eq!(removed, 2);
    assert!(service.list("alice").unwrap().is_empty());
    assert_eq!(service.list("bob").unwrap().len(), 1);
}

#[test]
fn given_unparsable_record_in_store_when_list_then_other_snapshots_are_returned() {
    let temp = TempDir::new().unwrap();
    let service = service(&temp);
    let created = service
        .create("demo", tree(), Algorithm::Insert, ANONYMOUS_USER)
        .unwrap();
    std::fs::write(temp.path().join("trees").join("junk.json"), "{not json").unwrap();

    let listed = service.list(ANONYMOUS_USER).unwrap();

    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, created.id);
    assert_eq!(
        service.find_by_name(ANONYMOUS_USER, "demo").unwrap().map(|s| s.id),
        Some(created.id)
    );
}
