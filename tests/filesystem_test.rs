//! Tests for the RealFileSystem boundary used by the snapshot store.

use tempfile::TempDir;

use bstviz::infrastructure::traits::{FileSystem, RealFileSystem};

#[test]
fn given_missing_parent_when_write_atomic_then_directories_are_created() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("a").join("b").join("tree.json");

    RealFileSystem.write_atomic(&path, "{}").unwrap();

    assert_eq!(RealFileSystem.read_to_string(&path).unwrap(), "{}");
}

#[test]
fn given_existing_file_when_write_atomic_then_content_is_replaced() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("tree.json");
    RealFileSystem.write_atomic(&path, "old").unwrap();

    RealFileSystem.write_atomic(&path, "new").unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
    assert_eq!(RealFileSystem.list_dir(temp.path()).unwrap(), vec![path]);
}

#[test]
fn given_directory_when_list_dir_then_entries_are_sorted() {
    let temp = TempDir::new().unwrap();
    for name in ["c.json", "a.json", "b.json"] {
        std::fs::write(temp.path().join(name), "").unwrap();
    }

    let names: Vec<_> = RealFileSystem
        .list_dir(temp.path())
        .unwrap()
        .into_iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();

    assert_eq!(names, vec!["a.json", "b.json", "c.json"]);
}

#[test]
fn given_file_when_removed_then_no_longer_exists() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("gone.json");
    std::fs::write(&path, "x").unwrap();

    RealFileSystem.remove_file(&path).unwrap();

    assert!(!RealFileSystem.exists(&path));
    assert!(!RealFileSystem.is_file(&path));
}
