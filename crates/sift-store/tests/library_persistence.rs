//! Integration tests for sled-backed library persistence.

use sift_expr::FilterNode;
use sift_store::{Error, NamedFilterStore, SaveMode, SledPort};

struct TestContext {
    dir: tempfile::TempDir,
}

impl TestContext {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    fn open(&self) -> (sled::Db, NamedFilterStore<SledPort>) {
        let db = sled::Config::new().path(self.dir.path()).open().unwrap();
        let store = NamedFilterStore::new(SledPort::open(&db).unwrap());
        (db, store)
    }
}

fn topic_filter(values: &[&str]) -> FilterNode {
    FilterNode::and(vec![
        FilterNode::is_one_of("topic", values.iter().map(|v| (*v).into()).collect()),
        FilterNode::not_empty("published_at"),
    ])
}

#[test]
fn test_library_survives_reopen() {
    let ctx = TestContext::new();

    {
        let (db, store) = ctx.open();
        store
            .save("economy", &topic_filter(&["economy"]), SaveMode::Upsert)
            .unwrap();
        store
            .save("health", &topic_filter(&["health"]), SaveMode::Upsert)
            .unwrap();
        store.delete("health").unwrap();
        drop(store);
        drop(db);
    }

    let (_db, store) = ctx.open();
    assert_eq!(store.names().unwrap(), vec!["economy"]);
    assert_eq!(store.load("economy").unwrap(), topic_filter(&["economy"]));
    assert_eq!(store.revision().unwrap(), 3);
}

#[test]
fn test_stored_tree_is_normalized_form() {
    let ctx = TestContext::new();
    let (_db, store) = ctx.open();

    let filter = topic_filter(&["economy", "health"]);
    store.save("mine", &filter, SaveMode::Upsert).unwrap();

    // What comes back is structurally equal to what went in: the tree was
    // already canonical, and normalization before persisting is a no-op.
    assert_eq!(store.load("mine").unwrap(), filter);
}

#[test]
fn test_duplicate_create_only_refused_across_reopen() {
    let ctx = TestContext::new();

    {
        let (_db, store) = ctx.open();
        store
            .save("mine", &topic_filter(&["a"]), SaveMode::CreateOnly)
            .unwrap();
    }

    let (_db, store) = ctx.open();
    let err = store
        .save("mine", &topic_filter(&["b"]), SaveMode::CreateOnly)
        .unwrap_err();
    assert!(matches!(err, Error::DuplicateName(name) if name == "mine"));
    assert_eq!(store.load("mine").unwrap(), topic_filter(&["a"]));
}

#[test]
fn test_idempotent_delete_leaves_library_unchanged() {
    let ctx = TestContext::new();
    let (_db, store) = ctx.open();

    store
        .save("keep", &topic_filter(&["a"]), SaveMode::Upsert)
        .unwrap();
    let revision = store.revision().unwrap();

    store.delete("never-existed").unwrap();
    store.delete("never-existed").unwrap();

    assert_eq!(store.names().unwrap(), vec!["keep"]);
    assert_eq!(store.revision().unwrap(), revision);
}

#[test]
fn test_invalid_tree_rejected_before_storage() {
    let ctx = TestContext::new();
    let (_db, store) = ctx.open();

    let vacuous = FilterNode::and(vec![FilterNode::is_one_of("topic", vec![])]);
    let err = store.save("bad", &vacuous, SaveMode::Upsert).unwrap_err();
    match err {
        Error::Invalid(errors) => {
            assert_eq!(errors.len(), 1);
            assert_eq!(
                sift_expr::format_path(&errors[0].path),
                "$.operands[0]"
            );
        }
        other => panic!("expected Invalid, got {other}"),
    }
    assert!(store.names().unwrap().is_empty());
}
