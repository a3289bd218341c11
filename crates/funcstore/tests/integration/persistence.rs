//! File-backed datastore tests.

use std::fs;

use funcstore::{App, AppFilter, Datastore, DatastoreBuilder, Error, Route, RouteFilter};
use funcstore_storage::{StorageEngine, Transaction};
use tempfile::tempdir;

#[test]
fn test_open_creates_missing_directories() {
    let dir = tempdir().expect("failed to create temp dir");
    let path = dir.path().join("nested").join("deeper").join("funcs.db");

    let store = Datastore::open(&path).expect("failed to open");
    assert!(path.exists());
    store.close().expect("failed to close");
}

#[test]
fn test_reopen_keeps_data() {
    let dir = tempdir().expect("failed to create temp dir");
    let path = dir.path().join("funcs.db");

    {
        let store = Datastore::open(&path).expect("failed to open");
        store.store_app(App::new("myapp")).expect("store failed");
        store.store_route(Route::new("myapp", "/hello").with_image("iron/hello")).expect("store failed");
        store.close().expect("failed to close");
    }

    let store = Datastore::open(&path).expect("failed to reopen");
    assert_eq!(store.list_apps(&AppFilter::all()).expect("list failed"), vec![App::new("myapp")]);
    let routes = store.list_routes(&RouteFilter::new("myapp")).expect("list failed");
    assert_eq!(routes.len(), 1);
    assert_eq!(routes[0].image, "iron/hello");
}

#[test]
fn test_open_from_url_with_prefix() {
    let dir = tempdir().expect("failed to create temp dir");
    let path = dir.path().join("funcs.db");
    let url = format!("bolt://{}?bucket=staging-", path.display());

    let store = Datastore::from_url(&url).expect("failed to open");
    assert_eq!(store.layout().prefix(), "staging-");

    let tx = store.engine().begin_read().expect("failed to begin");
    for name in ["staging-apps", "staging-routes", "staging-logs"] {
        let bucket = funcstore_storage::BucketPath::root(name);
        assert!(tx.bucket_exists(&bucket).expect("exists failed"), "{name} missing");
    }
}

/// Prefixes partition one file into independent datastores
#[test]
fn test_prefixes_are_independent() {
    let dir = tempdir().expect("failed to create temp dir");
    let path = dir.path().join("funcs.db");

    {
        let store = DatastoreBuilder::new().path(&path).bucket_prefix("a-").open().expect("open failed");
        store.store_app(App::new("only-in-a")).expect("store failed");
    }

    let store = DatastoreBuilder::new().path(&path).bucket_prefix("b-").open().expect("open failed");
    assert!(store.list_apps(&AppFilter::all()).expect("list failed").is_empty());
}

#[test]
fn test_second_handle_fails() {
    let dir = tempdir().expect("failed to create temp dir");
    let path = dir.path().join("funcs.db");

    let _store = Datastore::open(&path).expect("failed to open");
    let err = Datastore::open(&path).err().expect("second open should fail");
    assert!(err.is_storage_error());
}

#[test]
fn test_unusable_directory() {
    let dir = tempdir().expect("failed to create temp dir");
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, b"file").expect("failed to write file");

    let err = Datastore::open(blocker.join("funcs.db")).err().expect("open should fail");
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn test_malformed_url() {
    let err = Datastore::from_url("not a url").err().expect("open should fail");
    assert!(matches!(err, Error::Config(_)));
}
