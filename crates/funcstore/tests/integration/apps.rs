//! Application storage tests.

use funcstore::{App, AppFilter, Datastore, Route, RouteFilter};
use funcstore_core::Encoder;
use funcstore_storage::{StorageEngine, StorageError, Transaction};

#[test]
fn test_store_and_get_app() {
    let store = Datastore::in_memory().expect("failed to open");

    let app = App::new("myapp").with_config("LOG_LEVEL", "debug");
    let stored = store.store_app(app.clone()).expect("store failed");
    assert_eq!(stored, app);

    let fetched = store.get_app("myapp").expect("get failed").expect("app should exist");
    assert_eq!(fetched, app);
    assert_eq!(fetched.config.get("LOG_LEVEL").map(String::as_str), Some("debug"));
}

/// A missing app is not an error
#[test]
fn test_get_missing_app() {
    let store = Datastore::in_memory().expect("failed to open");
    assert_eq!(store.get_app("nope").expect("get failed"), None);
}

#[test]
fn test_store_app_replaces_record() {
    let store = Datastore::in_memory().expect("failed to open");

    store.store_app(App::new("myapp").with_config("A", "1")).expect("store failed");
    store.store_app(App::new("myapp").with_config("B", "2")).expect("store failed");

    let app = store.get_app("myapp").expect("get failed").expect("app should exist");
    assert!(app.config.get("A").is_none());
    assert_eq!(app.config.get("B").map(String::as_str), Some("2"));
    assert_eq!(store.list_apps(&AppFilter::all()).expect("list failed").len(), 1);
}

#[test]
fn test_store_app_keeps_routes() {
    let store = Datastore::in_memory().expect("failed to open");

    store.store_app(App::new("myapp")).expect("store failed");
    store.store_route(Route::new("myapp", "/hello")).expect("store failed");
    store.store_app(App::new("myapp").with_config("K", "V")).expect("store failed");

    let routes = store.list_routes(&RouteFilter::new("myapp")).expect("list failed");
    assert_eq!(routes.len(), 1);
    assert_eq!(routes[0].name, "/hello");
}

#[test]
fn test_list_apps_ascending() {
    let store = Datastore::in_memory().expect("failed to open");
    assert!(store.list_apps(&AppFilter::all()).expect("list failed").is_empty());

    for name in ["zeta", "alpha", "mid"] {
        store.store_app(App::new(name)).expect("store failed");
    }

    let names: Vec<String> = store
        .list_apps(&AppFilter::all())
        .expect("list failed")
        .into_iter()
        .map(|app| app.name)
        .collect();
    assert_eq!(names, vec!["alpha", "mid", "zeta"]);
}

/// The app filter does not narrow the listing
#[test]
fn test_list_apps_ignores_filter() {
    let store = Datastore::in_memory().expect("failed to open");
    store.store_app(App::new("a")).expect("store failed");
    store.store_app(App::new("b")).expect("store failed");

    let filter = AppFilter { name: Some("a".to_string()) };
    assert_eq!(store.list_apps(&filter).expect("list failed").len(), 2);
}

#[test]
fn test_remove_app_deletes_routes() {
    let store = Datastore::in_memory().expect("failed to open");

    store.store_app(App::new("myapp")).expect("store failed");
    store.store_route(Route::new("myapp", "/a")).expect("store failed");
    store.store_route(Route::new("myapp", "/b")).expect("store failed");

    store.remove_app("myapp").expect("remove failed");

    assert_eq!(store.get_app("myapp").expect("get failed"), None);

    let tx = store.engine().begin_read().expect("failed to begin");
    assert!(!tx.bucket_exists(&store.layout().app_routes("myapp")).expect("exists failed"));
}

#[test]
fn test_remove_unknown_app_fails() {
    let store = Datastore::in_memory().expect("failed to open");

    let err = store.remove_app("ghost").expect_err("remove should fail");
    assert!(err.is_storage_error());
}

/// An app record without a route bucket cannot be removed, and the failed
/// removal leaves the record in place.
#[test]
fn test_remove_app_without_route_bucket_rolls_back() {
    let store = Datastore::in_memory().expect("failed to open");

    let bytes = App::new("orphan").encode().expect("encode failed");
    {
        let mut tx = store.engine().begin_write().expect("failed to begin");
        tx.put(store.layout().apps(), b"orphan", &bytes).expect("put failed");
        tx.commit().expect("failed to commit");
    }

    let err = store.remove_app("orphan").expect_err("remove should fail");
    assert!(matches!(err, funcstore::Error::Storage(StorageError::BucketNotFound(_))));

    assert_eq!(store.get_app("orphan").expect("get failed"), Some(App::new("orphan")));
}

/// A record that cannot be decoded fails the whole listing
#[test]
fn test_list_apps_aborts_on_corrupt_record() {
    let store = Datastore::in_memory().expect("failed to open");
    store.store_app(App::new("good")).expect("store failed");

    {
        let mut tx = store.engine().begin_write().expect("failed to begin");
        tx.put(store.layout().apps(), b"broken", b"{not json").expect("put failed");
        tx.commit().expect("failed to commit");
    }

    let err = store.list_apps(&AppFilter::all()).expect_err("list should fail");
    assert!(err.is_codec_error());
    assert!(store.get_app("good").expect("get failed").is_some());
}
