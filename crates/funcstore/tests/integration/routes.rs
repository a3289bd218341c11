//! Route storage tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use funcstore::{App, Datastore, Error, Route, RouteFilter, RouteType};
use funcstore_storage::{StorageEngine, StorageError, Transaction};

fn names(routes: &[Route]) -> Vec<&str> {
    routes.iter().map(|route| route.name.as_str()).collect()
}

#[test]
fn test_store_and_get_route() {
    let store = Datastore::in_memory().expect("failed to open");
    store.store_app(App::new("myapp")).expect("store failed");

    let route = Route::new("myapp", "/hello")
        .with_image("iron/hello")
        .with_memory(256)
        .with_type(RouteType::Async)
        .with_header("X-Trace", "on");
    let stored = store.store_route(route.clone()).expect("store failed");
    assert_eq!(stored, route);

    let fetched = store.get_route("myapp", "/hello").expect("get failed");
    assert_eq!(fetched, route);
}

#[test]
fn test_store_route_creates_app_bucket() {
    let store = Datastore::in_memory().expect("failed to open");

    store.store_route(Route::new("newapp", "/x")).expect("store failed");

    let tx = store.engine().begin_read().expect("failed to begin");
    assert!(tx.bucket_exists(&store.layout().app_routes("newapp")).expect("exists failed"));
    drop(tx);

    assert_eq!(store.get_route("newapp", "/x").expect("get failed").name, "/x");
    // The app record itself is not created
    assert_eq!(store.get_app("newapp").expect("get failed"), None);
}

#[test]
fn test_get_missing_route() {
    let store = Datastore::in_memory().expect("failed to open");
    store.store_app(App::new("myapp")).expect("store failed");

    let err = store.get_route("myapp", "/nope").expect_err("get should fail");
    assert!(err.is_route_not_found());
    match err {
        Error::RouteNotFound { app, route } => {
            assert_eq!(app, "myapp");
            assert_eq!(route, "/nope");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_list_routes_descending() {
    let store = Datastore::in_memory().expect("failed to open");
    store.store_app(App::new("myapp")).expect("store failed");

    for name in ["m", "a", "z"] {
        store.store_route(Route::new("myapp", name)).expect("store failed");
    }

    let routes = store.list_routes(&RouteFilter::new("myapp")).expect("list failed");
    assert_eq!(names(&routes), vec!["z", "m", "a"]);
}

#[test]
fn test_list_routes_of_app_without_routes() {
    let store = Datastore::in_memory().expect("failed to open");
    store.store_app(App::new("empty")).expect("store failed");

    assert!(store.list_routes(&RouteFilter::new("empty")).expect("list failed").is_empty());
}

#[test]
fn test_list_routes_is_scoped_to_app() {
    let store = Datastore::in_memory().expect("failed to open");
    store.store_route(Route::new("one", "/a")).expect("store failed");
    store.store_route(Route::new("two", "/b")).expect("store failed");

    let routes = store.list_routes(&RouteFilter::new("one")).expect("list failed");
    assert_eq!(names(&routes), vec!["/a"]);
}

#[test]
fn test_list_routes_predicate() {
    let store = Datastore::in_memory().expect("failed to open");
    store.store_app(App::new("myapp")).expect("store failed");
    store.store_route(Route::new("myapp", "r1").with_image("a")).expect("store failed");
    store.store_route(Route::new("myapp", "r2").with_image("b")).expect("store failed");

    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let filter = RouteFilter::new("myapp").with_predicate(move |route| {
        counter.fetch_add(1, Ordering::SeqCst);
        route.image == "b"
    });

    let routes = store.list_routes(&filter).expect("list failed");
    assert_eq!(names(&routes), vec!["r2"]);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_list_routes_path_and_image_filters() {
    let store = Datastore::in_memory().expect("failed to open");
    store.store_route(Route::new("myapp", "/a").with_image("x")).expect("store failed");
    store.store_route(Route::new("myapp", "/b").with_image("y")).expect("store failed");
    store.store_route(Route::new("myapp", "/c").with_image("x")).expect("store failed");

    let by_image = store.list_routes(&RouteFilter::new("myapp").with_image("x")).expect("list failed");
    assert_eq!(names(&by_image), vec!["/c", "/a"]);

    let by_path = store.list_routes(&RouteFilter::new("myapp").with_path("/b")).expect("list failed");
    assert_eq!(names(&by_path), vec!["/b"]);
}

#[test]
fn test_remove_route() {
    let store = Datastore::in_memory().expect("failed to open");
    store.store_route(Route::new("myapp", "/a")).expect("store failed");
    store.store_route(Route::new("myapp", "/b")).expect("store failed");

    store.remove_route("myapp", "/a").expect("remove failed");
    assert!(store.get_route("myapp", "/a").expect_err("should be gone").is_route_not_found());

    // Removing again is not an error
    store.remove_route("myapp", "/a").expect("second remove failed");

    let routes = store.list_routes(&RouteFilter::new("myapp")).expect("list failed");
    assert_eq!(names(&routes), vec!["/b"]);
}

/// Reads cannot create the route bucket of a removed app
#[test]
fn test_route_reads_after_app_removal_fail() {
    let store = Datastore::in_memory().expect("failed to open");
    store.store_app(App::new("myapp")).expect("store failed");
    store.store_route(Route::new("myapp", "/hello")).expect("store failed");
    store.remove_app("myapp").expect("remove failed");

    let err = store.list_routes(&RouteFilter::new("myapp")).expect_err("list should fail");
    assert!(matches!(err, Error::Storage(StorageError::ReadOnly)));

    let err = store.get_route("myapp", "/hello").expect_err("get should fail");
    assert!(matches!(err, Error::Storage(StorageError::ReadOnly)));

    // A write recreates the bucket
    store.remove_route("myapp", "/hello").expect("remove failed");
    assert!(store.list_routes(&RouteFilter::new("myapp")).expect("list failed").is_empty());
}

#[test]
fn test_list_routes_aborts_on_corrupt_record() {
    let store = Datastore::in_memory().expect("failed to open");
    store.store_route(Route::new("myapp", "/good")).expect("store failed");

    {
        let mut tx = store.engine().begin_write().expect("failed to begin");
        tx.put(&store.layout().app_routes("myapp"), b"/bad", b"not json").expect("put failed");
        tx.commit().expect("failed to commit");
    }

    let err = store.list_routes(&RouteFilter::new("myapp")).expect_err("list should fail");
    assert!(err.is_codec_error());
}
