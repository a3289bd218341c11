//! Atomicity and isolation tests.

use std::thread;

use funcstore::{App, AppFilter, Datastore, Route, RouteFilter};
use funcstore_storage::StorageEngine;

/// A reader keeps seeing the snapshot it started with
#[test]
fn test_reader_does_not_see_later_commit() {
    let store = Datastore::in_memory().expect("failed to open");
    store.store_app(App::new("before")).expect("store failed");

    let snapshot = store.engine().begin_read().expect("failed to begin");

    store.store_app(App::new("after")).expect("store failed");

    let seen = store.layout().list_apps(&snapshot, &AppFilter::all()).expect("list failed");
    assert_eq!(seen, vec![App::new("before")]);
    drop(snapshot);

    assert_eq!(store.list_apps(&AppFilter::all()).expect("list failed").len(), 2);
}

/// An uncommitted write is invisible to other transactions
#[test]
fn test_uncommitted_write_invisible() {
    let store = Datastore::in_memory().expect("failed to open");

    {
        let mut tx = store.engine().begin_write().expect("failed to begin");
        store.layout().store_app(&mut tx, &App::new("pending")).expect("store failed");
        // Dropped without commit
    }

    assert_eq!(store.get_app("pending").expect("get failed"), None);
}

#[test]
fn test_concurrent_writers() {
    let store = Datastore::in_memory().expect("failed to open");

    thread::scope(|scope| {
        for worker in 0..4 {
            let store = &store;
            scope.spawn(move || {
                for i in 0..10 {
                    let app = format!("app-{worker}");
                    store
                        .store_route(Route::new(app, format!("/r{i:02}")))
                        .expect("store failed");
                }
            });
        }
    });

    for worker in 0..4 {
        let routes = store
            .list_routes(&RouteFilter::new(format!("app-{worker}")))
            .expect("list failed");
        assert_eq!(routes.len(), 10);
        assert_eq!(routes[0].name, "/r09");
        assert_eq!(routes[9].name, "/r00");
    }
}

#[test]
fn test_concurrent_readers_and_writer() {
    let store = Datastore::in_memory().expect("failed to open");
    store.store_app(App::new("base")).expect("store failed");

    thread::scope(|scope| {
        let writer = &store;
        scope.spawn(move || {
            for i in 0..20 {
                writer.store_app(App::new(format!("app-{i:02}"))).expect("store failed");
            }
        });

        for _ in 0..3 {
            let reader = &store;
            scope.spawn(move || {
                for _ in 0..20 {
                    let apps = reader.list_apps(&AppFilter::all()).expect("list failed");
                    assert!(!apps.is_empty());
                    assert!(apps.windows(2).all(|pair| pair[0].name < pair[1].name));
                }
            });
        }
    });

    assert_eq!(store.list_apps(&AppFilter::all()).expect("list failed").len(), 21);
}
