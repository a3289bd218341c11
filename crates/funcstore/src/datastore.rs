//! Datastore handle.
//!
//! This module provides [`Datastore`], the entry point for storing and
//! querying applications and routes.
//!
//! # Examples
//!
//! ```ignore
//! use funcstore::{App, Datastore, Route, RouteFilter};
//!
//! let store = Datastore::from_url("bolt:///var/lib/funcs/data.db")?;
//!
//! store.store_app(App::new("myapp"))?;
//! store.store_route(Route::new("myapp", "/hello").with_image("iron/hello"))?;
//!
//! for route in store.list_routes(&RouteFilter::new("myapp"))? {
//!     println!("{} -> {}", route.name, route.image);
//! }
//! ```

use std::fs;
use std::path::Path;

use funcstore_core::{App, AppFilter, Route, RouteFilter};
use funcstore_storage::backends::redb::{RedbConfig, RedbEngine};
use funcstore_storage::{StorageEngine, Transaction};
use tracing::{debug, error, info};

use crate::config::{Config, DatastoreBuilder};
use crate::error::{Error, Result};
use crate::layout::BucketLayout;

/// Handle to an opened datastore.
///
/// Each operation runs in its own transaction. Writes commit on success and
/// roll back on any error, so a failed operation leaves no partial effect.
/// Reads see a consistent snapshot and never observe a concurrent write that
/// has not committed.
///
/// # Thread Safety
///
/// `Datastore` is `Send + Sync` when its engine is. Concurrent reads proceed
/// in parallel; writes are serialized by the engine.
pub struct Datastore<E: StorageEngine = RedbEngine> {
    engine: E,
    layout: BucketLayout,
}

impl Datastore<RedbEngine> {
    /// Open or create a datastore file with the default bucket prefix.
    ///
    /// # Errors
    ///
    /// See [`Datastore::open_with_config`].
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        DatastoreBuilder::new().path(path).open()
    }

    /// Open or create a datastore from a connection string such as
    /// `bolt:///var/lib/funcs/data.db?bucket=staging-`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for a malformed connection string, and
    /// otherwise see [`Datastore::open_with_config`].
    pub fn from_url(url: &str) -> Result<Self> {
        DatastoreBuilder::from_url(url)?.open()
    }

    /// Create a datastore that lives only in memory.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine or the top-level buckets cannot be
    /// created.
    pub fn in_memory() -> Result<Self> {
        DatastoreBuilder::in_memory().open()
    }

    /// Open or create a datastore with the given configuration.
    ///
    /// Missing parent directories of the file are created first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the directory cannot be created,
    /// [`Error::Storage`] if the file cannot be opened (for example because
    /// another handle holds it) or the top-level buckets cannot be created.
    pub fn open_with_config(config: Config) -> Result<Self> {
        let engine = if config.in_memory {
            RedbEngine::in_memory()?
        } else {
            let path = config.path.as_path();
            if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
                fs::create_dir_all(dir).map_err(|err| {
                    error!(dir = %dir.display(), error = %err, "failed to create datastore directory");
                    Error::Io(err)
                })?;
            }

            let mut redb_config = RedbConfig::new();
            if let Some(size) = config.cache_size {
                redb_config = redb_config.cache_size(size);
            }

            RedbEngine::open_with_config(path, redb_config).map_err(|err| {
                error!(file = %path.display(), error = %err, "failed to open datastore");
                Error::Storage(err)
            })?
        };

        let store = Self::with_engine(engine, config.bucket_prefix)?;
        info!(
            db = "redb",
            file = %config.path.display(),
            prefix = store.layout.prefix(),
            "datastore ready"
        );
        Ok(store)
    }
}

impl<E: StorageEngine> Datastore<E> {
    /// Wrap an engine, creating any missing top-level buckets.
    ///
    /// Reopening an existing datastore keeps all of its contents.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`] if the buckets cannot be created.
    pub fn with_engine(engine: E, prefix: impl Into<String>) -> Result<Self> {
        let layout = BucketLayout::new(prefix);
        {
            let mut tx = engine.begin_write()?;
            layout.create_top_level(&mut tx)?;
            tx.commit()?;
        }
        Ok(Self { engine, layout })
    }

    /// The underlying storage engine.
    pub const fn engine(&self) -> &E {
        &self.engine
    }

    /// The bucket names in use.
    pub const fn layout(&self) -> &BucketLayout {
        &self.layout
    }

    /// Insert or replace an application. Its existing routes are kept.
    ///
    /// Returns the stored record.
    pub fn store_app(&self, app: App) -> Result<App> {
        self.write(|tx| self.layout.store_app(tx, &app))?;
        debug!(app = %app.name, "stored app");
        Ok(app)
    }

    /// Delete an application and all of its routes.
    ///
    /// # Errors
    ///
    /// Fails without changing anything if the application has no route
    /// bucket, which includes the application never having been stored.
    pub fn remove_app(&self, app_name: &str) -> Result<()> {
        self.write(|tx| self.layout.remove_app(tx, app_name))?;
        debug!(app = app_name, "removed app");
        Ok(())
    }

    /// Look up an application. A missing application is `Ok(None)`.
    pub fn get_app(&self, app_name: &str) -> Result<Option<App>> {
        self.read(|tx| self.layout.get_app(tx, app_name))
    }

    /// All applications in ascending name order.
    pub fn list_apps(&self, filter: &AppFilter) -> Result<Vec<App>> {
        self.read(|tx| self.layout.list_apps(tx, filter))
    }

    /// Insert or replace a route.
    ///
    /// The owning application does not need to exist; its route bucket is
    /// created on demand. Returns the stored record.
    pub fn store_route(&self, route: Route) -> Result<Route> {
        self.write(|tx| self.layout.store_route(tx, &route))?;
        debug!(app = %route.app_name, route = %route.name, "stored route");
        Ok(route)
    }

    /// Delete a route. Deleting a missing route succeeds.
    pub fn remove_route(&self, app_name: &str, route_name: &str) -> Result<()> {
        self.write(|tx| self.layout.remove_route(tx, app_name, route_name))?;
        debug!(app = app_name, route = route_name, "removed route");
        Ok(())
    }

    /// Look up a route.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RouteNotFound`] if the route is absent, and a storage
    /// error if the application has no route bucket.
    pub fn get_route(&self, app_name: &str, route_name: &str) -> Result<Route> {
        self.read(|tx| self.layout.get_route(tx, app_name, route_name))
    }

    /// Routes of `filter.app_name` accepted by the filter, in descending
    /// name order.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the application has no route bucket.
    pub fn list_routes(&self, filter: &RouteFilter) -> Result<Vec<Route>> {
        self.read(|tx| self.layout.list_routes(tx, filter))
    }

    /// Flush and close the datastore.
    ///
    /// # Errors
    ///
    /// Returns an error if the flush fails.
    pub fn close(self) -> Result<()> {
        self.engine.flush()?;
        Ok(())
    }

    fn read<'s, R>(&'s self, op: impl FnOnce(&mut E::Transaction<'s>) -> Result<R>) -> Result<R> {
        let mut tx = self.engine.begin_read()?;
        op(&mut tx)
    }

    fn write<'s, R>(&'s self, op: impl FnOnce(&mut E::Transaction<'s>) -> Result<R>) -> Result<R> {
        let mut tx = self.engine.begin_write()?;
        let out = op(&mut tx)?;
        tx.commit()?;
        Ok(out)
    }
}
