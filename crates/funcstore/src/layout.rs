//! Bucket hierarchy of a datastore.
//!
//! Records live in three top-level buckets named after a configurable prefix:
//!
//! ```text
//! <prefix>apps               app name  -> encoded App
//! <prefix>routes/<app name>  route name -> encoded Route
//! <prefix>logs               reserved
//! ```
//!
//! Every operation here runs inside a caller-supplied transaction and never
//! commits it.

use funcstore_core::{App, AppFilter, Decoder, Encoder, Route, RouteFilter};
use funcstore_storage::{BucketPath, Cursor, Transaction};
use tracing::{debug, error, warn};

use crate::error::{Error, Result};

/// Names of the buckets a datastore keeps its records in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketLayout {
    prefix: String,
    apps: BucketPath,
    routes: BucketPath,
    logs: BucketPath,
}

impl BucketLayout {
    /// Build the layout for the given bucket name prefix.
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        Self {
            apps: BucketPath::root(format!("{prefix}apps")),
            routes: BucketPath::root(format!("{prefix}routes")),
            logs: BucketPath::root(format!("{prefix}logs")),
            prefix,
        }
    }

    /// The bucket name prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Bucket holding application records.
    pub const fn apps(&self) -> &BucketPath {
        &self.apps
    }

    /// Bucket holding one nested route bucket per application.
    pub const fn routes(&self) -> &BucketPath {
        &self.routes
    }

    /// Bucket reserved for logs.
    pub const fn logs(&self) -> &BucketPath {
        &self.logs
    }

    /// Route bucket of the given application.
    pub fn app_routes(&self, app_name: &str) -> BucketPath {
        self.routes.child(app_name)
    }

    /// Create the top-level buckets that do not exist yet.
    ///
    /// # Errors
    ///
    /// Returns the first storage error; nothing is committed here.
    pub fn create_top_level<T: Transaction>(&self, tx: &mut T) -> Result<()> {
        for bucket in [&self.apps, &self.routes, &self.logs] {
            tx.create_bucket_if_not_exists(bucket).map_err(|err| {
                error!(bucket = %bucket, error = %err, "failed to create bucket");
                Error::Storage(err)
            })?;
        }
        Ok(())
    }

    /// Insert or replace an application record.
    ///
    /// Routes already stored for the application are kept.
    pub fn store_app<T: Transaction>(&self, tx: &mut T, app: &App) -> Result<()> {
        let bytes = app.encode()?;
        tx.put(&self.apps, app.name.as_bytes(), &bytes)?;
        self.route_bucket_for_app(tx, &app.name)?;
        Ok(())
    }

    /// Delete an application record together with its route bucket.
    ///
    /// # Errors
    ///
    /// Fails if the application has no route bucket. The record deletion is
    /// part of the same transaction, so rolling back restores it.
    pub fn remove_app<T: Transaction>(&self, tx: &mut T, app_name: &str) -> Result<()> {
        tx.delete(&self.apps, app_name.as_bytes())?;
        tx.delete_bucket(&self.app_routes(app_name))?;
        Ok(())
    }

    /// Look up an application by name.
    pub fn get_app<T: Transaction>(&self, tx: &T, app_name: &str) -> Result<Option<App>> {
        tx.get(&self.apps, app_name.as_bytes())?
            .map(|bytes| decode_record(&self.apps, app_name.as_bytes(), &bytes))
            .transpose()
    }

    /// All applications in ascending name order.
    ///
    /// The filter is accepted for interface stability but not evaluated.
    ///
    /// # Errors
    ///
    /// Any record that fails to decode aborts the listing.
    pub fn list_apps<T: Transaction>(&self, tx: &T, _filter: &AppFilter) -> Result<Vec<App>> {
        let mut apps = Vec::new();
        let mut cursor = tx.cursor(&self.apps)?;
        let mut entry = cursor.seek_first()?;
        while let Some((key, value)) = entry {
            apps.push(decode_record(&self.apps, &key, &value)?);
            entry = cursor.next()?;
        }
        Ok(apps)
    }

    /// Route bucket of an application, created if it does not exist.
    ///
    /// In a read-only transaction a missing bucket cannot be created and the
    /// call fails with [`StorageError::ReadOnly`](funcstore_storage::StorageError::ReadOnly).
    pub fn route_bucket_for_app<T: Transaction>(&self, tx: &mut T, app_name: &str) -> Result<BucketPath> {
        let bucket = self.app_routes(app_name);
        if !tx.bucket_exists(&bucket)? {
            tx.create_bucket(&bucket)?;
            debug!(app = app_name, bucket = %bucket, "created route bucket");
        }
        Ok(bucket)
    }

    /// Insert or replace a route in its application's route bucket.
    pub fn store_route<T: Transaction>(&self, tx: &mut T, route: &Route) -> Result<()> {
        let bucket = self.route_bucket_for_app(tx, &route.app_name)?;
        let bytes = route.encode()?;
        tx.put(&bucket, route.name.as_bytes(), &bytes)?;
        Ok(())
    }

    /// Delete a route. Deleting a missing route succeeds.
    pub fn remove_route<T: Transaction>(&self, tx: &mut T, app_name: &str, route_name: &str) -> Result<()> {
        let bucket = self.route_bucket_for_app(tx, app_name)?;
        tx.delete(&bucket, route_name.as_bytes())?;
        Ok(())
    }

    /// Look up a route.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RouteNotFound`] when the route is absent.
    pub fn get_route<T: Transaction>(&self, tx: &mut T, app_name: &str, route_name: &str) -> Result<Route> {
        let bucket = self.route_bucket_for_app(tx, app_name)?;
        match tx.get(&bucket, route_name.as_bytes())? {
            Some(bytes) => decode_record(&bucket, route_name.as_bytes(), &bytes),
            None => Err(Error::RouteNotFound {
                app: app_name.to_string(),
                route: route_name.to_string(),
            }),
        }
    }

    /// Routes of `filter.app_name` accepted by the filter, in descending name
    /// order.
    ///
    /// # Errors
    ///
    /// Any record that fails to decode aborts the listing.
    pub fn list_routes<T: Transaction>(&self, tx: &mut T, filter: &RouteFilter) -> Result<Vec<Route>> {
        let bucket = self.route_bucket_for_app(tx, &filter.app_name)?;
        let mut routes = Vec::new();
        let mut cursor = tx.cursor(&bucket)?;
        let mut entry = cursor.seek_last()?;
        while let Some((key, value)) = entry {
            let route: Route = decode_record(&bucket, &key, &value)?;
            if filter.matches(&route) {
                routes.push(route);
            }
            entry = cursor.prev()?;
        }
        Ok(routes)
    }
}

fn decode_record<R: Decoder>(bucket: &BucketPath, key: &[u8], bytes: &[u8]) -> Result<R> {
    R::decode(bytes).map_err(|err| {
        warn!(
            bucket = %bucket,
            key = %String::from_utf8_lossy(key),
            error = %err,
            "failed to decode record"
        );
        Error::Codec(err)
    })
}
