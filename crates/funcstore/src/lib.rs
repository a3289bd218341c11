//! `funcstore` - Persistent storage for serverless function metadata.
//!
//! `funcstore` keeps *applications* and their *routes* in a single embedded
//! database file. Each application owns a bucket of routes; listing routes
//! returns them in descending name order and can be narrowed by path, image
//! or an arbitrary predicate.
//!
//! # Quick Start
//!
//! ```ignore
//! use funcstore::{App, AppFilter, Datastore, Route, RouteFilter};
//!
//! let store = Datastore::open("/var/lib/funcs/data.db")?;
//!
//! store.store_app(App::new("myapp"))?;
//! store.store_route(Route::new("myapp", "/hello").with_image("iron/hello"))?;
//!
//! let apps = store.list_apps(&AppFilter::all())?;
//! let routes = store.list_routes(&RouteFilter::new("myapp").with_image("iron/hello"))?;
//! ```
//!
//! # Configuration
//!
//! Use [`DatastoreBuilder`] or a connection string to change the location or
//! the prefix of the bucket names:
//!
//! ```ignore
//! use funcstore::Datastore;
//!
//! let store = Datastore::from_url("bolt:///var/lib/funcs/data.db?bucket=staging-")?;
//! ```
//!
//! # Modules
//!
//! - [`config`] - Configuration and connection strings
//! - [`datastore`] - The [`Datastore`] handle
//! - [`layout`] - Bucket hierarchy and record operations
//! - [`error`] - Error types

#![deny(clippy::unwrap_used)]

pub mod config;
pub mod datastore;
pub mod error;
pub mod layout;

pub use config::{Config, DatastoreBuilder, DatastoreUrl, DEFAULT_BUCKET_PREFIX};
pub use datastore::Datastore;
pub use error::{Error, Result};
pub use layout::BucketLayout;

pub use funcstore_core::{App, AppFilter, Format, Route, RouteFilter, RouteType};
pub use funcstore_storage::StorageError;
