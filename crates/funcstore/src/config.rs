//! Datastore configuration.
//!
//! A datastore is described by a [`Config`]: where the file lives, the prefix
//! of its top-level bucket names, and engine tuning. Build one with
//! [`DatastoreBuilder`] or from a connection string with [`DatastoreUrl`].
//!
//! ```ignore
//! use funcstore::DatastoreBuilder;
//!
//! let store = DatastoreBuilder::new()
//!     .path("/var/lib/funcs/data.db")
//!     .bucket_prefix("staging-")
//!     .open()?;
//!
//! // Equivalent connection string
//! let store = DatastoreBuilder::from_url("bolt:///var/lib/funcs/data.db?bucket=staging-")?
//!     .open()?;
//! ```

use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::datastore::Datastore;
use crate::error::{Error, Result};

/// Prefix of the top-level bucket names when none is configured.
pub const DEFAULT_BUCKET_PREFIX: &str = "funcs-";

/// Query parameter of a connection string selecting the bucket prefix.
const BUCKET_PARAM: &str = "bucket";

/// Settings used to open a datastore.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Path of the database file. Missing parent directories are created.
    pub path: PathBuf,
    /// Prefix of the `apps`, `routes` and `logs` bucket names.
    pub bucket_prefix: String,
    /// Engine cache size in bytes.
    pub cache_size: Option<usize>,
    /// Keep everything in memory instead of a file.
    pub in_memory: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            path: PathBuf::new(),
            bucket_prefix: DEFAULT_BUCKET_PREFIX.to_string(),
            cache_size: None,
            in_memory: false,
        }
    }
}

/// Builder for opening a [`Datastore`].
#[derive(Debug, Clone, Default)]
pub struct DatastoreBuilder {
    config: Config,
}

impl DatastoreBuilder {
    /// Start from the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an in-memory configuration.
    pub fn in_memory() -> Self {
        Self { config: Config { in_memory: true, ..Config::default() } }
    }

    /// Start from a connection string such as `bolt:///data/funcs.db?bucket=dev-`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the string cannot be parsed.
    pub fn from_url(url: &str) -> Result<Self> {
        let url = DatastoreUrl::parse(url)?;
        Ok(Self::new().path(url.path).bucket_prefix(url.bucket_prefix))
    }

    /// Set the database file path.
    #[must_use]
    pub fn path(mut self, path: impl AsRef<Path>) -> Self {
        self.config.path = path.as_ref().to_path_buf();
        self
    }

    /// Set the bucket name prefix.
    #[must_use]
    pub fn bucket_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.bucket_prefix = prefix.into();
        self
    }

    /// Set the engine cache size in bytes.
    #[must_use]
    pub const fn cache_size(mut self, size: usize) -> Self {
        self.config.cache_size = Some(size);
        self
    }

    /// The configuration built so far.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Finish building and return the configuration.
    pub fn build(self) -> Config {
        self.config
    }

    /// Open the datastore.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if no path was given for a file-backed store,
    /// and otherwise any error of [`Datastore::open_with_config`].
    pub fn open(self) -> Result<Datastore> {
        if !self.config.in_memory && self.config.path.as_os_str().is_empty() {
            return Err(Error::config("datastore path is empty"));
        }
        Datastore::open_with_config(self.config)
    }
}

/// A parsed datastore connection string.
///
/// The form is `scheme://[host]/path[?bucket=prefix]`. The host is ignored;
/// `bolt:///tmp/funcs.db` and `bolt://localhost/tmp/funcs.db` both name
/// `/tmp/funcs.db`. When several `bucket` parameters are given the first one
/// wins, and an empty value selects an empty prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatastoreUrl {
    /// URL scheme, e.g. `bolt`.
    pub scheme: String,
    /// Database file path.
    pub path: PathBuf,
    /// Bucket name prefix.
    pub bucket_prefix: String,
}

impl DatastoreUrl {
    /// Parse a connection string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the scheme or path is missing.
    pub fn parse(url: &str) -> Result<Self> {
        let (scheme, rest) = url
            .split_once("://")
            .ok_or_else(|| Error::config(format!("missing scheme in datastore url '{url}'")))?;
        let valid_scheme = scheme.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
            && scheme.chars().all(|c| c.is_ascii_alphanumeric() || "+-.".contains(c));
        if !valid_scheme {
            return Err(Error::config(format!("invalid scheme in datastore url '{url}'")));
        }

        let rest = rest.split_once('#').map_or(rest, |(before, _)| before);
        let (location, query) = rest.split_once('?').unwrap_or((rest, ""));
        let path = location.find('/').map_or("", |start| &location[start..]);
        if path.is_empty() || path == "/" {
            return Err(Error::config(format!("missing path in datastore url '{url}'")));
        }

        let bucket_prefix = query
            .split('&')
            .filter_map(|pair| {
                let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                (key == BUCKET_PARAM).then_some(value)
            })
            .next()
            .unwrap_or(DEFAULT_BUCKET_PREFIX);

        Ok(Self {
            scheme: scheme.to_string(),
            path: PathBuf::from(path),
            bucket_prefix: bucket_prefix.to_string(),
        })
    }
}

impl FromStr for DatastoreUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
