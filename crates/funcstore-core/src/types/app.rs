use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A named application.
///
/// The name is the application's key in storage and names the bucket that
/// holds its routes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct App {
    /// Unique application name.
    pub name: String,
    /// Configuration passed to every route of the application.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub config: BTreeMap<String, String>,
}

impl App {
    /// Create an application with no configuration.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), config: BTreeMap::new() }
    }

    /// Add a configuration entry.
    #[must_use]
    pub fn with_config(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.insert(key.into(), value.into());
        self
    }
}
