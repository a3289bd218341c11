use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Default memory limit for a route, in megabytes.
pub const DEFAULT_MEMORY: u64 = 128;

/// Default execution timeout for a route, in seconds.
pub const DEFAULT_TIMEOUT: u32 = 30;

/// How a route is invoked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteType {
    /// The caller waits for the function's response.
    #[default]
    Sync,
    /// The call is queued and answered immediately.
    Async,
}

/// How input and output are framed for the function.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// One process per call, raw stdin/stdout.
    #[default]
    Default,
    /// HTTP framing over stdin/stdout.
    Http,
}

/// A route owned by an application.
///
/// Routes are keyed by `name` within their application's bucket and listed
/// in reverse key order, so names that sort later are treated as newer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    /// Name of the owning application.
    pub app_name: String,
    /// Route name, unique within the application.
    pub name: String,
    /// Container image executed for this route.
    #[serde(default)]
    pub image: String,
    /// Memory limit in megabytes.
    #[serde(default = "default_memory")]
    pub memory: u64,
    /// Execution timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u32,
    /// Invocation type.
    #[serde(default, rename = "type")]
    pub route_type: RouteType,
    /// I/O format.
    #[serde(default)]
    pub format: Format,
    /// Maximum concurrent executions; zero means unlimited.
    #[serde(default)]
    pub max_concurrency: u32,
    /// Headers added to every response.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, Vec<String>>,
    /// Configuration passed to the function.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub config: BTreeMap<String, String>,
}

const fn default_memory() -> u64 {
    DEFAULT_MEMORY
}

const fn default_timeout() -> u32 {
    DEFAULT_TIMEOUT
}

impl Route {
    /// Create a route with default settings.
    pub fn new(app_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            name: name.into(),
            image: String::new(),
            memory: DEFAULT_MEMORY,
            timeout: DEFAULT_TIMEOUT,
            route_type: RouteType::default(),
            format: Format::default(),
            max_concurrency: 0,
            headers: BTreeMap::new(),
            config: BTreeMap::new(),
        }
    }

    /// Set the image.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Set the memory limit in megabytes.
    #[must_use]
    pub const fn with_memory(mut self, memory: u64) -> Self {
        self.memory = memory;
        self
    }

    /// Set the timeout in seconds.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: u32) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the invocation type.
    #[must_use]
    pub const fn with_type(mut self, route_type: RouteType) -> Self {
        self.route_type = route_type;
        self
    }

    /// Set the I/O format.
    #[must_use]
    pub const fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    /// Append a value to a response header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.entry(name.into()).or_default().push(value.into());
        self
    }

    /// Add a configuration entry.
    #[must_use]
    pub fn with_config(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.insert(key.into(), value.into());
        self
    }
}
