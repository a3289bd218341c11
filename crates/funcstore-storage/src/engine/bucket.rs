//! Bucket addressing.

use std::fmt;

/// The path of a bucket from the top level down.
///
/// A path with one segment names a top-level bucket; each further segment
/// names a child bucket inside the previous one.
///
/// ```
/// use funcstore_storage::BucketPath;
///
/// let routes = BucketPath::root("funcs-routes");
/// let app = routes.child("myapp");
///
/// assert_eq!(app.to_string(), "funcs-routes/myapp");
/// assert_eq!(app.parent(), Some(routes));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BucketPath {
    segments: Vec<String>,
}

impl BucketPath {
    /// A top-level bucket.
    #[must_use]
    pub fn root(name: impl Into<String>) -> Self {
        Self { segments: vec![name.into()] }
    }

    /// The path of a child bucket named `name` inside this one.
    #[must_use]
    pub fn child(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(name.into());
        Self { segments }
    }

    /// The enclosing bucket, or `None` for a top-level bucket.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        if self.segments.len() <= 1 {
            return None;
        }
        Some(Self { segments: self.segments[..self.segments.len() - 1].to_vec() })
    }

    /// The bucket's own name (its last segment).
    #[must_use]
    pub fn name(&self) -> &str {
        self.segments.last().map_or("", String::as_str)
    }

    /// All segments from the top level down.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Nesting depth; top-level buckets have depth 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.segments.len()
    }
}

impl fmt::Display for BucketPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}
