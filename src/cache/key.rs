//! Cache key definitions

use serde::Serialize;
use std::fmt;

/// Structural identifier for one cached resource.
///
/// An ordered tuple of strings such as `["search", "lemon"]`; two keys are
/// equal when their parts are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CacheKey(Vec<String>);

impl CacheKey {
    /// Build a key from its parts
    pub fn new<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(parts.into_iter().map(Into::into).collect())
    }

    /// The ordered parts of the key
    pub fn parts(&self) -> &[String] {
        &self.0
    }

    /// The leading part, which names the kind of query
    pub fn scope(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("/"))
    }
}

impl<const N: usize> From<[&str; N]> for CacheKey {
    fn from(parts: [&str; N]) -> Self {
        Self::new(parts)
    }
}
