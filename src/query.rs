//! Query definitions
//!
//! Pure functions that map a search term or item id to a cache key plus the
//! async fetch that produces the data for that key.

use crate::api::DrinkSource;
use crate::cache::{CacheKey, QueryData};
use crate::error::FetchError;
use futures_util::future::{BoxFuture, FutureExt};
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// Term used when a search is empty
pub const DEFAULT_SEARCH_TERM: &str = "lemon";

pub const SEARCH_SCOPE: &str = "search";
pub const ITEM_SCOPE: &str = "item";

/// Future produced by a descriptor's fetch
pub type FetchFuture = BoxFuture<'static, Result<QueryData, FetchError>>;

type Fetcher = Box<dyn FnOnce() -> FetchFuture + Send>;

/// A cache key paired with the fetch that fills it
pub struct QueryDescriptor {
    pub key: CacheKey,
    fetch: Fetcher,
}

impl QueryDescriptor {
    pub fn new<F, Fut>(key: CacheKey, fetch: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<QueryData, FetchError>> + Send + 'static,
    {
        Self {
            key,
            fetch: Box::new(move || fetch().boxed()),
        }
    }

    /// Split into key and the started fetch
    pub fn into_parts(self) -> (CacheKey, FetchFuture) {
        (self.key, (self.fetch)())
    }
}

impl fmt::Debug for QueryDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryDescriptor")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

/// Trim a search term, falling back when it is missing or blank
pub fn normalize_term(term: Option<&str>, fallback: &str) -> String {
    match term.map(str::trim) {
        Some(t) if !t.is_empty() => t.to_string(),
        _ => fallback.trim().to_string(),
    }
}

/// Key for search results of an already normalized term
pub fn search_key(term: &str) -> CacheKey {
    CacheKey::new([SEARCH_SCOPE, term])
}

/// Key for a single-drink lookup
pub fn item_key(id: &str) -> CacheKey {
    CacheKey::new([ITEM_SCOPE, id])
}

/// Search descriptor; "no results" resolves to an empty list
pub fn search_query(
    source: Arc<dyn DrinkSource>,
    term: Option<&str>,
    fallback: &str,
) -> QueryDescriptor {
    let term = normalize_term(term, fallback);
    QueryDescriptor::new(search_key(&term), move || async move {
        let envelope = source.search(&term).await?;
        Ok(QueryData::Drinks(envelope.into_drinks()))
    })
}

/// Lookup descriptor; an unknown id resolves to `Item(None)`
pub fn item_query(source: Arc<dyn DrinkSource>, id: &str) -> QueryDescriptor {
    let id = id.trim().to_string();
    QueryDescriptor::new(item_key(&id), move || async move {
        let envelope = source.lookup(&id).await?;
        Ok(QueryData::Item(envelope.into_first()))
    })
}
