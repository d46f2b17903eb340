//! Route loaders
//!
//! A loader runs before its view is shown. It makes sure the data the view
//! needs is in the cache and returns only what the view needs to find it
//! again (the normalized term or the id). Fetch failures propagate to the
//! caller, which shows the error view instead of the target view.

use crate::api::DrinkSource;
use crate::cache::{CacheKey, QueryCache};
use crate::error::CocktailResult;
use crate::query::{self, QueryDescriptor};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Cache, recipe source and search defaults shared by all loaders
#[derive(Clone)]
pub struct QueryClient {
    cache: QueryCache,
    source: Arc<dyn DrinkSource>,
    default_term: String,
}

impl QueryClient {
    pub fn new(cache: QueryCache, source: Arc<dyn DrinkSource>, default_term: &str) -> Self {
        Self {
            cache,
            source,
            default_term: default_term.to_string(),
        }
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    pub fn source(&self) -> &Arc<dyn DrinkSource> {
        &self.source
    }

    pub fn default_term(&self) -> &str {
        &self.default_term
    }

    /// Normalize a search term the same way the search descriptor does
    pub fn normalize_term(&self, term: Option<&str>) -> String {
        query::normalize_term(term, &self.default_term)
    }

    pub fn search_query(&self, term: Option<&str>) -> QueryDescriptor {
        query::search_query(Arc::clone(&self.source), term, &self.default_term)
    }

    pub fn item_query(&self, id: &str) -> QueryDescriptor {
        query::item_query(Arc::clone(&self.source), id)
    }
}

/// Payload of the landing (search) route
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LandingData {
    pub search_term: String,
}

impl LandingData {
    pub fn key(&self) -> CacheKey {
        query::search_key(&self.search_term)
    }
}

/// Payload of the single-cocktail route
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemData {
    pub id: String,
}

impl ItemData {
    pub fn key(&self) -> CacheKey {
        query::item_key(&self.id)
    }
}

/// Load search results for the landing page
pub async fn landing_loader(
    client: &QueryClient,
    search: Option<&str>,
) -> CocktailResult<LandingData> {
    let search_term = client.normalize_term(search);
    debug!("landing loader: {}", search_term);

    client
        .cache()
        .ensure_fresh(client.search_query(Some(&search_term)))
        .await?;

    Ok(LandingData { search_term })
}

/// Load one cocktail for the detail page
pub async fn item_loader(client: &QueryClient, id: &str) -> CocktailResult<ItemData> {
    let id = id.trim().to_string();
    debug!("item loader: {}", id);

    client.cache().ensure_fresh(client.item_query(&id)).await?;

    Ok(ItemData { id })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{QueryData, QueryStatus};
    use crate::error::CocktailError;
    use crate::query::DEFAULT_SEARCH_TERM;
    use crate::testing::StubSource;

    fn client(source: StubSource) -> (QueryClient, Arc<StubSource>) {
        let source = Arc::new(source);
        let client = QueryClient::new(QueryCache::default(), source.clone(), DEFAULT_SEARCH_TERM);
        (client, source)
    }

    #[tokio::test]
    async fn landing_returns_term_not_data() {
        let (client, _) = client(StubSource::new().with_search("lemon", &["1", "2"]));

        let data = landing_loader(&client, None).await.unwrap();
        assert_eq!(data.search_term, "lemon");

        let entry = client.cache().read(&data.key()).unwrap();
        assert_eq!(entry.status, QueryStatus::Success);
        assert_eq!(entry.data.map(|d| d.len()), Some(2));
    }

    #[tokio::test]
    async fn landing_uses_configured_default() {
        let source = Arc::new(StubSource::new().with_search("mint", &["1"]));
        let client = QueryClient::new(QueryCache::default(), source, "mint");

        let data = landing_loader(&client, Some("  ")).await.unwrap();
        assert_eq!(data.search_term, "mint");
    }

    #[tokio::test]
    async fn item_loader_caches_lookup() {
        let (client, source) = client(StubSource::new().with_item("11007"));

        let data = item_loader(&client, "11007").await.unwrap();
        item_loader(&client, "11007").await.unwrap();

        assert_eq!(data.id, "11007");
        assert_eq!(source.calls(), 1);
        let entry = client.cache().read(&data.key()).unwrap();
        assert!(matches!(entry.data, Some(QueryData::Item(Some(_)))));
    }

    #[tokio::test]
    async fn loader_propagates_fetch_failure() {
        let (client, _) = client(StubSource::new().failing("vodka"));

        let err = landing_loader(&client, Some("vodka")).await.unwrap_err();
        assert!(matches!(err, CocktailError::Fetch(_)));
    }
}
