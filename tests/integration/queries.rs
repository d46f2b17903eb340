//! Cache and loader behavior against a scripted recipe source

use async_trait::async_trait;
use cocktails::api::DrinkSource;
use cocktails::cache::{CacheKey, QueryCache, QueryData, QueryStatus};
use cocktails::drink::DrinksEnvelope;
use cocktails::error::FetchError;
use cocktails::loader::{item_loader, landing_loader, QueryClient};
use cocktails::query::DEFAULT_SEARCH_TERM;
use cocktails::views::{ItemState, ItemView};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Answers with fixed JSON bodies, like the real API
struct ScriptedSource {
    calls: AtomicUsize,
}

impl ScriptedSource {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

fn lemon_drinks() -> serde_json::Value {
    json!({
        "drinks": [
            {
                "idDrink": "11118",
                "strDrink": "Blue Margarita",
                "strGlass": "Cocktail glass",
                "strIngredient1": "Tequila",
                "strIngredient2": "Blue Curacao",
                "strIngredient3": null
            },
            { "idDrink": "17216", "strDrink": "Lemon Drop", "strAlcoholic": "Alcoholic",
              "strIngredient1": "Absolut Citron", "strIngredient2": "Lemon juice" },
            { "idDrink": "12704", "strDrink": "Lemonade", "strAlcoholic": "Non alcoholic",
              "strIngredient1": "Water", "strIngredient2": "Sugar", "strIngredient3": "Lemon" }
        ]
    })
}

#[async_trait]
impl DrinkSource for ScriptedSource {
    async fn search(&self, term: &str) -> Result<DrinksEnvelope, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(50)).await;

        let body = match term {
            "lemon" => lemon_drinks(),
            "vodka" => {
                return Err(FetchError::Status {
                    url: "scripted://search.php?s=vodka".to_string(),
                    code: 503,
                })
            }
            _ => json!({ "drinks": null }),
        };
        Ok(serde_json::from_value(body).unwrap())
    }

    async fn lookup(&self, _id: &str) -> Result<DrinksEnvelope, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(serde_json::from_value(json!({ "drinks": [] })).unwrap())
    }

    fn source_name(&self) -> &'static str {
        "scripted"
    }
}

fn client(source: Arc<ScriptedSource>) -> QueryClient {
    QueryClient::new(QueryCache::default(), source, DEFAULT_SEARCH_TERM)
}

#[tokio::test(start_paused = true)]
async fn lemon_search_is_cached_once() {
    let source = ScriptedSource::new();
    let client = client(source.clone());

    let (a, b) = tokio::join!(
        landing_loader(&client, Some("lemon")),
        landing_loader(&client, None)
    );
    assert_eq!(a.unwrap().search_term, "lemon");
    assert_eq!(b.unwrap().search_term, "lemon");
    assert_eq!(source.calls(), 1);

    let entry = client.cache().read(&CacheKey::from(["search", "lemon"])).unwrap();
    let drinks = entry.data.as_ref().and_then(QueryData::as_drinks).unwrap();
    assert_eq!(drinks.len(), 3);
    assert!(drinks.iter().all(|d| !d.id.is_empty() && !d.name.is_empty()));
    assert_eq!(drinks[2].ingredients, vec!["Water", "Sugar", "Lemon"]);
}

#[tokio::test(start_paused = true)]
async fn staleness_window_triggers_refetch() {
    let source = ScriptedSource::new();
    let client = client(source.clone());

    landing_loader(&client, Some("lemon")).await.unwrap();
    tokio::time::advance(client.cache().stale_after() + Duration::from_secs(1)).await;
    landing_loader(&client, Some("lemon")).await.unwrap();

    assert_eq!(source.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn no_results_is_empty_not_error() {
    let source = ScriptedSource::new();
    let client = client(source);

    let data = landing_loader(&client, Some("zzzz")).await.unwrap();
    let entry = client.cache().read(&data.key()).unwrap();
    assert_eq!(entry.status, QueryStatus::Success);
    assert_eq!(entry.data, Some(QueryData::Drinks(vec![])));
}

#[tokio::test(start_paused = true)]
async fn rejected_search_settles_with_error() {
    let source = ScriptedSource::new();
    let client = client(source);

    assert!(landing_loader(&client, Some("vodka")).await.is_err());

    let entry = client.cache().read(&CacheKey::from(["search", "vodka"])).unwrap();
    assert_eq!(entry.status, QueryStatus::Error);
    assert!(matches!(entry.error, Some(FetchError::Status { code: 503, .. })));
}

#[tokio::test]
async fn empty_lookup_redirects_home() {
    let source = ScriptedSource::new();
    let client = client(source);

    let data = item_loader(&client, "11007").await.unwrap();
    let entry = client.cache().read(&data.key());
    assert_eq!(ItemView::state(entry.as_ref()), ItemState::RedirectHome);
}
