//! In-memory recipe source for unit tests

use crate::api::DrinkSource;
use crate::drink::{DrinksEnvelope, RawDrink};
use crate::error::FetchError;
use async_trait::async_trait;
use serde_json::{json, Map};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Build a raw record with a name and two ingredients
pub(crate) fn raw_drink(id: &str) -> RawDrink {
    let mut rest = Map::new();
    rest.insert("strIngredient1".to_string(), json!("Lemon"));
    rest.insert("strIngredient2".to_string(), json!("Sugar"));
    rest.insert("strIngredient3".to_string(), json!(null));

    RawDrink {
        id: id.to_string(),
        name: format!("Drink {}", id),
        thumb: Some(format!("https://example.test/{}.jpg", id)),
        alcoholic: Some("Alcoholic".to_string()),
        glass: Some("Highball glass".to_string()),
        category: Some("Cocktail".to_string()),
        instructions: Some("Stir.".to_string()),
        rest,
    }
}

#[derive(Default)]
pub(crate) struct StubSource {
    searches: HashMap<String, Vec<String>>,
    items: HashSet<String>,
    failing: HashSet<String>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl StubSource {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_search(mut self, term: &str, ids: &[&str]) -> Self {
        self.searches.insert(
            term.to_string(),
            ids.iter().map(|id| id.to_string()).collect(),
        );
        self
    }

    pub(crate) fn with_item(mut self, id: &str) -> Self {
        self.items.insert(id.to_string());
        self
    }

    /// Fail every request for this term or id
    pub(crate) fn failing(mut self, term_or_id: &str) -> Self {
        self.failing.insert(term_or_id.to_string());
        self
    }

    /// Sleep before answering (use with paused time)
    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn answer(&self, key: &str, ids: Vec<String>) -> Result<DrinksEnvelope, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing.contains(key) {
            return Err(FetchError::Transport {
                url: format!("stub://{}", key),
                reason: "connection refused".to_string(),
            });
        }
        let drinks = (!ids.is_empty()).then(|| ids.iter().map(|id| raw_drink(id)).collect());
        Ok(DrinksEnvelope { drinks })
    }
}

#[async_trait]
impl DrinkSource for StubSource {
    async fn search(&self, term: &str) -> Result<DrinksEnvelope, FetchError> {
        let ids = self.searches.get(term).cloned().unwrap_or_default();
        self.answer(term, ids).await
    }

    async fn lookup(&self, id: &str) -> Result<DrinksEnvelope, FetchError> {
        let ids = if self.items.contains(id) {
            vec![id.to_string()]
        } else {
            vec![]
        };
        self.answer(id, ids).await
    }

    fn source_name(&self) -> &'static str {
        "stub"
    }
}
