//! TheCocktailDB HTTP client
//!
//! Uses a blocking `ureq` agent driven from `spawn_blocking`, so requests
//! never stall the async runtime.

use crate::api::source::DrinkSource;
use crate::drink::DrinksEnvelope;
use crate::error::{CocktailError, CocktailResult, FetchError};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Public v1 endpoint with the shared test key
pub const DEFAULT_BASE_URL: &str = "https://www.thecocktaildb.com/api/json/v1/1";

/// HTTP recipe source
#[derive(Clone)]
pub struct CocktailDb {
    agent: ureq::Agent,
    search_url: Url,
    lookup_url: Url,
}

impl CocktailDb {
    /// Create a client rooted at `base_url`
    pub fn new(base_url: &str, timeout: Duration) -> CocktailResult<Self> {
        let invalid = |reason: String| CocktailError::ApiUrlInvalid {
            url: base_url.to_string(),
            reason,
        };

        let mut base = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(invalid("not a base URL".to_string()));
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let search_url = base
            .join("search.php")
            .map_err(|e| invalid(e.to_string()))?;
        let lookup_url = base
            .join("lookup.php")
            .map_err(|e| invalid(e.to_string()))?;

        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build()
            .into();

        Ok(Self {
            agent,
            search_url,
            lookup_url,
        })
    }

    /// Search endpoint URL for `term`
    pub fn search_url(&self, term: &str) -> Url {
        let mut url = self.search_url.clone();
        url.query_pairs_mut().append_pair("s", term);
        url
    }

    /// Lookup endpoint URL for `id`
    pub fn lookup_url(&self, id: &str) -> Url {
        let mut url = self.lookup_url.clone();
        url.query_pairs_mut().append_pair("i", id);
        url
    }

    async fn get_envelope(&self, url: Url) -> Result<DrinksEnvelope, FetchError> {
        let agent = self.agent.clone();
        let url = url.to_string();
        debug!("GET {}", url);

        tokio::task::spawn_blocking(move || fetch_blocking(&agent, &url))
            .await
            .map_err(|e| FetchError::Aborted(e.to_string()))?
    }
}

fn fetch_blocking(agent: &ureq::Agent, url: &str) -> Result<DrinksEnvelope, FetchError> {
    let mut response = agent.get(url).call().map_err(|e| classify(url, e))?;

    let body = response
        .body_mut()
        .read_to_string()
        .map_err(|e| classify(url, e))?;

    // The API answers an unmatched search with an empty body on some mirrors
    if body.trim().is_empty() {
        return Ok(DrinksEnvelope::default());
    }

    serde_json::from_str(&body).map_err(|e| FetchError::Decode {
        url: url.to_string(),
        reason: e.to_string(),
    })
}

fn classify(url: &str, err: ureq::Error) -> FetchError {
    let url = url.to_string();
    match err {
        ureq::Error::StatusCode(code) => FetchError::Status { url, code },
        ureq::Error::Timeout(_) => FetchError::Timeout { url },
        other => FetchError::Transport {
            url,
            reason: other.to_string(),
        },
    }
}

#[async_trait]
impl DrinkSource for CocktailDb {
    async fn search(&self, term: &str) -> Result<DrinksEnvelope, FetchError> {
        self.get_envelope(self.search_url(term)).await
    }

    async fn lookup(&self, id: &str) -> Result<DrinksEnvelope, FetchError> {
        self.get_envelope(self.lookup_url(id)).await
    }

    fn source_name(&self) -> &'static str {
        "TheCocktailDB"
    }
}
