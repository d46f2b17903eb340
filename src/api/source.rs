//! Remote recipe source abstraction
//!
//! Provides a trait for the two read-only lookups the client needs, so the
//! HTTP backend can be swapped for a mock in tests.

use crate::drink::DrinksEnvelope;
use crate::error::FetchError;
use async_trait::async_trait;

/// Abstract recipe source
#[async_trait]
pub trait DrinkSource: Send + Sync {
    /// Search recipes by (already normalized) term
    async fn search(&self, term: &str) -> Result<DrinksEnvelope, FetchError>;

    /// Look up a single recipe by id
    async fn lookup(&self, id: &str) -> Result<DrinksEnvelope, FetchError>;

    /// Human-readable source name for display
    fn source_name(&self) -> &'static str;
}
