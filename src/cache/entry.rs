//! Cache entry state

use crate::drink::Drink;
use crate::error::FetchError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::time::Instant;

/// Fetch status of a cache entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryStatus {
    Idle,
    Loading,
    Success,
    Error,
}

impl QueryStatus {
    /// Lowercase name for display
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// Payload stored under a key
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum QueryData {
    /// Search results, possibly empty
    Drinks(Vec<Drink>),
    /// Single lookup; `None` when the id matched nothing
    Item(Option<Drink>),
}

impl QueryData {
    /// Search results, if this is a search payload
    pub fn as_drinks(&self) -> Option<&[Drink]> {
        match self {
            Self::Drinks(drinks) => Some(drinks),
            Self::Item(_) => None,
        }
    }

    /// Lookup result, if this is an item payload
    pub fn as_item(&self) -> Option<Option<&Drink>> {
        match self {
            Self::Item(drink) => Some(drink.as_ref()),
            Self::Drinks(_) => None,
        }
    }

    /// Number of drinks held
    pub fn len(&self) -> usize {
        match self {
            Self::Drinks(drinks) => drinks.len(),
            Self::Item(drink) => usize::from(drink.is_some()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Cached value plus fetch status and timestamps for one key
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Last successfully fetched payload
    pub data: Option<QueryData>,

    pub status: QueryStatus,

    /// Cause of the last failed fetch
    pub error: Option<FetchError>,

    /// When the last successful fetch completed
    pub fetched_at: Option<Instant>,

    /// When the data becomes eligible for refetch
    pub stale_after: Option<Instant>,

    /// Wall-clock time of the last successful fetch
    pub updated_at: Option<DateTime<Utc>>,

    /// Bumped on every change to the entry; later snapshots carry larger values
    pub version: u64,
}

impl CacheEntry {
    pub(crate) fn idle() -> Self {
        Self {
            data: None,
            status: QueryStatus::Idle,
            error: None,
            fetched_at: None,
            stale_after: None,
            updated_at: None,
            version: 0,
        }
    }

    /// Check if the data is past its staleness window
    pub fn is_stale(&self, now: Instant) -> bool {
        self.stale_after.is_none_or(|deadline| now >= deadline)
    }

    /// Check if this snapshot is newer than one seen at `version`
    pub fn is_newer_than(&self, version: u64) -> bool {
        self.version > version
    }

    /// Check if `ensure_fresh` must start a fetch for this entry
    pub(crate) fn needs_fetch(&self, now: Instant) -> bool {
        match self.status {
            QueryStatus::Success => self.is_stale(now),
            QueryStatus::Idle | QueryStatus::Loading | QueryStatus::Error => true,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.status == QueryStatus::Loading
    }
}
