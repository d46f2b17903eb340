//! Query cache storage and fetch orchestration

use super::entry::{CacheEntry, QueryData, QueryStatus};
use super::key::CacheKey;
use super::listener::Listener;
use super::lock::mutex_lock;
use crate::error::{CocktailResult, FetchError};
use crate::query::{FetchFuture, QueryDescriptor};
use chrono::Utc;
use futures_util::future::{BoxFuture, FutureExt, Shared};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Default staleness window for successful entries
pub const DEFAULT_STALE_AFTER: Duration = Duration::from_secs(5 * 60);

type InFlight = Shared<BoxFuture<'static, Result<(), FetchError>>>;

struct Slot {
    entry: CacheEntry,
    in_flight: Option<InFlight>,
    /// Number of the latest request started for this key
    request: u64,
}

impl Slot {
    fn new() -> Self {
        Self {
            entry: CacheEntry::idle(),
            in_flight: None,
            request: 0,
        }
    }

    /// Record that the entry changed
    fn touch(&mut self) {
        self.entry.version += 1;
    }
}

/// What `ensure_fresh` should do for a key
enum Admission {
    Hit,
    Join(InFlight),
    Miss,
}

#[derive(Default)]
struct State {
    slots: HashMap<CacheKey, Slot>,
    listeners: HashMap<CacheKey, Vec<(u64, Arc<Listener>)>>,
}

impl State {
    fn admit(&self, key: &CacheKey, now: Instant) -> Admission {
        let Some(slot) = self.slots.get(key) else {
            return Admission::Miss;
        };
        match &slot.in_flight {
            Some(in_flight) => Admission::Join(in_flight.clone()),
            None if slot.entry.needs_fetch(now) => Admission::Miss,
            None => Admission::Hit,
        }
    }

    /// Snapshot of an entry and its listeners, delivered after unlocking
    fn change(&self, key: &CacheKey) -> Option<Change> {
        let entry = self.slots.get(key)?.entry.clone();
        let listeners = self
            .listeners
            .get(key)
            .map(|list| list.iter().map(|(_, l)| Arc::clone(l)).collect())
            .unwrap_or_default();
        Some(Change { entry, listeners })
    }
}

struct Change {
    entry: CacheEntry,
    listeners: Vec<Arc<Listener>>,
}

impl Change {
    fn deliver(self) {
        for listener in &self.listeners {
            listener.offer(&self.entry);
        }
    }
}

struct Inner {
    state: Mutex<State>,
    stale_after: Duration,
    next_listener: AtomicU64,
}

/// Shared query cache.
///
/// Cloning is cheap and every clone sees the same entries. Fetches are
/// spawned on the tokio runtime, so they finish and are stored even when
/// every caller stops waiting.
#[derive(Clone)]
pub struct QueryCache {
    inner: Arc<Inner>,
}

impl QueryCache {
    /// Create an empty cache with the given staleness window
    pub fn new(stale_after: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(State::default()),
                stale_after,
                next_listener: AtomicU64::new(1),
            }),
        }
    }

    /// Staleness window applied to successful fetches
    pub fn stale_after(&self) -> Duration {
        self.inner.stale_after
    }

    /// Make sure fresh data for the descriptor's key is cached.
    ///
    /// Returns immediately for a fresh successful entry. Otherwise joins the
    /// in-flight fetch for the key, or starts one. A failed fetch is recorded
    /// in the entry and returned as an error.
    pub async fn ensure_fresh(&self, descriptor: QueryDescriptor) -> CocktailResult<()> {
        let key = descriptor.key.clone();
        let admission = mutex_lock(&self.inner.state, "ensure_fresh").admit(&key, Instant::now());

        let pending = match admission {
            Admission::Hit => {
                debug!(key = %key, "cache hit");
                return Ok(());
            }
            Admission::Join(in_flight) => {
                debug!(key = %key, "joining in-flight fetch");
                in_flight
            }
            Admission::Miss => {
                // The fetch closure runs unlocked; it may use the cache itself
                let (_, fetch) = descriptor.into_parts();

                let (pending, change) = {
                    let mut state = mutex_lock(&self.inner.state, "ensure_fresh");
                    match state.admit(&key, Instant::now()) {
                        Admission::Hit => return Ok(()),
                        Admission::Join(in_flight) => (in_flight, None),
                        Admission::Miss => {
                            let slot = state.slots.entry(key.clone()).or_insert_with(Slot::new);
                            let pending = self.start_fetch(slot, key.clone(), fetch);
                            (pending, state.change(&key))
                        }
                    }
                };

                if let Some(change) = change {
                    change.deliver();
                }
                pending
            }
        };

        pending.await.map_err(Into::into)
    }

    /// Start a new fetch for the key even if its data is fresh.
    ///
    /// An older fetch still in flight is superseded: its result is dropped.
    pub async fn refetch(&self, descriptor: QueryDescriptor) -> CocktailResult<()> {
        let (key, fetch) = descriptor.into_parts();

        let (pending, change) = {
            let mut state = mutex_lock(&self.inner.state, "refetch");
            let slot = state.slots.entry(key.clone()).or_insert_with(Slot::new);
            let pending = self.start_fetch(slot, key.clone(), fetch);
            (pending, state.change(&key))
        };

        if let Some(change) = change {
            change.deliver();
        }

        pending.await.map_err(Into::into)
    }

    /// Snapshot of the entry for `key`; never fetches
    pub fn read(&self, key: &CacheKey) -> Option<CacheEntry> {
        let state = mutex_lock(&self.inner.state, "read");
        state.slots.get(key).map(|slot| slot.entry.clone())
    }

    /// Call `callback` with the new entry whenever the entry for `key` changes.
    ///
    /// Entries arrive in the order the changes were made; a snapshot that is
    /// overtaken by a newer one is skipped. The callback stays registered
    /// until the returned [`Subscription`] is dropped.
    pub fn subscribe<F>(&self, key: CacheKey, callback: F) -> Subscription
    where
        F: Fn(&CacheEntry) + Send + Sync + 'static,
    {
        let id = self.inner.next_listener.fetch_add(1, Ordering::Relaxed);
        let listener = Arc::new(Listener::new(Box::new(callback)));

        let mut state = mutex_lock(&self.inner.state, "subscribe");
        state
            .listeners
            .entry(key.clone())
            .or_default()
            .push((id, listener));

        Subscription {
            cache: Arc::downgrade(&self.inner),
            key,
            id,
        }
    }

    /// Cached keys in sorted order
    pub fn keys(&self) -> Vec<CacheKey> {
        let state = mutex_lock(&self.inner.state, "keys");
        let mut keys: Vec<_> = state.slots.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        mutex_lock(&self.inner.state, "len").slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Begin a fetch for `slot`. Caller holds the state lock.
    fn start_fetch(&self, slot: &mut Slot, key: CacheKey, fetch: FetchFuture) -> InFlight {
        slot.request += 1;
        let request = slot.request;
        slot.entry.status = QueryStatus::Loading;
        slot.touch();
        debug!(key = %key, request, "fetch started");

        let cache = self.clone();
        let task_key = key.clone();
        let handle = tokio::spawn(async move {
            let result = fetch.await;
            cache.complete(&task_key, request, result)
        });

        let cache = self.clone();
        let pending = async move {
            match handle.await {
                Ok(outcome) => outcome,
                Err(e) => {
                    cache.complete(&key, request, Err(FetchError::Aborted(e.to_string())))
                }
            }
        }
        .boxed()
        .shared();

        slot.in_flight = Some(pending.clone());
        pending
    }

    /// Store the result of request `request` for `key` if it is still the latest
    fn complete(
        &self,
        key: &CacheKey,
        request: u64,
        result: Result<QueryData, FetchError>,
    ) -> Result<(), FetchError> {
        let outcome = result.as_ref().map(|_| ()).map_err(Clone::clone);

        let change = {
            let mut state = mutex_lock(&self.inner.state, "complete");
            let Some(slot) = state.slots.get_mut(key) else {
                return outcome;
            };
            if slot.request != request {
                debug!(key = %key, request, latest = slot.request, "dropping superseded result");
                return outcome;
            }

            slot.in_flight = None;
            let entry = &mut slot.entry;
            match result {
                Ok(data) => {
                    let now = Instant::now();
                    info!(key = %key, items = data.len(), "fetched");
                    entry.data = Some(data);
                    entry.status = QueryStatus::Success;
                    entry.error = None;
                    entry.fetched_at = Some(now);
                    entry.stale_after = Some(now + self.inner.stale_after);
                    entry.updated_at = Some(Utc::now());
                }
                Err(e) => {
                    warn!(key = %key, error = %e, "fetch failed");
                    entry.status = QueryStatus::Error;
                    entry.error = Some(e);
                }
            }
            slot.touch();
            state.change(key)
        };

        if let Some(change) = change {
            change.deliver();
        }
        outcome
    }

    fn unsubscribe(inner: &Inner, key: &CacheKey, id: u64) {
        let mut state = mutex_lock(&inner.state, "unsubscribe");
        if let Some(list) = state.listeners.get_mut(key) {
            list.retain(|(listener_id, _)| *listener_id != id);
            if list.is_empty() {
                state.listeners.remove(key);
            }
        }
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new(DEFAULT_STALE_AFTER)
    }
}

/// Registration of a cache listener; unsubscribes on drop
pub struct Subscription {
    cache: Weak<Inner>,
    key: CacheKey,
    id: u64,
}

impl Subscription {
    pub fn key(&self) -> &CacheKey {
        &self.key
    }

    /// Stop receiving updates
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.cache.upgrade() {
            QueryCache::unsubscribe(&inner, &self.key, self.id);
        }
    }
}
