//! View components
//!
//! Each view turns the cache entry for its key into a render state and prints
//! that state. A mounted view follows its key through a cache subscription
//! until it is dropped.

mod error;
mod item;
mod search;

pub use error::ErrorView;
pub use item::{ItemState, ItemView};
pub use search::{SearchState, SearchView};

use crate::cache::{CacheEntry, CacheKey, QueryCache, Subscription};
use std::sync::Arc;
use tokio::sync::watch;

/// A projected state tagged with the entry version it came from
struct Snapshot<S> {
    version: u64,
    state: S,
}

/// A view's latest render state, kept current while mounted
pub struct Mounted<S> {
    state: watch::Receiver<Snapshot<S>>,
    subscription: Subscription,
}

impl<S: Clone> Mounted<S> {
    /// Current render state
    pub fn current(&self) -> S {
        self.state.borrow().state.clone()
    }

    /// Check if the state changed since it was last read
    pub fn has_changed(&self) -> bool {
        self.state.has_changed().unwrap_or(false)
    }

    /// Mark the current state as seen and return it
    pub fn take(&mut self) -> S {
        self.state.borrow_and_update().state.clone()
    }

    pub fn key(&self) -> &CacheKey {
        self.subscription.key()
    }
}

/// Subscribe to `key`, projecting every entry change through `project`.
///
/// Dropping the returned value unsubscribes.
pub fn mount<S, F>(cache: &QueryCache, key: CacheKey, project: F) -> Mounted<S>
where
    S: Send + Sync + 'static,
    F: Fn(Option<&CacheEntry>) -> S + Send + Sync + 'static,
{
    let (tx, rx) = watch::channel(Snapshot {
        version: 0,
        state: project(None),
    });
    let tx = Arc::new(tx);
    let project = Arc::new(project);

    let publish = move |entry: &CacheEntry| {
        tx.send_if_modified(|current| {
            if !entry.is_newer_than(current.version) {
                return false;
            }
            *current = Snapshot {
                version: entry.version,
                state: project(Some(entry)),
            };
            true
        });
    };

    // Subscribe before reading so a change between the two is not lost
    let subscription = cache.subscribe(key.clone(), publish.clone());
    if let Some(entry) = cache.read(&key) {
        publish(&entry);
    }

    Mounted {
        state: rx,
        subscription,
    }
}
