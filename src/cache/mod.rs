//! In-memory query cache
//!
//! Holds one entry per [`CacheKey`], fetched on demand through a
//! [`QueryDescriptor`](crate::query::QueryDescriptor).
//!
//! # Entry states
//!
//! | Status | Meaning |
//! |--------|---------|
//! | Idle | Created, never fetched |
//! | Loading | A fetch is in flight; previous data stays readable |
//! | Success | Data stored; fresh until `stale_after` |
//! | Error | Last fetch failed; the next `ensure_fresh` retries |
//!
//! Concurrent `ensure_fresh` calls for one key share a single in-flight
//! fetch. Each fetch carries a per-key request number and only the latest
//! request for a key may write its result. Every change bumps the entry's
//! `version`, and subscribers only ever move forward through versions.

mod entry;
mod key;
mod listener;
mod lock;
mod store;

pub use entry::{CacheEntry, QueryData, QueryStatus};
pub use key::CacheKey;
pub use store::{QueryCache, Subscription, DEFAULT_STALE_AFTER};
