use std::sync::{Mutex, MutexGuard};

use tracing::warn;

/// Lock a cache mutex, recovering the guard if a previous holder panicked
pub(crate) fn mutex_lock<'a, T>(lock: &'a Mutex<T>, op: &'static str) -> MutexGuard<'a, T> {
    match lock.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            warn!(
                op,
                result = "poisoned_recovered",
                "Recovered from poisoned query cache lock"
            );
            poisoned.into_inner()
        }
    }
}
