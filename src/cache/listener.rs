//! Ordered delivery of entry snapshots to subscribers
//!
//! Changes are recorded under the cache lock but delivered after it is
//! released, possibly from several threads at once. Each listener keeps a
//! one-slot mailbox: only snapshots newer than the last one seen are kept,
//! and a single caller at a time drains the mailbox into the callback. A
//! subscriber therefore never sees an older entry after a newer one, and a
//! callback that changes the cache again is not re-entered.

use super::entry::CacheEntry;
use super::lock::mutex_lock;
use std::sync::Mutex;

pub(crate) type Callback = Box<dyn Fn(&CacheEntry) + Send + Sync>;

#[derive(Default)]
struct Mailbox {
    pending: Option<CacheEntry>,
    /// Version of the last snapshot handed to the callback
    seen: u64,
    draining: bool,
}

impl Mailbox {
    fn newest(&self) -> u64 {
        self.pending.as_ref().map_or(self.seen, |entry| entry.version)
    }
}

pub(crate) struct Listener {
    callback: Callback,
    mailbox: Mutex<Mailbox>,
}

impl Listener {
    pub(crate) fn new(callback: Callback) -> Self {
        Self {
            callback,
            mailbox: Mutex::new(Mailbox::default()),
        }
    }

    /// Hand `entry` to the callback unless a newer snapshot got there first
    pub(crate) fn offer(&self, entry: &CacheEntry) {
        {
            let mut mailbox = mutex_lock(&self.mailbox, "listener offer");
            if !entry.is_newer_than(mailbox.newest()) {
                return;
            }
            mailbox.pending = Some(entry.clone());
            if mailbox.draining {
                return;
            }
            mailbox.draining = true;
        }

        loop {
            let next = {
                let mut mailbox = mutex_lock(&self.mailbox, "listener drain");
                match mailbox.pending.take() {
                    Some(next) => {
                        mailbox.seen = next.version;
                        next
                    }
                    None => {
                        mailbox.draining = false;
                        return;
                    }
                }
            };
            (self.callback)(&next);
        }
    }
}
