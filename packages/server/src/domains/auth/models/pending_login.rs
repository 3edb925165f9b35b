//! Short-lived correlation store for the two-step login handshake.
//!
//! `request_code` records the session that asked for a code; `verify_code`
//! needs that same session to sign in. Entries expire after a fixed TTL and
//! an expired entry is indistinguishable from a missing one.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingLogin {
    pub phone_code_hash: String,
    pub session: String,
    pub dc_id: Option<i32>,
}

#[derive(Debug)]
struct Entry {
    login: PendingLogin,
    expires_at: Instant,
}

/// Pending logins keyed by phone number.
#[derive(Debug)]
pub struct PendingLoginStore {
    entries: Mutex<HashMap<String, Entry>>,
    ttl: Duration,
}

impl PendingLoginStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Entry>> {
        // A panic while holding the lock cannot leave a half-written entry.
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Record a pending login, replacing any older one for the same phone.
    pub fn insert(&self, phone_number: &str, login: PendingLogin) {
        let expires_at = Instant::now() + self.ttl;
        self.lock()
            .insert(phone_number.to_string(), Entry { login, expires_at });
    }

    /// The unexpired pending login for `phone_number`, if any.
    pub fn get(&self, phone_number: &str) -> Option<PendingLogin> {
        let mut entries = self.lock();
        match entries.get(phone_number) {
            Some(entry) if entry.expires_at > Instant::now() => Some(entry.login.clone()),
            Some(_) => {
                entries.remove(phone_number);
                None
            }
            None => None,
        }
    }

    pub fn remove(&self, phone_number: &str) -> Option<PendingLogin> {
        self.lock().remove(phone_number).map(|entry| entry.login)
    }

    /// Remove the entry for `phone_number` only if it is still `login`.
    ///
    /// A newer `insert` for the same phone is left alone.
    pub fn remove_if_matches(&self, phone_number: &str, login: &PendingLogin) -> bool {
        let mut entries = self.lock();
        match entries.get(phone_number) {
            Some(entry) if entry.login == *login => {
                entries.remove(phone_number);
                true
            }
            _ => false,
        }
    }

    /// Drop expired entries, returning how many were removed.
    pub fn sweep_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|_, entry| entry.expires_at > now);
        before - entries.len()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Spawn a task that sweeps expired entries every `interval`.
pub fn spawn_sweeper(store: Arc<PendingLoginStore>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let removed = store.sweep_expired();
            if removed > 0 {
                debug!(removed, "Swept expired pending logins");
            }
        }
    })
}
