// SPDX-FileCopyrightText: 2026 Concierge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cooldown record storage behind an injectable trait.
//!
//! The gate never reads then writes in two steps: the store performs the
//! whole admit-or-deny decision while holding its per-map lock, so two
//! near-simultaneous requests for the same user cannot both be admitted.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use concierge_core::types::UserId;

/// Outcome of an admission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Admitted,
    /// Denied; `remaining` is how long until the next admission would
    /// succeed at the same tier.
    Denied { remaining: Duration },
}

/// Key-value store of last-admitted-start timestamps.
///
/// `try_begin` must be linearizable per user key. Implementations may back
/// this with shared storage; the engine only ever sees this interface.
pub trait CooldownStore: Send + Sync {
    /// Atomically checks the user's last start against `wait` and, if the
    /// wait has elapsed (or no record exists), records `now` as the new
    /// last start.
    fn try_begin(&self, user: &UserId, now: Instant, wait: Duration) -> Admission;
}

/// Process-lifetime in-memory store.
///
/// Records are never removed; stale entries are harmless and simply
/// re-evaluated by elapsed time. Memory grows with distinct users only.
#[derive(Debug, Default)]
pub struct InMemoryCooldownStore {
    records: Mutex<HashMap<UserId, Instant>>,
}

impl InMemoryCooldownStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CooldownStore for InMemoryCooldownStore {
    fn try_begin(&self, user: &UserId, now: Instant, wait: Duration) -> Admission {
        // a poisoned map is still a usable map of admission instants
        let mut records = self
            .records
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        match records.get(user) {
            Some(&last_start) => {
                // saturates to zero if now < last_start
                let elapsed = now.duration_since(last_start);
                if elapsed >= wait {
                    records.insert(user.clone(), now);
                    Admission::Admitted
                } else {
                    Admission::Denied {
                        remaining: wait - elapsed,
                    }
                }
            }
            None => {
                records.insert(user.clone(), now);
                Admission::Admitted
            }
        }
    }
}
