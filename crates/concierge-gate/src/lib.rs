// SPDX-FileCopyrightText: 2026 Concierge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-user cooldown admission gate.
//!
//! Tracks the last admitted session start per user and admits or rejects
//! new session requests. The applicable wait comes from the requester's
//! privilege tier; the check-and-set itself is delegated to a
//! [`CooldownStore`] so the in-memory map can be swapped for a shared
//! store without touching callers.

pub mod store;
pub mod tier;

use std::sync::Arc;
use std::time::Instant;

use concierge_config::model::CooldownConfig;
use concierge_core::types::UserId;
use tracing::debug;

pub use store::{Admission, CooldownStore, InMemoryCooldownStore};
pub use tier::{PrivilegeFacts, PrivilegeTier};

/// Admission gate over a cooldown store and tier configuration.
pub struct CooldownGate {
    store: Arc<dyn CooldownStore>,
    config: CooldownConfig,
}

impl CooldownGate {
    /// Gate backed by the given store.
    pub fn new(store: Arc<dyn CooldownStore>, config: CooldownConfig) -> Self {
        Self { store, config }
    }

    /// Gate backed by a fresh in-memory store.
    pub fn in_memory(config: CooldownConfig) -> Self {
        Self::new(Arc::new(InMemoryCooldownStore::new()), config)
    }

    /// Admits or denies a new session request for `user` at `now`.
    ///
    /// The tier duration is derived from `facts` per call; the store performs
    /// the check-and-set as one atomic step per user key.
    pub fn admit(&self, user: &UserId, facts: &PrivilegeFacts, now: Instant) -> Admission {
        let tier = PrivilegeTier::from_facts(facts);
        let wait = tier.duration(&self.config);
        let outcome = self.store.try_begin(user, now, wait);
        debug!(user = %user.0, %tier, wait_secs = wait.as_secs(), admitted = outcome == Admission::Admitted, "admission decision");
        outcome
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn gate() -> CooldownGate {
        CooldownGate::in_memory(CooldownConfig::default())
    }

    fn user(id: &str) -> UserId {
        UserId(id.to_string())
    }

    #[test]
    fn rapid_double_click_admits_first_denies_second() {
        let gate = gate();
        let now = Instant::now();
        let u = user("chief");

        assert_eq!(
            gate.admit(&u, &PrivilegeFacts::NONE, now),
            Admission::Admitted
        );
        match gate.admit(&u, &PrivilegeFacts::NONE, now + Duration::from_millis(50)) {
            Admission::Denied { remaining } => {
                // remaining is roughly the tier duration minus elapsed
                assert!(remaining <= Duration::from_secs(600));
                assert!(remaining >= Duration::from_secs(599));
            }
            Admission::Admitted => panic!("double click must not be admitted twice"),
        }
    }

    #[test]
    fn privileged_user_waits_less() {
        let gate = gate();
        let now = Instant::now();
        let u = user("owner");
        let owner_facts = PrivilegeFacts {
            owner: true,
            ..PrivilegeFacts::NONE
        };

        assert_eq!(gate.admit(&u, &owner_facts, now), Admission::Admitted);
        // default owner tier is 60s; after 61s the owner may open another
        assert_eq!(
            gate.admit(&u, &owner_facts, now + Duration::from_secs(61)),
            Admission::Admitted
        );
    }

    #[test]
    fn tier_is_reevaluated_per_call() {
        // A user admitted as owner but re-requesting without privileges is
        // held to the default wait.
        let gate = gate();
        let now = Instant::now();
        let u = user("demoted");
        let owner_facts = PrivilegeFacts {
            owner: true,
            ..PrivilegeFacts::NONE
        };

        assert_eq!(gate.admit(&u, &owner_facts, now), Admission::Admitted);
        match gate.admit(&u, &PrivilegeFacts::NONE, now + Duration::from_secs(61)) {
            Admission::Denied { remaining } => {
                assert!(remaining <= Duration::from_secs(600 - 61));
            }
            Admission::Admitted => panic!("default tier must still be cooling down"),
        }
    }
}
