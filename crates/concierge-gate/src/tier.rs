// SPDX-FileCopyrightText: 2026 Concierge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Privilege tiers derived from caller-supplied role facts.

use std::time::Duration;

use concierge_config::model::CooldownConfig;
use strum::Display;

/// Role/ownership facts about a requester, supplied by the caller per
/// admission request. Never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrivilegeFacts {
    pub owner: bool,
    pub administrator: bool,
    pub verified_member: bool,
}

impl PrivilegeFacts {
    /// Facts for an unprivileged requester.
    pub const NONE: PrivilegeFacts = PrivilegeFacts {
        owner: false,
        administrator: false,
        verified_member: false,
    };
}

/// The four cooldown tiers, highest privilege first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum PrivilegeTier {
    Owner,
    Administrator,
    Verified,
    Default,
}

impl PrivilegeTier {
    /// Derives the tier from privilege facts, checked in descending
    /// privilege order; first match wins.
    pub fn from_facts(facts: &PrivilegeFacts) -> Self {
        if facts.owner {
            PrivilegeTier::Owner
        } else if facts.administrator {
            PrivilegeTier::Administrator
        } else if facts.verified_member {
            PrivilegeTier::Verified
        } else {
            PrivilegeTier::Default
        }
    }

    /// The configured wait duration for this tier.
    pub fn duration(&self, config: &CooldownConfig) -> Duration {
        let secs = match self {
            PrivilegeTier::Owner => config.owner_secs,
            PrivilegeTier::Administrator => config.administrator_secs,
            PrivilegeTier::Verified => config.verified_secs,
            PrivilegeTier::Default => config.default_secs,
        };
        Duration::from_secs(secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_wins_over_other_facts() {
        let facts = PrivilegeFacts {
            owner: true,
            administrator: true,
            verified_member: true,
        };
        assert_eq!(PrivilegeTier::from_facts(&facts), PrivilegeTier::Owner);
    }

    #[test]
    fn administrator_wins_over_verified() {
        let facts = PrivilegeFacts {
            owner: false,
            administrator: true,
            verified_member: true,
        };
        assert_eq!(
            PrivilegeTier::from_facts(&facts),
            PrivilegeTier::Administrator
        );
    }

    #[test]
    fn no_facts_means_default_tier() {
        assert_eq!(
            PrivilegeTier::from_facts(&PrivilegeFacts::NONE),
            PrivilegeTier::Default
        );
    }

    #[test]
    fn tier_durations_are_monotonic_under_default_config() {
        let config = CooldownConfig::default();
        let owner = PrivilegeTier::Owner.duration(&config);
        let admin = PrivilegeTier::Administrator.duration(&config);
        let verified = PrivilegeTier::Verified.duration(&config);
        let default = PrivilegeTier::Default.duration(&config);
        assert!(owner <= admin && admin <= verified && verified <= default);
    }
}
