// SPDX-FileCopyrightText: 2026 Concierge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Concierge intake bot.
//!
//! All structs use `#[serde(deny_unknown_fields)]` so unrecognized keys are
//! rejected at startup with an actionable diagnostic.

use serde::{Deserialize, Serialize};

/// Top-level Concierge configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ConciergeConfig {
    /// Bot identity and logging settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Per-privilege-tier cooldown durations for opening tickets.
    #[serde(default)]
    pub cooldown: CooldownConfig,

    /// Interview wait bounds and the delayed-close interval.
    #[serde(default)]
    pub timeouts: TimeoutConfig,

    /// Per-category report destinations.
    #[serde(default)]
    pub destinations: DestinationsConfig,
}

/// Bot identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the bot.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
        }
    }
}

/// Cooldown durations between admitted sessions, one per privilege tier.
///
/// Tiers must be monotonic: the higher the privilege, the shorter the wait.
/// Validation enforces `owner <= administrator <= verified <= default`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CooldownConfig {
    /// Wait for owner-equivalent users, in seconds.
    #[serde(default = "default_cooldown_owner")]
    pub owner_secs: u64,

    /// Wait for elevated/administrative users, in seconds.
    #[serde(default = "default_cooldown_administrator")]
    pub administrator_secs: u64,

    /// Wait for verified members, in seconds.
    #[serde(default = "default_cooldown_verified")]
    pub verified_secs: u64,

    /// Wait for everyone else, in seconds.
    #[serde(default = "default_cooldown_default")]
    pub default_secs: u64,
}

impl Default for CooldownConfig {
    fn default() -> Self {
        Self {
            owner_secs: default_cooldown_owner(),
            administrator_secs: default_cooldown_administrator(),
            verified_secs: default_cooldown_verified(),
            default_secs: default_cooldown_default(),
        }
    }
}

/// Wait bounds for the interview state machine.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TimeoutConfig {
    /// How long to wait for an answer during the question phase, in seconds.
    #[serde(default = "default_question_secs")]
    pub question_secs: u64,

    /// How long to wait for a field name during revision, in seconds.
    #[serde(default = "default_revise_choice_secs")]
    pub revise_choice_secs: u64,

    /// How long to wait for a replacement value during revision, in seconds.
    #[serde(default = "default_revise_value_secs")]
    pub revise_value_secs: u64,

    /// Delay before closing the channel after a successful submission,
    /// in seconds.
    #[serde(default = "default_close_delay_secs")]
    pub close_delay_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            question_secs: default_question_secs(),
            revise_choice_secs: default_revise_choice_secs(),
            revise_value_secs: default_revise_value_secs(),
            close_delay_secs: default_close_delay_secs(),
        }
    }
}

/// Destination wiring for all three categories.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DestinationsConfig {
    #[serde(default)]
    pub bug: DestinationConfig,

    #[serde(default)]
    pub suggestion: DestinationConfig,

    #[serde(default)]
    pub complaint: DestinationConfig,
}

/// Where one category's reports go.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DestinationConfig {
    /// Identifier of the destination sink (e.g. a log channel id).
    /// When unset, confirmed sessions report "destination not found"
    /// in-channel instead of delivering.
    #[serde(default)]
    pub sink: Option<String>,

    /// Optional role/group to mention ahead of each report.
    #[serde(default)]
    pub notify: Option<String>,
}

fn default_agent_name() -> String {
    "concierge".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_cooldown_owner() -> u64 {
    60
}

fn default_cooldown_administrator() -> u64 {
    120
}

fn default_cooldown_verified() -> u64 {
    300
}

fn default_cooldown_default() -> u64 {
    600
}

fn default_question_secs() -> u64 {
    300
}

fn default_revise_choice_secs() -> u64 {
    60
}

fn default_revise_value_secs() -> u64 {
    120
}

fn default_close_delay_secs() -> u64 {
    5
}
