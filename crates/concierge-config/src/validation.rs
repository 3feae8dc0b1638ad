// SPDX-FileCopyrightText: 2026 Concierge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as cooldown tier monotonicity and non-zero waits.

use crate::diagnostic::ConfigError;
use crate::model::ConciergeConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or all collected validation
/// errors (does not fail fast).
pub fn validate_config(config: &ConciergeConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let c = &config.cooldown;
    if c.owner_secs > c.administrator_secs
        || c.administrator_secs > c.verified_secs
        || c.verified_secs > c.default_secs
    {
        errors.push(ConfigError::Validation {
            message: format!(
                "cooldown tiers must be monotonic \
                 (owner <= administrator <= verified <= default), got \
                 {}/{}/{}/{}",
                c.owner_secs, c.administrator_secs, c.verified_secs, c.default_secs
            ),
        });
    }

    let t = &config.timeouts;
    for (name, value) in [
        ("timeouts.question_secs", t.question_secs),
        ("timeouts.revise_choice_secs", t.revise_choice_secs),
        ("timeouts.revise_value_secs", t.revise_value_secs),
    ] {
        if value == 0 {
            errors.push(ConfigError::Validation {
                message: format!("{name} must be greater than zero"),
            });
        }
    }

    if config.agent.name.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "agent.name must not be empty".to_string(),
        });
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.agent.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "agent.log_level `{}` is not one of: {}",
                config.agent.log_level,
                valid_levels.join(", ")
            ),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CooldownConfig;

    #[test]
    fn default_config_is_valid() {
        let config = ConciergeConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn non_monotonic_cooldowns_rejected() {
        let config = ConciergeConfig {
            cooldown: CooldownConfig {
                owner_secs: 600,
                administrator_secs: 120,
                verified_secs: 300,
                default_secs: 600,
            },
            ..Default::default()
        };
        let errors = validate_config(&config).expect_err("must fail");
        assert!(errors.iter().any(|e| e.to_string().contains("monotonic")));
    }

    #[test]
    fn zero_timeout_rejected() {
        let mut config = ConciergeConfig::default();
        config.timeouts.question_secs = 0;
        let errors = validate_config(&config).expect_err("must fail");
        assert!(
            errors
                .iter()
                .any(|e| e.to_string().contains("question_secs"))
        );
    }

    #[test]
    fn bad_log_level_rejected() {
        let mut config = ConciergeConfig::default();
        config.agent.log_level = "loud".to_string();
        assert!(validate_config(&config).is_err());
    }
}
