// SPDX-FileCopyrightText: 2026 Concierge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Figment-to-miette error bridge with fuzzy match suggestions.
//!
//! Converts Figment deserialization errors into miette diagnostics with
//! valid key listings and "did you mean?" suggestions using Jaro-Winkler
//! string similarity.

use figment::error::Kind;
use miette::Diagnostic;
use thiserror::Error;

/// Minimum Jaro-Winkler similarity score to suggest a correction.
/// Catches common typos like `naem` -> `name` while filtering noise.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// A configuration error with diagnostic rendering.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// An unknown key was found in the configuration.
    #[error("unknown configuration key `{key}`")]
    #[diagnostic(
        code(concierge::config::unknown_key),
        help("{}", format_unknown_key_help(suggestion.as_deref(), valid_keys))
    )]
    UnknownKey {
        /// The unrecognized key name.
        key: String,
        /// Suggested correction via fuzzy matching, if any.
        suggestion: Option<String>,
        /// Comma-separated valid keys for the section.
        valid_keys: String,
    },

    /// Any other deserialization failure (wrong type, invalid TOML).
    #[error("configuration parse error: {message}")]
    #[diagnostic(code(concierge::config::parse))]
    Parse { message: String },

    /// A semantic constraint failed after deserialization.
    #[error("invalid configuration: {message}")]
    #[diagnostic(code(concierge::config::validation))]
    Validation { message: String },
}

fn format_unknown_key_help(suggestion: Option<&str>, valid_keys: &str) -> String {
    match suggestion {
        Some(s) => format!("did you mean `{s}`? valid keys are: {valid_keys}"),
        None => format!("valid keys are: {valid_keys}"),
    }
}

/// Convert a Figment extraction error into one diagnostic per failure.
pub fn figment_to_config_errors(err: figment::Error) -> Vec<ConfigError> {
    err.into_iter()
        .map(|e| match e.kind {
            Kind::UnknownField(ref field, expected) => {
                let suggestion = best_suggestion(field, expected);
                ConfigError::UnknownKey {
                    key: field.clone(),
                    suggestion,
                    valid_keys: expected.join(", "),
                }
            }
            ref kind => ConfigError::Parse {
                message: kind.to_string(),
            },
        })
        .collect()
}

/// Pick the closest valid key by Jaro-Winkler similarity, if close enough.
fn best_suggestion(actual: &str, expected: &[&str]) -> Option<String> {
    expected
        .iter()
        .map(|candidate| (strsim::jaro_winkler(actual, candidate), *candidate))
        .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
        .max_by(|(a, _), (b, _)| a.total_cmp(b))
        .map(|(_, candidate)| candidate.to_string())
}

/// Render collected config errors to stderr via miette's graphical reporter.
pub fn render_errors(errors: &[ConfigError]) {
    use miette::GraphicalReportHandler;

    let handler = GraphicalReportHandler::new();
    for error in errors {
        let mut buf = String::new();
        let diagnostic: &dyn Diagnostic = error;
        if handler.render_report(&mut buf, diagnostic).is_ok() {
            eprint!("{buf}");
        } else {
            eprintln!("Error: {error}");
        }
    }
}
