// SPDX-FileCopyrightText: 2026 Concierge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Concierge intake engine.

use thiserror::Error;

use crate::types::Category;

/// The primary error type used across the Concierge workspace.
///
/// Two outcomes that look like errors are deliberately *not* variants here:
/// field validation failures (recovered locally by re-prompting) and wait
/// timeouts (a normal terminal transition for a session).
#[derive(Debug, Error)]
pub enum ConciergeError {
    /// Configuration errors (invalid TOML, missing required fields).
    #[error("configuration error: {0}")]
    Config(String),

    /// Presentation/transport call failed (send, channel create/delete, wait).
    /// The engine never retries these; a session that cannot reach its
    /// channel is treated as lost by the caller.
    #[error("transport error: {message}")]
    Transport {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The category has no destination sink configured or reachable.
    #[error("no destination configured for category {category}")]
    DestinationMissing { category: Category },

    /// Attachment payload could not be re-fetched at submission time.
    /// Non-fatal: the report is delivered without the image.
    #[error("attachment fetch failed: {message}")]
    AttachmentFetch { message: String },

    /// A category tag outside the fixed set was supplied at a string boundary.
    #[error("unknown category `{name}`")]
    UnknownCategory { name: String },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ConciergeError {
    /// Convenience constructor for transport failures without an underlying cause.
    pub fn transport(message: impl Into<String>) -> Self {
        ConciergeError::Transport {
            message: message.into(),
            source: None,
        }
    }
}
