// SPDX-FileCopyrightText: 2026 Concierge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Static category catalog for the Concierge intake bot.
//!
//! The catalog holds one immutable [`CategoryDefinition`] per category:
//! ordered question list, field validators, intro copy, accent, and the
//! destination wiring taken from configuration. Built once at startup,
//! read-only afterwards.

pub mod builtin;
pub mod definition;

use concierge_config::model::DestinationsConfig;
use concierge_core::types::{Category, NotifyTarget, SinkId};

pub use definition::{CategoryDefinition, FieldSpec, FieldValidator};

/// Pure lookup table from category tag to its definition.
#[derive(Debug, Clone)]
pub struct CategoryCatalog {
    bug: CategoryDefinition,
    suggestion: CategoryDefinition,
    complaint: CategoryDefinition,
}

impl CategoryCatalog {
    /// Builds the catalog from the built-in question sets and the configured
    /// destinations.
    pub fn new(destinations: &DestinationsConfig) -> Self {
        let build = |category: Category| {
            let dest = match category {
                Category::Bug => &destinations.bug,
                Category::Suggestion => &destinations.suggestion,
                Category::Complaint => &destinations.complaint,
            };
            CategoryDefinition {
                category,
                intro_title: builtin::intro_title(category),
                intro_body: builtin::intro_body(category),
                accent: builtin::accent(category),
                launch_notice: builtin::launch_notice(category),
                fields: builtin::fields(category),
                sink: dest.sink.clone().map(SinkId),
                notify: dest.notify.clone().map(NotifyTarget),
            }
        };

        Self {
            bug: build(Category::Bug),
            suggestion: build(Category::Suggestion),
            complaint: build(Category::Complaint),
        }
    }

    /// Returns the definition for a category. Infallible: the category tag
    /// is a closed enum, so unknown categories cannot reach this point
    /// (string inputs fail earlier at `Category::from_str`).
    pub fn definition(&self, category: Category) -> &CategoryDefinition {
        match category {
            Category::Bug => &self.bug,
            Category::Suggestion => &self.suggestion,
            Category::Complaint => &self.complaint,
        }
    }
}
