// SPDX-FileCopyrightText: 2026 Concierge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-category definition records.

use concierge_core::types::{Accent, Category, NotifyTarget, SinkId};

/// Content validation applied to a field's answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValidator {
    /// Any text is accepted.
    FreeText,
    /// Only ASCII digits are accepted (the numeric-identifier field).
    Numeric,
}

impl FieldValidator {
    /// Whether `text` satisfies this validator.
    ///
    /// An attachment satisfies any field regardless of its text, so this is
    /// only consulted for text-only messages.
    pub fn accepts(&self, text: &str) -> bool {
        match self {
            FieldValidator::FreeText => true,
            FieldValidator::Numeric => {
                !text.is_empty() && text.chars().all(|c| c.is_ascii_digit())
            }
        }
    }
}

/// One question in a category's interview.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    /// Unique field name within the category; doubles as the revision-menu
    /// label.
    pub name: &'static str,
    /// Prompt shown when asking for this field.
    pub prompt: &'static str,
    pub validator: FieldValidator,
}

/// Immutable definition of one intake category.
///
/// Field order is both ask-order and revision-menu order.
#[derive(Debug, Clone)]
pub struct CategoryDefinition {
    pub category: Category,
    /// Title of the intro embed posted when the channel opens.
    pub intro_title: &'static str,
    /// Intro body template; `{user}` is substituted with the requester's
    /// mention.
    pub intro_body: &'static str,
    pub accent: Accent,
    /// Acknowledgment template shown to the requester when the channel is
    /// created; `{user}` and `{channel}` are substituted.
    pub launch_notice: &'static str,
    pub fields: Vec<FieldSpec>,
    /// Destination sink for completed reports; `None` means submission
    /// reports "destination not found" in-channel.
    pub sink: Option<SinkId>,
    /// Optional role to mention ahead of each delivered report.
    pub notify: Option<NotifyTarget>,
}

impl CategoryDefinition {
    /// Intro body with the user reference substituted.
    pub fn render_intro_body(&self, user_mention: &str) -> String {
        self.intro_body.replace("{user}", user_mention)
    }

    /// Launch notice with user and channel references substituted.
    pub fn render_launch_notice(&self, user_mention: &str, channel_mention: &str) -> String {
        self.launch_notice
            .replace("{user}", user_mention)
            .replace("{channel}", channel_mention)
    }

    /// Looks up a field by name, case-insensitively (revision-menu matching).
    pub fn field_named(&self, name: &str) -> Option<&FieldSpec> {
        let wanted = name.trim();
        self.fields
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(wanted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_validator_accepts_digits_only() {
        assert!(FieldValidator::Numeric.accepts("12345678"));
        assert!(!FieldValidator::Numeric.accepts("12a45"));
        assert!(!FieldValidator::Numeric.accepts(""));
        assert!(!FieldValidator::Numeric.accepts("12 345"));
    }

    #[test]
    fn free_text_validator_accepts_anything() {
        assert!(FieldValidator::FreeText.accepts(""));
        assert!(FieldValidator::FreeText.accepts("anything at all"));
    }
}
