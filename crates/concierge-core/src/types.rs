// SPDX-FileCopyrightText: 2026 Concierge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared across the Concierge workspace.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Platform identity of a user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

/// Reference to a conversation channel created for one session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelRef(pub String);

/// Identifier of a message posted through the transport.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub String);

/// Identifier of a category's report destination (e.g. a log channel).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SinkId(pub String);

/// Role or group to mention when a report lands at its destination.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NotifyTarget(pub String);

/// The closed set of intake categories.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum Category {
    Bug,
    Suggestion,
    Complaint,
}

impl Category {
    /// All categories, in launcher order.
    pub const ALL: [Category; 3] = [Category::Bug, Category::Suggestion, Category::Complaint];

    /// Parses a category tag at a string boundary (button ids, CLI args),
    /// case-insensitively.
    pub fn parse(name: &str) -> Result<Self, crate::error::ConciergeError> {
        Category::ALL
            .into_iter()
            .find(|c| c.to_string().eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| crate::error::ConciergeError::UnknownCategory {
                name: name.to_string(),
            })
    }
}

/// Reference to an attachment carried by an inbound message.
///
/// The payload is not fetched until submission time; until then the session
/// only holds this reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentRef {
    pub id: String,
    pub filename: String,
}

/// Fetched attachment bytes, attached to a delivered report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentPayload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// A user message delivered to a session by the transport.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub user: UserId,
    pub channel: ChannelRef,
    pub text: String,
    pub attachment: Option<AttachmentRef>,
}

/// Accent applied to rendered embeds; the transport maps this to whatever
/// the platform supports (colors, icons).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Accent {
    Red,
    Green,
    Blurple,
    Gold,
}

/// Content posted to a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundContent {
    /// Plain text line.
    Text(String),
    /// Titled embed with an accent.
    Embed {
        title: String,
        body: String,
        accent: Accent,
    },
}

impl OutboundContent {
    /// The human-readable text of this content, for logging and assertions.
    pub fn text(&self) -> &str {
        match self {
            OutboundContent::Text(t) => t,
            OutboundContent::Embed { body, .. } => body,
        }
    }
}

/// Interactive control rendered alongside a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    /// Single "end conversation" affordance on the intro message.
    EndConversation,
    /// Confirm-or-revise pair on the summary message.
    ConfirmOrRevise,
}

/// Handle to a rendered control, resolvable via `Transport::await_control`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ControlHandle(pub String);

/// Resolution of a confirm-or-revise control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlResult {
    Confirm,
    Revise,
}

/// A completed intake report handed to the submission sink.
#[derive(Debug, Clone)]
pub struct Report {
    pub category: Category,
    pub submitter: UserId,
    pub submitted_at: DateTime<Utc>,
    /// Answers in ask order, one entry per catalog field.
    pub fields: Vec<(String, String)>,
    pub attachment: Option<AttachmentPayload>,
}
