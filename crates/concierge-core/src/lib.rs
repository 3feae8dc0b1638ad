// SPDX-FileCopyrightText: 2026 Concierge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Concierge intake bot.
//!
//! Provides the shared types, the error type, and the collaborator traits
//! ([`Transport`], [`SubmissionSink`]) that the session engine calls into.
//! Platform integrations implement these traits; the engine crates depend
//! only on this one.

pub mod error;
pub mod traits;
pub mod types;

pub use error::ConciergeError;
pub use traits::{SubmissionSink, Transport};
pub use types::{
    Accent, AttachmentPayload, AttachmentRef, Category, ChannelRef, ControlHandle, ControlKind,
    ControlResult, InboundMessage, MessageId, NotifyTarget, OutboundContent, Report, SinkId,
    UserId,
};
