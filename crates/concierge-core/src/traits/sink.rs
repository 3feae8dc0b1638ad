// SPDX-FileCopyrightText: 2026 Concierge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Submission sink collaborator trait.

use async_trait::async_trait;

use crate::error::ConciergeError;
use crate::types::{MessageId, NotifyTarget, Report, SinkId};

/// Accepts completed reports for delivery to a category's destination.
#[async_trait]
pub trait SubmissionSink: Send + Sync {
    /// Emits a mention-only notification at the destination, ahead of the
    /// report itself.
    async fn mention(
        &self,
        destination: &SinkId,
        target: &NotifyTarget,
    ) -> Result<(), ConciergeError>;

    /// Delivers a structured report to the destination.
    async fn deliver(
        &self,
        destination: &SinkId,
        report: Report,
    ) -> Result<MessageId, ConciergeError>;
}
