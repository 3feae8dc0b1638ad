// SPDX-FileCopyrightText: 2026 Concierge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Presentation/transport collaborator trait.
//!
//! The transport owns the chat platform connection: it creates and destroys
//! private channels, renders prompts and controls, and delivers user messages
//! back to the engine. The engine calls these methods at its suspension
//! points and never retries a failed call.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::ConciergeError;
use crate::types::{
    AttachmentPayload, AttachmentRef, Category, ChannelRef, ControlHandle, ControlKind,
    ControlResult, InboundMessage, MessageId, OutboundContent, UserId,
};

/// Interface to the chat platform's presentation layer.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Creates an isolated conversation channel visible only to the requester
    /// and the system.
    async fn create_private_channel(
        &self,
        category: Category,
        requester: &UserId,
    ) -> Result<ChannelRef, ConciergeError>;

    /// Posts content to a channel.
    async fn send(
        &self,
        channel: &ChannelRef,
        content: OutboundContent,
    ) -> Result<MessageId, ConciergeError>;

    /// Posts content with an interactive control attached; the returned
    /// handle resolves via [`await_control`](Transport::await_control).
    async fn send_with_control(
        &self,
        channel: &ChannelRef,
        content: OutboundContent,
        control: ControlKind,
    ) -> Result<ControlHandle, ConciergeError>;

    /// Suspends until the next message from `requester` in `channel`, or
    /// until `timeout` elapses. Returns `None` on timeout; a timeout is a
    /// state transition for the caller, never an error.
    async fn await_message(
        &self,
        channel: &ChannelRef,
        requester: &UserId,
        timeout: Duration,
    ) -> Result<Option<InboundMessage>, ConciergeError>;

    /// Suspends until a rendered control is resolved. No timeout: the
    /// control blocks until the platform resolves it.
    async fn await_control(
        &self,
        handle: ControlHandle,
    ) -> Result<ControlResult, ConciergeError>;

    /// Reclaims a conversation channel.
    async fn delete_channel(&self, channel: &ChannelRef) -> Result<(), ConciergeError>;

    /// Fetches the bytes behind an attachment reference.
    async fn fetch_attachment(
        &self,
        attachment: &AttachmentRef,
    ) -> Result<AttachmentPayload, ConciergeError>;
}
