// SPDX-FileCopyrightText: 2026 Concierge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock presentation/transport for deterministic testing.
//!
//! `MockTransport` implements `Transport` with injectable inbound messages,
//! scripted control results, and captured outbound traffic for assertion.
//! `await_message` respects its timeout bound, so tests running under
//! `tokio::test(start_paused = true)` can exercise abandonment paths
//! without real waiting.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{Mutex, Notify};

use concierge_core::error::ConciergeError;
use concierge_core::traits::Transport;
use concierge_core::types::{
    AttachmentPayload, AttachmentRef, Category, ChannelRef, ControlHandle, ControlKind,
    ControlResult, InboundMessage, MessageId, OutboundContent, UserId,
};

/// A mock transport capturing everything the engine does to it.
#[derive(Default)]
pub struct MockTransport {
    created: Mutex<Vec<ChannelRef>>,
    deleted: Mutex<Vec<ChannelRef>>,
    sent: Mutex<Vec<(ChannelRef, OutboundContent)>>,
    inbound: Mutex<VecDeque<InboundMessage>>,
    inbound_notify: Notify,
    controls: Mutex<VecDeque<ControlResult>>,
    control_notify: Notify,
    attachments: Mutex<HashMap<String, AttachmentPayload>>,
    fail_sends: AtomicBool,
    fail_attachment_fetch: AtomicBool,
    channel_counter: AtomicU64,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a plain text message for the next `await_message`.
    pub async fn inject_text(&self, user: &UserId, channel: &ChannelRef, text: &str) {
        self.inject(InboundMessage {
            user: user.clone(),
            channel: channel.clone(),
            text: text.to_string(),
            attachment: None,
        })
        .await;
    }

    /// Queue a message carrying an attachment reference.
    pub async fn inject_attachment(
        &self,
        user: &UserId,
        channel: &ChannelRef,
        text: &str,
        attachment: AttachmentRef,
    ) {
        self.inject(InboundMessage {
            user: user.clone(),
            channel: channel.clone(),
            text: text.to_string(),
            attachment: Some(attachment),
        })
        .await;
    }

    pub async fn inject(&self, msg: InboundMessage) {
        self.inbound.lock().await.push_back(msg);
        self.inbound_notify.notify_one();
    }

    /// Script the resolution of the next awaited control.
    pub async fn queue_control(&self, result: ControlResult) {
        self.controls.lock().await.push_back(result);
        self.control_notify.notify_one();
    }

    /// Make an attachment payload fetchable by reference id.
    pub async fn register_attachment(&self, id: &str, payload: AttachmentPayload) {
        self.attachments.lock().await.insert(id.to_string(), payload);
    }

    /// Make every subsequent `send` fail.
    pub fn fail_sends(&self) {
        self.fail_sends.store(true, Ordering::SeqCst);
    }

    /// Make every subsequent `fetch_attachment` fail.
    pub fn fail_attachment_fetch(&self) {
        self.fail_attachment_fetch.store(true, Ordering::SeqCst);
    }

    /// All content sent so far, with its target channel.
    pub async fn sent_messages(&self) -> Vec<(ChannelRef, OutboundContent)> {
        self.sent.lock().await.clone()
    }

    /// Human-readable text of everything sent, in order.
    pub async fn sent_texts(&self) -> Vec<String> {
        self.sent
            .lock()
            .await
            .iter()
            .map(|(_, content)| content.text().to_string())
            .collect()
    }

    pub async fn created_channels(&self) -> Vec<ChannelRef> {
        self.created.lock().await.clone()
    }

    pub async fn deleted_channels(&self) -> Vec<ChannelRef> {
        self.deleted.lock().await.clone()
    }

    fn check_send_failure(&self) -> Result<(), ConciergeError> {
        if self.fail_sends.load(Ordering::SeqCst) {
            Err(ConciergeError::transport("mock send failure"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn create_private_channel(
        &self,
        category: Category,
        requester: &UserId,
    ) -> Result<ChannelRef, ConciergeError> {
        let n = self.channel_counter.fetch_add(1, Ordering::SeqCst);
        let channel = ChannelRef(format!(
            "{}-{}-{n}",
            category.to_string().to_lowercase(),
            requester.0
        ));
        self.created.lock().await.push(channel.clone());
        Ok(channel)
    }

    async fn send(
        &self,
        channel: &ChannelRef,
        content: OutboundContent,
    ) -> Result<MessageId, ConciergeError> {
        self.check_send_failure()?;
        let mut sent = self.sent.lock().await;
        let id = MessageId(format!("mock-msg-{}", sent.len()));
        sent.push((channel.clone(), content));
        Ok(id)
    }

    async fn send_with_control(
        &self,
        channel: &ChannelRef,
        content: OutboundContent,
        _control: ControlKind,
    ) -> Result<ControlHandle, ConciergeError> {
        self.check_send_failure()?;
        let mut sent = self.sent.lock().await;
        let handle = ControlHandle(format!("mock-ctl-{}", sent.len()));
        sent.push((channel.clone(), content));
        Ok(handle)
    }

    async fn await_message(
        &self,
        _channel: &ChannelRef,
        _requester: &UserId,
        timeout: Duration,
    ) -> Result<Option<InboundMessage>, ConciergeError> {
        let next = async {
            loop {
                {
                    let mut queue = self.inbound.lock().await;
                    if let Some(msg) = queue.pop_front() {
                        return msg;
                    }
                }
                self.inbound_notify.notified().await;
            }
        };
        match tokio::time::timeout(timeout, next).await {
            Ok(msg) => Ok(Some(msg)),
            Err(_) => Ok(None),
        }
    }

    async fn await_control(
        &self,
        _handle: ControlHandle,
    ) -> Result<ControlResult, ConciergeError> {
        loop {
            {
                let mut queue = self.controls.lock().await;
                if let Some(result) = queue.pop_front() {
                    return Ok(result);
                }
            }
            self.control_notify.notified().await;
        }
    }

    async fn delete_channel(&self, channel: &ChannelRef) -> Result<(), ConciergeError> {
        self.deleted.lock().await.push(channel.clone());
        Ok(())
    }

    async fn fetch_attachment(
        &self,
        attachment: &AttachmentRef,
    ) -> Result<AttachmentPayload, ConciergeError> {
        if self.fail_attachment_fetch.load(Ordering::SeqCst) {
            return Err(ConciergeError::AttachmentFetch {
                message: "mock fetch failure".to_string(),
            });
        }
        self.attachments
            .lock()
            .await
            .get(&attachment.id)
            .cloned()
            .ok_or_else(|| ConciergeError::AttachmentFetch {
                message: format!("unknown attachment {}", attachment.id),
            })
    }
}
