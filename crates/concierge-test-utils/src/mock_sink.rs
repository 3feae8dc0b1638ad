// SPDX-FileCopyrightText: 2026 Concierge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock submission sink capturing delivered reports.

use async_trait::async_trait;
use tokio::sync::Mutex;

use concierge_core::error::ConciergeError;
use concierge_core::traits::SubmissionSink;
use concierge_core::types::{MessageId, NotifyTarget, Report, SinkId};

/// A mock sink recording mentions and delivered reports for assertion.
#[derive(Default)]
pub struct MockSink {
    mentions: Mutex<Vec<(SinkId, NotifyTarget)>>,
    delivered: Mutex<Vec<(SinkId, Report)>>,
}

impl MockSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn mentions(&self) -> Vec<(SinkId, NotifyTarget)> {
        self.mentions.lock().await.clone()
    }

    pub async fn delivered(&self) -> Vec<(SinkId, Report)> {
        self.delivered.lock().await.clone()
    }

    pub async fn delivered_count(&self) -> usize {
        self.delivered.lock().await.len()
    }
}

#[async_trait]
impl SubmissionSink for MockSink {
    async fn mention(
        &self,
        destination: &SinkId,
        target: &NotifyTarget,
    ) -> Result<(), ConciergeError> {
        self.mentions
            .lock()
            .await
            .push((destination.clone(), target.clone()));
        Ok(())
    }

    async fn deliver(
        &self,
        destination: &SinkId,
        report: Report,
    ) -> Result<MessageId, ConciergeError> {
        let mut delivered = self.delivered.lock().await;
        let id = MessageId(format!("mock-report-{}", delivered.len()));
        delivered.push((destination.clone(), report));
        Ok(id)
    }
}
