// SPDX-FileCopyrightText: 2026 Concierge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-session FSM that runs one guided interview.
//!
//! Each session goes through states: Init -> Asking(i) -> Summarizing ->
//! Revising (field choice, then field value) back to Summarizing, ending in
//! Submitted or Abandoned. The orchestrator owns the session exclusively;
//! it suspends only at explicit wait points (next message, control result)
//! and races every suspension against the external-destruction token.
//!
//! Timeouts are transitions, not errors: a wait that expires ends the
//! session deterministically. Transport failures are propagated without
//! retry; the caller treats such a session as lost.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use concierge_catalog::{CategoryDefinition, FieldValidator};
use concierge_config::model::TimeoutConfig;
use concierge_core::error::ConciergeError;
use concierge_core::traits::{SubmissionSink, Transport};
use concierge_core::types::{
    Accent, AttachmentRef, ChannelRef, ControlHandle, ControlKind, ControlResult, InboundMessage,
    OutboundContent, Report, UserId,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::state::{SessionOutcome, SessionState};

/// Answer text recorded for a field satisfied by an attachment.
pub const ATTACHMENT_PLACEHOLDER: &str = "*(image attached)*";

/// Wait bounds for the session's suspension points.
#[derive(Debug, Clone, Copy)]
pub struct WaitBounds {
    /// Question-phase wait for an answer.
    pub question: Duration,
    /// Wait for a field name during revision.
    pub revise_choice: Duration,
    /// Wait for a replacement value during revision.
    pub revise_value: Duration,
    /// Delay before the channel is reclaimed after the session ends.
    pub close_delay: Duration,
}

impl From<&TimeoutConfig> for WaitBounds {
    fn from(config: &TimeoutConfig) -> Self {
        Self {
            question: Duration::from_secs(config.question_secs),
            revise_choice: Duration::from_secs(config.revise_choice_secs),
            revise_value: Duration::from_secs(config.revise_value_secs),
            close_delay: Duration::from_secs(config.close_delay_secs),
        }
    }
}

/// What a suspension point produced.
enum Waited<T> {
    Event(T),
    TimedOut,
    /// External channel destruction fired; terminate without side effects.
    Cancelled,
}

/// Drives one interview session over a private channel.
pub struct SessionOrchestrator {
    definition: CategoryDefinition,
    user: UserId,
    channel: ChannelRef,
    transport: Arc<dyn Transport>,
    sink: Arc<dyn SubmissionSink>,
    bounds: WaitBounds,
    state: SessionState,
    /// Answers in ask order; revision overwrites in place.
    answers: Vec<(String, String)>,
    /// At most one attachment is retained session-wide, the most recent one.
    attachment: Option<AttachmentRef>,
}

impl SessionOrchestrator {
    pub fn new(
        definition: CategoryDefinition,
        user: UserId,
        channel: ChannelRef,
        transport: Arc<dyn Transport>,
        sink: Arc<dyn SubmissionSink>,
        bounds: WaitBounds,
    ) -> Self {
        Self {
            definition,
            user,
            channel,
            transport,
            sink,
            bounds,
            state: SessionState::Init,
            answers: Vec::new(),
            attachment: None,
        }
    }

    /// Runs the interview to a terminal state.
    ///
    /// `cancel` is the external-destruction signal: it ends the session at
    /// the next suspension point without further side effects.
    pub async fn run(mut self, cancel: CancellationToken) -> Result<SessionOutcome, ConciergeError> {
        info!(
            channel = %self.channel.0,
            user = %self.user.0,
            category = %self.definition.category,
            "interview started"
        );

        loop {
            let ended = match self.state {
                SessionState::Init => self.send_intro().await?,
                SessionState::Asking(i) => self.ask(i, &cancel).await?,
                SessionState::Summarizing => self.summarize(&cancel).await?,
                SessionState::AwaitingFieldChoice => self.choose_field(&cancel).await?,
                SessionState::AwaitingFieldValue(i) => self.revise_field(i, &cancel).await?,
                SessionState::Submitted | SessionState::Abandoned => {
                    return Err(ConciergeError::Internal(format!(
                        "session dispatched in terminal state {}",
                        self.state
                    )));
                }
            };

            if let Some(outcome) = ended {
                info!(
                    channel = %self.channel.0,
                    user = %self.user.0,
                    outcome = ?outcome,
                    "interview ended"
                );
                return Ok(outcome);
            }
        }
    }

    fn transition(&mut self, next: SessionState) {
        debug!(channel = %self.channel.0, from = %self.state, to = %next, "transition");
        self.state = next;
    }

    /// Init: post the category intro with the end-conversation affordance.
    async fn send_intro(&mut self) -> Result<Option<SessionOutcome>, ConciergeError> {
        let body = self.definition.render_intro_body(&self.user.0);
        self.transport
            .send_with_control(
                &self.channel,
                OutboundContent::Embed {
                    title: self.definition.intro_title.to_string(),
                    body,
                    accent: self.definition.accent,
                },
                ControlKind::EndConversation,
            )
            .await?;
        self.transition(SessionState::Asking(0));
        Ok(None)
    }

    /// Asking(i): prompt for field `i` and wait for a valid answer.
    async fn ask(
        &mut self,
        i: usize,
        cancel: &CancellationToken,
    ) -> Result<Option<SessionOutcome>, ConciergeError> {
        let field = &self.definition.fields[i];
        let (name, prompt, validator) = (field.name, field.prompt, field.validator);

        self.transport
            .send(
                &self.channel,
                OutboundContent::Text(format!("**{name}:** {prompt}")),
            )
            .await?;

        loop {
            match self.wait_message(self.bounds.question, cancel).await? {
                Waited::Cancelled => return Ok(Some(self.destroyed_externally())),
                Waited::TimedOut => return Ok(Some(self.abandon(cancel).await?)),
                Waited::Event(msg) => {
                    if !self.record_answer_at(i, name, validator, msg).await? {
                        // validation error was reported; keep waiting
                        continue;
                    }
                    let next = if i + 1 < self.definition.fields.len() {
                        SessionState::Asking(i + 1)
                    } else {
                        SessionState::Summarizing
                    };
                    self.transition(next);
                    return Ok(None);
                }
            }
        }
    }

    /// Summarizing: render all answers in ask-order and wait for the
    /// confirm-or-revise control (no timeout).
    async fn summarize(
        &mut self,
        cancel: &CancellationToken,
    ) -> Result<Option<SessionOutcome>, ConciergeError> {
        let body: String = self
            .answers
            .iter()
            .map(|(name, value)| format!("**{name}:** {value}\n"))
            .collect();

        let handle = self
            .transport
            .send_with_control(
                &self.channel,
                OutboundContent::Embed {
                    title: format!("{} Summary", self.definition.category),
                    body,
                    accent: Accent::Gold,
                },
                ControlKind::ConfirmOrRevise,
            )
            .await?;

        match self.wait_control(handle, cancel).await? {
            Waited::Cancelled => Ok(Some(self.destroyed_externally())),
            Waited::TimedOut => Err(ConciergeError::Internal(
                "control wait has no timeout".into(),
            )),
            Waited::Event(ControlResult::Confirm) => Ok(Some(self.submit(cancel).await?)),
            Waited::Event(ControlResult::Revise) => {
                let menu = self
                    .definition
                    .fields
                    .iter()
                    .map(|f| f.name)
                    .collect::<Vec<_>>()
                    .join(", ");
                self.transport
                    .send(
                        &self.channel,
                        OutboundContent::Text(format!(
                            "**Type the field name to revise:**\n`{menu}`"
                        )),
                    )
                    .await?;
                self.transition(SessionState::AwaitingFieldChoice);
                Ok(None)
            }
        }
    }

    /// Revising, field choice: wait for a message naming a field.
    ///
    /// A mismatch gets a single retry prompt and re-enters the same wait
    /// without re-listing the menu.
    async fn choose_field(
        &mut self,
        cancel: &CancellationToken,
    ) -> Result<Option<SessionOutcome>, ConciergeError> {
        loop {
            match self.wait_message(self.bounds.revise_choice, cancel).await? {
                Waited::Cancelled => return Ok(Some(self.destroyed_externally())),
                Waited::TimedOut => return Ok(Some(self.abandon(cancel).await?)),
                Waited::Event(msg) => {
                    let choice = msg.text.trim();
                    let matched = self
                        .definition
                        .fields
                        .iter()
                        .position(|f| f.name.eq_ignore_ascii_case(choice));
                    match matched {
                        Some(idx) => {
                            let name = self.definition.fields[idx].name;
                            self.transport
                                .send(
                                    &self.channel,
                                    OutboundContent::Text(format!(
                                        "Re-enter value for **{name}**:"
                                    )),
                                )
                                .await?;
                            self.transition(SessionState::AwaitingFieldValue(idx));
                            return Ok(None);
                        }
                        None => {
                            self.transport
                                .send(
                                    &self.channel,
                                    OutboundContent::Text("Invalid field.".to_string()),
                                )
                                .await?;
                        }
                    }
                }
            }
        }
    }

    /// Revising, field value: wait for the replacement answer of field `i`.
    async fn revise_field(
        &mut self,
        i: usize,
        cancel: &CancellationToken,
    ) -> Result<Option<SessionOutcome>, ConciergeError> {
        let field = &self.definition.fields[i];
        let (name, validator) = (field.name, field.validator);

        loop {
            match self.wait_message(self.bounds.revise_value, cancel).await? {
                Waited::Cancelled => return Ok(Some(self.destroyed_externally())),
                Waited::TimedOut => return Ok(Some(self.abandon(cancel).await?)),
                Waited::Event(msg) => {
                    if !self.record_answer_at(i, name, validator, msg).await? {
                        continue;
                    }
                    self.transition(SessionState::Summarizing);
                    return Ok(None);
                }
            }
        }
    }

    /// Applies one message to the answer slot for field `i`.
    ///
    /// Returns `false` if the message failed validation (an error prompt was
    /// sent and the caller should keep waiting). An attachment satisfies any
    /// field and replaces the session-wide attachment; a plain-text answer
    /// over a previous attachment placeholder clears it.
    async fn record_answer_at(
        &mut self,
        i: usize,
        name: &str,
        validator: FieldValidator,
        msg: InboundMessage,
    ) -> Result<bool, ConciergeError> {
        if let Some(att) = msg.attachment {
            self.attachment = Some(att);
            self.set_answer(i, name, ATTACHMENT_PLACEHOLDER.to_string());
            return Ok(true);
        }

        if !validator.accepts(&msg.text) {
            self.transport
                .send(
                    &self.channel,
                    OutboundContent::Text(format!(
                        "**Invalid {name}.** Numbers only, please."
                    )),
                )
                .await?;
            return Ok(false);
        }

        if self
            .answers
            .get(i)
            .is_some_and(|(_, value)| value == ATTACHMENT_PLACEHOLDER)
        {
            self.attachment = None;
        }
        self.set_answer(i, name, msg.text);
        Ok(true)
    }

    fn set_answer(&mut self, i: usize, name: &str, value: String) {
        if i < self.answers.len() {
            self.answers[i].1 = value;
        } else {
            debug_assert_eq!(i, self.answers.len());
            self.answers.push((name.to_string(), value));
        }
    }

    /// Confirmed: deliver the report (or surface the missing destination)
    /// and finish the session.
    async fn submit(
        &mut self,
        cancel: &CancellationToken,
    ) -> Result<SessionOutcome, ConciergeError> {
        let Some(sink_id) = self.definition.sink.clone() else {
            warn!(
                category = %self.definition.category,
                "no destination sink configured; ending session without delivery"
            );
            self.transport
                .send(
                    &self.channel,
                    OutboundContent::Text(
                        "Report destination not found. Please contact an operator.".to_string(),
                    ),
                )
                .await?;
            // best-effort terminal: the channel is left open for the operator
            self.transition(SessionState::Submitted);
            return Ok(SessionOutcome::Submitted);
        };

        if let Some(target) = self.definition.notify.clone() {
            self.sink.mention(&sink_id, &target).await?;
        }

        // Re-capture the attachment at submission time; a failed fetch is
        // swallowed and the report goes out without the image.
        let attachment = match &self.attachment {
            Some(att) => match self.transport.fetch_attachment(att).await {
                Ok(payload) => Some(payload),
                Err(e) => {
                    warn!(
                        channel = %self.channel.0,
                        error = %e,
                        "attachment re-fetch failed; delivering report without it"
                    );
                    None
                }
            },
            None => None,
        };

        let report = Report {
            category: self.definition.category,
            submitter: self.user.clone(),
            submitted_at: Utc::now(),
            fields: self.answers.clone(),
            attachment,
        };
        self.sink.deliver(&sink_id, report).await?;

        info!(
            channel = %self.channel.0,
            user = %self.user.0,
            category = %self.definition.category,
            fields = self.answers.len(),
            "report delivered"
        );

        self.transport
            .send(
                &self.channel,
                OutboundContent::Text("Submitted! Closing channel...".to_string()),
            )
            .await?;
        self.transition(SessionState::Submitted);
        self.close_after_delay(cancel).await?;
        Ok(SessionOutcome::Submitted)
    }

    /// Timeout abandonment: inactivity notice, then close the channel.
    async fn abandon(
        &mut self,
        cancel: &CancellationToken,
    ) -> Result<SessionOutcome, ConciergeError> {
        info!(
            channel = %self.channel.0,
            user = %self.user.0,
            state = %self.state,
            "wait expired; abandoning session"
        );
        self.transition(SessionState::Abandoned);
        self.transport
            .send(
                &self.channel,
                OutboundContent::Text("Closed due to inactivity.".to_string()),
            )
            .await?;
        self.close_after_delay(cancel).await?;
        Ok(SessionOutcome::Abandoned)
    }

    /// The channel was destroyed under us; terminate silently.
    fn destroyed_externally(&mut self) -> SessionOutcome {
        debug!(channel = %self.channel.0, "channel destroyed externally");
        self.transition(SessionState::Abandoned);
        SessionOutcome::Abandoned
    }

    async fn close_after_delay(&self, cancel: &CancellationToken) -> Result<(), ConciergeError> {
        tokio::select! {
            _ = cancel.cancelled() => return Ok(()),
            _ = tokio::time::sleep(self.bounds.close_delay) => {}
        }
        self.transport.delete_channel(&self.channel).await
    }

    async fn wait_message(
        &self,
        bound: Duration,
        cancel: &CancellationToken,
    ) -> Result<Waited<InboundMessage>, ConciergeError> {
        tokio::select! {
            _ = cancel.cancelled() => Ok(Waited::Cancelled),
            res = self.transport.await_message(&self.channel, &self.user, bound) => {
                Ok(match res? {
                    Some(msg) => Waited::Event(msg),
                    None => Waited::TimedOut,
                })
            }
        }
    }

    async fn wait_control(
        &self,
        handle: ControlHandle,
        cancel: &CancellationToken,
    ) -> Result<Waited<ControlResult>, ConciergeError> {
        tokio::select! {
            _ = cancel.cancelled() => Ok(Waited::Cancelled),
            res = self.transport.await_control(handle) => Ok(Waited::Event(res?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wait_bounds_from_config() {
        let config = TimeoutConfig::default();
        let bounds = WaitBounds::from(&config);
        assert_eq!(bounds.question, Duration::from_secs(300));
        assert_eq!(bounds.revise_choice, Duration::from_secs(60));
        assert_eq!(bounds.revise_value, Duration::from_secs(120));
        assert_eq!(bounds.close_delay, Duration::from_secs(5));
    }
}
