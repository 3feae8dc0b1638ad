// SPDX-FileCopyrightText: 2026 Concierge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Front door of the intake engine.
//!
//! The service owns the cooldown gate, the catalog, and the registry of
//! active sessions. The transport calls [`IntakeService::request_session`]
//! when a user picks a category, reports external channel destruction via
//! [`IntakeService::channel_destroyed`], and may use the operator surface
//! ([`IntakeService::force_close`], [`IntakeService::launcher_notice`]).

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use concierge_catalog::{CategoryCatalog, builtin};
use concierge_core::error::ConciergeError;
use concierge_core::traits::{SubmissionSink, Transport};
use concierge_core::types::{Accent, Category, ChannelRef, OutboundContent, UserId};
use concierge_gate::{Admission, CooldownGate, PrivilegeFacts};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::orchestrator::{SessionOrchestrator, WaitBounds};

/// Outcome of a session request.
#[derive(Debug)]
pub enum RequestOutcome {
    /// Session admitted and started. `notice` is the acknowledgment to show
    /// the requester (the transport decides how, e.g. ephemerally).
    Admitted { channel: ChannelRef, notice: String },
    /// On cooldown; `remaining` until the next request can succeed.
    Denied { remaining: Duration },
}

struct ActiveSession {
    user: UserId,
    category: Category,
    cancel: CancellationToken,
}

/// Coordinates admission, session spawning, and session teardown.
///
/// One orchestrator task per admitted session; sessions share nothing but
/// the gate's store and the read-only catalog.
pub struct IntakeService {
    transport: Arc<dyn Transport>,
    sink: Arc<dyn SubmissionSink>,
    catalog: Arc<CategoryCatalog>,
    gate: CooldownGate,
    bounds: WaitBounds,
    sessions: Arc<Mutex<HashMap<ChannelRef, ActiveSession>>>,
}

impl IntakeService {
    pub fn new(
        transport: Arc<dyn Transport>,
        sink: Arc<dyn SubmissionSink>,
        catalog: Arc<CategoryCatalog>,
        gate: CooldownGate,
        bounds: WaitBounds,
    ) -> Self {
        Self {
            transport,
            sink,
            catalog,
            gate,
            bounds,
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Handles a category selection: admission check, channel creation, and
    /// orchestrator start.
    ///
    /// The cooldown is recorded at admission, before channel creation, so a
    /// failed creation still counts against the requester's tier.
    pub async fn request_session(
        &self,
        category: Category,
        requester: UserId,
        facts: &PrivilegeFacts,
        now: Instant,
    ) -> Result<RequestOutcome, ConciergeError> {
        match self.gate.admit(&requester, facts, now) {
            Admission::Denied { remaining } => {
                info!(
                    user = %requester.0,
                    %category,
                    remaining_secs = remaining.as_secs(),
                    "session request denied by cooldown"
                );
                return Ok(RequestOutcome::Denied { remaining });
            }
            Admission::Admitted => {}
        }

        let channel = self
            .transport
            .create_private_channel(category, &requester)
            .await?;

        let definition = self.catalog.definition(category).clone();
        let notice = definition.render_launch_notice(&requester.0, &channel.0);

        let cancel = CancellationToken::new();
        let orchestrator = SessionOrchestrator::new(
            definition,
            requester.clone(),
            channel.clone(),
            Arc::clone(&self.transport),
            Arc::clone(&self.sink),
            self.bounds,
        );

        self.sessions.lock().unwrap_or_else(std::sync::PoisonError::into_inner).insert(
            channel.clone(),
            ActiveSession {
                user: requester.clone(),
                category,
                cancel: cancel.clone(),
            },
        );

        info!(
            user = %requester.0,
            %category,
            channel = %channel.0,
            "session admitted and started"
        );

        let sessions = Arc::clone(&self.sessions);
        let task_channel = channel.clone();
        tokio::spawn(async move {
            match orchestrator.run(cancel).await {
                Ok(outcome) => {
                    info!(channel = %task_channel.0, ?outcome, "session finished");
                }
                Err(e) => {
                    // a session that cannot reach its channel is lost
                    error!(channel = %task_channel.0, error = %e, "session lost");
                }
            }
            sessions
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .remove(&task_channel);
        });

        Ok(RequestOutcome::Admitted { channel, notice })
    }

    /// External channel-destruction signal: ends the bound session at its
    /// next suspension point without further side effects.
    pub fn channel_destroyed(&self, channel: &ChannelRef) {
        let sessions = self.sessions.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Some(session) = sessions.get(channel) {
            info!(
                channel = %channel.0,
                user = %session.user.0,
                "channel destroyed externally; cancelling session"
            );
            session.cancel.cancel();
        }
    }

    /// Operator command: force-close a ticket channel regardless of state.
    ///
    /// Caller is responsible for restricting this to privileged operators.
    pub async fn force_close(&self, channel: &ChannelRef) -> Result<(), ConciergeError> {
        {
            let sessions = self.sessions.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
            match sessions.get(channel) {
                Some(session) => {
                    warn!(
                        channel = %channel.0,
                        user = %session.user.0,
                        category = %session.category,
                        "operator force close"
                    );
                    session.cancel.cancel();
                }
                None => {
                    warn!(channel = %channel.0, "force close of channel with no active session");
                }
            }
        }
        self.transport
            .send(
                channel,
                OutboundContent::Text("**Force close initiated.**".to_string()),
            )
            .await?;
        self.transport.delete_channel(channel).await
    }

    /// The category-selection affordance, for (re-)publication by the
    /// transport.
    pub fn launcher_notice(&self) -> OutboundContent {
        OutboundContent::Embed {
            title: builtin::LAUNCHER_TITLE.to_string(),
            body: builtin::LAUNCHER_BODY.to_string(),
            accent: Accent::Blurple,
        }
    }

    /// Number of sessions currently registered.
    pub fn active_sessions(&self) -> usize {
        self.sessions.lock().unwrap_or_else(std::sync::PoisonError::into_inner).len()
    }
}
