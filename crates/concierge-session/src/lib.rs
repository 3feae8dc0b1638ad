// SPDX-FileCopyrightText: 2026 Concierge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session workflow engine for the Concierge intake bot.
//!
//! [`IntakeService`] is the front door: it gates session creation through
//! the cooldown gate, spawns one [`SessionOrchestrator`] task per admitted
//! session, and tears sessions down when they finish or their channel is
//! destroyed. The orchestrator drives the interview: question loop,
//! revision loop, and exactly-once submission.

pub mod orchestrator;
pub mod service;
pub mod state;

pub use orchestrator::{ATTACHMENT_PLACEHOLDER, SessionOrchestrator, WaitBounds};
pub use service::{IntakeService, RequestOutcome};
pub use state::{SessionOutcome, SessionState};
