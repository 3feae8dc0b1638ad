// SPDX-FileCopyrightText: 2026 Concierge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator traits implemented outside the core engine.

pub mod sink;
pub mod transport;

pub use sink::SubmissionSink;
pub use transport::Transport;
