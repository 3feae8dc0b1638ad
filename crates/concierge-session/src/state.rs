// SPDX-FileCopyrightText: 2026 Concierge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! States of the interview FSM.
//!
//! The state is carried explicitly rather than derived from call-stack
//! position: every suspension point records which state it waits in, and
//! every transition assigns the next tag before suspending again.

/// State tag of one interview session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Channel opened, intro not yet sent.
    Init,
    /// Waiting for the answer to field `i` (catalog order).
    Asking(usize),
    /// Summary posted, waiting for the confirm-or-revise control.
    Summarizing,
    /// Waiting for the user to name the field to revise.
    AwaitingFieldChoice,
    /// Waiting for the replacement value of field `i`.
    AwaitingFieldValue(usize),
    /// Terminal: report handed to the sink (or destination reported missing).
    Submitted,
    /// Terminal: timed out or destroyed externally.
    Abandoned,
}

impl SessionState {
    /// Whether the session has reached a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Submitted | SessionState::Abandoned)
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionState::Init => write!(f, "init"),
            SessionState::Asking(i) => write!(f, "asking({i})"),
            SessionState::Summarizing => write!(f, "summarizing"),
            SessionState::AwaitingFieldChoice => write!(f, "revising:choice"),
            SessionState::AwaitingFieldValue(i) => write!(f, "revising:value({i})"),
            SessionState::Submitted => write!(f, "submitted"),
            SessionState::Abandoned => write!(f, "abandoned"),
        }
    }
}

/// How a finished session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Confirmed and handed to submission (including the
    /// destination-missing best-effort path).
    Submitted,
    /// Timed out, or the channel was destroyed externally.
    Abandoned,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_state_display() {
        assert_eq!(SessionState::Init.to_string(), "init");
        assert_eq!(SessionState::Asking(3).to_string(), "asking(3)");
        assert_eq!(SessionState::Summarizing.to_string(), "summarizing");
        assert_eq!(SessionState::AwaitingFieldChoice.to_string(), "revising:choice");
        assert_eq!(
            SessionState::AwaitingFieldValue(1).to_string(),
            "revising:value(1)"
        );
        assert_eq!(SessionState::Submitted.to_string(), "submitted");
        assert_eq!(SessionState::Abandoned.to_string(), "abandoned");
    }

    #[test]
    fn only_submitted_and_abandoned_are_terminal() {
        assert!(SessionState::Submitted.is_terminal());
        assert!(SessionState::Abandoned.is_terminal());
        assert!(!SessionState::Init.is_terminal());
        assert!(!SessionState::Asking(0).is_terminal());
        assert!(!SessionState::Summarizing.is_terminal());
        assert!(!SessionState::AwaitingFieldChoice.is_terminal());
        assert!(!SessionState::AwaitingFieldValue(0).is_terminal());
    }
}
