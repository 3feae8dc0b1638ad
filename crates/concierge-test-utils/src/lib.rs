// SPDX-FileCopyrightText: 2026 Concierge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Concierge integration tests.
//!
//! Provides mock collaborators for fast, deterministic, CI-runnable tests
//! without a chat platform:
//!
//! - [`MockTransport`] - transport with message injection, scripted control
//!   results, and captured outbound traffic
//! - [`MockSink`] - submission sink capturing delivered reports

pub mod mock_sink;
pub mod mock_transport;

pub use mock_sink::MockSink;
pub use mock_transport::MockTransport;
