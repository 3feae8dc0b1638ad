// SPDX-FileCopyrightText: 2026 Concierge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end interview scenarios over mock collaborators.
//!
//! Tests run under a paused tokio clock: queued messages drive the session
//! forward, and when the engine waits on an empty queue the clock
//! auto-advances into the timeout paths. Tests are independent and
//! order-insensitive.

use std::sync::Arc;
use std::time::{Duration, Instant};

use concierge_catalog::CategoryCatalog;
use concierge_config::model::{DestinationConfig, DestinationsConfig, TimeoutConfig};
use concierge_core::types::{
    AttachmentPayload, AttachmentRef, Category, ChannelRef, ControlResult, UserId,
};
use concierge_gate::{CooldownGate, PrivilegeFacts};
use concierge_session::{
    ATTACHMENT_PLACEHOLDER, IntakeService, RequestOutcome, SessionOrchestrator, SessionOutcome,
    WaitBounds,
};
use concierge_test_utils::{MockSink, MockTransport};
use tokio_util::sync::CancellationToken;

const BUG_SINK: &str = "chan-bug-reports";
const BUG_NOTIFY: &str = "role-tech";

fn destinations(with_bug_sink: bool) -> DestinationsConfig {
    DestinationsConfig {
        bug: DestinationConfig {
            sink: with_bug_sink.then(|| BUG_SINK.to_string()),
            notify: with_bug_sink.then(|| BUG_NOTIFY.to_string()),
        },
        ..Default::default()
    }
}

struct Fixture {
    transport: Arc<MockTransport>,
    sink: Arc<MockSink>,
    catalog: CategoryCatalog,
    user: UserId,
    channel: ChannelRef,
}

impl Fixture {
    fn new(with_bug_sink: bool) -> Self {
        Self {
            transport: Arc::new(MockTransport::new()),
            sink: Arc::new(MockSink::new()),
            catalog: CategoryCatalog::new(&destinations(with_bug_sink)),
            user: UserId("chief".to_string()),
            channel: ChannelRef("bug-chief-0".to_string()),
        }
    }

    fn orchestrator(&self, category: Category) -> SessionOrchestrator {
        SessionOrchestrator::new(
            self.catalog.definition(category).clone(),
            self.user.clone(),
            self.channel.clone(),
            Arc::clone(&self.transport) as Arc<dyn concierge_core::Transport>,
            Arc::clone(&self.sink) as Arc<dyn concierge_core::SubmissionSink>,
            WaitBounds::from(&TimeoutConfig::default()),
        )
    }

    async fn answer(&self, text: &str) {
        self.transport
            .inject_text(&self.user, &self.channel, text)
            .await;
    }

    /// Queue valid answers for all seven Bug fields.
    async fn answer_all_bug_fields(&self) {
        for text in [
            "FrostChief",
            "12345678",
            "1.4.2",
            "iPhone 12",
            "iOS 14.4",
            "Furnace upgrade button does nothing",
            "no",
        ] {
            self.answer(text).await;
        }
    }
}

// ---- Scenario A: full bug interview, confirmed ----

#[tokio::test(start_paused = true)]
async fn bug_interview_delivers_one_report_and_closes_channel() {
    let fx = Fixture::new(true);
    fx.answer_all_bug_fields().await;
    fx.transport.queue_control(ControlResult::Confirm).await;

    let outcome = fx
        .orchestrator(Category::Bug)
        .run(CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(outcome, SessionOutcome::Submitted);

    let delivered = fx.sink.delivered().await;
    assert_eq!(delivered.len(), 1);
    let (sink_id, report) = &delivered[0];
    assert_eq!(sink_id.0, BUG_SINK);
    assert_eq!(report.category, Category::Bug);
    assert_eq!(report.submitter, fx.user);
    assert_eq!(report.fields.len(), 7);

    // answer keys equal the catalog field set, each exactly once, in order
    let expected: Vec<&str> = fx
        .catalog
        .definition(Category::Bug)
        .fields
        .iter()
        .map(|f| f.name)
        .collect();
    let actual: Vec<&str> = report.fields.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(actual, expected);

    // notify target is mentioned before delivery
    let mentions = fx.sink.mentions().await;
    assert_eq!(mentions.len(), 1);
    assert_eq!(mentions[0].1.0, BUG_NOTIFY);

    assert_eq!(fx.transport.deleted_channels().await, vec![fx.channel.clone()]);
}

// ---- Scenario B: invalid Player ID recovers locally ----

#[tokio::test(start_paused = true)]
async fn non_numeric_player_id_reprompts_then_proceeds() {
    let fx = Fixture::new(true);
    fx.answer("FrostChief").await;
    fx.answer("abc123").await; // rejected
    fx.answer("12345678").await;
    for text in ["1.4.2", "iPhone 12", "iOS 14.4", "broken", "no"] {
        fx.answer(text).await;
    }
    fx.transport.queue_control(ControlResult::Confirm).await;

    let outcome = fx
        .orchestrator(Category::Bug)
        .run(CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(outcome, SessionOutcome::Submitted);

    let texts = fx.transport.sent_texts().await;
    assert!(texts.iter().any(|t| t.contains("Invalid Player ID")));

    let delivered = fx.sink.delivered().await;
    let player_id = delivered[0]
        .1
        .fields
        .iter()
        .find(|(n, _)| n == "Player ID")
        .map(|(_, v)| v.clone())
        .unwrap();
    assert_eq!(player_id, "12345678");
    assert!(player_id.chars().all(|c| c.is_ascii_digit()));
}

// ---- Scenario C: question-phase inactivity ----

#[tokio::test(start_paused = true)]
async fn idle_during_question_three_abandons_and_closes() {
    let fx = Fixture::new(true);
    fx.answer("FrostChief").await;
    fx.answer("12345678").await;
    // question 3 of 7 never answered; clock advances past the 300s bound

    let outcome = fx
        .orchestrator(Category::Bug)
        .run(CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(outcome, SessionOutcome::Abandoned);
    let texts = fx.transport.sent_texts().await;
    assert!(texts.iter().any(|t| t.contains("Closed due to inactivity")));
    assert_eq!(fx.transport.deleted_channels().await.len(), 1);
    assert_eq!(fx.sink.delivered_count().await, 0);
}

// ---- Scenario D: destination not configured ----

#[tokio::test(start_paused = true)]
async fn missing_destination_reports_error_without_closing() {
    let fx = Fixture::new(false);
    fx.answer_all_bug_fields().await;
    fx.transport.queue_control(ControlResult::Confirm).await;

    let outcome = fx
        .orchestrator(Category::Bug)
        .run(CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(outcome, SessionOutcome::Submitted);
    let texts = fx.transport.sent_texts().await;
    assert!(texts.iter().any(|t| t.contains("destination not found")));
    assert!(fx.transport.deleted_channels().await.is_empty());
    assert_eq!(fx.sink.delivered_count().await, 0);
}

// ---- Revision loop ----

#[tokio::test(start_paused = true)]
async fn revising_a_field_overwrites_in_place() {
    let fx = Fixture::new(true);
    fx.answer_all_bug_fields().await;
    fx.transport.queue_control(ControlResult::Revise).await;
    fx.answer("player id").await; // case-insensitive choice
    fx.answer("87654321").await;
    fx.transport.queue_control(ControlResult::Confirm).await;

    let outcome = fx
        .orchestrator(Category::Bug)
        .run(CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(outcome, SessionOutcome::Submitted);

    let delivered = fx.sink.delivered().await;
    assert_eq!(delivered.len(), 1, "one confirm, one report");
    let fields = &delivered[0].1.fields;
    assert_eq!(fields.len(), 7, "revision must not duplicate fields");
    let player_id = fields.iter().find(|(n, _)| n == "Player ID").unwrap();
    assert_eq!(player_id.1, "87654321");
}

#[tokio::test(start_paused = true)]
async fn invalid_revision_choice_gets_single_retry_prompt() {
    let fx = Fixture::new(true);
    fx.answer_all_bug_fields().await;
    fx.transport.queue_control(ControlResult::Revise).await;
    fx.answer("Nonsense Field").await;
    fx.answer("Game Version").await;
    fx.answer("1.5.0").await;
    fx.transport.queue_control(ControlResult::Confirm).await;

    fx.orchestrator(Category::Bug)
        .run(CancellationToken::new())
        .await
        .unwrap();

    let texts = fx.transport.sent_texts().await;
    assert_eq!(
        texts.iter().filter(|t| t.contains("Invalid field")).count(),
        1
    );
    // the menu is listed once, not re-listed after the mismatch
    assert_eq!(
        texts
            .iter()
            .filter(|t| t.contains("Type the field name to revise"))
            .count(),
        1
    );
}

#[tokio::test(start_paused = true)]
async fn revision_choice_timeout_abandons_and_closes() {
    let fx = Fixture::new(true);
    fx.answer_all_bug_fields().await;
    fx.transport.queue_control(ControlResult::Revise).await;
    // no field choice arrives; the 60s bound expires

    let outcome = fx
        .orchestrator(Category::Bug)
        .run(CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(outcome, SessionOutcome::Abandoned);
    assert_eq!(fx.transport.deleted_channels().await.len(), 1);
    assert_eq!(fx.sink.delivered_count().await, 0);
}

// ---- Attachments ----

fn screenshot_ref() -> AttachmentRef {
    AttachmentRef {
        id: "att-1".to_string(),
        filename: "screenshot.png".to_string(),
    }
}

#[tokio::test(start_paused = true)]
async fn attachment_satisfies_field_and_ships_with_report() {
    let fx = Fixture::new(true);
    fx.transport
        .register_attachment(
            "att-1",
            AttachmentPayload {
                filename: "screenshot.png".to_string(),
                bytes: vec![0x89, 0x50, 0x4e, 0x47],
            },
        )
        .await;

    for text in ["FrostChief", "12345678", "1.4.2", "iPhone 12", "iOS 14.4", "broken"] {
        fx.answer(text).await;
    }
    fx.transport
        .inject_attachment(&fx.user, &fx.channel, "", screenshot_ref())
        .await;
    fx.transport.queue_control(ControlResult::Confirm).await;

    fx.orchestrator(Category::Bug)
        .run(CancellationToken::new())
        .await
        .unwrap();

    let delivered = fx.sink.delivered().await;
    let report = &delivered[0].1;
    let attachment_field = report.fields.iter().find(|(n, _)| n == "Attachment").unwrap();
    assert_eq!(attachment_field.1, ATTACHMENT_PLACEHOLDER);
    let payload = report.attachment.as_ref().expect("payload re-fetched");
    assert_eq!(payload.filename, "screenshot.png");
}

#[tokio::test(start_paused = true)]
async fn revising_placeholder_field_with_text_clears_attachment() {
    let fx = Fixture::new(true);
    for text in ["FrostChief", "12345678", "1.4.2", "iPhone 12", "iOS 14.4", "broken"] {
        fx.answer(text).await;
    }
    fx.transport
        .inject_attachment(&fx.user, &fx.channel, "", screenshot_ref())
        .await;
    fx.transport.queue_control(ControlResult::Revise).await;
    fx.answer("Attachment").await;
    fx.answer("no").await; // plain text over the placeholder
    fx.transport.queue_control(ControlResult::Confirm).await;

    fx.orchestrator(Category::Bug)
        .run(CancellationToken::new())
        .await
        .unwrap();

    let delivered = fx.sink.delivered().await;
    let report = &delivered[0].1;
    assert!(report.attachment.is_none());
    let attachment_field = report.fields.iter().find(|(n, _)| n == "Attachment").unwrap();
    assert_eq!(attachment_field.1, "no");
}

#[tokio::test(start_paused = true)]
async fn revising_other_field_leaves_attachment_intact() {
    let fx = Fixture::new(true);
    fx.transport
        .register_attachment(
            "att-1",
            AttachmentPayload {
                filename: "screenshot.png".to_string(),
                bytes: vec![1, 2, 3],
            },
        )
        .await;

    for text in ["FrostChief", "12345678", "1.4.2", "iPhone 12", "iOS 14.4", "broken"] {
        fx.answer(text).await;
    }
    fx.transport
        .inject_attachment(&fx.user, &fx.channel, "", screenshot_ref())
        .await;
    fx.transport.queue_control(ControlResult::Revise).await;
    fx.answer("Game Version").await;
    fx.answer("1.5.0").await;
    fx.transport.queue_control(ControlResult::Confirm).await;

    fx.orchestrator(Category::Bug)
        .run(CancellationToken::new())
        .await
        .unwrap();

    let delivered = fx.sink.delivered().await;
    assert!(delivered[0].1.attachment.is_some());
}

#[tokio::test(start_paused = true)]
async fn attachment_fetch_failure_is_swallowed() {
    let fx = Fixture::new(true);
    fx.transport.fail_attachment_fetch();

    for text in ["FrostChief", "12345678", "1.4.2", "iPhone 12", "iOS 14.4", "broken"] {
        fx.answer(text).await;
    }
    fx.transport
        .inject_attachment(&fx.user, &fx.channel, "", screenshot_ref())
        .await;
    fx.transport.queue_control(ControlResult::Confirm).await;

    let outcome = fx
        .orchestrator(Category::Bug)
        .run(CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(outcome, SessionOutcome::Submitted);
    let delivered = fx.sink.delivered().await;
    assert_eq!(delivered.len(), 1);
    assert!(delivered[0].1.attachment.is_none());
}

// ---- Cancellation and transport loss ----

#[tokio::test(start_paused = true)]
async fn external_destruction_ends_session_without_side_effects() {
    let fx = Fixture::new(true);
    let cancel = CancellationToken::new();
    let handle = tokio::spawn(fx.orchestrator(Category::Bug).run(cancel.clone()));

    tokio::task::yield_now().await;
    cancel.cancel();

    let outcome = handle.await.unwrap().unwrap();
    assert_eq!(outcome, SessionOutcome::Abandoned);

    let texts = fx.transport.sent_texts().await;
    assert!(!texts.iter().any(|t| t.contains("Closed due to inactivity")));
    assert!(fx.transport.deleted_channels().await.is_empty());
}

#[tokio::test(start_paused = true)]
async fn transport_failure_propagates_without_retry() {
    let fx = Fixture::new(true);
    fx.transport.fail_sends();

    let result = fx
        .orchestrator(Category::Bug)
        .run(CancellationToken::new())
        .await;
    assert!(result.is_err());
    assert_eq!(fx.sink.delivered_count().await, 0);
}

// ---- Scenario E and the service front door ----

fn service(transport: Arc<MockTransport>, sink: Arc<MockSink>) -> IntakeService {
    IntakeService::new(
        transport,
        sink,
        Arc::new(CategoryCatalog::new(&destinations(true))),
        CooldownGate::in_memory(Default::default()),
        WaitBounds::from(&TimeoutConfig::default()),
    )
}

#[tokio::test(start_paused = true)]
async fn rapid_double_request_admits_once() {
    let transport = Arc::new(MockTransport::new());
    let sink = Arc::new(MockSink::new());
    let service = service(Arc::clone(&transport), Arc::clone(&sink));
    let user = UserId("chief".to_string());
    let now = Instant::now();

    let first = service
        .request_session(Category::Bug, user.clone(), &PrivilegeFacts::NONE, now)
        .await
        .unwrap();
    let RequestOutcome::Admitted { channel, notice } = first else {
        panic!("first request must be admitted");
    };
    assert!(notice.contains(&channel.0));
    assert_eq!(transport.created_channels().await, vec![channel.clone()]);
    assert_eq!(service.active_sessions(), 1);

    let second = service
        .request_session(
            Category::Bug,
            user.clone(),
            &PrivilegeFacts::NONE,
            now + Duration::from_millis(120),
        )
        .await
        .unwrap();
    match second {
        RequestOutcome::Denied { remaining } => {
            assert!(remaining > Duration::from_secs(599));
            assert!(remaining <= Duration::from_secs(600));
        }
        RequestOutcome::Admitted { .. } => panic!("second rapid request must be denied"),
    }
    // no second channel was created
    assert_eq!(transport.created_channels().await.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn destroyed_channel_reaps_its_session() {
    let transport = Arc::new(MockTransport::new());
    let sink = Arc::new(MockSink::new());
    let service = service(Arc::clone(&transport), Arc::clone(&sink));

    let outcome = service
        .request_session(
            Category::Suggestion,
            UserId("chief".to_string()),
            &PrivilegeFacts::NONE,
            Instant::now(),
        )
        .await
        .unwrap();
    let RequestOutcome::Admitted { channel, .. } = outcome else {
        panic!("must be admitted");
    };

    tokio::task::yield_now().await;
    service.channel_destroyed(&channel);

    // the session task removes itself from the registry
    for _ in 0..50 {
        if service.active_sessions() == 0 {
            break;
        }
        tokio::task::yield_now().await;
    }
    assert_eq!(service.active_sessions(), 0);
    assert!(transport.deleted_channels().await.is_empty());
}

#[tokio::test(start_paused = true)]
async fn force_close_cancels_and_deletes() {
    let transport = Arc::new(MockTransport::new());
    let sink = Arc::new(MockSink::new());
    let service = service(Arc::clone(&transport), Arc::clone(&sink));

    let outcome = service
        .request_session(
            Category::Complaint,
            UserId("chief".to_string()),
            &PrivilegeFacts::NONE,
            Instant::now(),
        )
        .await
        .unwrap();
    let RequestOutcome::Admitted { channel, .. } = outcome else {
        panic!("must be admitted");
    };

    tokio::task::yield_now().await;
    service.force_close(&channel).await.unwrap();
    assert_eq!(transport.deleted_channels().await, vec![channel]);
}
