// SPDX-FileCopyrightText: 2026 Concierge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in question sets and channel copy for the three categories.

use concierge_core::types::{Accent, Category};

use crate::definition::{FieldSpec, FieldValidator};

/// Title of the category-selection launcher message.
pub const LAUNCHER_TITLE: &str = "Need a hand?";

/// Body of the category-selection launcher message.
pub const LAUNCHER_BODY: &str = "\
Pick a category below and a private channel will open for you.

**Report Bug** - something is broken in the game or this server. \
We'll collect the details our tech team needs to reproduce it.

**Suggestion** - an idea to improve the alliance or the server. \
Every submission is reviewed.

**Complaint** - a rule violation or incident. Reports are handled \
confidentially and forwarded to the moderators.";

pub(crate) fn intro_title(category: Category) -> &'static str {
    match category {
        Category::Bug => "Bug Report",
        Category::Suggestion => "Suggestion",
        Category::Complaint => "Complaint",
    }
}

pub(crate) fn intro_body(category: Category) -> &'static str {
    match category {
        Category::Bug => {
            "Hey {user}, thanks for taking the time to report a problem.\n\n\
             Before proceeding, note that account, payment, and in-game \
             conduct issues must go through in-game support. If a restart \
             of the game or your device fixes the issue, no report is \
             needed.\n\n\
             If your issue is covered above, use the button below to end the \
             conversation. Otherwise, answer the questions that follow."
        }
        Category::Suggestion => {
            "Hi {user}, thanks for sharing an idea.\n\n\
             Every suggestion is reviewed. Changed your mind? End the \
             conversation with the button below; otherwise answer the next \
             couple of questions."
        }
        Category::Complaint => {
            "Hello {user}. Please provide honest and accurate information \
             about the incident; false reports may have consequences.\n\n\
             Changed your mind? End the conversation with the button below. \
             If you are ready, please proceed."
        }
    }
}

pub(crate) fn launch_notice(category: Category) -> &'static str {
    match category {
        Category::Bug => {
            "Hi {user}, a private channel for your bug report is ready here: \
             {channel}."
        }
        Category::Suggestion => {
            "Hi {user}, a private channel for your suggestion is ready here: \
             {channel}."
        }
        Category::Complaint => {
            "Hi {user}, a private channel for your complaint is ready here: \
             {channel}. We can discuss the incident confidentially."
        }
    }
}

pub(crate) fn accent(category: Category) -> Accent {
    match category {
        Category::Bug => Accent::Red,
        Category::Suggestion => Accent::Green,
        Category::Complaint => Accent::Blurple,
    }
}

pub(crate) fn fields(category: Category) -> Vec<FieldSpec> {
    match category {
        Category::Bug => vec![
            FieldSpec {
                name: "In-Game Name",
                prompt: "What is your **In-Game Username**?",
                validator: FieldValidator::FreeText,
            },
            FieldSpec {
                name: "Player ID",
                prompt: "What is your **Player ID**? (e.g. 12345678)",
                validator: FieldValidator::Numeric,
            },
            FieldSpec {
                name: "Game Version",
                prompt: "What **Game Version** are you on?",
                validator: FieldValidator::FreeText,
            },
            FieldSpec {
                name: "Device Model",
                prompt: "Which **Device** are you using? (e.g. iPhone 12, Samsung Galaxy S21)",
                validator: FieldValidator::FreeText,
            },
            FieldSpec {
                name: "OS Version",
                prompt: "Which **OS Version**? (e.g. iOS 14.4, Android 11)",
                validator: FieldValidator::FreeText,
            },
            FieldSpec {
                name: "Description",
                prompt: "Please describe the **Bug/Glitch**.",
                validator: FieldValidator::FreeText,
            },
            FieldSpec {
                name: "Attachment",
                prompt: "Attach a **Screenshot/Video** (or type 'no').",
                validator: FieldValidator::FreeText,
            },
        ],
        Category::Suggestion => vec![
            FieldSpec {
                name: "In-Game Name",
                prompt: "What is your **In-Game Username**?",
                validator: FieldValidator::FreeText,
            },
            FieldSpec {
                name: "Player ID",
                prompt: "What is your **Player ID**? (e.g. 12345678)",
                validator: FieldValidator::Numeric,
            },
            FieldSpec {
                name: "Topic",
                prompt: "What is this suggestion about? (e.g. Alliance Strategy, Server Improvement)",
                validator: FieldValidator::FreeText,
            },
            FieldSpec {
                name: "Idea",
                prompt: "Describe your **idea** in detail.",
                validator: FieldValidator::FreeText,
            },
            FieldSpec {
                name: "Benefit",
                prompt: "How will this help? (e.g. Improve teamwork, Enhance communication)",
                validator: FieldValidator::FreeText,
            },
            FieldSpec {
                name: "Attachment",
                prompt: "Attach an example image (or type 'no').",
                validator: FieldValidator::FreeText,
            },
        ],
        Category::Complaint => vec![
            FieldSpec {
                name: "In-Game Name",
                prompt: "What is your **In-Game Username**?",
                validator: FieldValidator::FreeText,
            },
            FieldSpec {
                name: "Player ID",
                prompt: "What is your **Player ID**? (e.g. 12345678)",
                validator: FieldValidator::Numeric,
            },
            FieldSpec {
                name: "Offender Name",
                prompt: "Who is this complaint against? (In-Game Username)",
                validator: FieldValidator::FreeText,
            },
            FieldSpec {
                name: "Violation",
                prompt: "What happened? (e.g. NAP Violation)",
                validator: FieldValidator::FreeText,
            },
            FieldSpec {
                name: "Time",
                prompt: "When did this happen? (Date & Time)",
                validator: FieldValidator::FreeText,
            },
            FieldSpec {
                name: "Evidence",
                prompt: "Attach **Proof** (Required). Type 'no' if none.",
                validator: FieldValidator::FreeText,
            },
        ],
    }
}
