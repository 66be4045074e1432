// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Request and response bodies of the schedule service.

use serde::{Deserialize, Serialize};
use sittersync_core::{Event, Schedule};

/// `{ "error": "..." }`
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: String,
}

/// `{ "success": true }`
#[derive(Debug, Deserialize)]
pub(crate) struct Ack {
    #[serde(default)]
    pub success: bool,
}

/// Answer to `POST /event`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreatedEvent {
    #[serde(default)]
    pub success: bool,
    pub new_event: Event,
}

/// Answer to the `PUT` and `DELETE` endpoints that rewrite a schedule.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdatedSchedule {
    #[serde(default)]
    pub success: bool,
    pub updated_schedule: Schedule,
}

/// Body of `POST /schedule`.
#[derive(Debug, Serialize)]
pub(crate) struct NewSchedule<'a> {
    pub title: &'a str,
}

/// Body of `PUT /event/complete`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletePatch {
    /// Event id.
    pub id: String,
    /// The only property that changes.
    pub extended_props: CompletedProps,
}

/// `extendedProps` of a [`CompletePatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedProps {
    /// New completion state.
    pub completed: bool,
}

impl CompletePatch {
    /// Patch marking `id` as `completed`.
    #[must_use]
    pub fn new(id: impl Into<String>, completed: bool) -> Self {
        Self {
            id: id.into(),
            extended_props: CompletedProps { completed },
        }
    }
}
