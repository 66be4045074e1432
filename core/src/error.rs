// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::Timestamp;
use thiserror::Error;

/// Input rejected before it reaches the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The title is empty or whitespace only.
    #[error("title cannot be empty")]
    EmptyTitle,

    /// The title is longer than the allowed number of characters.
    #[error("title must be at most {max} characters, got {len}")]
    TitleTooLong { len: usize, max: usize },

    /// The start of an event is after its end.
    #[error("start {start} is after end {end}")]
    InvalidRange { start: Timestamp, end: Timestamp },

    /// A recurring event without any weekday.
    #[error("select at least one day of the week for a recurring event")]
    EmptyRecurrence,

    /// A date-time that cannot be read.
    #[error("invalid date-time `{0}`")]
    InvalidTimestamp(String),

    /// A calendar date that cannot be read.
    #[error("invalid date `{0}`")]
    InvalidDate(String),

    /// The owner email does not look like an email address.
    #[error("invalid owner email `{0}`")]
    InvalidOwnerEmail(String),

    /// A sharee email does not look like an email address.
    #[error("invalid email `{0}`, cannot share with this user")]
    InvalidShareeEmail(String),

    /// The owner is listed among the sharees.
    #[error("owner `{0}` cannot also be a sharee")]
    OwnerIsSharee(String),
}

/// The verified user lacks the role an operation needs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PermissionError {
    #[error("schedule `{schedule_id}` is not shared with you")]
    NotReadable { schedule_id: String },

    #[error("schedule `{schedule_id}` is read-only for you")]
    NotWriteable { schedule_id: String },

    #[error("only the owner can change schedule `{schedule_id}`")]
    NotOwner { schedule_id: String },
}

/// Identity verification failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("no credential available, please sign in")]
    MissingCredential,

    #[error("credential expired, please sign in again")]
    Expired,

    #[error("credential does not carry an email")]
    NoEmail,
}

/// Why a mutation was rejected. Local state is left untouched whenever one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MutationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Permission(#[from] PermissionError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    /// No schedule selected and the verified user can write to zero or several schedules.
    #[error("cannot pick a target schedule ({writeable} writeable), choose one explicitly")]
    AmbiguousTarget { writeable: usize },

    #[error("schedule `{0}` not found")]
    ScheduleNotFound(String),

    #[error("event `{0}` not found")]
    EventNotFound(String),

    /// The user declined a confirmation prompt.
    #[error("cancelled")]
    Cancelled,
}
