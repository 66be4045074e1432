// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

/// Schedule service client errors.
#[non_exhaustive]
#[derive(Debug)]
pub enum ClientError {
    /// HTTP layer error.
    Http(String),

    /// The service rejected the credential (401).
    Auth(String),

    /// The schedule or event does not exist (404).
    NotFound(String),

    /// The service answered with `{ "error": ... }`.
    Api(String),

    /// The response body could not be understood.
    InvalidResponse(String),

    /// Configuration error.
    Config(String),

    /// A write addressed to the aggregated "all schedules" view instead of one schedule.
    AllSchedules,
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(e) => write!(f, "HTTP error: {e}"),
            Self::Auth(e) => write!(f, "Authentication failed: {e}"),
            Self::NotFound(e) => write!(f, "Not found: {e}"),
            Self::Api(e) => write!(f, "Server error: {e}"),
            Self::InvalidResponse(e) => write!(f, "Invalid server response: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::AllSchedules => write!(f, "Cannot save to all schedules"),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        Self::InvalidResponse(e.to_string())
    }
}
