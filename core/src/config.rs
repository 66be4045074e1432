// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::tz::TimeZone;
use thiserror::Error;

/// The name of the SitterSync application.
pub const APP_NAME: &str = "sittersync";

/// Number of undo entries kept when the configuration does not say otherwise.
pub const DEFAULT_UNDO_CAPACITY: usize = 50;

/// Configuration for the SitterSync core.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct Config {
    /// IANA time zone used to render times and to read date-times without an offset.
    /// Defaults to the system time zone.
    #[serde(default)]
    pub timezone: Option<String>,

    /// Maximum number of undo entries kept while a view is mounted.
    #[serde(default = "default_undo_capacity")]
    pub undo_capacity: usize,

    /// How series identifiers of recurring events are generated.
    #[serde(default)]
    pub series_id: SeriesIdStrategy,

    /// If true, deleting an event pushes an undo entry.
    #[serde(default)]
    pub undoable_deletes: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timezone: None,
            undo_capacity: DEFAULT_UNDO_CAPACITY,
            series_id: SeriesIdStrategy::default(),
            undoable_deletes: false,
        }
    }
}

impl Config {
    /// Normalize the configuration.
    pub fn normalize(&mut self) -> Result<(), ConfigError> {
        if let Some(tz) = &self.timezone {
            let tz = tz.trim();
            self.timezone = (!tz.is_empty()).then(|| tz.to_owned());
        }

        if self.undo_capacity == 0 {
            return Err(ConfigError::ZeroUndoCapacity);
        }

        self.time_zone().map(|_| ())
    }

    /// Resolve the configured time zone, falling back to the system one.
    pub fn time_zone(&self) -> Result<TimeZone, ConfigError> {
        match &self.timezone {
            Some(name) => TimeZone::get(name).map_err(|e| ConfigError::UnknownTimeZone {
                name: name.clone(),
                reason: e.to_string(),
            }),
            None => Ok(TimeZone::system()),
        }
    }
}

fn default_undo_capacity() -> usize {
    DEFAULT_UNDO_CAPACITY
}

/// How the `groupId` of a recurring series is generated.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesIdStrategy {
    /// Title, start, end and all-day flag concatenated. Recreating an identical
    /// series yields the same identifier.
    #[default]
    Derived,

    /// A fresh random identifier for every series.
    Random,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown time zone `{name}`: {reason}")]
    UnknownTimeZone { name: String, reason: String },

    #[error("undo capacity must be at least 1")]
    ZeroUndoCapacity,
}
