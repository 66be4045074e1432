// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::civil::{self, Date, Time, Weekday};
use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum length of event and schedule titles, in characters.
pub const TITLE_MAX_LEN: usize = 25;

/// A calendar entry, either a single occurrence or a weekly recurring series.
///
/// On the wire this is the flat record shared by the server and the calendar widget. The
/// presence of a non-empty `daysOfWeek` selects the recurring shape; otherwise `start` is
/// required and a missing `end` collapses onto `start`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawEvent", into = "RawEvent")]
pub struct Event {
    /// Unique identifier of the event.
    pub id: String,

    /// Title, at most [`TITLE_MAX_LEN`] characters.
    pub title: String,

    /// When the event happens.
    pub timing: EventTiming,

    /// Whether the event spans whole days.
    pub all_day: bool,

    /// Display colors.
    pub colors: EventColors,

    /// Notes, place and completion.
    pub extended_props: ExtendedProps,

    /// The schedule the event belongs to. Only set on aggregated views, never stored.
    pub parent_schedule_id: Option<String>,
}

impl Event {
    /// Returns true if the event is a recurring series.
    pub fn is_recurring(&self) -> bool {
        matches!(self.timing, EventTiming::Recurring(_))
    }

    /// The series identifier of a recurring event.
    pub fn group_id(&self) -> Option<&str> {
        match &self.timing {
            EventTiming::Recurring(series) => Some(&series.group_id),
            EventTiming::Single(_) => None,
        }
    }

    /// How long one occurrence lasts. A series without both clock times has no known length.
    pub fn duration(&self) -> Option<SignedDuration> {
        match &self.timing {
            EventTiming::Single(single) => Some(single.end.duration_since(single.start)),
            EventTiming::Recurring(series) => {
                Some(series.start_time?.duration_until(series.end_time?))
            }
        }
    }

    /// Returns true if the event is marked as completed.
    pub fn completed(&self) -> bool {
        self.extended_props.completed.unwrap_or(false)
    }

    /// Tag the event with the schedule it was read from.
    pub fn with_parent(mut self, schedule_id: impl Into<String>) -> Self {
        self.parent_schedule_id = Some(schedule_id.into());
        self
    }

    /// Strip the schedule tag, as required before storing the event.
    pub fn detached(mut self) -> Self {
        self.parent_schedule_id = None;
        self
    }
}

/// The two shapes of an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventTiming {
    Single(SingleOccurrence),
    Recurring(RecurringSeries),
}

/// A one-off event between two instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SingleOccurrence {
    pub start: Timestamp,
    pub end: Timestamp,
}

/// A weekly series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurringSeries {
    /// Identifier shared by all occurrences of the series.
    pub group_id: String,

    /// Weekdays the series repeats on, sorted from Sunday and never empty.
    pub days_of_week: Vec<Weekday>,

    /// Wall-clock start of each occurrence.
    pub start_time: Option<Time>,

    /// Wall-clock end of each occurrence.
    pub end_time: Option<Time>,

    /// First day of the series.
    pub start_recur: Option<Date>,

    /// Day the series stops.
    pub end_recur: Option<Date>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventColors {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
}

impl EventColors {
    /// Drop blank colors so they fall back to the widget theme.
    pub fn normalized(&self) -> Self {
        Self {
            background_color: non_blank(self.background_color.as_deref()),
            border_color: non_blank(self.border_color.as_deref()),
            text_color: non_blank(self.text_color.as_deref()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

/// A stored record that matches neither event shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventShapeError {
    #[error("event `{id}` repeats weekly but has no groupId")]
    MissingGroupId { id: String },

    #[error("event `{id}` has neither daysOfWeek nor start")]
    MissingStart { id: String },

    #[error("event `{id}` has invalid weekday {day}, expected 0 (Sunday) to 6")]
    InvalidWeekday { id: String, day: i8 },

    #[error("event `{id}` has invalid time `{value}`, expected HH:MM")]
    InvalidTime { id: String, value: String },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEvent {
    id: String,
    title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    start: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    end: Option<Timestamp>,
    #[serde(default)]
    all_day: bool,
    #[serde(flatten)]
    colors: EventColors,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    days_of_week: Option<Vec<i8>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    group_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    end_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    start_recur: Option<Date>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    end_recur: Option<Date>,
    #[serde(default)]
    extended_props: ExtendedProps,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    parent_schedule_id: Option<String>,
}

impl TryFrom<RawEvent> for Event {
    type Error = EventShapeError;

    fn try_from(raw: RawEvent) -> Result<Self, Self::Error> {
        let days = raw.days_of_week.unwrap_or_default();
        let timing = if days.is_empty() {
            let start = raw.start.ok_or_else(|| EventShapeError::MissingStart {
                id: raw.id.clone(),
            })?;
            let end = raw.end.unwrap_or(start);
            EventTiming::Single(SingleOccurrence { start, end })
        } else {
            let group_id = raw
                .group_id
                .filter(|a| !a.is_empty())
                .ok_or_else(|| EventShapeError::MissingGroupId { id: raw.id.clone() })?;

            let days_of_week = days
                .iter()
                .map(|&day| {
                    weekday_from_sunday_offset(day).ok_or_else(|| {
                        EventShapeError::InvalidWeekday {
                            id: raw.id.clone(),
                            day,
                        }
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;

            let clock = |value: Option<String>| match value.as_deref().map(str::trim) {
                None | Some("") => Ok(None),
                Some(s) => parse_clock(s)
                    .map(Some)
                    .ok_or_else(|| EventShapeError::InvalidTime {
                        id: raw.id.clone(),
                        value: s.to_owned(),
                    }),
            };

            EventTiming::Recurring(RecurringSeries {
                group_id,
                days_of_week: normalize_weekdays(days_of_week),
                start_time: clock(raw.start_time)?,
                end_time: clock(raw.end_time)?,
                start_recur: raw.start_recur,
                end_recur: raw.end_recur,
            })
        };

        Ok(Event {
            id: raw.id,
            title: raw.title,
            timing,
            all_day: raw.all_day,
            colors: raw.colors,
            extended_props: raw.extended_props,
            parent_schedule_id: raw.parent_schedule_id,
        })
    }
}

impl From<Event> for RawEvent {
    fn from(event: Event) -> Self {
        let mut raw = RawEvent {
            id: event.id,
            title: event.title,
            all_day: event.all_day,
            colors: event.colors,
            extended_props: event.extended_props,
            parent_schedule_id: event.parent_schedule_id,
            ..RawEvent::default()
        };

        match event.timing {
            EventTiming::Single(single) => {
                raw.start = Some(single.start);
                raw.end = Some(single.end);
            }
            EventTiming::Recurring(series) => {
                raw.days_of_week = Some(
                    series
                        .days_of_week
                        .iter()
                        .map(|&d| weekday_to_sunday_offset(d))
                        .collect(),
                );
                raw.group_id = Some(series.group_id);
                raw.start_time = series.start_time.map(format_clock);
                raw.end_time = series.end_time.map(format_clock);
                raw.start_recur = series.start_recur;
                raw.end_recur = series.end_recur;
            }
        }
        raw
    }
}

/// Sort weekdays from Sunday and drop duplicates.
pub fn normalize_weekdays(days: impl IntoIterator<Item = Weekday>) -> Vec<Weekday> {
    let mut days: Vec<_> = days.into_iter().collect();
    days.sort_by_key(|&d| weekday_to_sunday_offset(d));
    days.dedup();
    days
}

/// Map `0` (Sunday) through `6` (Saturday) to a weekday.
pub fn weekday_from_sunday_offset(day: i8) -> Option<Weekday> {
    Some(match day {
        0 => Weekday::Sunday,
        1 => Weekday::Monday,
        2 => Weekday::Tuesday,
        3 => Weekday::Wednesday,
        4 => Weekday::Thursday,
        5 => Weekday::Friday,
        6 => Weekday::Saturday,
        _ => return None,
    })
}

/// Number of days since Sunday.
pub fn weekday_to_sunday_offset(day: Weekday) -> i8 {
    match day {
        Weekday::Sunday => 0,
        Weekday::Monday => 1,
        Weekday::Tuesday => 2,
        Weekday::Wednesday => 3,
        Weekday::Thursday => 4,
        Weekday::Friday => 5,
        Weekday::Saturday => 6,
    }
}

/// Parse a wall-clock time written as `H:MM` or `HH:MM`, with optional seconds.
pub(crate) fn parse_clock(s: &str) -> Option<Time> {
    let mut parts = s.split(':');
    let hour: i8 = parts.next()?.parse().ok()?;
    let minute: i8 = parts.next()?.parse().ok()?;
    let second: i8 = match parts.next() {
        Some(a) => a.parse().ok()?,
        None => 0,
    };
    if parts.next().is_some() {
        return None;
    }
    Time::new(hour, minute, second, 0).ok()
}

/// Format a wall-clock time as zero-padded `HH:MM`.
pub(crate) fn format_clock(time: Time) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}

/// Truncate a wall-clock time to whole minutes.
pub(crate) fn to_minute(time: Time) -> Time {
    civil::time(time.hour(), time.minute(), 0, 0)
}

fn non_blank(s: Option<&str>) -> Option<String> {
    s.map(str::trim).filter(|a| !a.is_empty()).map(str::to_owned)
}
