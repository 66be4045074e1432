// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::civil::{self, Date, Time, Weekday};
use jiff::tz::TimeZone;
use jiff::{Timestamp, Zoned};
use uuid::Uuid;

use crate::config::SeriesIdStrategy;
use crate::error::ValidationError;
use crate::event::{
    Event, EventColors, EventTiming, ExtendedProps, RecurringSeries, SingleOccurrence,
    TITLE_MAX_LEN, format_clock, normalize_weekdays, parse_clock, to_minute,
};
use crate::widget::{RangeSelection, WidgetChange};

/// Raw input of the event editor, as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventForm {
    pub title: String,

    /// Schedule to create the event in. Falls back to the selected view.
    pub schedule_id: Option<String>,

    /// Start, as a timestamp, a local date-time, a date, or `HH:MM` for a recurring event.
    pub start: String,

    /// End, in the same formats as `start`.
    pub end: String,

    pub all_day: bool,
    pub recurring: bool,
    pub days_of_week: Vec<Weekday>,
    pub start_recur: String,
    pub end_recur: String,
    pub notes: String,
    pub place: String,
    pub colors: EventColors,
}

impl EventForm {
    /// Pre-fill the editor from a range selected on the calendar.
    pub fn from_selection(selection: &RangeSelection) -> Self {
        Self {
            start: selection.start.to_string(),
            end: selection.end.to_string(),
            all_day: selection.all_day,
            ..Self::default()
        }
    }

    /// Pre-fill the editor from a stored event.
    pub fn from_event(event: &Event) -> Self {
        let mut form = Self {
            title: event.title.clone(),
            schedule_id: event.parent_schedule_id.clone(),
            all_day: event.all_day,
            notes: event.extended_props.notes.clone().unwrap_or_default(),
            place: event.extended_props.place.clone().unwrap_or_default(),
            colors: event.colors.clone(),
            ..Self::default()
        };

        match &event.timing {
            EventTiming::Single(single) => {
                form.start = single.start.to_string();
                form.end = single.end.to_string();
            }
            EventTiming::Recurring(series) => {
                form.recurring = true;
                form.days_of_week = series.days_of_week.clone();
                form.start = series.start_time.map(format_clock).unwrap_or_default();
                form.end = series.end_time.map(format_clock).unwrap_or_default();
                form.start_recur = series.start_recur.map(|d| d.to_string()).unwrap_or_default();
                form.end_recur = series.end_recur.map(|d| d.to_string()).unwrap_or_default();
            }
        }
        form
    }
}

/// Translates between editor input, widget changes and stored events.
#[derive(Debug, Clone)]
pub struct EventCodec {
    tz: TimeZone,
    series_id: SeriesIdStrategy,
}

impl EventCodec {
    pub fn new(tz: TimeZone, series_id: SeriesIdStrategy) -> Self {
        Self { tz, series_id }
    }

    /// The zone times are rendered in.
    pub fn time_zone(&self) -> &TimeZone {
        &self.tz
    }

    /// Build a new stored event from editor input.
    ///
    /// The title is clamped to [`TITLE_MAX_LEN`] characters. A recurring event needs at least
    /// one weekday; a single one needs `start <= end`. The result has a fresh id and no
    /// schedule tag.
    pub fn to_canonical(&self, form: &EventForm, recurring: bool) -> Result<Event, ValidationError> {
        let title = clamp_title(&form.title);
        let timing = if recurring {
            EventTiming::Recurring(self.recurring_series(form, &title)?)
        } else {
            EventTiming::Single(self.single_occurrence(form)?)
        };

        Ok(Event {
            id: Uuid::new_v4().to_string(),
            title,
            timing,
            all_day: form.all_day,
            colors: form.colors.normalized(),
            extended_props: ExtendedProps {
                notes: non_blank(&form.notes),
                place: non_blank(&form.place),
                completed: Some(false),
            },
            parent_schedule_id: None,
        })
    }

    fn single_occurrence(&self, form: &EventForm) -> Result<SingleOccurrence, ValidationError> {
        let start = self.parse_instant(&form.start)?;
        let end = self.parse_instant(&form.end)?;
        if start > end {
            return Err(ValidationError::InvalidRange { start, end });
        }
        Ok(SingleOccurrence { start, end })
    }

    fn recurring_series(
        &self,
        form: &EventForm,
        title: &str,
    ) -> Result<RecurringSeries, ValidationError> {
        if form.days_of_week.is_empty() {
            return Err(ValidationError::EmptyRecurrence);
        }

        let group_id = match self.series_id {
            SeriesIdStrategy::Derived => {
                format!("{}{}{}{}", title, form.start, form.end, form.all_day)
            }
            SeriesIdStrategy::Random => Uuid::new_v4().to_string(),
        };

        Ok(RecurringSeries {
            group_id,
            days_of_week: normalize_weekdays(form.days_of_week.iter().copied()),
            start_time: self.parse_clock_opt(&form.start)?,
            end_time: self.parse_clock_opt(&form.end)?,
            start_recur: self.parse_date_opt(&form.start_recur)?,
            end_recur: self.parse_date_opt(&form.end_recur)?,
        })
    }

    /// Apply a drag or resize to the stored event it came from.
    ///
    /// A recurring series only moves within the day: its weekdays and bounds stay, and an
    /// all-day change keeps the stored times. Everything else is carried over from `stored`.
    pub fn from_widget_change(&self, change: &WidgetChange, stored: &Event) -> Event {
        let mut event = stored.clone();
        match (&change.group_id, &mut event.timing) {
            (Some(_), EventTiming::Recurring(series)) => {
                if !change.new_all_day {
                    series.start_time = Some(self.clock_of(change.new_start));
                    series.end_time = change.new_end.map(|end| self.clock_of(end));
                }
            }
            (_, timing) => {
                *timing = EventTiming::Single(SingleOccurrence {
                    start: change.new_start,
                    end: change.new_end.unwrap_or(change.new_start),
                });
            }
        }
        event.all_day = change.new_all_day;
        event
    }

    /// The change the widget reports when an event is dropped exactly where it was.
    ///
    /// For a recurring series, `occurrence` picks the day of the dragged occurrence.
    pub fn to_widget_change(&self, event: &Event, occurrence: Date) -> WidgetChange {
        let (new_start, new_end, group_id) = match &event.timing {
            EventTiming::Single(single) => (single.start, Some(single.end), None),
            EventTiming::Recurring(series) => (
                self.instant_on(occurrence, series.start_time.unwrap_or(Time::midnight())),
                series.end_time.map(|t| self.instant_on(occurrence, t)),
                Some(series.group_id.clone()),
            ),
        };

        WidgetChange {
            event_id: event.id.clone(),
            new_start,
            new_end,
            new_all_day: event.all_day,
            group_id,
            revert: None,
        }
    }

    /// Render a timestamp or a wall-clock time as zero-padded `HH:MM`.
    ///
    /// Absent or unreadable input renders as nothing.
    pub fn render_time(&self, input: Option<&str>) -> Option<String> {
        let input = input?.trim();
        if input.is_empty() {
            return None;
        }

        let time = match parse_clock(input) {
            Some(time) => time,
            None => self.clock_of(self.parse_instant(input).ok()?),
        };
        Some(format_clock(time))
    }

    /// Render a timestamp as `M/D/YYYY HH:MM` in the display zone.
    pub fn render_date(&self, ts: Timestamp) -> String {
        let zoned = self.zoned(ts);
        format!(
            "{}/{}/{} {}",
            zoned.month(),
            zoned.day(),
            zoned.year(),
            format_clock(zoned.time())
        )
    }

    /// Read a timestamp, a local date-time or a date (at midnight) from user input.
    pub fn parse_instant(&self, raw: &str) -> Result<Timestamp, ValidationError> {
        let raw = raw.trim();
        let invalid = || ValidationError::InvalidTimestamp(raw.to_owned());

        if let Ok(ts) = raw.parse::<Timestamp>() {
            return Ok(ts);
        }

        let local = match raw.parse::<civil::DateTime>() {
            Ok(dt) => dt,
            Err(_) => raw.parse::<Date>().map_err(|_| invalid())?.to_datetime(Time::midnight()),
        };
        local
            .to_zoned(self.tz.clone())
            .map(|z| z.timestamp())
            .map_err(|_| invalid())
    }

    fn parse_clock_opt(&self, raw: &str) -> Result<Option<Time>, ValidationError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(None);
        }

        match parse_clock(raw) {
            Some(time) => Ok(Some(to_minute(time))),
            None => self.parse_instant(raw).map(|ts| Some(self.clock_of(ts))),
        }
    }

    fn parse_date_opt(&self, raw: &str) -> Result<Option<Date>, ValidationError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(None);
        }

        if let Ok(date) = raw.parse::<Date>() {
            return Ok(Some(date));
        }
        self.parse_instant(raw)
            .map(|ts| Some(self.zoned(ts).date()))
            .map_err(|_| ValidationError::InvalidDate(raw.to_owned()))
    }

    fn zoned(&self, ts: Timestamp) -> Zoned {
        ts.to_zoned(self.tz.clone())
    }

    fn clock_of(&self, ts: Timestamp) -> Time {
        to_minute(self.zoned(ts).time())
    }

    fn instant_on(&self, date: Date, time: Time) -> Timestamp {
        let dt = date.to_datetime(time);
        match dt.to_zoned(self.tz.clone()) {
            Ok(zoned) => zoned.timestamp(),
            Err(e) => {
                tracing::warn!(%dt, err = %e, "cannot place local time in display zone, using UTC");
                dt.to_zoned(TimeZone::UTC)
                    .map(|z| z.timestamp())
                    .unwrap_or(Timestamp::UNIX_EPOCH)
            }
        }
    }
}

/// Cut a title down to [`TITLE_MAX_LEN`] characters.
pub fn clamp_title(title: &str) -> String {
    title.chars().take(TITLE_MAX_LEN).collect()
}

fn non_blank(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_owned())
}
