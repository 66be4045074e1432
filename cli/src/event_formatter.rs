// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use colored::Color;
use sittersync_core::{Event, EventCodec, EventTiming, RecurringSeries};

use crate::table::{Column, PaddingDirection, Table};
use crate::util::{OutputFormat, format_weekday};

/// Short ids are enough to tell events apart on screen.
const SHORT_ID_LEN: usize = 8;

#[derive(Debug)]
pub struct EventFormatter<'a> {
    codec: &'a EventCodec,
    columns: Vec<EventColumn>,
    format: OutputFormat,
    fallback_schedule: Option<String>,
}

impl<'a> EventFormatter<'a> {
    pub fn new(codec: &'a EventCodec) -> Self {
        Self {
            codec,
            columns: vec![
                EventColumn::Id,
                EventColumn::Schedule,
                EventColumn::When,
                EventColumn::Title,
                EventColumn::Done,
            ],
            format: OutputFormat::Table,
            fallback_schedule: None,
        }
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Schedule shown for events that carry no schedule tag, i.e. a single selected schedule.
    pub fn with_fallback_schedule(mut self, schedule_id: Option<&str>) -> Self {
        self.fallback_schedule = schedule_id.map(str::to_owned);
        self
    }

    pub fn format(&self, events: &[Event]) -> Result<String, serde_json::Error> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(events),
            OutputFormat::Table => {
                let rows: Vec<EventRow<'_>> = events
                    .iter()
                    .map(|event| EventRow {
                        schedule_id: event
                            .parent_schedule_id
                            .clone()
                            .or_else(|| self.fallback_schedule.clone())
                            .unwrap_or_default(),
                        when: describe_timing(self.codec, event),
                        event,
                    })
                    .collect();
                Ok(Table::new(&self.columns, &rows).to_string())
            }
        }
    }
}

#[derive(Debug)]
pub struct EventRow<'a> {
    event: &'a Event,
    schedule_id: String,
    when: String,
}

#[derive(Debug, Clone, Copy)]
pub enum EventColumn {
    Id,
    Schedule,
    When,
    Title,
    Done,
}

impl Column<EventRow<'_>> for EventColumn {
    fn name(&self) -> &'static str {
        match self {
            EventColumn::Id => "Id",
            EventColumn::Schedule => "Schedule",
            EventColumn::When => "When",
            EventColumn::Title => "Title",
            EventColumn::Done => "Done",
        }
    }

    fn format(&self, row: &EventRow<'_>) -> String {
        match self {
            EventColumn::Id => shorten(&row.event.id),
            EventColumn::Schedule => shorten(&row.schedule_id),
            EventColumn::When => row.when.clone(),
            EventColumn::Title => row.event.title.clone(),
            EventColumn::Done => match row.event.completed() {
                true => "✔".to_string(),
                false => String::new(),
            },
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        PaddingDirection::Left
    }

    fn get_color(&self, row: &EventRow<'_>) -> Option<Color> {
        match self {
            EventColumn::Id | EventColumn::Schedule => Some(Color::BrightBlack),
            _ if row.event.completed() => Some(Color::BrightBlack),
            EventColumn::Done => Some(Color::Green),
            _ => None,
        }
    }
}

fn shorten(id: &str) -> String {
    id.chars().take(SHORT_ID_LEN).collect()
}

/// `1/5/2024 09:00~10:00`, `1/5/2024 (all day)` or `Mon,Wed 09:00~09:30 from 2024-01-01`.
pub fn describe_timing(codec: &EventCodec, event: &Event) -> String {
    match &event.timing {
        EventTiming::Single(single) => {
            let start = codec.render_date(single.start);
            let end = codec.render_date(single.end);
            let (start_day, start_time) = start.split_once(' ').unwrap_or((&start, ""));
            let (end_day, end_time) = end.split_once(' ').unwrap_or((&end, ""));
            match (event.all_day, start_day == end_day) {
                (true, true) => format!("{start_day} (all day)"),
                (true, false) => format!("{start_day}~{end_day} (all day)"),
                (false, true) => format!("{start_day} {start_time}~{end_time}"),
                (false, false) => format!("{start}~{end}"),
            }
        }
        EventTiming::Recurring(series) => describe_series(series, event.all_day),
    }
}

fn describe_series(series: &RecurringSeries, all_day: bool) -> String {
    let days = series
        .days_of_week
        .iter()
        .map(|d| format_weekday(*d))
        .collect::<Vec<_>>()
        .join(",");

    let mut out = days;
    if all_day {
        out.push_str(" (all day)");
    } else if let Some(start) = series.start_time {
        out.push_str(&format!(" {:02}:{:02}", start.hour(), start.minute()));
        if let Some(end) = series.end_time {
            out.push_str(&format!("~{:02}:{:02}", end.hour(), end.minute()));
        }
    }
    if let Some(from) = series.start_recur {
        out.push_str(&format!(" from {from}"));
    }
    if let Some(until) = series.end_recur {
        out.push_str(&format!(" until {until}"));
    }
    out
}
