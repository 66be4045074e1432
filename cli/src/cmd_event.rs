// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command};
use jiff::civil::Weekday;
use sittersync_core::{Event, EventCodec, EventForm, ValidationError, WidgetChange};

use crate::arg::{CommonArgs, EventArgs};
use crate::event_formatter::EventFormatter;
use crate::session::Session;
use crate::util::{OutputFormat, Prompt};

#[derive(Debug, Clone)]
pub struct CmdEventList {
    pub schedule: Option<String>,
    pub output_format: OutputFormat,
}

impl CmdEventList {
    pub const NAME: &str = "list";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("ls")
            .about("List the events of one schedule, or of all of them")
            .arg(CommonArgs::schedule())
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            schedule: CommonArgs::get_schedule(matches),
            output_format: CommonArgs::get_output_format(matches),
        }
    }

    pub async fn run(self, session: &mut Session) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing events...");
        session.select(self.schedule.as_deref())?;
        let events = session.controller.active_view();
        print_events(session, &events, self.output_format)
    }
}

/// Optional event fields shared by `new` and `edit`.
#[derive(Debug, Clone, Default)]
pub struct EventFields {
    pub title: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub all_day: Option<bool>,
    pub repeat: Option<Vec<Weekday>>,
    pub from: Option<String>,
    pub until: Option<String>,
    pub notes: Option<String>,
    pub place: Option<String>,
    pub color: Option<String>,
}

impl EventFields {
    fn args(command: Command, positional_title: bool, start_required: bool) -> Command {
        command
            .arg(EventArgs::title(positional_title))
            .arg(EventArgs::start(start_required))
            .arg(EventArgs::end())
            .arg(EventArgs::all_day())
            .arg(EventArgs::repeat())
            .arg(EventArgs::from_date())
            .arg(EventArgs::until_date())
            .arg(EventArgs::notes())
            .arg(EventArgs::place())
            .arg(EventArgs::color())
    }

    fn from(matches: &ArgMatches) -> Self {
        Self {
            title: EventArgs::get_title(matches),
            start: EventArgs::get_start(matches),
            end: EventArgs::get_end(matches),
            all_day: EventArgs::get_all_day(matches),
            repeat: EventArgs::get_repeat(matches),
            from: EventArgs::get_from_date(matches),
            until: EventArgs::get_until_date(matches),
            notes: EventArgs::get_notes(matches),
            place: EventArgs::get_place(matches),
            color: EventArgs::get_color(matches),
        }
    }

    /// Overwrite the fields of `form` that were given.
    fn apply(self, form: &mut EventForm) {
        if let Some(title) = self.title {
            form.title = title;
        }
        if let Some(start) = self.start {
            form.start = start;
        }
        if let Some(end) = self.end {
            form.end = end;
        }
        if let Some(all_day) = self.all_day {
            form.all_day = all_day;
        }
        if let Some(days) = self.repeat {
            form.recurring = !days.is_empty();
            form.days_of_week = days;
        }
        if let Some(from) = self.from {
            form.start_recur = from;
        }
        if let Some(until) = self.until {
            form.end_recur = until;
        }
        if let Some(notes) = self.notes {
            form.notes = notes;
        }
        if let Some(place) = self.place {
            form.place = place;
        }
        if let Some(color) = self.color {
            form.colors.background_color = Some(color);
        }
    }
}

#[derive(Debug, Clone)]
pub struct CmdEventNew {
    pub schedule: Option<String>,
    pub fields: EventFields,
    pub output_format: OutputFormat,
}

impl CmdEventNew {
    pub const NAME: &str = "new";

    pub fn command() -> Command {
        let command = Command::new(Self::NAME)
            .alias("add")
            .about("Add an event to a schedule you can write to")
            .arg(CommonArgs::schedule());
        EventFields::args(command, true, true).arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            schedule: CommonArgs::get_schedule(matches),
            fields: EventFields::from(matches),
            output_format: CommonArgs::get_output_format(matches),
        }
    }

    pub async fn run(self, session: &mut Session) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "adding new event...");
        let mut form = EventForm {
            schedule_id: self
                .schedule
                .as_deref()
                .map(|s| session.resolve_schedule(s))
                .transpose()?,
            ..EventForm::default()
        };
        self.fields.apply(&mut form);
        if form.end.is_empty() {
            form.end = form.start.clone();
        }

        let event = session.controller.create_event(&form)?;
        print_events(session, &[event], self.output_format)
    }
}

#[derive(Debug, Clone)]
pub struct CmdEventEdit {
    pub id: String,
    pub schedule: Option<String>,
    pub fields: EventFields,
    pub output_format: OutputFormat,
}

impl CmdEventEdit {
    pub const NAME: &str = "edit";

    pub fn command() -> Command {
        let command = Command::new(Self::NAME)
            .about("Edit an event")
            .arg(EventArgs::id())
            .arg(CommonArgs::schedule());
        EventFields::args(command, false, false).arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: EventArgs::get_id(matches),
            schedule: CommonArgs::get_schedule(matches),
            fields: EventFields::from(matches),
            output_format: CommonArgs::get_output_format(matches),
        }
    }

    pub async fn run(self, session: &mut Session) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "editing event...");
        session.select(self.schedule.as_deref())?;
        let event = session.resolve_event(&self.id)?;

        let mut form = EventForm::from_event(&event);
        self.fields.apply(&mut form);

        let updated = session.controller.update_event(&event.id, &form)?;
        print_events(session, &[updated], self.output_format)
    }
}

#[derive(Debug, Clone)]
pub struct CmdEventMove {
    pub id: String,
    pub start: String,
    pub end: Option<String>,
    pub all_day: Option<bool>,
    pub schedule: Option<String>,
    pub output_format: OutputFormat,
}

impl CmdEventMove {
    pub const NAME: &str = "move";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("mv")
            .about("Move an event, as dragging it on the calendar does. A repeating event keeps its days")
            .arg(EventArgs::id())
            .arg(EventArgs::start(true))
            .arg(EventArgs::end())
            .arg(EventArgs::all_day())
            .arg(CommonArgs::schedule())
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: EventArgs::get_id(matches),
            start: EventArgs::get_start(matches).unwrap_or_default(),
            end: EventArgs::get_end(matches),
            all_day: EventArgs::get_all_day(matches),
            schedule: CommonArgs::get_schedule(matches),
            output_format: CommonArgs::get_output_format(matches),
        }
    }

    pub async fn run(self, session: &mut Session) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "moving event...");
        session.select(self.schedule.as_deref())?;
        let event = session.resolve_event(&self.id)?;

        let change = self.widget_change(session.controller.codec(), &event)?;
        let moved = session.controller.edit_event(change)?;
        print_events(session, &[moved], self.output_format)
    }

    /// The drag that moves `event` to the new start. Without an end the event keeps its length.
    fn widget_change(
        &self,
        codec: &EventCodec,
        event: &Event,
    ) -> Result<WidgetChange, ValidationError> {
        let new_start = codec.parse_instant(&self.start)?;
        let new_end = match self.end.as_deref() {
            Some(end) => Some(codec.parse_instant(end)?),
            None => event
                .duration()
                .and_then(|length| new_start.checked_add(length).ok()),
        };

        Ok(WidgetChange {
            event_id: event.id.clone(),
            new_start,
            new_end,
            new_all_day: self.all_day.unwrap_or(event.all_day),
            group_id: event.group_id().map(str::to_owned),
            revert: None,
        })
    }
}

#[derive(Debug, Clone)]
pub struct CmdEventDone {
    pub ids: Vec<String>,
    pub completed: bool,
    pub schedule: Option<String>,
    pub output_format: OutputFormat,
}

impl CmdEventDone {
    pub const NAME_DONE: &str = "done";
    pub const NAME_UNDONE: &str = "undone";

    pub fn command_done() -> Command {
        Self::command(Self::NAME_DONE, "Mark events as completed")
    }

    pub fn command_undone() -> Command {
        Self::command(Self::NAME_UNDONE, "Mark events as not completed")
    }

    fn command(name: &'static str, about: &'static str) -> Command {
        Command::new(name)
            .about(about)
            .arg(EventArgs::id().num_args(1..))
            .arg(CommonArgs::schedule())
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches, completed: bool) -> Self {
        Self {
            ids: matches
                .get_many::<String>("id")
                .map(|ids| ids.cloned().collect())
                .unwrap_or_default(),
            completed,
            schedule: CommonArgs::get_schedule(matches),
            output_format: CommonArgs::get_output_format(matches),
        }
    }

    pub async fn run(self, session: &mut Session) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "marking events...");
        session.select(self.schedule.as_deref())?;

        let mut events = Vec::with_capacity(self.ids.len());
        for id in &self.ids {
            let event = session.resolve_event(id)?;
            events.push(session.controller.complete_event(&event.id, self.completed)?);
        }
        print_events(session, &events, self.output_format)
    }
}

#[derive(Debug, Clone)]
pub struct CmdEventDelete {
    pub id: String,
    pub yes: bool,
    pub schedule: Option<String>,
}

impl CmdEventDelete {
    pub const NAME: &str = "delete";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("rm")
            .about("Delete an event")
            .arg(EventArgs::id())
            .arg(CommonArgs::schedule())
            .arg(CommonArgs::yes())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: EventArgs::get_id(matches),
            yes: CommonArgs::get_yes(matches),
            schedule: CommonArgs::get_schedule(matches),
        }
    }

    pub async fn run(self, session: &mut Session) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "deleting event...");
        session.select(self.schedule.as_deref())?;
        let event = session.resolve_event(&self.id)?;

        let mut prompt = Prompt {
            assume_yes: self.yes,
        };
        let deleted = session.controller.delete_event(&event.id, &mut prompt)?;
        println!("Deleted event '{}'", deleted.title);
        Ok(())
    }
}

fn print_events(
    session: &Session,
    events: &[Event],
    output_format: OutputFormat,
) -> Result<(), Box<dyn Error>> {
    let selected = session.controller.store().selection().schedule_id();
    let formatter = EventFormatter::new(session.controller.codec())
        .with_output_format(output_format)
        .with_fallback_schedule(selected);
    print!("{}", formatter.format(events)?);
    Ok(())
}
