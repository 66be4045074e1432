// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use clap::{Arg, ArgAction, ArgMatches, arg, value_parser};
use jiff::civil::Weekday;
use sittersync_core::Permission;

use crate::util::{OutputFormat, parse_weekday};

#[derive(Debug, Clone, Copy)]
pub struct CommonArgs;

impl CommonArgs {
    pub fn output_format() -> Arg {
        arg!(--"output-format" <FORMAT> "Output format")
            .value_parser(value_parser!(OutputFormat))
            .default_value("table")
    }

    pub fn get_output_format(matches: &ArgMatches) -> OutputFormat {
        matches
            .get_one("output-format")
            .copied()
            .unwrap_or(OutputFormat::Table)
    }

    pub fn yes() -> Arg {
        arg!(-y --yes "Do not ask for confirmation")
    }

    pub fn get_yes(matches: &ArgMatches) -> bool {
        matches.get_flag("yes")
    }

    pub fn schedule() -> Arg {
        arg!(-s --schedule <SCHEDULE> "Id (or id prefix) of the schedule, defaults to all")
    }

    pub fn get_schedule(matches: &ArgMatches) -> Option<String> {
        matches.get_one("schedule").cloned()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ScheduleArgs;

impl ScheduleArgs {
    pub fn id() -> Arg {
        arg!(id: <ID> "Id (or id prefix) of the schedule")
    }

    pub fn get_id(matches: &ArgMatches) -> String {
        matches.get_one::<String>("id").cloned().unwrap_or_default()
    }

    pub fn title() -> Arg {
        arg!(title: <TITLE> "Title of the schedule")
    }

    pub fn get_title(matches: &ArgMatches) -> String {
        matches.get_one::<String>("title").cloned().unwrap_or_default()
    }

    pub fn email() -> Arg {
        arg!(email: <EMAIL> "Email of the user")
    }

    pub fn get_email(matches: &ArgMatches) -> String {
        matches.get_one::<String>("email").cloned().unwrap_or_default()
    }

    pub fn permission() -> Arg {
        arg!(-p --permission <PERMISSION> "What the user may do")
            .value_parser(value_parser!(Permission))
            .default_value("read")
    }

    pub fn get_permission(matches: &ArgMatches) -> Permission {
        matches
            .get_one("permission")
            .copied()
            .unwrap_or(Permission::Read)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct EventArgs;

impl EventArgs {
    pub fn id() -> Arg {
        arg!(id: <ID> "Id (or id prefix) of the event")
    }

    pub fn get_id(matches: &ArgMatches) -> String {
        matches.get_one::<String>("id").cloned().unwrap_or_default()
    }

    pub fn title(positional: bool) -> Arg {
        if positional {
            arg!(title: <TITLE> "Title of the event")
        } else {
            arg!(title: -t --title <TITLE> "Title of the event")
        }
    }

    pub fn get_title(matches: &ArgMatches) -> Option<String> {
        matches.get_one("title").cloned()
    }

    pub fn start(required: bool) -> Arg {
        arg!(--start <START> "Start: YYYY-MM-DD, YYYY-MM-DD HH:MM, RFC 3339, or HH:MM when repeating")
            .required(required)
    }

    pub fn get_start(matches: &ArgMatches) -> Option<String> {
        matches.get_one("start").cloned()
    }

    pub fn end() -> Arg {
        arg!(--end <END> "End, in the same formats as the start")
    }

    pub fn get_end(matches: &ArgMatches) -> Option<String> {
        matches.get_one("end").cloned()
    }

    pub fn all_day() -> Arg {
        arg!(--"all-day" [ALL_DAY] "Whether the event takes the whole day")
            .value_parser(value_parser!(bool))
            .num_args(0..=1)
            .default_missing_value("true")
    }

    pub fn get_all_day(matches: &ArgMatches) -> Option<bool> {
        matches.get_one("all-day").copied()
    }

    pub fn repeat() -> Arg {
        arg!(--repeat <DAYS> "Repeat weekly on these days, e.g. mon,wed")
            .value_delimiter(',')
            .value_parser(parse_weekday)
            .action(ArgAction::Append)
    }

    pub fn get_repeat(matches: &ArgMatches) -> Option<Vec<Weekday>> {
        matches
            .get_many::<Weekday>("repeat")
            .map(|days| days.copied().collect())
    }

    pub fn from_date() -> Arg {
        arg!(--from <DATE> "First day of a repeating event, YYYY-MM-DD")
    }

    pub fn get_from_date(matches: &ArgMatches) -> Option<String> {
        matches.get_one("from").cloned()
    }

    pub fn until_date() -> Arg {
        arg!(--until <DATE> "Last day of a repeating event, YYYY-MM-DD")
    }

    pub fn get_until_date(matches: &ArgMatches) -> Option<String> {
        matches.get_one("until").cloned()
    }

    pub fn notes() -> Arg {
        arg!(--notes <NOTES> "Notes on the event")
    }

    pub fn get_notes(matches: &ArgMatches) -> Option<String> {
        matches.get_one("notes").cloned()
    }

    pub fn place() -> Arg {
        arg!(--place <PLACE> "Where the event takes place")
    }

    pub fn get_place(matches: &ArgMatches) -> Option<String> {
        matches.get_one("place").cloned()
    }

    pub fn color() -> Arg {
        arg!(--color <COLOR> "Background color, e.g. #3788d8")
    }

    pub fn get_color(matches: &ArgMatches) -> Option<String> {
        matches.get_one("color").cloned()
    }
}
