// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use jiff::civil::Weekday;
use sittersync_core::Confirm;

/// The output format for commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
}

/// Asks on the terminal, unless `--yes` answered already.
#[derive(Debug, Clone, Copy)]
pub struct Prompt {
    pub assume_yes: bool,
}

impl Confirm for Prompt {
    fn confirm(&mut self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        match dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
        {
            Ok(answer) => answer,
            Err(err) => {
                tracing::warn!(%err, "no answer, treating as declined");
                false
            }
        }
    }
}

/// Parse a weekday: `mon`, `monday`, or its offset from Sunday (`0`..`6`).
pub fn parse_weekday(s: &str) -> Result<Weekday, String> {
    let lower = s.trim().to_lowercase();
    let day = match lower.as_str() {
        "0" | "sun" | "sunday" => Weekday::Sunday,
        "1" | "mon" | "monday" => Weekday::Monday,
        "2" | "tue" | "tuesday" => Weekday::Tuesday,
        "3" | "wed" | "wednesday" => Weekday::Wednesday,
        "4" | "thu" | "thursday" => Weekday::Thursday,
        "5" | "fri" | "friday" => Weekday::Friday,
        "6" | "sat" | "saturday" => Weekday::Saturday,
        _ => return Err(format!("Invalid weekday: {s}")),
    };
    Ok(day)
}

pub fn format_weekday(day: Weekday) -> &'static str {
    match day {
        Weekday::Sunday => "Sun",
        Weekday::Monday => "Mon",
        Weekday::Tuesday => "Tue",
        Weekday::Wednesday => "Wed",
        Weekday::Thursday => "Thu",
        Weekday::Friday => "Fri",
        Weekday::Saturday => "Sat",
    }
}

/// Find the one id that equals `input` or starts with it.
pub fn resolve_id<'a>(
    kind: &str,
    input: &str,
    ids: impl IntoIterator<Item = &'a str>,
) -> Result<String, Box<dyn Error>> {
    let mut matches = Vec::new();
    for id in ids {
        if id == input {
            return Ok(id.to_string());
        }
        if id.starts_with(input) {
            matches.push(id);
        }
    }

    match matches.as_slice() {
        [id] => Ok((*id).to_string()),
        [] => Err(format!("No {kind} matches '{input}'").into()),
        _ => Err(format!("'{input}' matches {} {kind}s, be more specific", matches.len()).into()),
    }
}
