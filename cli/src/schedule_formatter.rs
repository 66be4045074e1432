// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use colored::Color;
use sittersync_core::{Role, Schedule, role_of};

use crate::table::{Column, PaddingDirection, Table};
use crate::util::OutputFormat;

#[derive(Debug)]
pub struct ScheduleFormatter<'a> {
    email: &'a str,
    columns: Vec<ScheduleColumn>,
    format: OutputFormat,
}

impl<'a> ScheduleFormatter<'a> {
    /// Formatter showing each schedule from the point of view of `email`.
    pub fn new(email: &'a str) -> Self {
        Self {
            email,
            columns: vec![
                ScheduleColumn::Id,
                ScheduleColumn::Role,
                ScheduleColumn::Events,
                ScheduleColumn::Title,
                ScheduleColumn::SharedWith,
            ],
            format: OutputFormat::Table,
        }
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn format(&self, schedules: &[&Schedule]) -> Result<String, serde_json::Error> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(schedules),
            OutputFormat::Table => {
                let rows: Vec<ScheduleRow<'_>> = schedules
                    .iter()
                    .map(|schedule| ScheduleRow {
                        role: role_of(self.email, schedule),
                        schedule,
                    })
                    .collect();
                Ok(Table::new(&self.columns, &rows).to_string())
            }
        }
    }
}

#[derive(Debug)]
pub struct ScheduleRow<'a> {
    schedule: &'a Schedule,
    role: Option<Role>,
}

#[derive(Debug, Clone, Copy)]
pub enum ScheduleColumn {
    Id,
    Role,
    Events,
    Title,
    SharedWith,
}

impl Column<ScheduleRow<'_>> for ScheduleColumn {
    fn name(&self) -> &'static str {
        match self {
            ScheduleColumn::Id => "Id",
            ScheduleColumn::Role => "Role",
            ScheduleColumn::Events => "Events",
            ScheduleColumn::Title => "Title",
            ScheduleColumn::SharedWith => "Shared with",
        }
    }

    fn format(&self, row: &ScheduleRow<'_>) -> String {
        let schedule = row.schedule;
        match self {
            ScheduleColumn::Id => schedule.id.clone(),
            ScheduleColumn::Role => row.role.map(|r| r.to_string()).unwrap_or_default(),
            ScheduleColumn::Events => schedule.events.len().to_string(),
            ScheduleColumn::Title => schedule.title.clone(),
            ScheduleColumn::SharedWith => match row.role {
                // sharees see who owns the schedule instead
                Some(Role::Sharee(_)) => format!("owned by {}", schedule.users.owner_email),
                _ => schedule
                    .users
                    .sharing_with
                    .iter()
                    .map(|s| format!("{} ({})", s.user_email, s.permissions))
                    .collect::<Vec<_>>()
                    .join(", "),
            },
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        match self {
            ScheduleColumn::Events => PaddingDirection::Right,
            _ => PaddingDirection::Left,
        }
    }

    fn get_color(&self, row: &ScheduleRow<'_>) -> Option<Color> {
        match (self, row.role) {
            (ScheduleColumn::Id, _) => Some(Color::BrightBlack),
            (ScheduleColumn::Role, Some(Role::Owner)) => Some(Color::Green),
            (ScheduleColumn::Role, Some(Role::Sharee(_))) => Some(Color::Cyan),
            _ => None,
        }
    }
}
