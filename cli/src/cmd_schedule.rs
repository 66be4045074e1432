// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command};
use sittersync_core::{Permission, Schedule, Users};

use crate::arg::{CommonArgs, ScheduleArgs};
use crate::schedule_formatter::ScheduleFormatter;
use crate::session::Session;
use crate::util::{OutputFormat, Prompt};

#[derive(Debug, Clone, Copy)]
pub struct CmdScheduleList {
    pub output_format: OutputFormat,
}

impl CmdScheduleList {
    pub const NAME: &str = "list";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("ls")
            .about("List the schedules you own or that are shared with you")
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            output_format: CommonArgs::get_output_format(matches),
        }
    }

    pub async fn run(self, session: &mut Session) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing schedules...");
        let schedules: Vec<&Schedule> = session.controller.store().schedules().iter().collect();
        print_schedules(session, &schedules, self.output_format)
    }
}

#[derive(Debug, Clone)]
pub struct CmdScheduleNew {
    pub title: String,
    pub output_format: OutputFormat,
}

impl CmdScheduleNew {
    pub const NAME: &str = "new";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("add")
            .about("Create a schedule owned by you")
            .arg(ScheduleArgs::title())
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            title: ScheduleArgs::get_title(matches),
            output_format: CommonArgs::get_output_format(matches),
        }
    }

    pub async fn run(self, session: &mut Session) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "creating schedule...");
        let title = self.title.trim();
        if title.is_empty() {
            return Err("Title is required".into());
        }

        let schedule = session.client().create_schedule(title).await?;
        session.controller.add_schedule(schedule.clone())?;
        print_schedules(session, &[&schedule], self.output_format)
    }
}

#[derive(Debug, Clone)]
pub struct CmdScheduleRename {
    pub id: String,
    pub title: String,
    pub output_format: OutputFormat,
}

impl CmdScheduleRename {
    pub const NAME: &str = "rename";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Rename a schedule you own")
            .arg(ScheduleArgs::id())
            .arg(ScheduleArgs::title())
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: ScheduleArgs::get_id(matches),
            title: ScheduleArgs::get_title(matches),
            output_format: CommonArgs::get_output_format(matches),
        }
    }

    pub async fn run(self, session: &mut Session) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "renaming schedule...");
        let id = session.resolve_schedule(&self.id)?;
        let schedule = session.controller.rename_schedule(&id, &self.title)?;
        print_schedules(session, &[&schedule], self.output_format)
    }
}

#[derive(Debug, Clone)]
pub struct CmdScheduleShare {
    pub id: String,
    pub email: String,
    pub permission: Permission,
    pub output_format: OutputFormat,
}

impl CmdScheduleShare {
    pub const NAME: &str = "share";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Share a schedule you own, or change what a sharee may do")
            .arg(ScheduleArgs::id())
            .arg(ScheduleArgs::email())
            .arg(ScheduleArgs::permission())
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: ScheduleArgs::get_id(matches),
            email: ScheduleArgs::get_email(matches),
            permission: ScheduleArgs::get_permission(matches),
            output_format: CommonArgs::get_output_format(matches),
        }
    }

    pub async fn run(self, session: &mut Session) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "sharing schedule...");
        let id = session.resolve_schedule(&self.id)?;
        let schedule = session
            .controller
            .share_schedule(&id, &self.email, self.permission)?;
        print_schedules(session, &[&schedule], self.output_format)
    }
}

#[derive(Debug, Clone)]
pub struct CmdScheduleUnshare {
    pub id: String,
    pub email: String,
    pub output_format: OutputFormat,
}

impl CmdScheduleUnshare {
    pub const NAME: &str = "unshare";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Stop sharing a schedule you own with someone")
            .arg(ScheduleArgs::id())
            .arg(ScheduleArgs::email())
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: ScheduleArgs::get_id(matches),
            email: ScheduleArgs::get_email(matches),
            output_format: CommonArgs::get_output_format(matches),
        }
    }

    pub async fn run(self, session: &mut Session) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "unsharing schedule...");
        let id = session.resolve_schedule(&self.id)?;
        let schedule = session.controller.unshare_schedule(&id, &self.email)?;
        print_schedules(session, &[&schedule], self.output_format)
    }
}

#[derive(Debug, Clone)]
pub struct CmdScheduleChown {
    pub id: String,
    pub email: String,
    pub yes: bool,
    pub output_format: OutputFormat,
}

impl CmdScheduleChown {
    pub const NAME: &str = "chown";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Hand a schedule you own over to someone else")
            .arg(ScheduleArgs::id())
            .arg(ScheduleArgs::email())
            .arg(CommonArgs::yes())
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: ScheduleArgs::get_id(matches),
            email: ScheduleArgs::get_email(matches),
            yes: CommonArgs::get_yes(matches),
            output_format: CommonArgs::get_output_format(matches),
        }
    }

    pub async fn run(self, session: &mut Session) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "changing schedule owner...");
        let id = session.resolve_schedule(&self.id)?;
        let users = handed_over(&session.schedule(&id)?.users, &self.email);

        let mut prompt = Prompt {
            assume_yes: self.yes,
        };
        let schedule = session
            .controller
            .update_schedule_users(&id, users, &mut prompt)?;
        print_schedules(session, &[&schedule], self.output_format)
    }
}

/// The users of a schedule once `new_owner` owns it. The new owner stops being a sharee.
fn handed_over(users: &Users, new_owner: &str) -> Users {
    let new_owner = new_owner.trim();
    Users {
        owner_email: new_owner.to_string(),
        sharing_with: users
            .sharing_with
            .iter()
            .filter(|s| s.user_email != new_owner)
            .cloned()
            .collect(),
    }
}

#[derive(Debug, Clone)]
pub struct CmdScheduleDelete {
    pub id: String,
    pub yes: bool,
}

impl CmdScheduleDelete {
    pub const NAME: &str = "delete";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("rm")
            .about("Delete a schedule you own, with all its events")
            .arg(ScheduleArgs::id())
            .arg(CommonArgs::yes())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: ScheduleArgs::get_id(matches),
            yes: CommonArgs::get_yes(matches),
        }
    }

    pub async fn run(self, session: &mut Session) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "deleting schedule...");
        let id = session.resolve_schedule(&self.id)?;
        let mut prompt = Prompt {
            assume_yes: self.yes,
        };
        let schedule = session.controller.delete_schedule(&id, &mut prompt)?;
        println!("Deleted schedule '{}'", schedule.title);
        Ok(())
    }
}

fn print_schedules(
    session: &Session,
    schedules: &[&Schedule],
    output_format: OutputFormat,
) -> Result<(), Box<dyn Error>> {
    let formatter = ScheduleFormatter::new(session.email()).with_output_format(output_format);
    print!("{}", formatter.format(schedules)?);
    Ok(())
}
