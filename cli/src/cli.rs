// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, ffi::OsString, path::PathBuf};

use clap::{ArgMatches, Command, ValueHint, arg, builder::styling, crate_version, value_parser};
use colored::Colorize;
use futures::{FutureExt, future::LocalBoxFuture};
use sittersync_core::APP_NAME;
use tracing_subscriber::EnvFilter;

use crate::cmd_event::{
    CmdEventDelete, CmdEventDone, CmdEventEdit, CmdEventList, CmdEventMove, CmdEventNew,
};
use crate::cmd_generate_completion::CmdGenerateCompletion;
use crate::cmd_schedule::{
    CmdScheduleChown, CmdScheduleDelete, CmdScheduleList, CmdScheduleNew, CmdScheduleRename,
    CmdScheduleShare, CmdScheduleUnshare,
};
use crate::config::parse_config;
use crate::session::Session;

const LOG_ENV: &str = "SITTERSYNC_LOG";

/// Run the SitterSync command-line interface.
pub async fn run() -> Result<(), Box<dyn Error>> {
    init_tracing();
    match Cli::parse() {
        Ok(cli) => {
            if let Err(e) = cli.run().await {
                println!("{} {}", "Error:".red(), e);
            }
        }
        Err(e) => println!("{} {}", "Error:".red(), e),
    };
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Command-line interface
#[derive(Debug)]
pub struct Cli {
    /// Path to the configuration file
    pub config: Option<PathBuf>,

    /// The command to execute
    pub command: Commands,
}

impl Cli {
    /// Create the command-line interface
    pub fn command() -> Command {
        const STYLES: styling::Styles = styling::Styles::styled()
            .header(styling::AnsiColor::Green.on_default().bold())
            .usage(styling::AnsiColor::Green.on_default().bold())
            .literal(styling::AnsiColor::Blue.on_default().bold())
            .placeholder(styling::AnsiColor::Cyan.on_default());

        Command::new(APP_NAME)
            .about("Shared schedules for the people who look after your kids.")
            .author("Zexin Yuan <aim@yzx9.xyz>")
            .version(crate_version!())
            .styles(STYLES)
            .subcommand_required(true)
            .arg_required_else_help(true)
            .arg(
                arg!(-c --config [CONFIG] "Path to the configuration file")
                    .long_help(
                        "\
Path to the configuration file. Defaults to $SITTERSYNC_CONFIG, then \
$XDG_CONFIG_HOME/sittersync/config.toml on Linux and MacOS, \
%LOCALAPPDATA%/sittersync/config.toml on Windows.",
                    )
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath),
            )
            .subcommand(
                Command::new("schedule")
                    .alias("s")
                    .about("Manage your schedules and who they are shared with")
                    .arg_required_else_help(true)
                    .subcommand_required(true)
                    .subcommand(CmdScheduleList::command())
                    .subcommand(CmdScheduleNew::command())
                    .subcommand(CmdScheduleRename::command())
                    .subcommand(CmdScheduleShare::command())
                    .subcommand(CmdScheduleUnshare::command())
                    .subcommand(CmdScheduleChown::command())
                    .subcommand(CmdScheduleDelete::command()),
            )
            .subcommand(
                Command::new("event")
                    .alias("e")
                    .about("Manage the events of your schedules")
                    .arg_required_else_help(true)
                    .subcommand_required(true)
                    .subcommand(CmdEventList::command())
                    .subcommand(CmdEventNew::command())
                    .subcommand(CmdEventEdit::command())
                    .subcommand(CmdEventMove::command())
                    .subcommand(CmdEventDone::command_done())
                    .subcommand(CmdEventDone::command_undone())
                    .subcommand(CmdEventDelete::command()),
            )
            .subcommand(CmdGenerateCompletion::command())
    }

    /// Parse the command-line arguments
    pub fn parse() -> Result<Self, Box<dyn Error>> {
        let commands = Self::command();
        let matches = commands.get_matches();
        Self::from(&matches)
    }

    /// Parse the specified arguments
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, Box<dyn Error>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let commands = Self::command();
        let matches = commands.try_get_matches_from(args)?;
        Self::from(&matches)
    }

    /// Create a CLI instance from the `ArgMatches`
    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        use Commands::*;
        let command = match matches.subcommand() {
            Some(("schedule", matches)) => match matches.subcommand() {
                Some((CmdScheduleList::NAME, m)) => ScheduleList(CmdScheduleList::from(m)),
                Some((CmdScheduleNew::NAME, m)) => ScheduleNew(CmdScheduleNew::from(m)),
                Some((CmdScheduleRename::NAME, m)) => ScheduleRename(CmdScheduleRename::from(m)),
                Some((CmdScheduleShare::NAME, m)) => ScheduleShare(CmdScheduleShare::from(m)),
                Some((CmdScheduleUnshare::NAME, m)) => {
                    ScheduleUnshare(CmdScheduleUnshare::from(m))
                }
                Some((CmdScheduleChown::NAME, m)) => ScheduleChown(CmdScheduleChown::from(m)),
                Some((CmdScheduleDelete::NAME, m)) => ScheduleDelete(CmdScheduleDelete::from(m)),
                _ => return Err("Unknown schedule command".into()),
            },
            Some(("event", matches)) => match matches.subcommand() {
                Some((CmdEventList::NAME, m)) => EventList(CmdEventList::from(m)),
                Some((CmdEventNew::NAME, m)) => EventNew(CmdEventNew::from(m)),
                Some((CmdEventEdit::NAME, m)) => EventEdit(CmdEventEdit::from(m)),
                Some((CmdEventMove::NAME, m)) => EventMove(CmdEventMove::from(m)),
                Some((CmdEventDone::NAME_DONE, m)) => EventDone(CmdEventDone::from(m, true)),
                Some((CmdEventDone::NAME_UNDONE, m)) => EventDone(CmdEventDone::from(m, false)),
                Some((CmdEventDelete::NAME, m)) => EventDelete(CmdEventDelete::from(m)),
                _ => return Err("Unknown event command".into()),
            },
            Some((CmdGenerateCompletion::NAME, matches)) => {
                GenerateCompletion(CmdGenerateCompletion::from(matches)?)
            }
            _ => return Err("No command given".into()),
        };

        let config = matches.get_one("config").cloned();
        Ok(Cli { config, command })
    }

    /// Run the command
    pub async fn run(self) -> Result<(), Box<dyn Error>> {
        self.command.run(self.config).await
    }
}

/// The commands available in the CLI
#[derive(Debug, Clone)]
pub enum Commands {
    /// List schedules
    ScheduleList(CmdScheduleList),

    /// Create a schedule
    ScheduleNew(CmdScheduleNew),

    /// Rename a schedule
    ScheduleRename(CmdScheduleRename),

    /// Share a schedule
    ScheduleShare(CmdScheduleShare),

    /// Stop sharing a schedule
    ScheduleUnshare(CmdScheduleUnshare),

    /// Change the owner of a schedule
    ScheduleChown(CmdScheduleChown),

    /// Delete a schedule
    ScheduleDelete(CmdScheduleDelete),

    /// List events
    EventList(CmdEventList),

    /// Add an event
    EventNew(CmdEventNew),

    /// Edit an event
    EventEdit(CmdEventEdit),

    /// Move an event
    EventMove(CmdEventMove),

    /// Mark events as done or undone
    EventDone(CmdEventDone),

    /// Delete an event
    EventDelete(CmdEventDelete),

    /// Generate shell completion
    GenerateCompletion(CmdGenerateCompletion),
}

impl Commands {
    /// Run the command with the given configuration
    #[rustfmt::skip]
    pub async fn run(self, config: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
        use Commands::*;
        match self {
            ScheduleList(a)    => Self::run_with(config, |x| a.run(x).boxed_local()).await,
            ScheduleNew(a)     => Self::run_with(config, |x| a.run(x).boxed_local()).await,
            ScheduleRename(a)  => Self::run_with(config, |x| a.run(x).boxed_local()).await,
            ScheduleShare(a)   => Self::run_with(config, |x| a.run(x).boxed_local()).await,
            ScheduleUnshare(a) => Self::run_with(config, |x| a.run(x).boxed_local()).await,
            ScheduleChown(a)   => Self::run_with(config, |x| a.run(x).boxed_local()).await,
            ScheduleDelete(a)  => Self::run_with(config, |x| a.run(x).boxed_local()).await,
            EventList(a)       => Self::run_with(config, |x| a.run(x).boxed_local()).await,
            EventNew(a)        => Self::run_with(config, |x| a.run(x).boxed_local()).await,
            EventEdit(a)       => Self::run_with(config, |x| a.run(x).boxed_local()).await,
            EventMove(a)       => Self::run_with(config, |x| a.run(x).boxed_local()).await,
            EventDone(a)       => Self::run_with(config, |x| a.run(x).boxed_local()).await,
            EventDelete(a)     => Self::run_with(config, |x| a.run(x).boxed_local()).await,
            GenerateCompletion(a) => a.run(),
        }
    }

    async fn run_with<F>(config: Option<PathBuf>, f: F) -> Result<(), Box<dyn Error>>
    where
        F: for<'a> FnOnce(&'a mut Session) -> LocalBoxFuture<'a, Result<(), Box<dyn Error>>>,
    {
        tracing::debug!("parsing configuration...");
        let config = parse_config(config).await?;
        let mut session = Session::open(config).await?;

        // writes already dispatched still have to land, even if the command failed
        let result = f(&mut session).await;
        let closed = session.close().await;
        result.and(closed)
    }
}
