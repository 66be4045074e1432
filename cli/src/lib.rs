// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Command line front end of SitterSync.

mod arg;
mod cli;
mod cmd_event;
mod cmd_generate_completion;
mod cmd_schedule;
mod config;
mod event_formatter;
mod schedule_formatter;
mod session;
mod table;
mod util;

pub use crate::cli::{Cli, Commands, run};
pub use crate::config::{Account, Config, parse_config};
