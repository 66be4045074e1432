// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use sittersync_client::{ConfiguredIdentity, RestPersistence, ScheduleClient};
use sittersync_core::{Event, MutationController, Schedule, ViewSelection};

use crate::config::Config;
use crate::util::resolve_id;

pub type Controller = MutationController<RestPersistence, ConfiguredIdentity>;

/// One command's worth of work: schedules fetched from the server, a controller over them,
/// and the writes still on their way back.
#[derive(Debug)]
pub struct Session {
    pub controller: Controller,
    email: String,
}

impl Session {
    /// Connect, fetch the caller's schedules and load them into a fresh controller.
    #[tracing::instrument(skip_all)]
    pub async fn open(config: Config) -> Result<Self, Box<dyn Error>> {
        let client = ScheduleClient::new(config.server.clone())?;
        let identity = ConfiguredIdentity::new(config.account.email.clone(), &config.server);
        let email = config.account.email.clone().unwrap_or_default();

        let persistence = RestPersistence::current(client.clone());
        let mut controller = MutationController::new(&config.core, identity, persistence)?;

        tracing::debug!("fetching schedules...");
        let schedules = client.own_schedules().await?;
        tracing::debug!(count = schedules.len(), "schedules loaded");
        controller.load(schedules);

        Ok(Self { controller, email })
    }

    /// The configured account email.
    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn client(&self) -> &ScheduleClient {
        self.controller.persistence().client()
    }

    /// Wait for every write dispatched during the session.
    pub async fn close(self) -> Result<(), Box<dyn Error>> {
        let failed = self.controller.persistence().flush().await;
        match failed {
            0 => Ok(()),
            1 => Err("1 change could not be saved to the server".into()),
            n => Err(format!("{n} changes could not be saved to the server").into()),
        }
    }

    /// Narrow the view to the schedule matching `prefix`, if one is given.
    pub fn select(&mut self, prefix: Option<&str>) -> Result<(), Box<dyn Error>> {
        let selection = match prefix {
            Some(prefix) if prefix != ViewSelection::ALL => {
                ViewSelection::Schedule(self.resolve_schedule(prefix)?)
            }
            _ => ViewSelection::All,
        };
        self.controller.select(selection)?;
        Ok(())
    }

    pub fn resolve_schedule(&self, prefix: &str) -> Result<String, Box<dyn Error>> {
        let schedules = self.controller.store().schedules();
        resolve_id("schedule", prefix, schedules.iter().map(|s| s.id.as_str()))
    }

    pub fn schedule(&self, id: &str) -> Result<&Schedule, Box<dyn Error>> {
        self.controller
            .store()
            .schedule(id)
            .ok_or_else(|| format!("Schedule not found: {id}").into())
    }

    /// The event matching `prefix` in the current view, tagged with its schedule.
    pub fn resolve_event(&self, prefix: &str) -> Result<Event, Box<dyn Error>> {
        let selected = self.controller.store().selection().schedule_id();
        let view: Vec<Event> = self
            .controller
            .store()
            .flatten()
            .into_iter()
            .filter(|e| selected.is_none() || e.parent_schedule_id.as_deref() == selected)
            .collect();

        let id = resolve_id("event", prefix, view.iter().map(|e| e.id.as_str()))?;
        view.into_iter()
            .find(|e| e.id == id)
            .ok_or_else(|| format!("Event not found: {id}").into())
    }
}
