// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use crate::aggregate::{self, ViewSelection};
use crate::error::MutationError;
use crate::event::Event;
use crate::schedule::{Schedule, ScheduleKind, ScheduleSet};

/// Local copy of the schedules a user can see, plus the selected view.
///
/// Events are held without their schedule tag; the tag only appears on derived views.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleStore {
    schedules: ScheduleSet,
    selection: ViewSelection,
}

impl ScheduleStore {
    pub fn new(schedules: ScheduleSet) -> Self {
        let mut store = Self::default();
        store.load(schedules);
        store
    }

    pub fn schedules(&self) -> &ScheduleSet {
        &self.schedules
    }

    pub fn selection(&self) -> &ViewSelection {
        &self.selection
    }

    pub fn schedule(&self, id: &str) -> Option<&Schedule> {
        self.schedules.find(id)
    }

    /// Replace everything with a fresh fetch. The selection survives if its schedule does.
    pub fn load(&mut self, mut schedules: ScheduleSet) {
        for schedule in schedules
            .owner_schedules
            .iter_mut()
            .chain(schedules.shared_schedules.iter_mut())
        {
            strip_tags(schedule);
        }
        self.schedules = schedules;

        if let Some(id) = self.selection.schedule_id()
            && self.schedules.find(id).is_none()
        {
            tracing::debug!(schedule_id = id, "selected schedule is gone, showing all");
            self.selection = ViewSelection::All;
        }
    }

    /// Switch the view. Selecting an unknown schedule is an error.
    pub fn select(&mut self, selection: ViewSelection) -> Result<(), MutationError> {
        if let Some(id) = selection.schedule_id()
            && self.schedules.find(id).is_none()
        {
            return Err(MutationError::ScheduleNotFound(id.to_owned()));
        }
        self.selection = selection;
        Ok(())
    }

    /// Add a schedule to the owned or shared list. An existing schedule with the same id is replaced.
    pub fn insert_schedule(&mut self, kind: ScheduleKind, mut schedule: Schedule) {
        strip_tags(&mut schedule);
        self.remove_schedule(&schedule.id);
        match kind {
            ScheduleKind::Owner => self.schedules.owner_schedules.push(schedule),
            ScheduleKind::Shared => self.schedules.shared_schedules.push(schedule),
        }
    }

    /// Replace a schedule in place, returning the previous version.
    pub fn replace_schedule(&mut self, mut schedule: Schedule) -> Result<Schedule, MutationError> {
        strip_tags(&mut schedule);
        let slot = self
            .schedules
            .find_mut(&schedule.id)
            .ok_or_else(|| MutationError::ScheduleNotFound(schedule.id.clone()))?;
        Ok(std::mem::replace(slot, schedule))
    }

    /// Drop a schedule. Removing the selected schedule resets the view to all schedules.
    pub fn remove_schedule(&mut self, id: &str) -> Option<(ScheduleKind, Schedule)> {
        let removed = take_by_id(&mut self.schedules.owner_schedules, id)
            .map(|s| (ScheduleKind::Owner, s))
            .or_else(|| {
                take_by_id(&mut self.schedules.shared_schedules, id).map(|s| (ScheduleKind::Shared, s))
            });

        if removed.is_some() && self.selection.schedule_id() == Some(id) {
            self.selection = ViewSelection::All;
        }
        removed
    }

    pub fn event(&self, schedule_id: &str, event_id: &str) -> Option<&Event> {
        self.schedule(schedule_id)?.event(event_id)
    }

    /// Append an event to a schedule.
    pub fn insert_event(&mut self, schedule_id: &str, event: Event) -> Result<(), MutationError> {
        let schedule = self.schedule_mut(schedule_id)?;
        schedule.events.push(event.detached());
        Ok(())
    }

    /// Put an event back at `index` of a schedule, or at the end if the schedule got shorter.
    pub fn insert_event_at(
        &mut self,
        schedule_id: &str,
        index: usize,
        event: Event,
    ) -> Result<(), MutationError> {
        let events = &mut self.schedule_mut(schedule_id)?.events;
        let index = index.min(events.len());
        events.insert(index, event.detached());
        Ok(())
    }

    /// Position of an event within its schedule.
    pub fn event_position(&self, schedule_id: &str, event_id: &str) -> Option<usize> {
        self.schedule(schedule_id)?
            .events
            .iter()
            .position(|e| e.id == event_id)
    }

    /// Replace an event of a schedule, returning the previous version.
    pub fn replace_event(&mut self, schedule_id: &str, event: Event) -> Result<Event, MutationError> {
        let slot = self
            .schedule_mut(schedule_id)?
            .event_mut(&event.id)
            .ok_or_else(|| MutationError::EventNotFound(event.id.clone()))?;
        Ok(std::mem::replace(slot, event.detached()))
    }

    /// Remove an event from a schedule.
    pub fn remove_event(&mut self, schedule_id: &str, event_id: &str) -> Result<Event, MutationError> {
        let schedule = self.schedule_mut(schedule_id)?;
        take_event(&mut schedule.events, event_id)
            .ok_or_else(|| MutationError::EventNotFound(event_id.to_owned()))
    }

    /// Every event the user can read, tagged with its schedule.
    pub fn flatten(&self) -> Vec<Event> {
        aggregate::flatten_events(
            &self.schedules.owner_schedules,
            &self.schedules.shared_schedules,
        )
    }

    /// Tagged events of the schedules `email` can write to.
    pub fn writeable(&self, email: &str) -> Vec<Event> {
        aggregate::writeable_events(&self.flatten(), &self.schedules, email)
    }

    /// Events of the selected view.
    pub fn active_view(&self) -> Vec<Event> {
        aggregate::active_view(&self.selection, &self.schedules)
    }

    fn schedule_mut(&mut self, id: &str) -> Result<&mut Schedule, MutationError> {
        self.schedules
            .find_mut(id)
            .ok_or_else(|| MutationError::ScheduleNotFound(id.to_owned()))
    }
}

fn strip_tags(schedule: &mut Schedule) {
    for event in &mut schedule.events {
        event.parent_schedule_id = None;
    }
}

fn take_by_id(schedules: &mut Vec<Schedule>, id: &str) -> Option<Schedule> {
    let index = schedules.iter().position(|s| s.id == id)?;
    Some(schedules.remove(index))
}

fn take_event(events: &mut Vec<Event>, id: &str) -> Option<Event> {
    let index = events.iter().position(|e| e.id == id)?;
    Some(events.remove(index))
}
