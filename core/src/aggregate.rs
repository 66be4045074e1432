// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashSet;
use std::fmt::{self, Display};

use crate::event::Event;
use crate::permission;
use crate::schedule::{Schedule, ScheduleSet};

/// Which schedules the calendar currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ViewSelection {
    /// Every visible schedule.
    #[default]
    All,

    /// One schedule by id.
    Schedule(String),
}

impl ViewSelection {
    /// Sentinel used on the wire and on the command line for [`ViewSelection::All`].
    pub const ALL: &'static str = "all";

    pub fn schedule_id(&self) -> Option<&str> {
        match self {
            ViewSelection::All => None,
            ViewSelection::Schedule(id) => Some(id),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, ViewSelection::All)
    }
}

impl From<&str> for ViewSelection {
    fn from(value: &str) -> Self {
        match value {
            Self::ALL => ViewSelection::All,
            id => ViewSelection::Schedule(id.to_owned()),
        }
    }
}

impl Display for ViewSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewSelection::All => write!(f, "{}", Self::ALL),
            ViewSelection::Schedule(id) => write!(f, "{id}"),
        }
    }
}

/// All events of owned schedules followed by shared ones, each tagged with its schedule id.
///
/// A schedule listed twice contributes its events once.
pub fn flatten_events(owner: &[Schedule], shared: &[Schedule]) -> Vec<Event> {
    let mut seen = HashSet::new();
    owner
        .iter()
        .chain(shared.iter())
        .filter(|schedule| seen.insert(schedule.id.as_str()))
        .flat_map(|schedule| {
            schedule
                .events
                .iter()
                .map(|e| e.clone().with_parent(schedule.id.clone()))
        })
        .collect()
}

/// The subset of `flattened` whose schedule `email` can write to, in the same order.
pub fn writeable_events(flattened: &[Event], schedules: &ScheduleSet, email: &str) -> Vec<Event> {
    let writeable: HashSet<&str> = schedules
        .iter()
        .filter(|s| permission::can_write(email, s))
        .map(|s| s.id.as_str())
        .collect();

    flattened
        .iter()
        .filter(|e| {
            e.parent_schedule_id
                .as_deref()
                .is_some_and(|id| writeable.contains(id))
        })
        .cloned()
        .collect()
}

/// Events the calendar renders for `selection`.
///
/// Only the `All` view tags events with their schedule; a single schedule yields its stored
/// events as they are. Selecting a schedule that is not loaded yields an empty view.
pub fn active_view(selection: &ViewSelection, schedules: &ScheduleSet) -> Vec<Event> {
    match selection {
        ViewSelection::All => {
            flatten_events(&schedules.owner_schedules, &schedules.shared_schedules)
        }
        ViewSelection::Schedule(id) => schedules
            .find(id)
            .map(|s| s.events.clone())
            .unwrap_or_default(),
    }
}
