// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Test doubles and data factories for integration tests.
//!
//! This module provides a persistence collaborator that records every dispatched request,
//! a calendar widget that tracks what it shows, and builders for schedules and forms.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use jiff::civil::Weekday;
use sittersync_core::{
    CalendarWidget, Config, Event, EventForm, MutationController, Permission, PersistRequest,
    Persistence, Schedule, ScheduleSet, Sharee, Users, VerifiedUser,
};

/// Persistence double that keeps every request it is handed.
#[derive(Debug, Clone, Default)]
pub struct RecordingPersistence {
    sent: Rc<RefCell<Vec<PersistRequest>>>,
}

impl RecordingPersistence {
    /// Requests dispatched so far, oldest first.
    pub fn sent(&self) -> Vec<PersistRequest> {
        self.sent.borrow().clone()
    }

    /// HTTP methods of the requests dispatched so far.
    pub fn methods(&self) -> Vec<&'static str> {
        self.sent.borrow().iter().map(PersistRequest::method).collect()
    }
}

impl Persistence for RecordingPersistence {
    fn dispatch(&self, request: PersistRequest) {
        self.sent.borrow_mut().push(request);
    }
}

/// Widget double that tracks the events it shows and how often it was redrawn.
#[derive(Debug, Default)]
pub struct FakeWidget {
    pub shown: BTreeMap<String, Event>,
    pub renders: usize,
}

impl CalendarWidget for FakeWidget {
    fn add_event(&mut self, event: &Event) {
        self.shown.insert(event.id.clone(), event.clone());
    }

    fn remove_event(&mut self, event_id: &str) {
        self.shown.remove(event_id);
    }

    fn render(&mut self) {
        self.renders += 1;
    }
}

pub type TestController = MutationController<RecordingPersistence, VerifiedUser>;

/// Configuration pinned to UTC so rendered times do not depend on the host.
#[must_use]
pub fn test_config() -> Config {
    Config {
        timezone: Some("UTC".to_string()),
        ..Config::default()
    }
}

/// A controller for `email` loaded with `schedules`, and a handle on what it persists.
pub fn controller_for(email: &str, schedules: ScheduleSet) -> (TestController, RecordingPersistence) {
    controller_with(test_config(), email, schedules)
}

pub fn controller_with(
    config: Config,
    email: &str,
    schedules: ScheduleSet,
) -> (TestController, RecordingPersistence) {
    let persistence = RecordingPersistence::default();
    let mut controller =
        MutationController::new(&config, VerifiedUser::new(email), persistence.clone()).unwrap();
    controller.load(schedules);
    (controller, persistence)
}

/// A schedule with the given owner, sharees and events.
#[must_use]
pub fn schedule(id: &str, owner: &str, sharees: &[(&str, Permission)], events: Vec<Event>) -> Schedule {
    Schedule {
        id: id.to_string(),
        title: format!("Schedule {id}"),
        users: Users {
            owner_email: owner.to_string(),
            sharing_with: sharees
                .iter()
                .map(|(email, permissions)| Sharee::new(*email, *permissions))
                .collect(),
        },
        events,
    }
}

/// `S1` owned by `a@x.com` and shared read-only with `b@x.com`.
#[must_use]
pub fn kids_schedules(events: Vec<Event>) -> ScheduleSet {
    ScheduleSet {
        owner_schedules: vec![schedule(
            "S1",
            "a@x.com",
            &[("b@x.com", Permission::Read)],
            events,
        )],
        shared_schedules: vec![],
    }
}

/// The same schedules as seen by the sharee.
#[must_use]
pub fn as_shared(set: ScheduleSet) -> ScheduleSet {
    ScheduleSet {
        owner_schedules: vec![],
        shared_schedules: set.owner_schedules,
    }
}

#[must_use]
pub fn dentist_form() -> EventForm {
    EventForm {
        title: "Dentist".to_string(),
        start: "2024-01-01T10:00Z".to_string(),
        end: "2024-01-01T11:00Z".to_string(),
        ..EventForm::default()
    }
}

#[must_use]
pub fn standup_form(days: &[Weekday]) -> EventForm {
    EventForm {
        title: "Standup".to_string(),
        start: "09:00".to_string(),
        end: "09:30".to_string(),
        recurring: true,
        days_of_week: days.to_vec(),
        ..EventForm::default()
    }
}

/// A stored single event, as the server would return it.
#[must_use]
pub fn stored_event(id: &str, title: &str) -> Event {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "title": title,
        "start": "2024-01-02T15:00:00Z",
        "end": "2024-01-02T16:00:00Z",
        "allDay": false,
        "extendedProps": { "completed": false }
    }))
    .unwrap()
}
