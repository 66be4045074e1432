// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Custom assertion helpers for integration tests.

use sittersync_core::{Event, ScheduleStore};

/// Asserts that the events of a schedule have exactly the given ids, in order.
///
/// # Panics
///
/// Panics if the schedule is missing or its event ids differ.
pub fn assert_event_ids(store: &ScheduleStore, schedule_id: &str, expected: &[&str]) {
    let schedule = store
        .schedule(schedule_id)
        .unwrap_or_else(|| panic!("schedule {schedule_id} not loaded"));
    let ids: Vec<_> = schedule.events.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, expected, "events of {schedule_id} mismatch");
}

/// Asserts that a stored event equals `expected`.
///
/// # Panics
///
/// Panics if the event is missing or differs.
pub fn assert_stored(store: &ScheduleStore, schedule_id: &str, expected: &Event) {
    let stored = store
        .event(schedule_id, &expected.id)
        .unwrap_or_else(|| panic!("event {} not in {schedule_id}", expected.id));
    assert_eq!(stored, expected, "stored event mismatch");
}
