// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Recurring series workflow tests.

use jiff::civil::{self, Weekday};

use sittersync_core::{
    EventForm, EventTiming, MutationError, PersistRequest, ValidationError, WidgetChange,
};

use crate::common::{assert_event_ids, controller_for, kids_schedules, standup_form};

#[test]
fn series_without_weekdays_is_rejected() {
    let (mut controller, persistence) = controller_for("a@x.com", kids_schedules(vec![]));

    let result = controller.create_event(&standup_form(&[]));

    assert_eq!(
        result,
        Err(MutationError::Validation(ValidationError::EmptyRecurrence))
    );
    assert_event_ids(controller.store(), "S1", &[]);
    assert!(controller.undo_stack().is_empty());
    assert!(persistence.sent().is_empty());
}

#[test]
fn series_is_stored_compactly() {
    let (mut controller, persistence) = controller_for("a@x.com", kids_schedules(vec![]));

    let event = controller
        .create_event(&standup_form(&[Weekday::Tuesday, Weekday::Thursday]))
        .unwrap();

    assert_eq!(event.group_id(), Some("Standup09:0009:30false"));
    let sent = persistence.sent();
    let PersistRequest::CreateEvent { event: body, .. } = &sent[0] else {
        panic!("expected a create request");
    };
    let json = serde_json::to_value(body).unwrap();
    assert_eq!(json["daysOfWeek"], serde_json::json!([2, 4]));
    assert_eq!(json["startTime"], "09:00");
    assert_eq!(json["endTime"], "09:30");
    for absent in ["startRecur", "endRecur", "start", "end", "parentScheduleId"] {
        assert!(json.get(absent).is_none(), "{absent} should not be stored");
    }
}

#[test]
fn dragging_an_occurrence_moves_the_series_time_only() {
    // Arrange
    let (mut controller, _) = controller_for("a@x.com", kids_schedules(vec![]));
    let form = EventForm {
        start_recur: "2024-01-01".to_string(),
        ..standup_form(&[Weekday::Monday])
    };
    let series = controller.create_event(&form).unwrap();

    // Act
    let change = WidgetChange {
        event_id: series.id.clone(),
        new_start: "2024-01-15T10:00:00Z".parse().unwrap(),
        new_end: Some("2024-01-15T10:45:00Z".parse().unwrap()),
        new_all_day: false,
        group_id: series.group_id().map(str::to_owned),
        revert: None,
    };
    let moved = controller.edit_event(change).unwrap();

    // Assert
    let (EventTiming::Recurring(before), EventTiming::Recurring(after)) =
        (&series.timing, &moved.timing)
    else {
        panic!("expected recurring series");
    };
    assert_eq!(after.start_time, Some(civil::time(10, 0, 0, 0)));
    assert_eq!(after.end_time, Some(civil::time(10, 45, 0, 0)));
    assert_eq!(after.days_of_week, before.days_of_week);
    assert_eq!(after.start_recur, before.start_recur);
    assert_eq!(after.group_id, before.group_id);
}

#[test]
fn editing_a_series_keeps_its_group() {
    let (mut controller, _) = controller_for("a@x.com", kids_schedules(vec![]));
    let series = controller
        .create_event(&standup_form(&[Weekday::Monday]))
        .unwrap();

    let form = EventForm {
        title: "Morning sync".to_string(),
        start: "08:30".to_string(),
        ..EventForm::from_event(&series)
    };
    let updated = controller.update_event(&series.id, &form).unwrap();

    assert_eq!(updated.id, series.id);
    assert_eq!(updated.title, "Morning sync");
    assert_eq!(updated.group_id(), series.group_id());
}
