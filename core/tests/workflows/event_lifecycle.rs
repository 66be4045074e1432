// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Event lifecycle workflow tests: create, move, edit, complete and delete.

use std::cell::Cell;
use std::rc::Rc;

use sittersync_core::{
    EventForm, EventTiming, MutationError, Permission, PersistRequest, ScheduleSet,
    SingleOccurrence, UndoAction, ValidationError, ViewSelection, WidgetChange,
};

use crate::common::{
    assert_event_ids, assert_stored, controller_for, dentist_form, kids_schedules, schedule,
    stored_event,
};

#[test]
fn create_appends_event_and_records_add() {
    // Arrange
    let (mut controller, persistence) = controller_for("a@x.com", kids_schedules(vec![]));

    // Act
    let event = controller.create_event(&dentist_form()).unwrap();

    // Assert - local state
    assert_eq!(event.title, "Dentist");
    assert_eq!(event.parent_schedule_id.as_deref(), Some("S1"));
    assert_event_ids(controller.store(), "S1", &[&event.id]);
    assert_eq!(
        controller.store().event("S1", &event.id).unwrap().timing,
        EventTiming::Single(SingleOccurrence {
            start: "2024-01-01T10:00:00Z".parse().unwrap(),
            end: "2024-01-01T11:00:00Z".parse().unwrap(),
        })
    );

    // Assert - undo log
    let top = controller.undo_stack().peek().unwrap();
    assert_eq!(top.action(), UndoAction::Add);
    assert_eq!(top.id(), event.id);
    assert_eq!(controller.undo_stack().len(), 1);

    // Assert - persistence gets the untagged event
    let sent = persistence.sent();
    assert_eq!(persistence.methods(), vec!["POST"]);
    let PersistRequest::CreateEvent { schedule_id, event: body } = &sent[0] else {
        panic!("expected a create request, got {sent:?}");
    };
    assert_eq!(schedule_id, "S1");
    assert_eq!(body.parent_schedule_id, None);
    assert_eq!(body.id, event.id);
}

#[test]
fn create_needs_explicit_target_with_several_writeable_schedules() {
    // Arrange
    let set = ScheduleSet {
        owner_schedules: vec![
            schedule("S1", "a@x.com", &[], vec![]),
            schedule("S2", "a@x.com", &[], vec![]),
        ],
        shared_schedules: vec![schedule(
            "S3",
            "c@x.com",
            &[("a@x.com", Permission::Read)],
            vec![],
        )],
    };
    let (mut controller, persistence) = controller_for("a@x.com", set);

    // Act & Assert - "all" view is ambiguous
    assert_eq!(
        controller.create_event(&dentist_form()),
        Err(MutationError::AmbiguousTarget { writeable: 2 })
    );
    assert!(controller.undo_stack().is_empty());
    assert!(persistence.sent().is_empty());

    // Act & Assert - an explicit schedule wins
    let form = EventForm {
        schedule_id: Some("S2".to_string()),
        ..dentist_form()
    };
    let event = controller.create_event(&form).unwrap();
    assert_event_ids(controller.store(), "S2", &[&event.id]);

    // Act & Assert - so does the selected schedule
    controller.select(ViewSelection::from("S1")).unwrap();
    let event = controller.create_event(&dentist_form()).unwrap();
    assert_event_ids(controller.store(), "S1", &[&event.id]);
}

#[test]
fn create_rejects_blank_title() {
    let (mut controller, persistence) = controller_for("a@x.com", kids_schedules(vec![]));

    let form = EventForm {
        title: "   ".to_string(),
        ..dentist_form()
    };
    assert_eq!(
        controller.create_event(&form),
        Err(MutationError::Validation(ValidationError::EmptyTitle))
    );
    assert_event_ids(controller.store(), "S1", &[]);
    assert!(persistence.sent().is_empty());
}

#[test]
fn create_rejects_inverted_range() {
    let (mut controller, _) = controller_for("a@x.com", kids_schedules(vec![]));

    let form = EventForm {
        start: "2024-01-01T12:00Z".to_string(),
        ..dentist_form()
    };
    assert!(matches!(
        controller.create_event(&form),
        Err(MutationError::Validation(ValidationError::InvalidRange { .. }))
    ));
    assert!(controller.undo_stack().is_empty());
}

#[test]
fn widget_move_replaces_event_and_records_edit() {
    // Arrange
    let (mut controller, persistence) =
        controller_for("a@x.com", kids_schedules(vec![stored_event("e1", "Pickup")]));
    let reverted = Rc::new(Cell::new(false));
    let flag = reverted.clone();
    let change = WidgetChange {
        event_id: "e1".to_string(),
        new_start: "2024-01-03T15:00:00Z".parse().unwrap(),
        new_end: Some("2024-01-03T17:00:00Z".parse().unwrap()),
        new_all_day: false,
        group_id: None,
        revert: None,
    }
    .with_revert(move || flag.set(true));

    // Act
    let moved = controller.edit_event(change).unwrap();

    // Assert
    assert!(!reverted.get());
    assert_eq!(moved.title, "Pickup");
    assert_eq!(
        moved.timing,
        EventTiming::Single(SingleOccurrence {
            start: "2024-01-03T15:00:00Z".parse().unwrap(),
            end: "2024-01-03T17:00:00Z".parse().unwrap(),
        })
    );
    assert_stored(controller.store(), "S1", &moved.clone().detached());

    let top = controller.undo_stack().peek().unwrap();
    assert_eq!(top.action(), UndoAction::Edit);
    assert_eq!(top.old_event(), Some(&stored_event("e1", "Pickup")));
    assert_eq!(persistence.methods(), vec!["PUT"]);
}

#[test]
fn widget_move_of_unknown_event_reverts() {
    let (mut controller, persistence) = controller_for("a@x.com", kids_schedules(vec![]));
    let reverted = Rc::new(Cell::new(false));
    let flag = reverted.clone();

    let change = WidgetChange {
        event_id: "ghost".to_string(),
        new_start: "2024-01-03T15:00:00Z".parse().unwrap(),
        new_end: None,
        new_all_day: false,
        group_id: None,
        revert: None,
    }
    .with_revert(move || flag.set(true));

    assert_eq!(
        controller.edit_event(change),
        Err(MutationError::EventNotFound("ghost".to_string()))
    );
    assert!(reverted.get());
    assert!(persistence.sent().is_empty());
}

#[test]
fn form_update_keeps_identity_and_completion() {
    // Arrange
    let (mut controller, persistence) =
        controller_for("a@x.com", kids_schedules(vec![stored_event("e1", "Pickup")]));
    controller.complete_event("e1", true).unwrap();

    // Act
    let form = EventForm {
        title: "Pickup from school".to_string(),
        place: "School".to_string(),
        ..EventForm::from_event(controller.store().event("S1", "e1").unwrap())
    };
    let updated = controller.update_event("e1", &form).unwrap();

    // Assert
    assert_eq!(updated.id, "e1");
    assert_eq!(updated.title, "Pickup from school");
    assert_eq!(updated.extended_props.place.as_deref(), Some("School"));
    assert!(updated.completed());
    assert_event_ids(controller.store(), "S1", &["e1"]);

    let top = controller.undo_stack().peek().unwrap();
    assert_eq!(top.action(), UndoAction::Edit);
    assert_eq!(top.old_event().unwrap().title, "Pickup");
    assert_eq!(persistence.methods(), vec!["PUT", "PUT"]);
}

#[test]
fn complete_merges_flag_only() {
    // Arrange
    let (mut controller, persistence) =
        controller_for("a@x.com", kids_schedules(vec![stored_event("e1", "Pickup")]));

    // Act
    let done = controller.complete_event("e1", true).unwrap();

    // Assert
    let mut expected = stored_event("e1", "Pickup");
    expected.extended_props.completed = Some(true);
    assert_eq!(done.clone().detached(), expected);
    assert_stored(controller.store(), "S1", &expected);
    assert!(controller.undo_stack().is_empty());
    assert_eq!(
        persistence.sent(),
        vec![PersistRequest::CompleteEvent {
            schedule_id: "S1".to_string(),
            event_id: "e1".to_string(),
            completed: true,
        }]
    );

    // Act & Assert - and back
    let undone = controller.complete_event("e1", false).unwrap();
    assert!(!undone.completed());
}

#[test]
fn delete_requires_confirmation() {
    // Arrange
    let (mut controller, persistence) =
        controller_for("a@x.com", kids_schedules(vec![stored_event("e1", "Pickup")]));
    let mut prompts = Vec::new();

    // Act & Assert - declined
    let result = controller.delete_event("e1", &mut |prompt: &str| {
        prompts.push(prompt.to_owned());
        false
    });
    assert_eq!(result, Err(MutationError::Cancelled));
    assert_event_ids(controller.store(), "S1", &["e1"]);
    assert!(persistence.sent().is_empty());
    assert_eq!(
        prompts,
        vec!["Are you sure you want to delete the event 'Pickup'?"]
    );

    // Act & Assert - accepted
    let removed = controller.delete_event("e1", &mut |_: &str| true).unwrap();
    assert_eq!(removed.id, "e1");
    assert_event_ids(controller.store(), "S1", &[]);
    assert!(controller.undo_stack().is_empty());
    assert_eq!(persistence.methods(), vec!["DELETE"]);
}
