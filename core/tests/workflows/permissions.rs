// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Permission workflow tests: what read sharees, write sharees and strangers may do.

use std::cell::Cell;
use std::rc::Rc;

use sittersync_core::{
    EventForm, MutationError, Permission, PermissionError, ScheduleSet, WidgetChange,
};

use crate::common::{
    as_shared, assert_event_ids, assert_stored, controller_for, dentist_form, kids_schedules,
    schedule, stored_event,
};

fn move_e1() -> WidgetChange {
    WidgetChange {
        event_id: "e1".to_string(),
        new_start: "2024-01-05T08:00:00Z".parse().unwrap(),
        new_end: Some("2024-01-05T09:00:00Z".parse().unwrap()),
        new_all_day: false,
        group_id: None,
        revert: None,
    }
}

#[test]
fn read_sharee_edit_is_rejected_and_reverted() {
    // Arrange
    let set = as_shared(kids_schedules(vec![stored_event("e1", "Pickup")]));
    let (mut controller, persistence) = controller_for("b@x.com", set);
    let reverted = Rc::new(Cell::new(false));
    let flag = reverted.clone();

    // Act
    let result = controller.edit_event(move_e1().with_revert(move || flag.set(true)));

    // Assert
    assert_eq!(
        result,
        Err(MutationError::Permission(PermissionError::NotWriteable {
            schedule_id: "S1".to_string()
        }))
    );
    assert!(reverted.get());
    assert_stored(controller.store(), "S1", &stored_event("e1", "Pickup"));
    assert!(controller.undo_stack().is_empty());
    assert!(persistence.sent().is_empty());
}

#[test]
fn read_sharee_cannot_create_complete_or_delete() {
    let set = as_shared(kids_schedules(vec![stored_event("e1", "Pickup")]));
    let (mut controller, persistence) = controller_for("b@x.com", set);

    let form = EventForm {
        schedule_id: Some("S1".to_string()),
        ..dentist_form()
    };
    assert!(matches!(
        controller.create_event(&form),
        Err(MutationError::Permission(PermissionError::NotWriteable { .. }))
    ));

    // no writeable schedule at all
    assert_eq!(
        controller.create_event(&dentist_form()),
        Err(MutationError::AmbiguousTarget { writeable: 0 })
    );

    assert!(matches!(
        controller.complete_event("e1", true),
        Err(MutationError::Permission(PermissionError::NotWriteable { .. }))
    ));
    assert!(matches!(
        controller.delete_event("e1", &mut |_: &str| true),
        Err(MutationError::Permission(PermissionError::NotWriteable { .. }))
    ));

    assert_event_ids(controller.store(), "S1", &["e1"]);
    assert!(controller.writeable_events().unwrap().is_empty());
    assert_eq!(controller.active_view().len(), 1);
    assert!(persistence.sent().is_empty());
}

#[test]
fn write_sharee_changes_events_but_not_the_schedule() {
    // Arrange
    let set = ScheduleSet {
        owner_schedules: vec![],
        shared_schedules: vec![schedule(
            "S1",
            "a@x.com",
            &[("c@x.com", Permission::Write)],
            vec![stored_event("e1", "Pickup")],
        )],
    };
    let (mut controller, persistence) = controller_for("c@x.com", set);

    // Act & Assert - events are fair game, and the only writeable schedule is picked
    let created = controller.create_event(&dentist_form()).unwrap();
    assert_eq!(created.parent_schedule_id.as_deref(), Some("S1"));
    controller.edit_event(move_e1()).unwrap();
    controller.complete_event("e1", true).unwrap();
    assert_eq!(controller.writeable_events().unwrap().len(), 2);

    // Act & Assert - schedule management is owner only
    let not_owner = Err(MutationError::Permission(PermissionError::NotOwner {
        schedule_id: "S1".to_string(),
    }));
    assert_eq!(controller.rename_schedule("S1", "Mine now"), not_owner);
    assert_eq!(
        controller.share_schedule("S1", "d@x.com", Permission::Read),
        not_owner
    );
    assert_eq!(controller.unshare_schedule("S1", "c@x.com"), not_owner);
    assert_eq!(
        controller.delete_schedule("S1", &mut |_: &str| true),
        not_owner
    );

    assert_eq!(persistence.methods(), vec!["POST", "PUT", "PUT"]);
}

#[test]
fn owner_listed_as_read_sharee_still_writes() {
    let set = ScheduleSet {
        owner_schedules: vec![schedule(
            "S1",
            "a@x.com",
            &[("a@x.com", Permission::Read)],
            vec![stored_event("e1", "Pickup")],
        )],
        shared_schedules: vec![],
    };
    let (mut controller, _) = controller_for("a@x.com", set);

    assert!(controller.complete_event("e1", true).is_ok());
}
