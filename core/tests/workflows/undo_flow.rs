// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Undo workflow tests: reversing adds, edits and deletes while a view is mounted.

use std::cell::Cell;
use std::rc::Rc;

use sittersync_core::{Config, KeyPress, ScheduleView, UndoAction, WidgetChange};

use crate::common::{
    FakeWidget, assert_event_ids, assert_stored, controller_for, controller_with, dentist_form,
    kids_schedules, stored_event, test_config,
};

fn drag_e1() -> WidgetChange {
    WidgetChange {
        event_id: "e1".to_string(),
        new_start: "2024-01-09T15:00:00Z".parse().unwrap(),
        new_end: Some("2024-01-09T16:00:00Z".parse().unwrap()),
        new_all_day: false,
        group_id: None,
        revert: None,
    }
}

#[test]
fn undo_add_removes_event() {
    // Arrange
    let (mut controller, persistence) = controller_for("a@x.com", kids_schedules(vec![]));
    let mut widget = FakeWidget::default();
    let event = controller.create_event(&dentist_form()).unwrap();
    widget.shown.insert(event.id.clone(), event.clone());

    // Act
    let action = controller.undo_last(&mut widget);

    // Assert
    assert_eq!(action, Some(UndoAction::Add));
    assert_event_ids(controller.store(), "S1", &[]);
    assert!(widget.shown.is_empty());
    assert_eq!(widget.renders, 1);
    assert!(controller.undo_stack().is_empty());
    // undo stays local
    assert_eq!(persistence.methods(), vec!["POST"]);
}

#[test]
fn undo_edit_restores_snapshot_and_reverts_widget() {
    // Arrange
    let (mut controller, persistence) =
        controller_for("a@x.com", kids_schedules(vec![stored_event("e1", "Pickup")]));
    let mut widget = FakeWidget::default();
    let reverted = Rc::new(Cell::new(0));
    let counter = reverted.clone();
    controller
        .edit_event(drag_e1().with_revert(move || counter.set(counter.get() + 1)))
        .unwrap();

    // Act
    let action = controller.undo_last(&mut widget);

    // Assert
    assert_eq!(action, Some(UndoAction::Edit));
    assert_eq!(reverted.get(), 1);
    assert_stored(controller.store(), "S1", &stored_event("e1", "Pickup"));
    assert_eq!(persistence.methods(), vec!["PUT"]);
}

#[test]
fn undo_pops_exactly_one_entry_per_call() {
    let (mut controller, _) =
        controller_for("a@x.com", kids_schedules(vec![stored_event("e1", "Pickup")]));
    let mut widget = FakeWidget::default();
    controller.create_event(&dentist_form()).unwrap();
    controller.edit_event(drag_e1()).unwrap();
    controller.complete_event("e1", true).unwrap();
    assert_eq!(controller.undo_stack().len(), 2);

    assert_eq!(controller.undo_last(&mut widget), Some(UndoAction::Edit));
    assert_eq!(controller.undo_stack().len(), 1);
    assert_eq!(controller.undo_last(&mut widget), Some(UndoAction::Add));
    assert_eq!(controller.undo_stack().len(), 0);
    assert_eq!(controller.undo_last(&mut widget), None);
    assert_eq!(controller.undo_stack().len(), 0);
    assert_eq!(widget.renders, 2);

    // the edit snapshot was taken before completion, so the flag is rolled back too
    assert_stored(controller.store(), "S1", &stored_event("e1", "Pickup"));
}

#[test]
fn deletes_are_not_undoable_by_default() {
    let (mut controller, _) =
        controller_for("a@x.com", kids_schedules(vec![stored_event("e1", "Pickup")]));
    let mut widget = FakeWidget::default();
    let created = controller.create_event(&dentist_form()).unwrap();
    controller.delete_event("e1", &mut |_: &str| true).unwrap();

    // the newest entry is still the create
    assert_eq!(controller.undo_last(&mut widget), Some(UndoAction::Add));
    assert!(controller.store().event("S1", &created.id).is_none());
    assert!(controller.store().event("S1", "e1").is_none());
}

#[test]
fn undoable_deletes_put_the_event_back() {
    // Arrange
    let config = Config {
        undoable_deletes: true,
        ..test_config()
    };
    let (mut controller, persistence) = controller_with(
        config,
        "a@x.com",
        kids_schedules(vec![stored_event("e1", "Pickup"), stored_event("e2", "Swim")]),
    );
    let mut widget = FakeWidget::default();
    controller.delete_event("e1", &mut |_: &str| true).unwrap();
    assert_event_ids(controller.store(), "S1", &["e2"]);

    // Act
    let action = controller.undo_last(&mut widget);

    // Assert
    assert_eq!(action, Some(UndoAction::Delete));
    assert_event_ids(controller.store(), "S1", &["e1", "e2"]);
    assert_stored(controller.store(), "S1", &stored_event("e1", "Pickup"));
    let view: Vec<_> = controller.active_view().into_iter().map(|e| e.id).collect();
    assert_eq!(view, vec!["e1", "e2"]);
    let shown = &widget.shown["e1"];
    assert_eq!(shown.parent_schedule_id.as_deref(), Some("S1"));
    assert_eq!(persistence.methods(), vec!["DELETE"]);
}

#[test]
fn undo_of_edit_in_removed_schedule_is_skipped() {
    let (mut controller, _) =
        controller_for("a@x.com", kids_schedules(vec![stored_event("e1", "Pickup")]));
    let mut widget = FakeWidget::default();
    controller.edit_event(drag_e1()).unwrap();
    controller.delete_schedule("S1", &mut |_: &str| true).unwrap();

    assert_eq!(controller.undo_last(&mut widget), Some(UndoAction::Edit));
    assert!(controller.store().schedule("S1").is_none());
    assert!(controller.undo_stack().is_empty());
}

#[test]
fn mounted_view_undoes_on_ctrl_z_only() {
    // Arrange
    let (mut controller, _) = controller_for("a@x.com", kids_schedules(vec![]));
    controller.create_event(&dentist_form()).unwrap();

    // Act & Assert - mounting starts a fresh log
    let mut view = ScheduleView::mount(controller);
    assert!(view.controller().undo_stack().is_empty());

    let created = view.controller_mut().create_event(&dentist_form()).unwrap();
    let mut widget = FakeWidget::default();

    assert_eq!(view.handle_key(KeyPress::new('z'), &mut widget), None);
    assert_eq!(
        view.handle_key(KeyPress::new('s').with_ctrl(), &mut widget),
        None
    );
    assert_eq!(view.controller().undo_stack().len(), 1);

    assert_eq!(
        view.handle_key(KeyPress::new('z').with_meta(), &mut widget),
        Some(UndoAction::Add)
    );
    assert!(view.controller().store().event("S1", &created.id).is_none());

    // Act & Assert - unmounting drops the log
    view.controller_mut().create_event(&dentist_form()).unwrap();
    let controller = view.unmount();
    assert!(controller.undo_stack().is_empty());
    assert_eq!(controller.store().schedule("S1").unwrap().events.len(), 2);
}

#[test]
fn full_log_forgets_oldest_entries() {
    let config = Config {
        undo_capacity: 1,
        ..test_config()
    };
    let (mut controller, _) = controller_with(config, "a@x.com", kids_schedules(vec![]));
    let mut widget = FakeWidget::default();
    let first = controller.create_event(&dentist_form()).unwrap();
    let second = controller.create_event(&dentist_form()).unwrap();

    assert_eq!(controller.undo_last(&mut widget), Some(UndoAction::Add));
    assert_eq!(controller.undo_last(&mut widget), None);
    assert_event_ids(controller.store(), "S1", &[&first.id]);
    assert!(controller.store().event("S1", &second.id).is_none());
}
