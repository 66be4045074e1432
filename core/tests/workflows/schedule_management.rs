// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Schedule management workflow tests: renaming, sharing, handing over and deleting.

use sittersync_core::{
    MutationError, Permission, PermissionError, PersistRequest, ScheduleKind, Sharee, Users,
    ValidationError, ViewSelection,
};

use crate::common::{controller_for, kids_schedules, schedule, stored_event};

#[test]
fn rename_updates_title_and_persists_schedule() {
    let (mut controller, persistence) = controller_for("a@x.com", kids_schedules(vec![]));

    let renamed = controller.rename_schedule("S1", "  Kids  ").unwrap();

    assert_eq!(renamed.title, "Kids");
    assert_eq!(controller.store().schedule("S1").unwrap().title, "Kids");
    assert_eq!(persistence.sent(), vec![PersistRequest::UpdateSchedule(renamed)]);
}

#[test]
fn rename_validates_title() {
    let (mut controller, persistence) = controller_for("a@x.com", kids_schedules(vec![]));

    assert_eq!(
        controller.rename_schedule("S1", ""),
        Err(MutationError::Validation(ValidationError::EmptyTitle))
    );
    assert_eq!(
        controller.rename_schedule("S1", &"x".repeat(26)),
        Err(MutationError::Validation(ValidationError::TitleTooLong {
            len: 26,
            max: 25
        }))
    );
    assert_eq!(
        controller.rename_schedule("S9", "Kids"),
        Err(MutationError::ScheduleNotFound("S9".to_string()))
    );
    assert!(persistence.sent().is_empty());
}

#[test]
fn share_adds_or_updates_sharee() {
    let (mut controller, persistence) = controller_for("a@x.com", kids_schedules(vec![]));

    let shared = controller
        .share_schedule("S1", "c@x.com", Permission::Write)
        .unwrap();
    assert_eq!(
        shared.users.sharing_with,
        vec![
            Sharee::new("b@x.com", Permission::Read),
            Sharee::new("c@x.com", Permission::Write),
        ]
    );

    let upgraded = controller
        .share_schedule("S1", "b@x.com", Permission::Write)
        .unwrap();
    assert_eq!(
        upgraded.users.sharee("b@x.com").map(|s| s.permissions),
        Some(Permission::Write)
    );
    assert_eq!(upgraded.users.sharing_with.len(), 2);
    assert_eq!(persistence.methods(), vec!["PUT", "PUT"]);
}

#[test]
fn share_and_unshare_ignore_surrounding_whitespace() {
    let (mut controller, persistence) = controller_for("a@x.com", kids_schedules(vec![]));

    let shared = controller
        .share_schedule("S1", " c@x.com ", Permission::Read)
        .unwrap();
    assert!(shared.users.sharee("c@x.com").is_some());

    let unshared = controller.unshare_schedule("S1", "\tc@x.com ").unwrap();
    assert!(unshared.users.sharee("c@x.com").is_none());
    assert_eq!(persistence.methods(), vec!["PUT", "PUT"]);
}

#[test]
fn share_validates_emails() {
    let (mut controller, persistence) = controller_for("a@x.com", kids_schedules(vec![]));

    assert_eq!(
        controller.share_schedule("S1", "not-an-email", Permission::Read),
        Err(MutationError::Validation(ValidationError::InvalidShareeEmail(
            "not-an-email".to_string()
        )))
    );
    assert_eq!(
        controller.share_schedule("S1", "a@x.com", Permission::Read),
        Err(MutationError::Validation(ValidationError::OwnerIsSharee(
            "a@x.com".to_string()
        )))
    );
    assert_eq!(
        controller.store().schedule("S1").unwrap().users.sharing_with.len(),
        1
    );
    assert!(persistence.sent().is_empty());
}

#[test]
fn unshare_removes_sharee() {
    let (mut controller, persistence) = controller_for("a@x.com", kids_schedules(vec![]));

    let unshared = controller.unshare_schedule("S1", "  b@x.com ").unwrap();
    assert!(unshared.users.sharing_with.is_empty());

    // nothing left to remove
    controller.unshare_schedule("S1", "b@x.com").unwrap();
    assert_eq!(persistence.methods(), vec!["PUT"]);
}

#[test]
fn owner_change_is_confirmed_and_drops_access() {
    // Arrange
    let (mut controller, persistence) =
        controller_for("a@x.com", kids_schedules(vec![stored_event("e1", "Pickup")]));
    controller.select(ViewSelection::from("S1")).unwrap();
    let users = Users {
        owner_email: "b@x.com".to_string(),
        sharing_with: vec![],
    };

    // Act & Assert - declined
    let result = controller.update_schedule_users("S1", users.clone(), &mut |_: &str| false);
    assert_eq!(result, Err(MutationError::Cancelled));
    assert!(controller.store().schedule("S1").is_some());
    assert!(persistence.sent().is_empty());

    // Act & Assert - confirmed
    let handed_over = controller
        .update_schedule_users("S1", users, &mut |_: &str| true)
        .unwrap();
    assert_eq!(handed_over.users.owner_email, "b@x.com");
    assert_eq!(handed_over.events.len(), 1);
    assert!(controller.store().schedule("S1").is_none());
    assert!(controller.store().selection().is_all());
    assert_eq!(
        persistence.sent(),
        vec![PersistRequest::UpdateSchedule(handed_over)]
    );
}

#[test]
fn users_update_without_owner_change_needs_no_confirmation() {
    let (mut controller, persistence) = controller_for("a@x.com", kids_schedules(vec![]));
    let users = Users {
        owner_email: "a@x.com".to_string(),
        sharing_with: vec![Sharee::new("d@x.com", Permission::Read)],
    };

    let updated = controller
        .update_schedule_users("S1", users.clone(), &mut |_: &str| -> bool {
            panic!("no prompt expected")
        })
        .unwrap();

    assert_eq!(updated.users, users);
    assert_eq!(persistence.methods(), vec!["PUT"]);

    let bad = Users::new("nobody");
    assert_eq!(
        controller.update_schedule_users("S1", bad, &mut |_: &str| true),
        Err(MutationError::Validation(ValidationError::InvalidOwnerEmail(
            "nobody".to_string()
        )))
    );
}

#[test]
fn delete_schedule_is_confirmed() {
    let (mut controller, persistence) = controller_for("a@x.com", kids_schedules(vec![]));

    assert_eq!(
        controller.delete_schedule("S1", &mut |_: &str| false),
        Err(MutationError::Cancelled)
    );
    let deleted = controller
        .delete_schedule("S1", &mut |_: &str| true)
        .unwrap();

    assert_eq!(deleted.id, "S1");
    assert!(controller.store().schedules().is_empty());
    assert_eq!(
        persistence.sent(),
        vec![PersistRequest::DeleteSchedule {
            schedule_id: "S1".to_string()
        }]
    );
}

#[test]
fn adopted_schedules_land_in_the_right_list() {
    let (mut controller, persistence) = controller_for("a@x.com", kids_schedules(vec![]));

    controller
        .add_schedule(schedule("S2", "a@x.com", &[], vec![]))
        .unwrap();
    controller
        .add_schedule(schedule(
            "S3",
            "c@x.com",
            &[("a@x.com", Permission::Read)],
            vec![],
        ))
        .unwrap();
    let stranger = controller.add_schedule(schedule("S4", "c@x.com", &[], vec![]));

    let schedules = controller.store().schedules();
    assert_eq!(schedules.kind_of("S2"), Some(ScheduleKind::Owner));
    assert_eq!(schedules.kind_of("S3"), Some(ScheduleKind::Shared));
    assert_eq!(schedules.kind_of("S4"), None);
    assert_eq!(
        stranger,
        Err(MutationError::Permission(PermissionError::NotReadable {
            schedule_id: "S4".to_string()
        }))
    );
    // already created server side
    assert!(persistence.sent().is_empty());
}
