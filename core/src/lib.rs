// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Core of SitterSync: shared schedules, their events, who may change them, and how changes
//! are applied, undone and handed to persistence.

mod aggregate;
mod codec;
mod config;
mod controller;
mod error;
mod event;
mod permission;
mod schedule;
mod store;
mod undo;
mod view;
mod widget;

pub use crate::aggregate::{ViewSelection, active_view, flatten_events, writeable_events};
pub use crate::codec::{EventCodec, EventForm, clamp_title};
pub use crate::config::{APP_NAME, Config, ConfigError, DEFAULT_UNDO_CAPACITY, SeriesIdStrategy};
pub use crate::controller::{
    Confirm, Identity, MutationController, PersistRequest, Persistence, VerifiedUser,
};
pub use crate::error::{AuthError, MutationError, PermissionError, ValidationError};
pub use crate::event::{
    Event, EventColors, EventShapeError, EventTiming, ExtendedProps, RecurringSeries,
    SingleOccurrence, TITLE_MAX_LEN, normalize_weekdays, weekday_from_sunday_offset,
    weekday_to_sunday_offset,
};
pub use crate::permission::{
    Role, can_manage, can_read, can_write, ensure_owner, ensure_writeable, is_valid_email,
    role_of, validate_users,
};
pub use crate::schedule::{Permission, Schedule, ScheduleKind, ScheduleSet, Sharee, Users};
pub use crate::store::ScheduleStore;
pub use crate::undo::{UndoAction, UndoEntry, UndoStack, UndoTarget};
pub use crate::view::{KeyPress, ScheduleView};
pub use crate::widget::{
    CalendarWidget, EventClick, PointerPosition, RangeSelection, Revert, WidgetChange,
};
