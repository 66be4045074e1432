// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use crate::controller::{Identity, MutationController, Persistence};
use crate::undo::UndoAction;
use crate::widget::CalendarWidget;

/// A key press seen while the schedule view is mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: char,
    pub ctrl: bool,
    pub meta: bool,
}

impl KeyPress {
    pub fn new(key: char) -> Self {
        Self {
            key,
            ctrl: false,
            meta: false,
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    /// Ctrl+Z or Cmd+Z.
    pub fn is_undo(&self) -> bool {
        (self.ctrl || self.meta) && self.key == 'z'
    }
}

/// The mounted schedule view. The undo log lives exactly as long as the mount.
pub struct ScheduleView<P, I> {
    controller: MutationController<P, I>,
}

impl<P: Persistence, I: Identity> ScheduleView<P, I> {
    /// Mount the view with an empty undo log.
    pub fn mount(mut controller: MutationController<P, I>) -> Self {
        controller.reset_undo();
        tracing::debug!("schedule view mounted");
        Self { controller }
    }

    pub fn controller(&self) -> &MutationController<P, I> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut MutationController<P, I> {
        &mut self.controller
    }

    /// Route a key press; the undo gesture reverses the newest mutation.
    pub fn handle_key(
        &mut self,
        key: KeyPress,
        widget: &mut impl CalendarWidget,
    ) -> Option<UndoAction> {
        if !key.is_undo() {
            return None;
        }
        self.controller.undo_last(widget)
    }

    /// Unmount the view, dropping its undo log.
    pub fn unmount(mut self) -> MutationController<P, I> {
        self.controller.reset_undo();
        tracing::debug!("schedule view unmounted");
        self.controller
    }
}
