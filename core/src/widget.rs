// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Interactions reported by the calendar widget, and what the core asks of it in return.

use std::fmt;

use jiff::Timestamp;

use crate::event::Event;

/// Widget-supplied callback that puts a dragged or resized event back where it was.
pub type Revert = Box<dyn FnOnce()>;

/// Screen position of the pointer, used to place popovers.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct PointerPosition {
    pub x: f64,
    pub y: f64,
}

/// The user selected a time range on an empty part of the calendar.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeSelection {
    pub start: Timestamp,
    pub end: Timestamp,
    pub all_day: bool,
    pub pointer: PointerPosition,
}

/// The user clicked an event.
#[derive(Debug, Clone, PartialEq)]
pub struct EventClick {
    pub event_id: String,
    pub pointer: PointerPosition,
}

/// The user dragged or resized an event.
pub struct WidgetChange {
    pub event_id: String,
    pub new_start: Timestamp,
    pub new_end: Option<Timestamp>,
    pub new_all_day: bool,

    /// Series identifier, present when the changed event is recurring.
    pub group_id: Option<String>,

    pub revert: Option<Revert>,
}

impl WidgetChange {
    /// Attach the widget's reverter.
    pub fn with_revert(mut self, revert: impl FnOnce() + 'static) -> Self {
        self.revert = Some(Box::new(revert));
        self
    }
}

impl fmt::Debug for WidgetChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetChange")
            .field("event_id", &self.event_id)
            .field("new_start", &self.new_start)
            .field("new_end", &self.new_end)
            .field("new_all_day", &self.new_all_day)
            .field("group_id", &self.group_id)
            .field("revert", &self.revert.is_some())
            .finish()
    }
}

/// The rendering side of the calendar.
pub trait CalendarWidget {
    /// Show an event. Events passed here carry their schedule id.
    fn add_event(&mut self, event: &Event);

    /// Stop showing an event.
    fn remove_event(&mut self, event_id: &str);

    /// Redraw from the current state.
    fn render(&mut self) {}
}
