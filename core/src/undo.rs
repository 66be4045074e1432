// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::VecDeque;
use std::fmt::{self, Display};

use crate::config::DEFAULT_UNDO_CAPACITY;
use crate::event::Event;
use crate::widget::Revert;

/// The kind of mutation an undo entry reverses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndoAction {
    Add,
    Delete,
    Edit,
}

impl Display for UndoAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UndoAction::Add => write!(f, "add"),
            UndoAction::Delete => write!(f, "delete"),
            UndoAction::Edit => write!(f, "edit"),
        }
    }
}

enum Reversal {
    Add,
    Delete { old_event: Event, position: usize },
    Edit {
        old_event: Event,
        undo_func: Option<Revert>,
    },
}

/// One reversible mutation of one event.
///
/// Delete and edit entries always hold the snapshot taken before the mutation.
pub struct UndoEntry {
    id: String,
    schedule_id: String,
    reversal: Reversal,
}

impl UndoEntry {
    /// An event was added; undoing removes it again.
    pub fn add(schedule_id: impl Into<String>, event_id: impl Into<String>) -> Self {
        Self {
            id: event_id.into(),
            schedule_id: schedule_id.into(),
            reversal: Reversal::Add,
        }
    }

    /// An event was deleted from `position` of its schedule; undoing puts `old_event` back there.
    pub fn delete(schedule_id: impl Into<String>, position: usize, old_event: Event) -> Self {
        Self {
            id: old_event.id.clone(),
            schedule_id: schedule_id.into(),
            reversal: Reversal::Delete {
                old_event: old_event.detached(),
                position,
            },
        }
    }

    /// An event was edited; undoing calls the widget reverter, if any, and restores `old_event`.
    pub fn edit(schedule_id: impl Into<String>, old_event: Event, undo_func: Option<Revert>) -> Self {
        Self {
            id: old_event.id.clone(),
            schedule_id: schedule_id.into(),
            reversal: Reversal::Edit {
                old_event: old_event.detached(),
                undo_func,
            },
        }
    }

    /// Id of the affected event.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn schedule_id(&self) -> &str {
        &self.schedule_id
    }

    pub fn action(&self) -> UndoAction {
        match self.reversal {
            Reversal::Add => UndoAction::Add,
            Reversal::Delete { .. } => UndoAction::Delete,
            Reversal::Edit { .. } => UndoAction::Edit,
        }
    }

    pub fn old_event(&self) -> Option<&Event> {
        match &self.reversal {
            Reversal::Add => None,
            Reversal::Delete { old_event, .. } | Reversal::Edit { old_event, .. } => Some(old_event),
        }
    }
}

impl fmt::Debug for UndoEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let has_undo_func = matches!(
            self.reversal,
            Reversal::Edit {
                undo_func: Some(_),
                ..
            }
        );
        f.debug_struct("UndoEntry")
            .field("id", &self.id)
            .field("schedule_id", &self.schedule_id)
            .field("action", &self.action())
            .field("old_event", &self.old_event())
            .field("undo_func", &has_undo_func)
            .finish()
    }
}

/// Where reversals are applied.
pub trait UndoTarget {
    /// Remove an added event.
    fn discard_event(&mut self, schedule_id: &str, event_id: &str);

    /// Put a deleted event back at its former position.
    fn restore_event(&mut self, schedule_id: &str, position: usize, event: Event);

    /// Replace an edited event with its earlier version.
    fn revert_event(&mut self, schedule_id: &str, event: Event);
}

/// Bounded log of reversible mutations, newest last.
#[derive(Debug)]
pub struct UndoStack {
    entries: VecDeque<UndoEntry>,
    capacity: usize,
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new(DEFAULT_UNDO_CAPACITY)
    }
}

impl UndoStack {
    /// Create an empty stack holding at most `capacity` entries (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity.min(DEFAULT_UNDO_CAPACITY)),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entry `undo_last` would reverse next.
    pub fn peek(&self) -> Option<&UndoEntry> {
        self.entries.back()
    }

    /// Record a mutation, evicting the oldest entry when full.
    pub fn push(&mut self, entry: UndoEntry) {
        if self.entries.len() == self.capacity
            && let Some(evicted) = self.entries.pop_front()
        {
            tracing::debug!(
                id = %evicted.id,
                action = %evicted.action(),
                "undo log full, dropping oldest entry"
            );
        }
        self.entries.push_back(entry);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Reverse the newest entry against `target`. Does nothing on an empty stack.
    pub fn undo_last(&mut self, target: &mut impl UndoTarget) -> Option<UndoAction> {
        let entry = self.entries.pop_back()?;
        let action = entry.action();
        tracing::debug!(id = %entry.id, schedule_id = %entry.schedule_id, %action, "undo");

        match entry.reversal {
            Reversal::Add => target.discard_event(&entry.schedule_id, &entry.id),
            Reversal::Delete {
                old_event,
                position,
            } => target.restore_event(&entry.schedule_id, position, old_event),
            Reversal::Edit {
                old_event,
                undo_func,
            } => {
                if let Some(undo_func) = undo_func {
                    undo_func();
                }
                target.revert_event(&entry.schedule_id, old_event);
            }
        }
        Some(action)
    }
}
