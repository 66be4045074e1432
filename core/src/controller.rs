// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use crate::aggregate::ViewSelection;
use crate::codec::{EventCodec, EventForm};
use crate::config::{Config, ConfigError};
use crate::error::{AuthError, MutationError, PermissionError, ValidationError};
use crate::event::{Event, EventTiming, TITLE_MAX_LEN};
use crate::permission;
use crate::schedule::{Permission, Schedule, ScheduleKind, ScheduleSet, Sharee, Users};
use crate::store::ScheduleStore;
use crate::undo::{UndoAction, UndoEntry, UndoStack, UndoTarget};
use crate::widget::{CalendarWidget, EventClick, WidgetChange};

/// A write the server should eventually see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistRequest {
    /// `POST /event?id=<schedule_id>`
    CreateEvent { schedule_id: String, event: Event },

    /// `PUT /event?id=<schedule_id>`
    UpdateEvent { schedule_id: String, event: Event },

    /// `DELETE /event?id=<schedule_id>`
    DeleteEvent { schedule_id: String, event: Event },

    /// `PUT /event/complete?id=<schedule_id>`
    CompleteEvent {
        schedule_id: String,
        event_id: String,
        completed: bool,
    },

    /// `PUT /schedule?id=<schedule._id>`
    UpdateSchedule(Schedule),

    /// `DELETE /schedule?id=<schedule_id>`
    DeleteSchedule { schedule_id: String },
}

impl PersistRequest {
    /// The HTTP method the request maps to.
    pub fn method(&self) -> &'static str {
        match self {
            PersistRequest::CreateEvent { .. } => "POST",
            PersistRequest::UpdateEvent { .. }
            | PersistRequest::CompleteEvent { .. }
            | PersistRequest::UpdateSchedule(_) => "PUT",
            PersistRequest::DeleteEvent { .. } | PersistRequest::DeleteSchedule { .. } => "DELETE",
        }
    }

    pub fn schedule_id(&self) -> &str {
        match self {
            PersistRequest::CreateEvent { schedule_id, .. }
            | PersistRequest::UpdateEvent { schedule_id, .. }
            | PersistRequest::DeleteEvent { schedule_id, .. }
            | PersistRequest::CompleteEvent { schedule_id, .. }
            | PersistRequest::DeleteSchedule { schedule_id } => schedule_id,
            PersistRequest::UpdateSchedule(schedule) => &schedule.id,
        }
    }
}

/// Hands writes to the server without waiting for them.
///
/// Failures are the implementation's to report; local state is never rolled back.
pub trait Persistence {
    fn dispatch(&self, request: PersistRequest);
}

/// Supplies the verified email of the current user.
pub trait Identity {
    fn verified_email(&self) -> Result<String, AuthError>;
}

/// An identity that has already been verified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedUser {
    email: String,
}

impl VerifiedUser {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }
}

impl Identity for VerifiedUser {
    fn verified_email(&self) -> Result<String, AuthError> {
        Ok(self.email.clone())
    }
}

/// Asks the user to confirm a destructive action.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Applies user changes to the local schedules, records them for undo and hands them to persistence.
///
/// Every operation checks identity and permission first. A rejected operation leaves local state,
/// the undo log and persistence untouched.
#[derive(Debug)]
pub struct MutationController<P, I> {
    identity: I,
    persistence: P,
    codec: EventCodec,
    store: ScheduleStore,
    undo: UndoStack,
    undoable_deletes: bool,
}

impl<P: Persistence, I: Identity> MutationController<P, I> {
    pub fn new(config: &Config, identity: I, persistence: P) -> Result<Self, ConfigError> {
        if config.undo_capacity == 0 {
            return Err(ConfigError::ZeroUndoCapacity);
        }

        Ok(Self {
            identity,
            persistence,
            codec: EventCodec::new(config.time_zone()?, config.series_id),
            store: ScheduleStore::default(),
            undo: UndoStack::new(config.undo_capacity),
            undoable_deletes: config.undoable_deletes,
        })
    }

    /// Replace local state with a fresh fetch.
    pub fn load(&mut self, schedules: ScheduleSet) {
        tracing::debug!(
            owned = schedules.owner_schedules.len(),
            shared = schedules.shared_schedules.len(),
            "loading schedules"
        );
        self.store.load(schedules);
    }

    pub fn store(&self) -> &ScheduleStore {
        &self.store
    }

    pub fn codec(&self) -> &EventCodec {
        &self.codec
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    pub fn undo_stack(&self) -> &UndoStack {
        &self.undo
    }

    pub(crate) fn reset_undo(&mut self) {
        self.undo.clear();
    }

    pub fn select(&mut self, selection: ViewSelection) -> Result<(), MutationError> {
        self.store.select(selection)
    }

    /// Events of the selected view.
    pub fn active_view(&self) -> Vec<Event> {
        self.store.active_view()
    }

    /// Tagged events the verified user may change.
    pub fn writeable_events(&self) -> Result<Vec<Event>, MutationError> {
        let email = self.identity.verified_email()?;
        Ok(self.store.writeable(&email))
    }

    /// The clicked event, tagged with its schedule.
    pub fn event_for_click(&self, click: &EventClick) -> Option<Event> {
        let scope = self.store.selection().schedule_id();
        self.store.flatten().into_iter().find(|e| {
            e.id == click.event_id && (scope.is_none() || e.parent_schedule_id.as_deref() == scope)
        })
    }

    /// Create an event from editor input.
    ///
    /// The target schedule is `form.schedule_id`, else the selected schedule, else the only
    /// schedule the user can write to.
    pub fn create_event(&mut self, form: &EventForm) -> Result<Event, MutationError> {
        let email = self.identity.verified_email()?;
        validate_title(&form.title)?;
        let schedule_id = self.resolve_target(&email, form.schedule_id.as_deref())?;
        let event = self.codec.to_canonical(form, form.recurring)?;

        self.store.insert_event(&schedule_id, event.clone())?;
        self.undo.push(UndoEntry::add(&schedule_id, &event.id));
        tracing::debug!(%schedule_id, event_id = %event.id, "event created");

        self.persistence.dispatch(PersistRequest::CreateEvent {
            schedule_id: schedule_id.clone(),
            event: event.clone(),
        });
        Ok(event.with_parent(schedule_id))
    }

    /// Apply a drag or resize. Any rejection calls the widget reverter.
    pub fn edit_event(&mut self, mut change: WidgetChange) -> Result<Event, MutationError> {
        let revert = change.revert.take();
        match self.apply_widget_change(&change) {
            Ok((schedule_id, old_event, event)) => {
                self.undo
                    .push(UndoEntry::edit(&schedule_id, old_event, revert));
                tracing::debug!(%schedule_id, event_id = %event.id, "event moved");

                self.persistence.dispatch(PersistRequest::UpdateEvent {
                    schedule_id: schedule_id.clone(),
                    event: event.clone(),
                });
                Ok(event.with_parent(schedule_id))
            }
            Err(e) => {
                tracing::warn!(event_id = %change.event_id, err = %e, "change rejected, reverting widget");
                if let Some(revert) = revert {
                    revert();
                }
                Err(e)
            }
        }
    }

    fn apply_widget_change(
        &mut self,
        change: &WidgetChange,
    ) -> Result<(String, Event, Event), MutationError> {
        let email = self.identity.verified_email()?;
        let (schedule_id, stored) = self.resolve_writeable(&email, &change.event_id)?;
        let event = self.codec.from_widget_change(change, &stored);
        self.store.replace_event(&schedule_id, event.clone())?;
        Ok((schedule_id, stored, event))
    }

    /// Rewrite an event from editor input, keeping its id, series and completion.
    ///
    /// The event stays in its schedule; `form.schedule_id` is ignored.
    pub fn update_event(&mut self, event_id: &str, form: &EventForm) -> Result<Event, MutationError> {
        let email = self.identity.verified_email()?;
        let (schedule_id, stored) = self.resolve_writeable(&email, event_id)?;
        validate_title(&form.title)?;

        let mut event = self.codec.to_canonical(form, form.recurring)?;
        event.id = stored.id.clone();
        event.extended_props.completed = stored.extended_props.completed;
        if let (EventTiming::Recurring(series), Some(group_id)) = (&mut event.timing, stored.group_id()) {
            series.group_id = group_id.to_owned();
        }

        self.store.replace_event(&schedule_id, event.clone())?;
        self.undo.push(UndoEntry::edit(&schedule_id, stored, None));
        tracing::debug!(%schedule_id, event_id, "event updated");

        self.persistence.dispatch(PersistRequest::UpdateEvent {
            schedule_id: schedule_id.clone(),
            event: event.clone(),
        });
        Ok(event.with_parent(schedule_id))
    }

    /// Delete an event after confirmation.
    pub fn delete_event(
        &mut self,
        event_id: &str,
        confirm: &mut impl Confirm,
    ) -> Result<Event, MutationError> {
        let email = self.identity.verified_email()?;
        let (schedule_id, stored) = self.resolve_writeable(&email, event_id)?;

        let prompt = format!("Are you sure you want to delete the event '{}'?", stored.title);
        if !confirm.confirm(&prompt) {
            return Err(MutationError::Cancelled);
        }

        let position = self
            .store
            .event_position(&schedule_id, event_id)
            .ok_or_else(|| MutationError::EventNotFound(event_id.to_owned()))?;
        let removed = self.store.remove_event(&schedule_id, event_id)?;
        if self.undoable_deletes {
            self.undo
                .push(UndoEntry::delete(&schedule_id, position, removed.clone()));
        }
        tracing::debug!(%schedule_id, event_id, "event deleted");

        self.persistence.dispatch(PersistRequest::DeleteEvent {
            schedule_id: schedule_id.clone(),
            event: removed.clone(),
        });
        Ok(removed.with_parent(schedule_id))
    }

    /// Set the completion flag of an event. Not recorded for undo.
    pub fn complete_event(&mut self, event_id: &str, completed: bool) -> Result<Event, MutationError> {
        let email = self.identity.verified_email()?;
        let (schedule_id, mut event) = self.resolve_writeable(&email, event_id)?;

        event.extended_props.completed = Some(completed);
        self.store.replace_event(&schedule_id, event.clone())?;
        tracing::debug!(%schedule_id, event_id, completed, "event completion set");

        self.persistence.dispatch(PersistRequest::CompleteEvent {
            schedule_id: schedule_id.clone(),
            event_id: event_id.to_owned(),
            completed,
        });
        Ok(event.with_parent(schedule_id))
    }

    /// Reverse the newest recorded mutation locally and on the widget.
    ///
    /// Nothing is sent to the server; the two may differ until the next load.
    pub fn undo_last(&mut self, widget: &mut impl CalendarWidget) -> Option<UndoAction> {
        let action = self.undo.undo_last(&mut LocalUndo {
            store: &mut self.store,
            widget: &mut *widget,
        })?;
        widget.render();
        Some(action)
    }

    /// Adopt a schedule the server has just created or shared.
    pub fn add_schedule(&mut self, schedule: Schedule) -> Result<(), MutationError> {
        let email = self.identity.verified_email()?;
        let kind = match permission::role_of(&email, &schedule) {
            Some(permission::Role::Owner) => ScheduleKind::Owner,
            Some(permission::Role::Sharee(_)) => ScheduleKind::Shared,
            None => {
                return Err(PermissionError::NotReadable {
                    schedule_id: schedule.id,
                }
                .into());
            }
        };

        tracing::debug!(schedule_id = %schedule.id, ?kind, "schedule added");
        self.store.insert_schedule(kind, schedule);
        Ok(())
    }

    pub fn rename_schedule(&mut self, schedule_id: &str, title: &str) -> Result<Schedule, MutationError> {
        let mut schedule = self.owned_schedule(schedule_id)?;
        let title = title.trim();
        validate_title(title)?;
        let len = title.chars().count();
        if len > TITLE_MAX_LEN {
            return Err(ValidationError::TitleTooLong {
                len,
                max: TITLE_MAX_LEN,
            }
            .into());
        }

        schedule.title = title.to_owned();
        self.commit_schedule(schedule)
    }

    /// Grant `permissions` to `user_email`, updating an existing share.
    pub fn share_schedule(
        &mut self,
        schedule_id: &str,
        user_email: &str,
        permissions: Permission,
    ) -> Result<Schedule, MutationError> {
        let mut schedule = self.owned_schedule(schedule_id)?;
        let user_email = user_email.trim();
        match schedule
            .users
            .sharing_with
            .iter_mut()
            .find(|s| s.user_email == user_email)
        {
            Some(sharee) => sharee.permissions = permissions,
            None => schedule
                .users
                .sharing_with
                .push(Sharee::new(user_email, permissions)),
        }

        permission::validate_users(&schedule.users)?;
        self.commit_schedule(schedule)
    }

    /// Revoke the access of `user_email`. Unknown sharees are ignored.
    pub fn unshare_schedule(&mut self, schedule_id: &str, user_email: &str) -> Result<Schedule, MutationError> {
        let mut schedule = self.owned_schedule(schedule_id)?;
        let user_email = user_email.trim();
        let before = schedule.users.sharing_with.len();
        schedule
            .users
            .sharing_with
            .retain(|s| s.user_email != user_email);

        if schedule.users.sharing_with.len() == before {
            tracing::debug!(%schedule_id, user_email, "not shared with user, nothing to do");
            return Ok(schedule);
        }
        self.commit_schedule(schedule)
    }

    /// Replace the owner and sharee list.
    ///
    /// Handing the schedule to another owner is confirmed first, and the schedule leaves local
    /// state as soon as the change is dispatched.
    pub fn update_schedule_users(
        &mut self,
        schedule_id: &str,
        users: Users,
        confirm: &mut impl Confirm,
    ) -> Result<Schedule, MutationError> {
        let mut schedule = self.owned_schedule(schedule_id)?;
        permission::validate_users(&users)?;

        if users.owner_email == schedule.users.owner_email {
            schedule.users = users;
            return self.commit_schedule(schedule);
        }

        let prompt = "Changing the owner email will make you lose access to this schedule. \
                      Are you sure you want to continue?";
        if !confirm.confirm(prompt) {
            return Err(MutationError::Cancelled);
        }

        schedule.users = users;
        self.store.remove_schedule(schedule_id);
        tracing::debug!(%schedule_id, owner = %schedule.users.owner_email, "schedule handed over");

        self.persistence
            .dispatch(PersistRequest::UpdateSchedule(schedule.clone()));
        Ok(schedule)
    }

    /// Delete a schedule and its events after confirmation.
    pub fn delete_schedule(
        &mut self,
        schedule_id: &str,
        confirm: &mut impl Confirm,
    ) -> Result<Schedule, MutationError> {
        let schedule = self.owned_schedule(schedule_id)?;

        let prompt = format!("Are you sure you want to delete the schedule '{}'?", schedule.title);
        if !confirm.confirm(&prompt) {
            return Err(MutationError::Cancelled);
        }

        self.store.remove_schedule(schedule_id);
        tracing::debug!(%schedule_id, "schedule deleted");

        self.persistence.dispatch(PersistRequest::DeleteSchedule {
            schedule_id: schedule_id.to_owned(),
        });
        Ok(schedule)
    }

    /// A copy of a schedule the verified user owns.
    fn owned_schedule(&self, schedule_id: &str) -> Result<Schedule, MutationError> {
        let email = self.identity.verified_email()?;
        let schedule = self
            .store
            .schedule(schedule_id)
            .ok_or_else(|| MutationError::ScheduleNotFound(schedule_id.to_owned()))?;
        permission::ensure_owner(&email, schedule)?;
        Ok(schedule.clone())
    }

    fn commit_schedule(&mut self, schedule: Schedule) -> Result<Schedule, MutationError> {
        self.store.replace_schedule(schedule.clone())?;
        tracing::debug!(schedule_id = %schedule.id, "schedule updated");
        self.persistence
            .dispatch(PersistRequest::UpdateSchedule(schedule.clone()));
        Ok(schedule)
    }

    /// Pick the schedule a new event goes to.
    fn resolve_target(&self, email: &str, requested: Option<&str>) -> Result<String, MutationError> {
        if let Some(id) = requested.or(self.store.selection().schedule_id()) {
            let schedule = self
                .store
                .schedule(id)
                .ok_or_else(|| MutationError::ScheduleNotFound(id.to_owned()))?;
            permission::ensure_writeable(email, schedule)?;
            return Ok(schedule.id.clone());
        }

        let writeable: Vec<_> = self
            .store
            .schedules()
            .iter()
            .filter(|s| permission::can_write(email, s))
            .collect();
        match writeable.as_slice() {
            [only] => Ok(only.id.clone()),
            _ => Err(MutationError::AmbiguousTarget {
                writeable: writeable.len(),
            }),
        }
    }

    /// Find an event the user may change, within the selected view.
    ///
    /// Returns the owning schedule id and the stored, untagged event.
    fn resolve_writeable(&self, email: &str, event_id: &str) -> Result<(String, Event), MutationError> {
        let scope = self.store.selection().schedule_id();
        let in_scope = |e: &Event| {
            e.id == event_id && (scope.is_none() || e.parent_schedule_id.as_deref() == scope)
        };

        if let Some(event) = self.store.writeable(email).into_iter().find(|e| in_scope(e)) {
            let schedule_id = event.parent_schedule_id.clone().unwrap_or_default();
            return Ok((schedule_id, event.detached()));
        }

        match self.store.flatten().into_iter().find(|e| in_scope(e)) {
            Some(event) => Err(PermissionError::NotWriteable {
                schedule_id: event.parent_schedule_id.unwrap_or_default(),
            }
            .into()),
            None => Err(MutationError::EventNotFound(event_id.to_owned())),
        }
    }
}

fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    Ok(())
}

/// Applies undo reversals to local state and the widget together.
struct LocalUndo<'a, W: ?Sized> {
    store: &'a mut ScheduleStore,
    widget: &'a mut W,
}

impl<W: CalendarWidget + ?Sized> UndoTarget for LocalUndo<'_, W> {
    fn discard_event(&mut self, schedule_id: &str, event_id: &str) {
        if let Err(e) = self.store.remove_event(schedule_id, event_id) {
            tracing::warn!(schedule_id, event_id, err = %e, "cannot undo add, skipping");
        }
        self.widget.remove_event(event_id);
    }

    fn restore_event(&mut self, schedule_id: &str, position: usize, event: Event) {
        match self.store.insert_event_at(schedule_id, position, event.clone()) {
            Ok(()) => self.widget.add_event(&event.with_parent(schedule_id)),
            Err(e) => tracing::warn!(schedule_id, event_id = %event.id, err = %e, "cannot undo delete, skipping"),
        }
    }

    fn revert_event(&mut self, schedule_id: &str, event: Event) {
        if let Err(e) = self.store.replace_event(schedule_id, event) {
            tracing::warn!(schedule_id, err = %e, "cannot undo edit, skipping");
        }
    }
}
