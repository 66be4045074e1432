// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::event::Event;

/// A named container of events with one owner and any number of sharees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Server-assigned identifier.
    #[serde(rename = "_id")]
    pub id: String,

    pub title: String,

    pub users: Users,

    #[serde(default)]
    pub events: Vec<Event>,
}

impl Schedule {
    /// Find an event by id.
    pub fn event(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    pub(crate) fn event_mut(&mut self, id: &str) -> Option<&mut Event> {
        self.events.iter_mut().find(|e| e.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Users {
    pub owner_email: String,

    #[serde(default)]
    pub sharing_with: Vec<Sharee>,
}

impl Users {
    pub fn new(owner_email: impl Into<String>) -> Self {
        Self {
            owner_email: owner_email.into(),
            sharing_with: Vec::new(),
        }
    }

    /// Find the sharee entry of a user.
    pub fn sharee(&self, email: &str) -> Option<&Sharee> {
        self.sharing_with.iter().find(|s| s.user_email == email)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sharee {
    pub user_email: String,
    pub permissions: Permission,
}

impl Sharee {
    pub fn new(user_email: impl Into<String>, permissions: Permission) -> Self {
        Self {
            user_email: user_email.into(),
            permissions,
        }
    }
}

/// Access granted to a sharee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    /// The sharee can see events.
    Read,

    /// The sharee can also add, edit and delete events.
    Write,
}

const PERMISSION_READ: &str = "read";
const PERMISSION_WRITE: &str = "write";

impl AsRef<str> for Permission {
    fn as_ref(&self) -> &str {
        match self {
            Permission::Read => PERMISSION_READ,
            Permission::Write => PERMISSION_WRITE,
        }
    }
}

impl Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl FromStr for Permission {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            PERMISSION_READ => Ok(Permission::Read),
            PERMISSION_WRITE => Ok(Permission::Write),
            _ => Err(()),
        }
    }
}

/// Which list a schedule was loaded into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleKind {
    /// Owned by the verified user.
    Owner,

    /// Shared with the verified user.
    Shared,
}

/// Everything the verified user can see, as returned by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSet {
    #[serde(default)]
    pub owner_schedules: Vec<Schedule>,

    #[serde(default)]
    pub shared_schedules: Vec<Schedule>,
}

impl ScheduleSet {
    /// Iterate owned schedules first, then shared ones.
    pub fn iter(&self) -> impl Iterator<Item = &Schedule> {
        self.owner_schedules
            .iter()
            .chain(self.shared_schedules.iter())
    }

    pub fn find(&self, id: &str) -> Option<&Schedule> {
        self.iter().find(|s| s.id == id)
    }

    pub(crate) fn find_mut(&mut self, id: &str) -> Option<&mut Schedule> {
        self.owner_schedules
            .iter_mut()
            .chain(self.shared_schedules.iter_mut())
            .find(|s| s.id == id)
    }

    pub fn kind_of(&self, id: &str) -> Option<ScheduleKind> {
        if self.owner_schedules.iter().any(|s| s.id == id) {
            Some(ScheduleKind::Owner)
        } else if self.shared_schedules.iter().any(|s| s.id == id) {
            Some(ScheduleKind::Shared)
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.owner_schedules.len() + self.shared_schedules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
