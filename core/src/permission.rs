// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Role checks for a verified user against a schedule.
//!
//! Exactly one role applies per user and schedule: owner, read sharee, write sharee or none.
//! Ownership wins if the owner is also listed as a sharee.

use std::fmt::{self, Display};
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{PermissionError, ValidationError};
use crate::schedule::{Permission, Schedule, Users};

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("valid email regex"));

/// The role a user holds on a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Owner,
    Sharee(Permission),
}

impl Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Owner => write!(f, "owner"),
            Role::Sharee(p) => write!(f, "{p}"),
        }
    }
}

/// Resolve the role of `email` on `schedule`, if any.
pub fn role_of(email: &str, schedule: &Schedule) -> Option<Role> {
    if schedule.users.owner_email == email {
        return Some(Role::Owner);
    }
    schedule
        .users
        .sharee(email)
        .map(|s| Role::Sharee(s.permissions))
}

pub fn can_read(email: &str, schedule: &Schedule) -> bool {
    role_of(email, schedule).is_some()
}

pub fn can_write(email: &str, schedule: &Schedule) -> bool {
    matches!(
        role_of(email, schedule),
        Some(Role::Owner | Role::Sharee(Permission::Write))
    )
}

/// Only the owner may rename, share, transfer or delete a schedule.
pub fn can_manage(email: &str, schedule: &Schedule) -> bool {
    matches!(role_of(email, schedule), Some(Role::Owner))
}

pub fn ensure_writeable(email: &str, schedule: &Schedule) -> Result<(), PermissionError> {
    if can_write(email, schedule) {
        Ok(())
    } else {
        Err(PermissionError::NotWriteable {
            schedule_id: schedule.id.clone(),
        })
    }
}

pub fn ensure_owner(email: &str, schedule: &Schedule) -> Result<(), PermissionError> {
    if can_manage(email, schedule) {
        Ok(())
    } else {
        Err(PermissionError::NotOwner {
            schedule_id: schedule.id.clone(),
        })
    }
}

/// Loose email check: something, an `@`, something, a dot, something.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Check the user list of a schedule before it is committed.
pub fn validate_users(users: &Users) -> Result<(), ValidationError> {
    if !is_valid_email(&users.owner_email) {
        return Err(ValidationError::InvalidOwnerEmail(users.owner_email.clone()));
    }

    for sharee in &users.sharing_with {
        if !is_valid_email(&sharee.user_email) {
            return Err(ValidationError::InvalidShareeEmail(sharee.user_email.clone()));
        }
        if sharee.user_email == users.owner_email {
            return Err(ValidationError::OwnerIsSharee(sharee.user_email.clone()));
        }
    }
    Ok(())
}
