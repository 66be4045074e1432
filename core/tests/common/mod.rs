// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Common test utilities for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - Collaborator doubles (persistence, widget)
//! - Test data factories (fixtures)
//! - Custom assertion helpers

mod assertions;
mod fixtures;

#[allow(unused_imports)]
pub use assertions::{assert_event_ids, assert_stored};
#[allow(unused_imports)]
pub use fixtures::{
    FakeWidget, RecordingPersistence, TestController, as_shared, controller_for, controller_with,
    dentist_form, kids_schedules, schedule, standup_form, stored_event, test_config,
};
