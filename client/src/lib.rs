// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! REST client for the SitterSync schedule service, and the persistence and identity
//! collaborators the core controller is driven with.

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing,
    clippy::pedantic
)]
// Allow certain clippy lints that are too restrictive for this crate
#![allow(
    clippy::option_option,
    clippy::similar_names,
    clippy::single_match_else,
    clippy::match_bool
)]

mod client;
mod config;
mod dispatch;
mod error;
mod http;
mod identity;
mod types;

pub use crate::client::ScheduleClient;
pub use crate::config::{AuthMethod, ClientConfig};
pub use crate::dispatch::RestPersistence;
pub use crate::error::ClientError;
pub use crate::identity::ConfiguredIdentity;
pub use crate::types::{CompletePatch, CompletedProps};
