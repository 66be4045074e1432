// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use sittersync_core::{AuthError, Identity};

use crate::config::ClientConfig;

/// The signed-in account as configured: an email and the bearer token the service accepts.
///
/// The token is verified server side on every request. Locally it only has to be present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfiguredIdentity {
    email: Option<String>,
    has_token: bool,
}

impl ConfiguredIdentity {
    /// Identity for `email`, authenticated through `config`.
    #[must_use]
    pub fn new(email: Option<String>, config: &ClientConfig) -> Self {
        Self {
            email: email
                .map(|a| a.trim().to_string())
                .filter(|a| !a.is_empty()),
            has_token: config.auth.token().is_some(),
        }
    }
}

impl Identity for ConfiguredIdentity {
    fn verified_email(&self) -> Result<String, AuthError> {
        if !self.has_token {
            return Err(AuthError::MissingCredential);
        }
        self.email.clone().ok_or(AuthError::NoEmail)
    }
}
