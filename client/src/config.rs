// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

/// How requests prove who is sending them.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(tag = "type")]
pub enum AuthMethod {
    /// No authentication. Every endpoint of the schedule service rejects this.
    #[serde(rename = "none")]
    #[default]
    None,
    /// Bearer token authentication, the ID token issued by the identity provider.
    #[serde(rename = "bearer")]
    Bearer {
        /// Bearer token.
        token: String,
    },
}

impl AuthMethod {
    /// The bearer token, if any.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        match self {
            Self::Bearer { token } if !token.trim().is_empty() => Some(token),
            _ => None,
        }
    }
}

/// Schedule service configuration.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct ClientConfig {
    /// Base URL of the service API, e.g. `http://localhost:3000/api`.
    pub base_url: String,
    /// Authentication method.
    #[serde(default)]
    pub auth: AuthMethod,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// User agent string.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

const fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("sittersync-client/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            auth: AuthMethod::default(),
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}
