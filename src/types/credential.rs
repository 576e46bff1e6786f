// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Login credentials and the session token they are exchanged for.

use std::fmt;

use serde::Serialize;

/// Opaque bearer token issued by the service.
///
/// The `Debug` output never contains the token itself.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wraps a token. Returns `None` for an empty token, which the service
    /// may send instead of an error status.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        if token.is_empty() {
            None
        } else {
            Some(Self(token))
        }
    }

    /// Returns the raw token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the `Authorization` header value for this token.
    #[must_use]
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Credential(<{} bytes>)", self.0.len())
    }
}

/// Email and password exchanged for a [`Credential`].
///
/// Defaults to the demo account the console ships with.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct LoginCredentials {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
}

impl LoginCredentials {
    /// Demo account email.
    pub const DEMO_EMAIL: &'static str = "admin@elid.test";
    /// Demo account password.
    pub const DEMO_PASSWORD: &'static str = "admin123";

    /// Creates login credentials.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl Default for LoginCredentials {
    fn default() -> Self {
        Self::new(Self::DEMO_EMAIL, Self::DEMO_PASSWORD)
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}
