// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Request headers derived from the session credential.

use crate::types::Credential;

/// `Authorization` header name.
pub const AUTHORIZATION: &str = "Authorization";
/// `Content-Type` header name.
pub const CONTENT_TYPE: &str = "Content-Type";

const JSON: &str = "application/json";

/// Headers to attach to one request.
///
/// Empty when the session holds no credential, otherwise a bearer
/// authorization entry and a JSON content-type entry. Built per request by
/// [`SessionStore::authorized_headers`](super::SessionStore::authorized_headers).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthHeaders {
    entries: Vec<(&'static str, String)>,
}

impl AuthHeaders {
    /// Headers for an unauthenticated request.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Headers for a request on behalf of `credential`.
    #[must_use]
    pub fn bearer(credential: &Credential) -> Self {
        Self {
            entries: vec![
                (AUTHORIZATION, credential.bearer()),
                (CONTENT_TYPE, JSON.to_string()),
            ],
        }
    }

    /// Returns true if no header is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of headers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns the value of a header by case-insensitive name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Returns the `Authorization` value, if any.
    #[must_use]
    pub fn authorization(&self) -> Option<&str> {
        self.get(AUTHORIZATION)
    }

    /// Iterates over `(name, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.entries.iter().map(|(key, value)| (*key, value.as_str()))
    }
}
