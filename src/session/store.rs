// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Credential holder for one session.

use parking_lot::RwLock;

use crate::error::{Error, Result};
use crate::protocol::RemoteApi;
use crate::types::{Credential, LoginCredentials};

use super::AuthHeaders;

#[derive(Debug, Default)]
struct Slot {
    credential: Option<Credential>,
    closed: bool,
}

/// Holds the credential of one session and gates every other request.
///
/// A credential, once stored, is kept until [`SessionStore::end`]. There is
/// no logout and no refresh. After `end` the store is closed for good and
/// further logins are rejected.
#[derive(Debug, Default)]
pub struct SessionStore {
    slot: RwLock<Slot>,
}

impl SessionStore {
    /// Creates a logged-out store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Exchanges `credentials` for a token and stores it.
    ///
    /// Returns the held credential without a request if the store is already
    /// authenticated. On failure the store stays logged out.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SessionClosed`] after [`SessionStore::end`], or the
    /// error of the login request (non-2xx status, network failure, body
    /// without a usable token).
    pub async fn login<A: RemoteApi>(
        &self,
        api: &A,
        credentials: &LoginCredentials,
    ) -> Result<Credential> {
        {
            let slot = self.slot.read();
            if slot.closed {
                return Err(Error::SessionClosed);
            }
            if let Some(credential) = &slot.credential {
                return Ok(credential.clone());
            }
        }

        let credential = api.login(credentials).await?;
        self.store(credential.clone())?;
        Ok(credential)
    }

    /// Stores a credential obtained elsewhere.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SessionClosed`] after [`SessionStore::end`].
    pub fn store(&self, credential: Credential) -> Result<()> {
        let mut slot = self.slot.write();
        if slot.closed {
            return Err(Error::SessionClosed);
        }
        slot.credential = Some(credential);
        Ok(())
    }

    /// Returns true iff a credential is held.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.slot.read().credential.is_some()
    }

    /// Returns true once the session has ended.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.slot.read().closed
    }

    /// Returns a copy of the held credential.
    #[must_use]
    pub fn credential(&self) -> Option<Credential> {
        self.slot.read().credential.clone()
    }

    /// Builds the headers for one request from the current credential.
    ///
    /// The result must not be reused for later requests.
    #[must_use]
    pub fn authorized_headers(&self) -> AuthHeaders {
        match &self.slot.read().credential {
            Some(credential) => AuthHeaders::bearer(credential),
            None => AuthHeaders::empty(),
        }
    }

    /// Builds the headers for one request, rejecting the request if no
    /// credential is held.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SessionClosed`] after [`SessionStore::end`] and
    /// [`Error::NotAuthenticated`] before a successful login.
    pub fn require_auth(&self) -> Result<AuthHeaders> {
        let slot = self.slot.read();
        match &slot.credential {
            Some(credential) => Ok(AuthHeaders::bearer(credential)),
            None if slot.closed => Err(Error::SessionClosed),
            None => Err(Error::NotAuthenticated),
        }
    }

    /// Ends the session: drops the credential and closes the store.
    ///
    /// Returns true if a credential was held.
    pub fn end(&self) -> bool {
        let mut slot = self.slot.write();
        slot.closed = true;
        slot.credential.take().is_some()
    }
}
