// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Console event types.

use std::fmt;

use super::SessionId;

/// The remote operation an event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `POST /auth/login`
    Login,
    /// `GET /api/devices`
    ListDevices,
    /// `POST /api/devices`
    CreateDevice,
    /// `POST /api/devices/{id}/toggle`
    ToggleDevice,
    /// `POST /api/devices/{id}/activate`
    ActivateDevice,
    /// `POST /api/devices/{id}/deactivate`
    DeactivateDevice,
    /// `GET /api/transactions`
    ListTransactions,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Login => "login",
            Self::ListDevices => "list devices",
            Self::CreateDevice => "create device",
            Self::ToggleDevice => "toggle device",
            Self::ActivateDevice => "activate device",
            Self::DeactivateDevice => "deactivate device",
            Self::ListTransactions => "list transactions",
        };
        f.write_str(name)
    }
}

/// Events emitted by a console session.
///
/// Failures that the console swallows for control-flow purposes are still
/// reported here as [`ConsoleEvent::RequestFailed`].
///
/// # Examples
///
/// ```
/// use elid_console::event::{ConsoleEvent, Operation, SessionId};
///
/// let session_id = SessionId::new();
/// let event = ConsoleEvent::request_failed(session_id, Operation::ToggleDevice, "HTTP 404 - Not Found");
/// assert!(event.is_failure());
/// assert_eq!(event.session_id(), session_id);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleEvent {
    /// A credential was obtained.
    LoggedIn {
        /// The session.
        session_id: SessionId,
    },

    /// The device snapshot was replaced.
    DevicesRefreshed {
        /// The session.
        session_id: SessionId,
        /// Number of devices in the new snapshot.
        count: usize,
    },

    /// The transaction snapshot was replaced.
    TransactionsRefreshed {
        /// The session.
        session_id: SessionId,
        /// Number of transactions in the new snapshot.
        count: usize,
    },

    /// The transaction poller went from idle to polling.
    PollingStarted {
        /// The session.
        session_id: SessionId,
    },

    /// The transaction poller was stopped by teardown.
    PollingStopped {
        /// The session.
        session_id: SessionId,
    },

    /// A remote call failed and the failure was swallowed.
    RequestFailed {
        /// The session.
        session_id: SessionId,
        /// The failed operation.
        operation: Operation,
        /// Rendered error.
        message: String,
    },
}

impl ConsoleEvent {
    /// Returns the session ID associated with this event.
    #[must_use]
    pub fn session_id(&self) -> SessionId {
        match self {
            Self::LoggedIn { session_id }
            | Self::DevicesRefreshed { session_id, .. }
            | Self::TransactionsRefreshed { session_id, .. }
            | Self::PollingStarted { session_id }
            | Self::PollingStopped { session_id }
            | Self::RequestFailed { session_id, .. } => *session_id,
        }
    }

    /// Returns `true` if this event reports a failed request.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::RequestFailed { .. })
    }

    /// Creates a request failed event.
    #[must_use]
    pub fn request_failed(
        session_id: SessionId,
        operation: Operation,
        message: impl Into<String>,
    ) -> Self {
        Self::RequestFailed {
            session_id,
            operation,
            message: message.into(),
        }
    }
}
