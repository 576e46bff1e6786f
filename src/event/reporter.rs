// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-session logging and event publication.

use crate::error::Error;

use super::{ConsoleEvent, EventBus, Operation, SessionId};

/// Logs session activity and mirrors it onto the event bus.
///
/// Every component of a session holds a clone, so log records and events
/// always carry the same session id.
#[derive(Debug, Clone)]
pub(crate) struct Reporter {
    session_id: SessionId,
    bus: EventBus,
}

impl Reporter {
    pub(crate) fn new(session_id: SessionId, bus: EventBus) -> Self {
        Self { session_id, bus }
    }

    pub(crate) fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub(crate) fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub(crate) fn logged_in(&self) {
        tracing::info!(session = %self.session_id, "Logged in");
        self.bus.publish(ConsoleEvent::LoggedIn {
            session_id: self.session_id,
        });
    }

    pub(crate) fn devices_refreshed(&self, count: usize) {
        tracing::debug!(session = %self.session_id, count, "Device snapshot replaced");
        self.bus.publish(ConsoleEvent::DevicesRefreshed {
            session_id: self.session_id,
            count,
        });
    }

    pub(crate) fn transactions_refreshed(&self, count: usize) {
        tracing::debug!(session = %self.session_id, count, "Transaction snapshot replaced");
        self.bus.publish(ConsoleEvent::TransactionsRefreshed {
            session_id: self.session_id,
            count,
        });
    }

    pub(crate) fn polling_started(&self) {
        tracing::info!(session = %self.session_id, "Transaction polling started");
        self.bus.publish(ConsoleEvent::PollingStarted {
            session_id: self.session_id,
        });
    }

    pub(crate) fn polling_stopped(&self) {
        tracing::info!(session = %self.session_id, "Transaction polling stopped");
        self.bus.publish(ConsoleEvent::PollingStopped {
            session_id: self.session_id,
        });
    }

    /// Reports a swallowed failure.
    ///
    /// Results discarded because the session already ended are only logged.
    pub(crate) fn failed(&self, operation: Operation, error: &Error) {
        if matches!(error, Error::SessionClosed) {
            tracing::debug!(
                session = %self.session_id,
                operation = %operation,
                "Discarding result after teardown"
            );
            return;
        }
        tracing::warn!(
            session = %self.session_id,
            operation = %operation,
            error = %error,
            "Request failed"
        );
        self.bus.publish(ConsoleEvent::request_failed(
            self.session_id,
            operation,
            error.to_string(),
        ));
    }

    /// Reports the failure of `result`, if any, and hands it back unchanged.
    pub(crate) fn observe<T>(
        &self,
        operation: Operation,
        result: crate::Result<T>,
    ) -> crate::Result<T> {
        if let Err(error) = &result {
            self.failed(operation, error);
        }
        result
    }
}
