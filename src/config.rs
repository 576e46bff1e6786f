// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Session configuration.

use std::time::Duration;

use crate::event::DEFAULT_CHANNEL_CAPACITY;
use crate::types::LoginCredentials;

/// Configuration for a [`Console`](crate::Console) session.
///
/// # Examples
///
/// ```
/// use elid_console::ConsoleConfig;
/// use elid_console::types::LoginCredentials;
/// use std::time::Duration;
///
/// let config = ConsoleConfig::new()
///     .with_login(LoginCredentials::new("ops@elid.test", "s3cret"))
///     .with_poll_interval(Duration::from_secs(5))
///     .with_transaction_limit(50);
///
/// assert_eq!(config.transaction_limit(), 50);
/// ```
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    login: LoginCredentials,
    poll_interval: Duration,
    transaction_limit: u32,
    event_capacity: usize,
}

impl ConsoleConfig {
    /// Default interval between transaction poll ticks.
    pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(2000);
    /// Default number of recent transactions fetched per tick.
    pub const DEFAULT_TRANSACTION_LIMIT: u32 = 20;

    /// Creates a configuration with the demo account and default timings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            login: LoginCredentials::default(),
            poll_interval: Self::DEFAULT_POLL_INTERVAL,
            transaction_limit: Self::DEFAULT_TRANSACTION_LIMIT,
            event_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }

    /// Sets the login credentials.
    #[must_use]
    pub fn with_login(mut self, login: LoginCredentials) -> Self {
        self.login = login;
        self
    }

    /// Sets the poll interval. Values below one millisecond are raised to
    /// one millisecond.
    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval.max(Duration::from_millis(1));
        self
    }

    /// Sets the number of transactions fetched per tick (at least 1).
    #[must_use]
    pub fn with_transaction_limit(mut self, limit: u32) -> Self {
        self.transaction_limit = limit.max(1);
        self
    }

    /// Sets the event bus capacity (at least 1).
    #[must_use]
    pub fn with_event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity.max(1);
        self
    }

    /// Returns the login credentials.
    #[must_use]
    pub fn login(&self) -> &LoginCredentials {
        &self.login
    }

    /// Returns the poll interval.
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Returns the number of transactions fetched per tick.
    #[must_use]
    pub fn transaction_limit(&self) -> u32 {
        self.transaction_limit
    }

    /// Returns the event bus capacity.
    #[must_use]
    pub fn event_capacity(&self) -> usize {
        self.event_capacity
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self::new()
    }
}
