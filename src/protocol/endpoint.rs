// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Endpoint descriptors for the device-management service.

use std::fmt;

use crate::event::Operation;
use crate::types::DeviceId;

/// HTTP method of an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
}

impl Method {
    /// Returns the method name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A call the console can make against the service.
///
/// # Examples
///
/// ```
/// use elid_console::protocol::{Endpoint, Method};
/// use elid_console::types::DeviceId;
///
/// let endpoint = Endpoint::Toggle(DeviceId::new(5));
/// assert_eq!(endpoint.method(), Method::Post);
/// assert_eq!(endpoint.path_and_query(), "/api/devices/5/toggle");
/// assert!(endpoint.requires_auth());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// Service health probe.
    Health,
    /// Exchange email and password for a token.
    Login,
    /// List all devices.
    ListDevices,
    /// Create a device.
    CreateDevice,
    /// Flip the lock state of a device.
    Toggle(DeviceId),
    /// Start transaction generation for a device.
    Activate(DeviceId),
    /// Stop transaction generation for a device.
    Deactivate(DeviceId),
    /// List the most recent transactions.
    ListTransactions {
        /// Maximum number of records.
        limit: u32,
    },
}

impl Endpoint {
    /// Returns the HTTP method.
    #[must_use]
    pub fn method(&self) -> Method {
        match self {
            Self::Health | Self::ListDevices | Self::ListTransactions { .. } => Method::Get,
            Self::Login
            | Self::CreateDevice
            | Self::Toggle(_)
            | Self::Activate(_)
            | Self::Deactivate(_) => Method::Post,
        }
    }

    /// Returns the request path including any query string.
    #[must_use]
    pub fn path_and_query(&self) -> String {
        match self {
            Self::Health => "/health".to_string(),
            Self::Login => "/auth/login".to_string(),
            Self::ListDevices | Self::CreateDevice => "/api/devices".to_string(),
            Self::Toggle(id) => format!("/api/devices/{id}/toggle"),
            Self::Activate(id) => format!("/api/devices/{id}/activate"),
            Self::Deactivate(id) => format!("/api/devices/{id}/deactivate"),
            Self::ListTransactions { limit } => format!("/api/transactions?limit={limit}"),
        }
    }

    /// Returns true if the service expects a bearer token.
    #[must_use]
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Self::Health | Self::Login)
    }

    /// Returns the operation reported in events, if this endpoint has one.
    #[must_use]
    pub fn operation(&self) -> Option<Operation> {
        match self {
            Self::Health => None,
            Self::Login => Some(Operation::Login),
            Self::ListDevices => Some(Operation::ListDevices),
            Self::CreateDevice => Some(Operation::CreateDevice),
            Self::Toggle(_) => Some(Operation::ToggleDevice),
            Self::Activate(_) => Some(Operation::ActivateDevice),
            Self::Deactivate(_) => Some(Operation::DeactivateDevice),
            Self::ListTransactions { .. } => Some(Operation::ListTransactions),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method(), self.path_and_query())
    }
}
