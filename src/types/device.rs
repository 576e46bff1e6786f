// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device records as returned by the service.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Server-assigned device identifier.
///
/// # Examples
///
/// ```
/// use elid_console::types::DeviceId;
///
/// let id = DeviceId::new(5);
/// assert_eq!(id.to_string(), "5");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(i64);

impl DeviceId {
    /// Wraps a raw identifier.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for DeviceId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// A lockable device managed by the service.
///
/// The service lists devices without JSON tags, so both `is_locked` and
/// `IsLocked` spellings are accepted. An empty location is treated as absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    /// Server-assigned identifier.
    #[serde(alias = "ID")]
    pub id: DeviceId,
    /// Display name.
    #[serde(alias = "Name")]
    pub name: String,
    /// Optional location.
    #[serde(
        default,
        alias = "Location",
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub location: Option<String>,
    /// Lock state.
    #[serde(default, alias = "IsLocked")]
    pub is_locked: bool,
}

impl Device {
    /// Returns the lock state label shown in the device table.
    #[must_use]
    pub fn lock_label(&self) -> &'static str {
        if self.is_locked { "LOCKED" } else { "UNLOCKED" }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} @ {} [{}]",
            self.id,
            self.name,
            self.location.as_deref().unwrap_or("-"),
            self.lock_label()
        )
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

/// Body of a device creation request.
///
/// Values are sent exactly as given; the client performs no validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewDevice {
    /// Device name.
    pub name: String,
    /// Device location.
    pub location: String,
}

impl NewDevice {
    /// Creates a new creation request body.
    #[must_use]
    pub fn new(name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
        }
    }
}
