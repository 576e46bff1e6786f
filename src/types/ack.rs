// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Acknowledgement bodies returned by mutating endpoints.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::DeviceId;

/// Response to a device creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CreatedDevice {
    /// Identifier assigned to the new device.
    pub id: DeviceId,
}

/// Response to a lock toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ToggleAck {
    /// Lock state after the toggle.
    pub is_locked: bool,
}

/// Status reported by the activation endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivationStatus {
    /// Transaction generation started.
    Activated,
    /// Transaction generation was already running.
    AlreadyActive,
    /// Transaction generation stopped.
    Deactivated,
    /// Transaction generation was not running.
    NotActive,
    /// Any status this client does not know.
    #[serde(other)]
    Unknown,
}

/// Response to an activate or deactivate call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ActivationAck {
    /// Reported status.
    pub status: ActivationStatus,
}

/// Response of the health endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Health {
    /// Whether the service reports itself healthy.
    pub ok: bool,
    /// Server time, if reported.
    #[serde(default)]
    pub time: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activation_statuses() {
        let ack: ActivationAck = serde_json::from_str(r#"{"status":"already_active"}"#).unwrap();
        assert_eq!(ack.status, ActivationStatus::AlreadyActive);

        let ack: ActivationAck = serde_json::from_str(r#"{"status":"not_active"}"#).unwrap();
        assert_eq!(ack.status, ActivationStatus::NotActive);
    }

    #[test]
    fn unknown_activation_status() {
        let ack: ActivationAck = serde_json::from_str(r#"{"status":"paused"}"#).unwrap();
        assert_eq!(ack.status, ActivationStatus::Unknown);
    }

    #[test]
    fn created_and_toggle_acks() {
        let created: CreatedDevice = serde_json::from_str(r#"{"id":12}"#).unwrap();
        assert_eq!(created.id, DeviceId::new(12));

        let toggled: ToggleAck = serde_json::from_str(r#"{"is_locked":true}"#).unwrap();
        assert!(toggled.is_locked);
    }

    #[test]
    fn health_body() {
        let health: Health =
            serde_json::from_str(r#"{"ok":true,"time":"2025-03-01T00:00:00Z"}"#).unwrap();
        assert!(health.ok);
        assert!(health.time.is_some());
    }
}
