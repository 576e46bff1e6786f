// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transaction log records.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::DeviceId;

/// An immutable record of an action taken against a device.
///
/// The device is referenced by display name; `device_id` is only present
/// when the service includes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Server-assigned identifier.
    pub id: i64,
    /// Identifier of the device, if reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<DeviceId>,
    /// Display name of the device.
    pub device: String,
    /// Action label, e.g. `ACCESS_GRANTED` or `LOCKED`.
    pub action: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} [{}] {} {}",
            self.id,
            self.created_at.format("%H:%M:%S"),
            self.device,
            self.action
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_transaction_with_offset() {
        let txn: Transaction = serde_json::from_str(
            r#"{"id":42,"device_id":5,"device":"Front Door","action":"ACCESS_GRANTED","created_at":"2025-03-01T10:15:30.123456+02:00"}"#,
        )
        .unwrap();

        assert_eq!(txn.id, 42);
        assert_eq!(txn.device_id, Some(DeviceId::new(5)));
        assert_eq!(txn.device, "Front Door");
        assert_eq!(txn.action, "ACCESS_GRANTED");
        assert_eq!(txn.created_at.format("%H:%M:%S").to_string(), "08:15:30");
    }

    #[test]
    fn parse_transaction_without_device_id() {
        let txn: Transaction = serde_json::from_str(
            r#"{"id":1,"device":"Gate","action":"LOCKED","created_at":"2025-03-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(txn.device_id, None);
        assert_eq!(txn.to_string(), "#1 [00:00:00] Gate LOCKED");
    }

    #[test]
    fn reject_missing_timestamp() {
        let result: Result<Transaction, _> =
            serde_json::from_str(r#"{"id":1,"device":"Gate","action":"LOCKED"}"#);
        assert!(result.is_err());
    }
}
