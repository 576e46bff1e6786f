// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Data types exchanged with the device-management service.
//!
//! # Types
//!
//! - [`Device`] / [`DeviceId`] - Lockable devices and their identifiers
//! - [`NewDevice`] - Body of a creation request
//! - [`Transaction`] - Log record of an action taken against a device
//! - [`Credential`] / [`LoginCredentials`] - Session token and login pair
//! - [`CreatedDevice`], [`ToggleAck`], [`ActivationAck`], [`Health`] - Acknowledgements

mod ack;
mod credential;
mod device;
mod transaction;

pub use ack::{ActivationAck, ActivationStatus, CreatedDevice, Health, ToggleAck};
pub use credential::{Credential, LoginCredentials};
pub use device::{Device, DeviceId, NewDevice};
pub use transaction::Transaction;
