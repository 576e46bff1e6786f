// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transport to the device-management service.
//!
//! [`RemoteApi`] is the seam between the console state machine and the
//! network. [`HttpClient`] implements it over reqwest; tests substitute an
//! in-memory implementation.
//!
//! Every call returns a [`Result`], even where the console ignores the
//! failure branch.

#[cfg(test)]
pub(crate) mod fake;
mod endpoint;
#[cfg(feature = "http")]
mod http;

pub use endpoint::{Endpoint, Method};
#[cfg(feature = "http")]
pub use http::{HttpClient, HttpConfig};

use std::future::Future;

use crate::error::Result;
use crate::session::AuthHeaders;
use crate::types::{
    ActivationAck, CreatedDevice, Credential, Device, DeviceId, Health, LoginCredentials,
    NewDevice, ToggleAck, Transaction,
};

/// Operations the console needs from the service.
///
/// Authenticated calls take the headers built by
/// [`SessionStore::authorized_headers`](crate::session::SessionStore::authorized_headers)
/// for that single request.
pub trait RemoteApi: Send + Sync + 'static {
    /// Probes service health.
    fn health(&self) -> impl Future<Output = Result<Health>> + Send;

    /// Exchanges login credentials for a token.
    ///
    /// A successful response without a usable token is an error.
    fn login(&self, credentials: &LoginCredentials)
    -> impl Future<Output = Result<Credential>> + Send;

    /// Lists all devices in server order.
    fn list_devices(&self, headers: &AuthHeaders) -> impl Future<Output = Result<Vec<Device>>> + Send;

    /// Creates a device.
    fn create_device(
        &self,
        headers: &AuthHeaders,
        device: &NewDevice,
    ) -> impl Future<Output = Result<CreatedDevice>> + Send;

    /// Flips the lock state of a device.
    fn toggle_device(
        &self,
        headers: &AuthHeaders,
        id: DeviceId,
    ) -> impl Future<Output = Result<ToggleAck>> + Send;

    /// Starts transaction generation for a device.
    fn activate_device(
        &self,
        headers: &AuthHeaders,
        id: DeviceId,
    ) -> impl Future<Output = Result<ActivationAck>> + Send;

    /// Stops transaction generation for a device.
    fn deactivate_device(
        &self,
        headers: &AuthHeaders,
        id: DeviceId,
    ) -> impl Future<Output = Result<ActivationAck>> + Send;

    /// Lists the `limit` most recent transactions, newest first.
    fn list_transactions(
        &self,
        headers: &AuthHeaders,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<Transaction>>> + Send;
}
