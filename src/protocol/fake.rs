// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory [`RemoteApi`] for unit tests.

use std::collections::VecDeque;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use parking_lot::Mutex;

use crate::error::{Error, ProtocolError, Result};
use crate::protocol::RemoteApi;
use crate::session::AuthHeaders;
use crate::types::{
    ActivationAck, ActivationStatus, CreatedDevice, Credential, Device, DeviceId, Health,
    LoginCredentials, NewDevice, ToggleAck, Transaction,
};

/// A request received by the fake, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    Login(LoginCredentials),
    ListDevices { authorized: bool },
    CreateDevice(NewDevice),
    Toggle(DeviceId),
    Activate(DeviceId),
    Deactivate(DeviceId),
    ListTransactions { limit: u32 },
}

/// One-off answer to a listing; `None` fails.
#[derive(Debug)]
struct Scripted<T> {
    delay: Duration,
    answer: Option<Vec<T>>,
}

#[derive(Debug, Default)]
struct State {
    calls: Vec<Call>,
    fail_login: bool,
    login_delay: Duration,
    devices: Vec<Device>,
    scripted_devices: VecDeque<Scripted<Device>>,
    fail_devices: bool,
    fail_mutations: bool,
    transactions: Vec<Transaction>,
    scripted_transactions: VecDeque<Scripted<Transaction>>,
    fail_transactions: bool,
}

#[derive(Debug, Default)]
pub(crate) struct FakeApi {
    state: Mutex<State>,
}

pub(crate) fn device(id: i64, name: &str) -> Device {
    Device {
        id: DeviceId::new(id),
        name: name.to_string(),
        location: None,
        is_locked: false,
    }
}

pub(crate) fn transaction(id: i64, action: &str) -> Transaction {
    Transaction {
        id,
        device_id: Some(DeviceId::new(1)),
        device: "Front Door".to_string(),
        action: action.to_string(),
        created_at: Utc.timestamp_opt(1_700_000_000 + id, 0).unwrap(),
    }
}

fn unavailable() -> Error {
    ProtocolError::Status {
        status: 503,
        reason: "Service Unavailable".to_string(),
    }
    .into()
}

impl FakeApi {
    pub(crate) const TOKEN: &'static str = "fake-token";

    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.state.lock().calls.clone()
    }

    pub(crate) fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.state.lock().calls.iter().filter(|c| predicate(c)).count()
    }

    pub(crate) fn transaction_fetches(&self) -> usize {
        self.count(|c| matches!(c, Call::ListTransactions { .. }))
    }

    pub(crate) fn device_fetches(&self) -> usize {
        self.count(|c| matches!(c, Call::ListDevices { .. }))
    }

    pub(crate) fn fail_login(&self) {
        self.state.lock().fail_login = true;
    }

    pub(crate) fn set_login_delay(&self, delay: Duration) {
        self.state.lock().login_delay = delay;
    }

    pub(crate) fn set_devices(&self, devices: Vec<Device>) {
        self.state.lock().devices = devices;
    }

    /// Queues a one-off answer for the next device listing.
    /// `None` answers with a failure.
    pub(crate) fn script_devices(&self, delay: Duration, devices: Option<Vec<Device>>) {
        self.state
            .lock()
            .scripted_devices
            .push_back(Scripted {
                delay,
                answer: devices,
            });
    }

    pub(crate) fn set_fail_devices(&self, fail: bool) {
        self.state.lock().fail_devices = fail;
    }

    pub(crate) fn set_fail_mutations(&self, fail: bool) {
        self.state.lock().fail_mutations = fail;
    }

    pub(crate) fn set_transactions(&self, transactions: Vec<Transaction>) {
        self.state.lock().transactions = transactions;
    }

    /// Queues a one-off answer for the next transaction listing.
    pub(crate) fn script_transactions(
        &self,
        delay: Duration,
        transactions: Option<Vec<Transaction>>,
    ) {
        self.state
            .lock()
            .scripted_transactions
            .push_back(Scripted {
                delay,
                answer: transactions,
            });
    }

    pub(crate) fn set_fail_transactions(&self, fail: bool) {
        self.state.lock().fail_transactions = fail;
    }

    fn record_mutation(&self, call: Call) -> Result<()> {
        let mut state = self.state.lock();
        state.calls.push(call);
        if state.fail_mutations {
            Err(unavailable())
        } else {
            Ok(())
        }
    }
}

impl RemoteApi for FakeApi {
    async fn health(&self) -> Result<Health> {
        Ok(Health {
            ok: true,
            time: None,
        })
    }

    async fn login(&self, credentials: &LoginCredentials) -> Result<Credential> {
        let delay = {
            let mut state = self.state.lock();
            state.calls.push(Call::Login(credentials.clone()));
            if state.fail_login {
                return Err(ProtocolError::AuthenticationFailed.into());
            }
            state.login_delay
        };

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        Credential::new(Self::TOKEN).ok_or(Error::NotAuthenticated)
    }

    async fn list_devices(&self, headers: &AuthHeaders) -> Result<Vec<Device>> {
        let (delay, answer) = {
            let mut state = self.state.lock();
            state.calls.push(Call::ListDevices {
                authorized: headers.authorization().is_some(),
            });
            let scripted = state.scripted_devices.pop_front();
            match scripted {
                Some(scripted) => (scripted.delay, scripted.answer),
                None if state.fail_devices => (Duration::ZERO, None),
                None => (Duration::ZERO, Some(state.devices.clone())),
            }
        };

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        answer.ok_or_else(unavailable)
    }

    async fn create_device(&self, _headers: &AuthHeaders, device: &NewDevice) -> Result<CreatedDevice> {
        self.record_mutation(Call::CreateDevice(device.clone()))?;
        Ok(CreatedDevice {
            id: DeviceId::new(100),
        })
    }

    async fn toggle_device(&self, _headers: &AuthHeaders, id: DeviceId) -> Result<ToggleAck> {
        self.record_mutation(Call::Toggle(id))?;
        Ok(ToggleAck { is_locked: true })
    }

    async fn activate_device(&self, _headers: &AuthHeaders, id: DeviceId) -> Result<ActivationAck> {
        self.record_mutation(Call::Activate(id))?;
        Ok(ActivationAck {
            status: ActivationStatus::Activated,
        })
    }

    async fn deactivate_device(
        &self,
        _headers: &AuthHeaders,
        id: DeviceId,
    ) -> Result<ActivationAck> {
        self.record_mutation(Call::Deactivate(id))?;
        Ok(ActivationAck {
            status: ActivationStatus::Deactivated,
        })
    }

    async fn list_transactions(&self, _headers: &AuthHeaders, limit: u32) -> Result<Vec<Transaction>> {
        let (delay, answer) = {
            let mut state = self.state.lock();
            state.calls.push(Call::ListTransactions { limit });
            let scripted = state.scripted_transactions.pop_front();
            match scripted {
                Some(scripted) => (scripted.delay, scripted.answer),
                None if state.fail_transactions => (Duration::ZERO, None),
                None => (Duration::ZERO, Some(state.transactions.clone())),
            }
        };

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        answer.ok_or_else(unavailable)
    }
}
