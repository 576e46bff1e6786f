// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Client-side cache of the device list.

use std::fmt;
use std::sync::Arc;

use tokio::sync::watch;

use crate::error::{Error, Result};
use crate::event::{Operation, Reporter};
use crate::poller::TransactionPoller;
use crate::protocol::RemoteApi;
use crate::session::SessionStore;
use crate::types::{ActivationAck, CreatedDevice, Device, DeviceId, NewDevice, ToggleAck};

/// Shared, immutable device list in server order.
pub type DeviceSnapshot = Arc<Vec<Device>>;

/// Holds the last fetched device list of one session.
///
/// The list is a disposable snapshot: every completed fetch replaces it
/// whole, so the snapshot always equals the payload of the most recently
/// *completed* fetch. Overlapping refreshes are not serialized.
///
/// Mutations never surface their failure through control flow: create and
/// toggle always refresh afterwards and activate always arms the poller.
/// The mutation result is still returned to the caller.
pub struct DeviceRegistry {
    snapshot: watch::Sender<DeviceSnapshot>,
    reporter: Reporter,
}

impl DeviceRegistry {
    pub(crate) fn new(reporter: Reporter) -> Self {
        let (snapshot, _) = watch::channel(DeviceSnapshot::default());
        Self { snapshot, reporter }
    }

    /// Returns the latest device snapshot.
    #[must_use]
    pub fn snapshot(&self) -> DeviceSnapshot {
        self.snapshot.borrow().clone()
    }

    /// Returns a receiver that observes every snapshot replacement.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<DeviceSnapshot> {
        self.snapshot.subscribe()
    }

    /// Fetches the device list and replaces the snapshot.
    ///
    /// Rejected without a request when the session holds no credential. On
    /// failure the previous snapshot is kept. A list that arrives after the
    /// session ended is discarded.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotAuthenticated`], [`Error::SessionClosed`] or the
    /// request error. Failures have already been logged and published.
    pub async fn refresh<A: RemoteApi>(
        &self,
        api: &A,
        session: &SessionStore,
    ) -> Result<DeviceSnapshot> {
        let result = self.fetch(api, session).await;
        self.reporter.observe(Operation::ListDevices, result)
    }

    async fn fetch<A: RemoteApi>(&self, api: &A, session: &SessionStore) -> Result<DeviceSnapshot> {
        let headers = session.require_auth()?;
        let devices = api.list_devices(&headers).await?;

        if session.is_closed() {
            return Err(Error::SessionClosed);
        }

        let snapshot = Arc::new(devices);
        self.snapshot.send_replace(Arc::clone(&snapshot));
        self.reporter.devices_refreshed(snapshot.len());
        Ok(snapshot)
    }

    /// Submits a new device as given, then refreshes regardless of the
    /// outcome.
    ///
    /// # Errors
    ///
    /// Returns the creation error; the refresh still ran.
    pub async fn create<A: RemoteApi>(
        &self,
        api: &A,
        session: &SessionStore,
        device: &NewDevice,
    ) -> Result<CreatedDevice> {
        let result = match session.require_auth() {
            Ok(headers) => api.create_device(&headers, device).await,
            Err(error) => Err(error),
        };
        let result = self.reporter.observe(Operation::CreateDevice, result);

        let _ = self.refresh(api, session).await;
        result
    }

    /// Flips the lock state of a device, then refreshes regardless of the
    /// outcome.
    ///
    /// # Errors
    ///
    /// Returns the toggle error; the refresh still ran.
    pub async fn toggle<A: RemoteApi>(
        &self,
        api: &A,
        session: &SessionStore,
        id: DeviceId,
    ) -> Result<ToggleAck> {
        let result = match session.require_auth() {
            Ok(headers) => api.toggle_device(&headers, id).await,
            Err(error) => Err(error),
        };
        let result = self.reporter.observe(Operation::ToggleDevice, result);

        let _ = self.refresh(api, session).await;
        result
    }

    /// Activates a device, arms `poller` regardless of the outcome, then
    /// refreshes.
    ///
    /// # Errors
    ///
    /// Returns the activation error; the poller was armed and the refresh
    /// still ran.
    pub async fn activate<A: RemoteApi>(
        &self,
        api: &A,
        session: &SessionStore,
        poller: &TransactionPoller<A>,
        id: DeviceId,
    ) -> Result<ActivationAck> {
        let result = match session.require_auth() {
            Ok(headers) => api.activate_device(&headers, id).await,
            Err(error) => Err(error),
        };
        let result = self.reporter.observe(Operation::ActivateDevice, result);

        poller.arm();
        let _ = self.refresh(api, session).await;
        result
    }

    /// Deactivates a device.
    ///
    /// Neither refreshes nor disarms the poller.
    ///
    /// # Errors
    ///
    /// Returns the deactivation error.
    pub async fn deactivate<A: RemoteApi>(
        &self,
        api: &A,
        session: &SessionStore,
        id: DeviceId,
    ) -> Result<ActivationAck> {
        let result = match session.require_auth() {
            Ok(headers) => api.deactivate_device(&headers, id).await,
            Err(error) => Err(error),
        };
        self.reporter.observe(Operation::DeactivateDevice, result)
    }
}

impl fmt::Debug for DeviceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceRegistry")
            .field("devices", &self.snapshot.borrow().len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::event::{ConsoleEvent, EventBus, SessionId};
    use crate::poller::PollerState;
    use crate::protocol::fake::{Call, FakeApi, device};
    use crate::types::Credential;

    struct Fixture {
        api: Arc<FakeApi>,
        session: Arc<SessionStore>,
        registry: DeviceRegistry,
        poller: TransactionPoller<FakeApi>,
        bus: EventBus,
    }

    fn fixture() -> Fixture {
        let api = Arc::new(FakeApi::new());
        let session = Arc::new(SessionStore::new());
        session.store(Credential::new("tok").unwrap()).unwrap();
        let bus = EventBus::new();
        let reporter = Reporter::new(SessionId::new(), bus.clone());
        let poller = TransactionPoller::new(
            Arc::clone(&api),
            Arc::clone(&session),
            reporter.clone(),
            Duration::from_millis(2000),
            20,
        );

        Fixture {
            api,
            session,
            registry: DeviceRegistry::new(reporter),
            poller,
            bus,
        }
    }

    #[tokio::test]
    async fn refresh_replaces_snapshot_in_server_order() {
        let f = fixture();
        f.api
            .set_devices(vec![device(3, "C"), device(1, "A"), device(2, "B")]);

        let snapshot = f.registry.refresh(&*f.api, &f.session).await.unwrap();

        let ids: Vec<i64> = snapshot.iter().map(|d| d.id.value()).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert_eq!(f.registry.snapshot(), snapshot);
        assert_eq!(
            f.api.calls(),
            vec![Call::ListDevices { authorized: true }]
        );
    }

    #[tokio::test]
    async fn refresh_without_credential_is_rejected() {
        let f = fixture();
        let session = SessionStore::new();

        let result = f.registry.refresh(&*f.api, &session).await;

        assert!(matches!(result, Err(Error::NotAuthenticated)));
        assert!(f.api.calls().is_empty());
    }

    #[tokio::test]
    async fn failed_refresh_keeps_previous_snapshot() {
        let f = fixture();
        let mut events = f.bus.subscribe();
        f.api.set_devices(vec![device(1, "A")]);
        f.registry.refresh(&*f.api, &f.session).await.unwrap();

        f.api.set_fail_devices(true);
        let result = f.registry.refresh(&*f.api, &f.session).await;

        assert!(result.is_err());
        assert_eq!(*f.registry.snapshot(), vec![device(1, "A")]);

        assert!(matches!(
            events.recv().await.unwrap(),
            ConsoleEvent::DevicesRefreshed { count: 1, .. }
        ));
        assert!(matches!(
            events.recv().await.unwrap(),
            ConsoleEvent::RequestFailed {
                operation: Operation::ListDevices,
                ..
            }
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn last_completed_fetch_wins() {
        let f = fixture();
        f.api.script_devices(
            Duration::from_millis(100),
            Some(vec![device(1, "slow")]),
        );
        f.api
            .script_devices(Duration::from_millis(10), Some(vec![device(2, "fast")]));

        let (slow, fast) = tokio::join!(
            f.registry.refresh(&*f.api, &f.session),
            f.registry.refresh(&*f.api, &f.session)
        );

        assert_eq!(slow.unwrap()[0].name, "slow");
        assert_eq!(fast.unwrap()[0].name, "fast");
        assert_eq!(*f.registry.snapshot(), vec![device(1, "slow")]);
    }

    #[tokio::test(start_paused = true)]
    async fn list_arriving_after_teardown_is_discarded() {
        let f = fixture();
        f.api
            .script_devices(Duration::from_millis(50), Some(vec![device(1, "A")]));

        let (result, ()) = tokio::join!(f.registry.refresh(&*f.api, &f.session), async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            f.session.end();
        });

        assert!(matches!(result, Err(Error::SessionClosed)));
        assert!(f.registry.snapshot().is_empty());
    }

    #[tokio::test]
    async fn create_sends_body_then_refreshes_once() {
        let f = fixture();
        let new_device = NewDevice::new("Front Door", "Lobby");

        let created = f
            .registry
            .create(&*f.api, &f.session, &new_device)
            .await
            .unwrap();

        assert_eq!(created.id, DeviceId::new(100));
        assert_eq!(
            f.api.calls(),
            vec![
                Call::CreateDevice(NewDevice::new("Front Door", "Lobby")),
                Call::ListDevices { authorized: true },
            ]
        );
    }

    #[tokio::test]
    async fn failed_create_still_refreshes() {
        let f = fixture();
        f.api.set_fail_mutations(true);

        let result = f
            .registry
            .create(&*f.api, &f.session, &NewDevice::new("", ""))
            .await;

        assert!(result.is_err());
        assert_eq!(f.api.device_fetches(), 1);
        assert_eq!(
            f.api.calls()[0],
            Call::CreateDevice(NewDevice::new("", ""))
        );
    }

    #[tokio::test]
    async fn toggle_refreshes() {
        let f = fixture();

        let ack = f
            .registry
            .toggle(&*f.api, &f.session, DeviceId::new(4))
            .await
            .unwrap();

        assert!(ack.is_locked);
        assert_eq!(
            f.api.calls(),
            vec![
                Call::Toggle(DeviceId::new(4)),
                Call::ListDevices { authorized: true },
            ]
        );
    }

    #[tokio::test]
    async fn failed_activate_still_arms_and_refreshes() {
        let f = fixture();
        f.api.set_fail_mutations(true);

        let result = f
            .registry
            .activate(&*f.api, &f.session, &f.poller, DeviceId::new(5))
            .await;

        assert!(result.is_err());
        assert_eq!(f.poller.state(), PollerState::Polling);
        assert_eq!(f.api.device_fetches(), 1);
    }

    #[tokio::test]
    async fn deactivate_neither_refreshes_nor_disarms() {
        let f = fixture();
        f.registry
            .activate(&*f.api, &f.session, &f.poller, DeviceId::new(5))
            .await
            .unwrap();
        let fetches = f.api.device_fetches();

        f.registry
            .deactivate(&*f.api, &f.session, DeviceId::new(5))
            .await
            .unwrap();

        assert_eq!(f.api.device_fetches(), fetches);
        assert!(f.poller.is_polling());
        assert_eq!(f.api.count(|c| *c == Call::Deactivate(DeviceId::new(5))), 1);
    }

    #[tokio::test]
    async fn mutations_without_credential_send_nothing() {
        let f = fixture();
        let session = SessionStore::new();

        let result = f.registry.toggle(&*f.api, &session, DeviceId::new(1)).await;

        assert!(matches!(result, Err(Error::NotAuthenticated)));
        assert!(f.api.calls().is_empty());
    }
}
