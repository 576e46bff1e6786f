// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Session context that a view layer binds to.

use std::fmt;
use std::sync::Arc;

use tokio::sync::{Mutex, broadcast, watch};

use crate::config::ConsoleConfig;
use crate::error::Result;
use crate::event::{ConsoleEvent, EventBus, Operation, Reporter, SessionId};
use crate::poller::{PollerState, TransactionPoller, TransactionSnapshot};
use crate::registry::{DeviceRegistry, DeviceSnapshot};
use crate::session::SessionStore;
use crate::types::{ActivationAck, CreatedDevice, Credential, DeviceId, NewDevice, ToggleAck};

#[cfg(feature = "http")]
use crate::protocol::{HttpClient, HttpConfig};
use crate::protocol::RemoteApi;

/// One console session.
///
/// Owns the credential store, the device cache, the transaction poller and
/// the event bus of a single session. Independent consoles share nothing.
///
/// Operations never panic and never abort the caller's flow: each returns
/// the [`Result`] of its own request, and every failure is also logged and
/// published as [`ConsoleEvent::RequestFailed`].
///
/// Dropping the console tears the session down.
///
/// # Examples
///
/// ```no_run
/// use elid_console::{Console, ConsoleConfig};
/// use elid_console::protocol::HttpConfig;
/// use elid_console::types::DeviceId;
///
/// # async fn example() -> elid_console::Result<()> {
/// let console = Console::http(HttpConfig::default(), ConsoleConfig::default())?;
///
/// // Login refreshes the device list once
/// let _ = console.login().await;
/// for device in console.devices().iter() {
///     println!("{device}");
/// }
///
/// // Activation starts live transaction polling
/// let _ = console.activate(DeviceId::new(1)).await;
/// let mut transactions = console.watch_transactions();
/// transactions.changed().await.ok();
/// # Ok(())
/// # }
/// ```
pub struct Console<A: RemoteApi> {
    api: Arc<A>,
    session: Arc<SessionStore>,
    login_gate: Mutex<()>,
    registry: DeviceRegistry,
    poller: TransactionPoller<A>,
    reporter: Reporter,
    config: ConsoleConfig,
}

#[cfg(feature = "http")]
impl Console<HttpClient> {
    /// Creates a console talking HTTP to the service.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn http(http: HttpConfig, config: ConsoleConfig) -> Result<Self> {
        Ok(Self::new(http.into_client()?, config))
    }
}

impl<A: RemoteApi> Console<A> {
    /// Creates a logged-out console over `api`.
    #[must_use]
    pub fn new(api: A, config: ConsoleConfig) -> Self {
        let api = Arc::new(api);
        let session = Arc::new(SessionStore::new());
        let reporter = Reporter::new(
            SessionId::new(),
            EventBus::with_capacity(config.event_capacity()),
        );
        let poller = TransactionPoller::new(
            Arc::clone(&api),
            Arc::clone(&session),
            reporter.clone(),
            config.poll_interval(),
            config.transaction_limit(),
        );

        tracing::debug!(session = %reporter.session_id(), "Console created");

        Self {
            api,
            session,
            login_gate: Mutex::new(()),
            registry: DeviceRegistry::new(reporter.clone()),
            poller,
            reporter,
            config,
        }
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// Logs in with the configured credentials.
    ///
    /// On the first successful login the device list is refreshed once.
    /// Logging in again returns the held credential without a request.
    /// Concurrent calls are serialized, so only one exchange is sent.
    ///
    /// # Errors
    ///
    /// Returns the login error; the console stays logged out.
    pub async fn login(&self) -> Result<Credential> {
        let _exchange = self.login_gate.lock().await;
        let was_authenticated = self.session.is_authenticated();
        let result = self.session.login(&*self.api, self.config.login()).await;
        let credential = self.reporter.observe(Operation::Login, result)?;

        if !was_authenticated {
            self.reporter.logged_in();
            let _ = self.registry.refresh(&*self.api, &self.session).await;
        }
        Ok(credential)
    }

    /// Returns true iff a credential is held.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Returns the session store.
    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Ends the session: drops the credential and stops polling.
    ///
    /// Responses that arrive afterwards are discarded. Calling it again does
    /// nothing.
    pub fn shutdown(&self) {
        let was_authenticated = self.session.end();
        self.poller.disarm();
        if was_authenticated {
            tracing::info!(session = %self.reporter.session_id(), "Session ended");
        }
    }

    // =========================================================================
    // Devices
    // =========================================================================

    /// Refreshes the device list.
    ///
    /// # Errors
    ///
    /// See [`DeviceRegistry::refresh`]; the previous snapshot is kept.
    pub async fn refresh_devices(&self) -> Result<DeviceSnapshot> {
        self.registry.refresh(&*self.api, &self.session).await
    }

    /// Refreshes the device list and fetches transactions once.
    ///
    /// # Errors
    ///
    /// Returns the first failure; both requests are always issued.
    pub async fn refresh_all(&self) -> Result<()> {
        let (devices, transactions) = tokio::join!(
            self.registry.refresh(&*self.api, &self.session),
            self.poller.fetch_once()
        );
        devices?;
        transactions?;
        Ok(())
    }

    /// Creates a device, then refreshes.
    ///
    /// # Errors
    ///
    /// See [`DeviceRegistry::create`].
    pub async fn create_device(
        &self,
        name: impl Into<String>,
        location: impl Into<String>,
    ) -> Result<CreatedDevice> {
        let device = NewDevice::new(name, location);
        self.registry
            .create(&*self.api, &self.session, &device)
            .await
    }

    /// Toggles a device lock, then refreshes.
    ///
    /// # Errors
    ///
    /// See [`DeviceRegistry::toggle`].
    pub async fn toggle(&self, id: DeviceId) -> Result<ToggleAck> {
        self.registry.toggle(&*self.api, &self.session, id).await
    }

    /// Activates a device, starts polling, then refreshes.
    ///
    /// # Errors
    ///
    /// See [`DeviceRegistry::activate`].
    pub async fn activate(&self, id: DeviceId) -> Result<ActivationAck> {
        self.registry
            .activate(&*self.api, &self.session, &self.poller, id)
            .await
    }

    /// Deactivates a device. Polling continues.
    ///
    /// # Errors
    ///
    /// See [`DeviceRegistry::deactivate`].
    pub async fn deactivate(&self, id: DeviceId) -> Result<ActivationAck> {
        self.registry.deactivate(&*self.api, &self.session, id).await
    }

    // =========================================================================
    // Views
    // =========================================================================

    /// Returns the current device snapshot.
    #[must_use]
    pub fn devices(&self) -> DeviceSnapshot {
        self.registry.snapshot()
    }

    /// Returns the current transaction snapshot.
    #[must_use]
    pub fn transactions(&self) -> TransactionSnapshot {
        self.poller.snapshot()
    }

    /// Observes device snapshot replacements.
    #[must_use]
    pub fn watch_devices(&self) -> watch::Receiver<DeviceSnapshot> {
        self.registry.watch()
    }

    /// Observes transaction snapshot replacements.
    #[must_use]
    pub fn watch_transactions(&self) -> watch::Receiver<TransactionSnapshot> {
        self.poller.watch()
    }

    /// Subscribes to session events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ConsoleEvent> {
        self.reporter.bus().subscribe()
    }

    /// Returns the poller state.
    #[must_use]
    pub fn poller_state(&self) -> PollerState {
        self.poller.state()
    }

    /// Returns true while transactions are being polled.
    #[must_use]
    pub fn is_polling(&self) -> bool {
        self.poller.is_polling()
    }

    /// Returns the session identifier.
    #[must_use]
    pub fn session_id(&self) -> SessionId {
        self.reporter.session_id()
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    /// Returns the underlying API client.
    #[must_use]
    pub fn api(&self) -> &A {
        &self.api
    }
}

impl<A: RemoteApi> Drop for Console<A> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl<A: RemoteApi> fmt::Debug for Console<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Console")
            .field("session_id", &self.reporter.session_id())
            .field("authenticated", &self.session.is_authenticated())
            .field("registry", &self.registry)
            .field("poller", &self.poller)
            .finish_non_exhaustive()
    }
}
