// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Recurring fetch of the most recent transactions.
//!
//! The poller starts [`PollerState::Idle`]. [`TransactionPoller::arm`] moves
//! it to [`PollerState::Polling`] and spawns a single tokio task that fetches
//! once immediately and then once per interval. A fetch that overruns the
//! interval pushes the next tick one full interval past its completion.
//! Teardown ([`TransactionPoller::disarm`], dropping the poller, or the
//! session ending underneath the task) moves it back to `Idle`.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::error::{Error, Result};
use crate::event::{Operation, Reporter};
use crate::protocol::RemoteApi;
use crate::session::SessionStore;
use crate::types::Transaction;

/// Shared, immutable list of recent transactions, newest first.
pub type TransactionSnapshot = Arc<Vec<Transaction>>;

/// Poller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollerState {
    /// No recurring task exists.
    Idle,
    /// The recurring task is live.
    Polling,
}

/// State shared between the poller handle and its recurring task.
struct Fetcher<A> {
    api: Arc<A>,
    session: Arc<SessionStore>,
    snapshot: watch::Sender<TransactionSnapshot>,
    reporter: Reporter,
    limit: u32,
    active: AtomicBool,
}

impl<A: RemoteApi> Fetcher<A> {
    /// Marks the poller idle. Only the call that flips the flag reports it.
    fn stop(&self) -> bool {
        let was_active = self.active.swap(false, Ordering::AcqRel);
        if was_active {
            self.reporter.polling_stopped();
        }
        was_active
    }

    async fn fetch(&self) -> Result<TransactionSnapshot> {
        let result = self.try_fetch().await;
        self.reporter.observe(Operation::ListTransactions, result)
    }

    async fn try_fetch(&self) -> Result<TransactionSnapshot> {
        let headers = self.session.require_auth()?;
        let transactions = self.api.list_transactions(&headers, self.limit).await?;

        if self.session.is_closed() {
            return Err(Error::SessionClosed);
        }

        let snapshot = Arc::new(transactions);
        self.snapshot.send_replace(Arc::clone(&snapshot));
        self.reporter.transactions_refreshed(snapshot.len());
        Ok(snapshot)
    }
}

/// Periodically replaces the transaction snapshot of one session.
///
/// At most one recurring task exists per poller; arming an armed poller is
/// a no-op.
pub struct TransactionPoller<A: RemoteApi> {
    fetcher: Arc<Fetcher<A>>,
    interval: Duration,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl<A: RemoteApi> TransactionPoller<A> {
    pub(crate) fn new(
        api: Arc<A>,
        session: Arc<SessionStore>,
        reporter: Reporter,
        interval: Duration,
        limit: u32,
    ) -> Self {
        let (snapshot, _) = watch::channel(TransactionSnapshot::default());
        Self {
            fetcher: Arc::new(Fetcher {
                api,
                session,
                snapshot,
                reporter,
                limit,
                active: AtomicBool::new(false),
            }),
            interval,
            task: Mutex::new(None),
        }
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> PollerState {
        if self.fetcher.active.load(Ordering::Acquire) {
            PollerState::Polling
        } else {
            PollerState::Idle
        }
    }

    /// Returns true while the recurring task is live.
    #[must_use]
    pub fn is_polling(&self) -> bool {
        self.state() == PollerState::Polling
    }

    /// Returns the interval between ticks.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns the latest transaction snapshot.
    #[must_use]
    pub fn snapshot(&self) -> TransactionSnapshot {
        self.fetcher.snapshot.borrow().clone()
    }

    /// Returns a receiver that observes every snapshot replacement.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<TransactionSnapshot> {
        self.fetcher.snapshot.subscribe()
    }

    /// Fetches the recent transactions once, outside the timer.
    ///
    /// On failure the previous snapshot is kept.
    ///
    /// # Errors
    ///
    /// Returns the request error; it has already been logged and published.
    pub async fn fetch_once(&self) -> Result<TransactionSnapshot> {
        self.fetcher.fetch().await
    }

    /// Starts polling. Returns true if this call started the task.
    ///
    /// Ticks are skipped while the session holds no credential. Arming an
    /// ended session, or arming outside a tokio runtime, does nothing.
    pub fn arm(&self) -> bool {
        if self.fetcher.session.is_closed() {
            return false;
        }
        let Ok(runtime) = Handle::try_current() else {
            tracing::warn!(
                session = %self.fetcher.reporter.session_id(),
                "Cannot start transaction polling outside a tokio runtime"
            );
            return false;
        };

        let mut task = self.task.lock();
        if self.fetcher.active.load(Ordering::Acquire) {
            return false;
        }

        // Set before spawning so an immediate loop exit still finds it
        self.fetcher.active.store(true, Ordering::Release);
        self.fetcher.reporter.polling_started();

        let fetcher = Arc::clone(&self.fetcher);
        if let Some(stale) = task.replace(runtime.spawn(poll_loop(fetcher, self.interval))) {
            stale.abort();
        }
        true
    }

    /// Stops polling. Returns true if the poller was polling.
    ///
    /// Only session teardown calls this.
    pub(crate) fn disarm(&self) -> bool {
        if let Some(task) = self.task.lock().take() {
            task.abort();
        }
        self.fetcher.stop()
    }
}

impl<A: RemoteApi> Drop for TransactionPoller<A> {
    fn drop(&mut self) {
        if let Some(task) = self.task.get_mut().take() {
            task.abort();
        }
    }
}

impl<A: RemoteApi> fmt::Debug for TransactionPoller<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransactionPoller")
            .field("state", &self.state())
            .field("interval", &self.interval)
            .field("limit", &self.fetcher.limit)
            .finish_non_exhaustive()
    }
}

async fn poll_loop<A: RemoteApi>(fetcher: Arc<Fetcher<A>>, period: Duration) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        if fetcher.session.is_closed() {
            tracing::debug!(session = %fetcher.reporter.session_id(), "Session ended, leaving poll loop");
            fetcher.stop();
            break;
        }
        if !fetcher.session.is_authenticated() {
            tracing::trace!(session = %fetcher.reporter.session_id(), "Skipping poll tick without credential");
            continue;
        }

        let started = Instant::now();
        // Failures are reported by `fetch`; the next tick tries again
        let _ = fetcher.fetch().await;
        if started.elapsed() >= period {
            ticker.reset();
        }
    }
}
