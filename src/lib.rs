// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `elid_console` - An async client console for the ELID device-management
//! service.
//!
//! The crate keeps a local, disposable view of a remote authority: it logs
//! in, caches the device list, toggles and activates devices, and polls the
//! transaction log once a device has been activated.
//!
//! # Components
//!
//! - [`SessionStore`](session::SessionStore): holds the bearer token and gates every request
//! - [`DeviceRegistry`](registry::DeviceRegistry): last fetched device list, replaced whole on every refresh
//! - [`TransactionPoller`](poller::TransactionPoller): single recurring fetch of the most recent transactions
//! - [`Console`]: one session owning all of the above, plus an event bus
//!
//! # Quick Start
//!
//! ```no_run
//! use elid_console::{Console, ConsoleConfig};
//! use elid_console::protocol::HttpConfig;
//!
//! #[tokio::main]
//! async fn main() -> elid_console::Result<()> {
//!     let console = Console::http(
//!         HttpConfig::new("http://localhost:8080"),
//!         ConsoleConfig::default(),
//!     )?;
//!
//!     console.login().await?;
//!     let _ = console.create_device("Front Door", "Lobby").await;
//!
//!     for device in console.devices().iter() {
//!         println!("{device}");
//!     }
//!
//!     console.shutdown();
//!     Ok(())
//! }
//! ```
//!
//! # Failure Handling
//!
//! Every remote call returns a [`Result`]. The console never lets a failure
//! change its control flow: mutations still refresh, activation still arms
//! the poller, and a failed poll tick keeps the previous list. Failures are
//! logged with `tracing` and published as
//! [`ConsoleEvent::RequestFailed`](event::ConsoleEvent::RequestFailed).

mod config;
mod console;
pub mod error;
pub mod event;
pub mod poller;
pub mod protocol;
pub mod registry;
pub mod session;
pub mod types;

pub use config::ConsoleConfig;
pub use console::Console;
pub use error::{Error, ParseError, ProtocolError, Result};
pub use event::{ConsoleEvent, EventBus, Operation, SessionId};
pub use poller::{PollerState, TransactionPoller, TransactionSnapshot};
#[cfg(feature = "http")]
pub use protocol::{HttpClient, HttpConfig};
pub use protocol::{Endpoint, RemoteApi};
pub use registry::{DeviceRegistry, DeviceSnapshot};
pub use session::{AuthHeaders, SessionStore};
pub use types::{Credential, Device, DeviceId, LoginCredentials, NewDevice, Transaction};
