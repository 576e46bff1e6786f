// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event system for console sessions.
//!
//! Each [`Console`](crate::Console) publishes [`ConsoleEvent`]s on an
//! [`EventBus`]: logins, snapshot replacements, poller transitions and every
//! failure the console swallows.
//!
//! # Examples
//!
//! ```
//! use elid_console::event::{ConsoleEvent, EventBus, SessionId};
//!
//! let bus = EventBus::new();
//! let mut rx = bus.subscribe();
//!
//! bus.publish(ConsoleEvent::PollingStarted {
//!     session_id: SessionId::new(),
//! });
//! ```

mod console_event;
mod event_bus;
mod reporter;
mod session_id;

pub use console_event::{ConsoleEvent, Operation};
pub use event_bus::EventBus;
pub use session_id::SessionId;

pub(crate) use event_bus::DEFAULT_CHANNEL_CAPACITY;
pub(crate) use reporter::Reporter;
