// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Terminal console against a running ELID service.
//!
//! Logs in with the demo account, lists devices, activates the first one and
//! prints transactions as they stream in.
//!
//! Run with:
//! ```bash
//! ELID_URL=http://localhost:8080 RUST_LOG=elid_console=debug \
//!     cargo run --example live_console
//! ```

use std::time::Duration;

use elid_console::protocol::HttpConfig;
use elid_console::{Console, ConsoleConfig, ConsoleEvent};
use tracing_subscriber::EnvFilter;

const WATCH_FOR: Duration = Duration::from_secs(20);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let url = std::env::var("ELID_URL").unwrap_or_else(|_| HttpConfig::DEFAULT_BASE_URL.to_string());
    let console = Console::http(HttpConfig::new(url), ConsoleConfig::default())?;

    let mut events = console.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            if let ConsoleEvent::RequestFailed {
                operation, message, ..
            } = event
            {
                eprintln!("! {operation} failed: {message}");
            }
        }
    });

    console.login().await?;

    println!("Devices:");
    for device in console.devices().iter() {
        println!("  {device}");
    }

    let Some(first) = console.devices().first().map(|d| d.id) else {
        println!("No devices; create one with the service first.");
        return Ok(());
    };

    let _ = console.activate(first).await;
    println!("Watching transactions for device {first} (live)...");

    let mut transactions = console.watch_transactions();
    let deadline = tokio::time::sleep(WATCH_FOR);
    tokio::pin!(deadline);

    loop {
        tokio::select! {
            () = &mut deadline => break,
            changed = transactions.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = transactions.borrow_and_update().clone();
                println!("--- {} recent", snapshot.len());
                for transaction in snapshot.iter() {
                    println!("  {transaction}");
                }
            }
        }
    }

    let _ = console.deactivate(first).await;
    console.shutdown();
    Ok(())
}
