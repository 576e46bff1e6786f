// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the console library.
//!
//! Every remote call returns a [`Result`] so that a failure can be inspected
//! by whoever wants it, even though the console itself swallows most of them
//! after logging and publishing a
//! [`ConsoleEvent::RequestFailed`](crate::event::ConsoleEvent::RequestFailed).

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during communication with the service.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Error occurred while parsing a response body.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// The operation needs a credential and the session holds none.
    #[error("not authenticated")]
    NotAuthenticated,

    /// The session has been torn down.
    #[error("session is closed")]
    SessionClosed,
}

impl Error {
    /// Returns true if the service rejected the credential (or its absence).
    #[must_use]
    pub fn is_authorization_failure(&self) -> bool {
        matches!(
            self,
            Self::NotAuthenticated | Self::Protocol(ProtocolError::AuthenticationFailed)
        )
    }
}

/// Errors related to HTTP communication with the service.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request failed.
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("HTTP {status} - {reason}")]
    Status {
        /// Numeric status code.
        status: u16,
        /// Canonical reason phrase, or "Unknown".
        reason: String,
    },

    /// The service rejected the credential (401 or 403).
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Invalid base URL.
    #[error("invalid address: {0}")]
    InvalidAddress(String),
}

/// Errors related to parsing service responses.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Expected field is missing or empty in the response.
    #[error("missing field in response: {0}")]
    MissingField(String),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
