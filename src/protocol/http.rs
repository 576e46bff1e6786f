// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP implementation of [`RemoteApi`].

use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::{ParseError, ProtocolError, Result};
use crate::protocol::{Endpoint, Method, RemoteApi};
use crate::session::AuthHeaders;
use crate::types::{
    ActivationAck, CreatedDevice, Credential, Device, DeviceId, Health, LoginCredentials,
    NewDevice, ToggleAck, Transaction,
};

// ============================================================================
// HttpConfig
// ============================================================================

/// Connection parameters for the device-management service.
///
/// # Examples
///
/// ```
/// use elid_console::protocol::HttpConfig;
/// use std::time::Duration;
///
/// let config = HttpConfig::new("http://10.0.0.4:8080")
///     .with_timeout(Duration::from_secs(5));
/// assert_eq!(config.base_url(), "http://10.0.0.4:8080");
/// ```
#[derive(Debug, Clone)]
pub struct HttpConfig {
    base_url: String,
    timeout: Duration,
}

impl HttpConfig {
    /// Default service address.
    pub const DEFAULT_BASE_URL: &'static str = "http://localhost:8080";
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a configuration for the given base URL.
    ///
    /// A missing scheme defaults to `http://`; trailing slashes are removed.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        let base_url = if base_url.starts_with("http://") || base_url.starts_with("https://") {
            base_url
        } else {
            format!("http://{base_url}")
        };

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Creates an `HttpClient` from this configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the base URL has no host or the HTTP client cannot
    /// be created.
    pub fn into_client(self) -> std::result::Result<HttpClient, ProtocolError> {
        let host = self
            .base_url
            .split_once("://")
            .map_or("", |(_, rest)| rest);
        if host.is_empty() {
            return Err(ProtocolError::InvalidAddress(self.base_url));
        }

        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(ProtocolError::Http)?;

        Ok(HttpClient {
            base_url: self.base_url,
            client,
        })
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BASE_URL)
    }
}

// ============================================================================
// HttpClient
// ============================================================================

#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(default)]
    token: Option<String>,
}

/// HTTP client for the device-management service.
///
/// # Examples
///
/// ```no_run
/// use elid_console::protocol::{HttpClient, RemoteApi};
/// use elid_console::types::LoginCredentials;
///
/// # async fn example() -> elid_console::Result<()> {
/// let client = HttpClient::new("http://localhost:8080")?;
/// let credential = client.login(&LoginCredentials::default()).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    base_url: String,
    client: Client,
}

impl HttpClient {
    /// Creates a client for the given base URL with default settings.
    ///
    /// # Errors
    ///
    /// Returns error if the base URL is invalid or the HTTP client cannot be
    /// created.
    pub fn new(base_url: impl Into<String>) -> std::result::Result<Self, ProtocolError> {
        HttpConfig::new(base_url).into_client()
    }

    /// Returns the base URL of the service.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path_and_query())
    }

    fn request(&self, endpoint: &Endpoint, headers: &AuthHeaders) -> RequestBuilder {
        let method = match endpoint.method() {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        };

        headers.iter().fold(
            self.client.request(method, self.url(endpoint)),
            |request, (name, value)| request.header(name, value),
        )
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        request: RequestBuilder,
    ) -> Result<T> {
        tracing::debug!(endpoint = %endpoint, "Sending HTTP request");

        let response = request.send().await.map_err(ProtocolError::Http)?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ProtocolError::AuthenticationFailed.into());
        }

        if !status.is_success() {
            return Err(ProtocolError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            }
            .into());
        }

        let body = response.text().await.map_err(ProtocolError::Http)?;

        // Login bodies carry the token
        if endpoint == Endpoint::Login {
            tracing::debug!(endpoint = %endpoint, len = body.len(), "Received HTTP response");
        } else {
            tracing::debug!(endpoint = %endpoint, body = %body, "Received HTTP response");
        }

        Ok(serde_json::from_str(&body).map_err(ParseError::Json)?)
    }
}

impl RemoteApi for HttpClient {
    async fn health(&self) -> Result<Health> {
        let endpoint = Endpoint::Health;
        let request = self.request(&endpoint, &AuthHeaders::empty());
        self.execute(endpoint, request).await
    }

    async fn login(&self, credentials: &LoginCredentials) -> Result<Credential> {
        let endpoint = Endpoint::Login;
        let request = self
            .request(&endpoint, &AuthHeaders::empty())
            .json(credentials);
        let response: LoginResponse = self.execute(endpoint, request).await?;

        response
            .token
            .and_then(Credential::new)
            .ok_or_else(|| ParseError::MissingField("token".to_string()).into())
    }

    async fn list_devices(&self, headers: &AuthHeaders) -> Result<Vec<Device>> {
        let endpoint = Endpoint::ListDevices;
        let request = self.request(&endpoint, headers);
        // The service encodes an empty list as null
        let devices: Option<Vec<Device>> = self.execute(endpoint, request).await?;
        Ok(devices.unwrap_or_default())
    }

    async fn create_device(&self, headers: &AuthHeaders, device: &NewDevice) -> Result<CreatedDevice> {
        let endpoint = Endpoint::CreateDevice;
        let request = self.request(&endpoint, headers).json(device);
        self.execute(endpoint, request).await
    }

    async fn toggle_device(&self, headers: &AuthHeaders, id: DeviceId) -> Result<ToggleAck> {
        let endpoint = Endpoint::Toggle(id);
        let request = self.request(&endpoint, headers);
        self.execute(endpoint, request).await
    }

    async fn activate_device(&self, headers: &AuthHeaders, id: DeviceId) -> Result<ActivationAck> {
        let endpoint = Endpoint::Activate(id);
        let request = self.request(&endpoint, headers);
        self.execute(endpoint, request).await
    }

    async fn deactivate_device(
        &self,
        headers: &AuthHeaders,
        id: DeviceId,
    ) -> Result<ActivationAck> {
        let endpoint = Endpoint::Deactivate(id);
        let request = self.request(&endpoint, headers);
        self.execute(endpoint, request).await
    }

    async fn list_transactions(&self, headers: &AuthHeaders, limit: u32) -> Result<Vec<Transaction>> {
        let endpoint = Endpoint::ListTransactions { limit };
        let request = self.request(&endpoint, headers);
        let transactions: Option<Vec<Transaction>> = self.execute(endpoint, request).await?;
        Ok(transactions.unwrap_or_default())
    }
}
