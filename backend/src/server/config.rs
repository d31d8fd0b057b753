//! HTTP server configuration object and helpers.

use std::time::Duration;

use users_backend::inbound::http::state::DEFAULT_REQUEST_TIMEOUT;
use users_backend::settings::{ServerSettings, SettingsError};

const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(10);

/// Builder-style configuration for creating the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub(crate) bind_addr: (String, u16),
    pub(crate) request_timeout: Duration,
    pub(crate) shutdown_timeout: Duration,
}

impl ServerConfig {
    /// Construct a configuration bound to `bind_addr` with default timeouts.
    #[must_use]
    pub fn new(bind_addr: (String, u16)) -> Self {
        Self {
            bind_addr,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            shutdown_timeout: DEFAULT_SHUTDOWN_TIMEOUT,
        }
    }

    /// Derive the configuration from loaded settings.
    ///
    /// # Errors
    /// Returns [`SettingsError`] when the request timeout is zero.
    pub fn from_settings(settings: &ServerSettings) -> Result<Self, SettingsError> {
        Ok(Self::new(settings.bind_address())
            .with_request_timeout(settings.request_timeout()?)
            .with_shutdown_timeout(settings.shutdown_timeout()))
    }

    /// Deadline applied to every store call.
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Grace period granted to in-flight requests once shutdown starts.
    #[must_use]
    pub fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.shutdown_timeout = timeout;
        self
    }
}
