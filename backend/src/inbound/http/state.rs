//! Shared HTTP adapter state.
//!
//! Handlers receive this through `actix_web::web::Data`, so they depend only
//! on the repository port and stay testable without I/O.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::RequestContext;
use crate::domain::ports::UserRepository;

/// Default deadline applied to each store call.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UserRepository>,
    request_timeout: Duration,
}

impl HttpState {
    /// Build state around a repository with the default request timeout.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use std::time::Duration;
    /// use users_backend::domain::ports::UserRepository;
    /// use users_backend::inbound::http::state::HttpState;
    ///
    /// fn build(users: Arc<dyn UserRepository>) -> HttpState {
    ///     HttpState::new(users).with_request_timeout(Duration::from_secs(5))
    /// }
    /// ```
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self {
            users,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Replace the per-call deadline.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Fresh context for one store call, expiring after the request timeout.
    pub fn request_context(&self) -> RequestContext {
        RequestContext::with_timeout(self.request_timeout)
    }
}
