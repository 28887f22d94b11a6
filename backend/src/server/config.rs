//! HTTP server configuration object.

use std::net::SocketAddr;
use std::time::Duration;

use backend::domain::HashCost;
use backend::inbound::http::state::DEFAULT_REQUEST_TIMEOUT;
use backend::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: DbPool,
    pub(crate) request_timeout: Duration,
    pub(crate) hash_cost: HashCost,
}

impl ServerConfig {
    #[must_use]
    pub fn new(bind_addr: SocketAddr, db_pool: DbPool) -> Self {
        Self {
            bind_addr,
            db_pool,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            hash_cost: HashCost::default(),
        }
    }

    /// Budget converted into a [`backend::domain::Deadline`] per request.
    #[must_use]
    pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    #[must_use]
    pub fn with_hash_cost(mut self, hash_cost: HashCost) -> Self {
        self.hash_cost = hash_cost;
        self
    }
}
