//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::Deadline;
use crate::domain::ports::{UserCommand, UserQuery, WorkoutCommand, WorkoutQuery};

/// Request budget applied when the caller does not configure one.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Parameter object bundling the driving ports used by HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub workouts: Arc<dyn WorkoutCommand>,
    pub workouts_query: Arc<dyn WorkoutQuery>,
    pub users: Arc<dyn UserCommand>,
    pub users_query: Arc<dyn UserQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub workouts: Arc<dyn WorkoutCommand>,
    pub workouts_query: Arc<dyn WorkoutQuery>,
    pub users: Arc<dyn UserCommand>,
    pub users_query: Arc<dyn UserQuery>,
    request_timeout: Duration,
}

impl HttpState {
    /// Construct state with the default request budget.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use backend::domain::{HashCost, UserService, WorkoutService};
    /// use backend::inbound::http::state::{HttpState, HttpStatePorts};
    /// use backend::outbound::persistence::{
    ///     DbPool, DieselUserRepository, DieselWorkoutRepository,
    /// };
    ///
    /// fn build(pool: DbPool) -> HttpState {
    ///     let workouts = Arc::new(WorkoutService::new(Arc::new(
    ///         DieselWorkoutRepository::new(pool.clone()),
    ///     )));
    ///     let users = Arc::new(UserService::new(
    ///         Arc::new(DieselUserRepository::new(pool)),
    ///         HashCost::default(),
    ///     ));
    ///     HttpState::new(HttpStatePorts {
    ///         workouts: workouts.clone(),
    ///         workouts_query: workouts,
    ///         users: users.clone(),
    ///         users_query: users,
    ///     })
    /// }
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            workouts,
            workouts_query,
            users,
            users_query,
        } = ports;
        Self {
            workouts,
            workouts_query,
            users,
            users_query,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Override the per-request budget handed to the domain as a [`Deadline`].
    pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    /// Budget applied to each request.
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Deadline for a request starting now.
    pub fn deadline(&self) -> Deadline {
        Deadline::after(self.request_timeout)
    }
}
