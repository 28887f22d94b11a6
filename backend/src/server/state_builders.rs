//! Builders wiring repository-backed services into the HTTP state.

use std::sync::Arc;

use actix_web::web;

use backend::domain::ports::{UserCommand, UserQuery, WorkoutCommand, WorkoutQuery};
use backend::domain::{HashCost, UserService, WorkoutService};
use backend::inbound::http::state::{HttpState, HttpStatePorts};
use backend::outbound::persistence::{DbPool, DieselUserRepository, DieselWorkoutRepository};

use super::ServerConfig;

/// Share one service instance between its command and query ports.
fn split_ports<S, Cmd, Query>(
    service: S,
    cast: fn(Arc<S>) -> (Arc<Cmd>, Arc<Query>),
) -> (Arc<Cmd>, Arc<Query>)
where
    Cmd: ?Sized,
    Query: ?Sized,
{
    cast(Arc::new(service))
}

fn build_workout_ports(pool: &DbPool) -> (Arc<dyn WorkoutCommand>, Arc<dyn WorkoutQuery>) {
    let repo = Arc::new(DieselWorkoutRepository::new(pool.clone()));
    split_ports(WorkoutService::new(repo), |service| {
        (
            service.clone() as Arc<dyn WorkoutCommand>,
            service as Arc<dyn WorkoutQuery>,
        )
    })
}

fn build_user_ports(
    pool: &DbPool,
    hash_cost: HashCost,
) -> (Arc<dyn UserCommand>, Arc<dyn UserQuery>) {
    let repo = Arc::new(DieselUserRepository::new(pool.clone()));
    split_ports(UserService::new(repo, hash_cost), |service| {
        (
            service.clone() as Arc<dyn UserCommand>,
            service as Arc<dyn UserQuery>,
        )
    })
}

/// Build the shared HTTP state from the configured pool.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let (workouts, workouts_query) = build_workout_ports(&config.db_pool);
    let (users, users_query) = build_user_ports(&config.db_pool, config.hash_cost);

    web::Data::new(
        HttpState::new(HttpStatePorts {
            workouts,
            workouts_query,
            users,
            users_query,
        })
        .with_request_timeout(config.request_timeout),
    )
}
