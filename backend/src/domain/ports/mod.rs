//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod user_command;
mod user_query;
mod user_repository;
mod workout_command;
mod workout_query;
mod workout_repository;

#[cfg(test)]
pub use user_command::MockUserCommand;
pub use user_command::{UserCommand, UserUpdateRequest};
#[cfg(test)]
pub use user_query::MockUserQuery;
pub use user_query::UserQuery;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
#[cfg(test)]
pub use workout_command::MockWorkoutCommand;
pub use workout_command::WorkoutCommand;
#[cfg(test)]
pub use workout_query::MockWorkoutQuery;
pub use workout_query::WorkoutQuery;
#[cfg(test)]
pub use workout_repository::MockWorkoutRepository;
pub use workout_repository::{WorkoutRepository, WorkoutRepositoryError};
