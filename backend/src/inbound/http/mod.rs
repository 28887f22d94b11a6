//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
pub mod users;
pub mod workouts;

pub use error::ApiResult;

/// Register the workout and user endpoints plus the extractor error handlers.
///
/// Health probes are registered separately because they depend on
/// [`health::HealthState`] rather than [`state::HttpState`].
///
/// # Examples
/// ```no_run
/// use actix_web::App;
/// use backend::inbound::http;
///
/// let app = App::new().configure(http::configure);
/// # let _ = app;
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(error::json_config())
        .app_data(error::path_config())
        .service(workouts::create_workout)
        .service(workouts::get_workout)
        .service(users::create_user)
        .service(users::get_user)
        .service(users::update_user);
}
