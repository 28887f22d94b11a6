//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the workout, user and health endpoints together with
//! the error envelope schema. The document backs Swagger UI in debug builds
//! and is exported by `cargo run --bin openapi-dump`.

use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::users::{
    CreateUserRequestBody, UpdateUserRequestBody, UserResponseBody,
};
use crate::inbound::http::workouts::{
    CreateWorkoutRequestBody, WorkoutEntryRequestBody, WorkoutEntryResponseBody,
    WorkoutResponseBody,
};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Fitness backend API",
        description = "Workouts with ordered exercise entries, user accounts and health probes.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::workouts::create_workout,
        crate::inbound::http::workouts::get_workout,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::health::health,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        CreateWorkoutRequestBody,
        WorkoutEntryRequestBody,
        WorkoutResponseBody,
        WorkoutEntryResponseBody,
        CreateUserRequestBody,
        UpdateUserRequestBody,
        UserResponseBody,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "workouts", description = "Workouts and their exercise entries"),
        (name = "users", description = "User accounts"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the generated OpenAPI document.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("/workouts")]
    #[case("/workouts/{id}")]
    #[case("/users")]
    #[case("/users/{username}")]
    #[case("/users/{id}")]
    #[case("/health")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn document_lists_path(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }

    #[test]
    fn error_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
    }

    #[test]
    fn workout_schema_uses_camel_case_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let workout = schemas
            .get("WorkoutResponseBody")
            .expect("WorkoutResponseBody schema");

        assert_object_schema_has_field(workout, "durationMinutes");
        assert_object_schema_has_field(workout, "entries");
    }

    #[test]
    fn user_schema_omits_password_material() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let user = schemas.get("UserResponseBody").expect("UserResponseBody schema");

        match user {
            RefOr::T(Schema::Object(obj)) => {
                assert!(!obj.properties.contains_key("password"));
                assert!(!obj.properties.contains_key("passwordHash"));
            }
            _ => panic!("expected Object schema"),
        }
    }
}
