//! User HTTP handlers.
//!
//! ```text
//! POST /users            {"username":"ada","email":"ada@example.com","password":"..."}
//! GET  /users/{username}
//! PUT  /users/{id}       {"username":"ada","email":"ada@example.com","bio":"..."}
//! ```
//!
//! Response bodies never carry the password or its hash.

use actix_web::http::header;
use actix_web::{HttpResponse, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use zeroize::Zeroizing;

use crate::domain::ports::UserUpdateRequest;
use crate::domain::{Error, User, UserDraft, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Registration payload for `POST /users`.
#[derive(Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequestBody {
    #[schema(example = "ada")]
    pub username: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[schema(format = "password")]
    pub password: String,
    #[serde(default)]
    pub bio: String,
}

impl From<CreateUserRequestBody> for UserDraft {
    fn from(value: CreateUserRequestBody) -> Self {
        Self {
            username: value.username,
            email: value.email,
            password: Zeroizing::new(value.password),
            bio: value.bio,
        }
    }
}

/// Profile payload for `PUT /users/{id}`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequestBody {
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub bio: String,
}

/// Public view of a user.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponseBody {
    #[schema(example = 7)]
    pub id: i64,
    pub username: String,
    pub email: String,
    pub bio: String,
    #[schema(format = "date-time")]
    pub created_at: String,
    #[schema(format = "date-time")]
    pub updated_at: String,
}

impl From<&User> for UserResponseBody {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().get(),
            username: user.username().to_string(),
            email: user.email().to_string(),
            bio: user.bio().to_owned(),
            created_at: user.created_at().to_rfc3339(),
            updated_at: user.updated_at().to_rfc3339(),
        }
    }
}

/// Register a user. The password is hashed before it is stored.
#[utoipa::path(
    post,
    path = "/users",
    request_body = CreateUserRequestBody,
    responses(
        (status = 201, description = "User created", body = UserResponseBody),
        (status = 400, description = "Invalid username, email or password", body = ErrorSchema),
        (status = 409, description = "Username or email already taken", body = ErrorSchema),
        (status = 503, description = "Database unavailable or deadline elapsed", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<CreateUserRequestBody>,
) -> ApiResult<HttpResponse> {
    let deadline = state.deadline();
    let user = state
        .users
        .create_user(UserDraft::from(payload.into_inner()), deadline)
        .await?;

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/users/{}", user.username())))
        .json(UserResponseBody::from(&user)))
}

/// Look up a user by username.
#[utoipa::path(
    get,
    path = "/users/{username}",
    params(("username" = String, Path, description = "Login handle")),
    responses(
        (status = 200, description = "User found", body = UserResponseBody),
        (status = 404, description = "No such user", body = ErrorSchema),
        (status = 503, description = "Database unavailable or deadline elapsed", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{username}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserResponseBody>> {
    let username = path.into_inner();
    let deadline = state.deadline();
    let user = state
        .users_query
        .get_user_by_username(&username, deadline)
        .await?
        .ok_or_else(|| Error::not_found(format!("user {username} not found")))?;

    Ok(web::Json(UserResponseBody::from(&user)))
}

/// Replace a user's username, email and bio.
#[utoipa::path(
    put,
    path = "/users/{id}",
    request_body = UpdateUserRequestBody,
    params(("id" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User updated", body = UserResponseBody),
        (status = 400, description = "Invalid username or email", body = ErrorSchema),
        (status = 404, description = "No such user", body = ErrorSchema),
        (status = 409, description = "Username or email already taken", body = ErrorSchema),
        (status = 503, description = "Database unavailable or deadline elapsed", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<UpdateUserRequestBody>,
) -> ApiResult<web::Json<UserResponseBody>> {
    let UpdateUserRequestBody {
        username,
        email,
        bio,
    } = payload.into_inner();
    let request = UserUpdateRequest {
        id: UserId::new(path.into_inner()),
        username,
        email,
        bio,
    };
    let deadline = state.deadline();
    let user = state.users.update_user(request, deadline).await?;

    Ok(web::Json(UserResponseBody::from(&user)))
}
