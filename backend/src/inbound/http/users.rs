//! Users API handlers.
//!
//! ```text
//! POST   /api/users                     {"username":"alice","email":"a@x.com","name":"Alice"}
//! GET    /api/users
//! GET    /api/users/{id}
//! GET    /api/users/username/{username}
//! PUT    /api/users/{id}                {"username":"alice","email":"a@x.com","name":"Alicia"}
//! DELETE /api/users/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{Error, User, UserDraft, UserId, Username};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, require};

const USERNAME: FieldName = FieldName::new("username");
const EMAIL: FieldName = FieldName::new("email");
const NAME: FieldName = FieldName::new("name");

/// Request body for creating or updating a user.
///
/// Store-assigned keys such as `id`, `createdAt`, or `updatedAt` are accepted
/// and ignored.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserRequest {
    #[schema(example = "alice", min_length = 1, max_length = 50)]
    pub username: Option<String>,
    #[schema(example = "alice@example.com", min_length = 1, max_length = 100)]
    pub email: Option<String>,
    #[schema(example = "Alice", min_length = 1, max_length = 100)]
    pub name: Option<String>,
}

impl TryFrom<UserRequest> for UserDraft {
    type Error = Error;

    fn try_from(value: UserRequest) -> Result<Self, Self::Error> {
        let username = require(value.username, USERNAME)?;
        let email = require(value.email, EMAIL)?;
        let name = require(value.name, NAME)?;
        Ok(UserDraft::try_from_strings(username, email, name)?)
    }
}

/// Stored user as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "alice")]
    pub username: String,
    #[schema(example = "alice@example.com")]
    pub email: String,
    #[schema(example = "Alice")]
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(value: User) -> Self {
        Self {
            id: value.id().value(),
            username: value.username().to_string(),
            email: value.email().to_string(),
            name: value.name().to_string(),
            created_at: value.created_at(),
            updated_at: value.updated_at(),
        }
    }
}

fn user_not_found(id: UserId) -> Error {
    Error::not_found(format!("user not found with id: {id}")).with_details(json!({ "id": id }))
}

/// Register a new user.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = UserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Missing field, empty field, or duplicate username/email", body = ErrorSchema),
        (status = 503, description = "User store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<UserRequest>,
) -> ApiResult<HttpResponse> {
    let draft = UserDraft::try_from(payload.into_inner())?;
    let user = state.users_command.create(draft).await?;
    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

/// List all users in ascending identifier order.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use user_registry::inbound::http::users::list_users;
///
/// let app = App::new().service(list_users);
/// ```
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Users", body = [UserResponse]),
        (status = 503, description = "User store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<UserResponse>>> {
    let users = state.users.list_users().await?;
    Ok(web::Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Fetch a user by identifier.
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = UserResponse),
        (status = 400, description = "Identifier is not a number", body = ErrorSchema),
        (status = 404, description = "No such user", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<UserResponse>> {
    let id = UserId::new(path.into_inner());
    let user = state
        .users
        .find_user(id)
        .await?
        .ok_or_else(|| user_not_found(id))?;
    Ok(web::Json(UserResponse::from(user)))
}

/// Fetch a user by exact username.
#[utoipa::path(
    get,
    path = "/api/users/username/{username}",
    params(("username" = String, Path, description = "Exact username")),
    responses(
        (status = 200, description = "User", body = UserResponse),
        (status = 404, description = "No such user", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUserByUsername"
)]
#[get("/users/username/{username}")]
pub async fn get_user_by_username(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserResponse>> {
    let raw = path.into_inner();
    // Blank or overlong segments cannot match any stored username.
    let Ok(username) = Username::new(raw.as_str()) else {
        return Err(username_not_found(&raw));
    };
    let user = state
        .users
        .find_user_by_username(&username)
        .await?
        .ok_or_else(|| username_not_found(username.as_str()))?;
    Ok(web::Json(UserResponse::from(user)))
}

fn username_not_found(username: &str) -> Error {
    Error::not_found(format!("user not found with username: {username}"))
        .with_details(json!({ "username": username }))
}

/// Replace the username, email, and name of a user.
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    request_body = UserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Missing field, empty field, or duplicate username/email", body = ErrorSchema),
        (status = 404, description = "No such user", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<UserRequest>,
) -> ApiResult<web::Json<UserResponse>> {
    let id = UserId::new(path.into_inner());
    let details = UserDraft::try_from(payload.into_inner())?;
    let user = state.users_command.update(id, details).await?;
    Ok(web::Json(UserResponse::from(user)))
}

/// Permanently delete a user.
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "No such user", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let id = UserId::new(path.into_inner());
    state.users_command.delete(id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests;
