//! Domain primitives, aggregates, ports, and services.
//!
//! Purpose: Define strongly typed domain entities used by the API and
//! persistence layers, plus the service that enforces the user rules.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic error payload and its category.
//! - TraceId: request-scoped correlation identifier.
//! - User / UserDraft and the validated field types.
//! - UserService / UserServiceError: the user management use cases.

pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod user_service;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    DisplayName, EMAIL_MAX_LENGTH, EmailAddress, NAME_MAX_LENGTH, USERNAME_MAX_LENGTH, User,
    UserDraft, UserId, UserValidationError, Username,
};
pub use self::user_service::{UserService, UserServiceError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use user_registry::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
