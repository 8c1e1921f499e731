//! Driven port for the user store and its errors.
//!
//! Adapters must enforce username and email uniqueness themselves; the
//! service's existence checks are advisory and racy, so the store is the
//! source of truth and reports violations as [`UserPersistenceError::UsernameTaken`]
//! or [`UserPersistenceError::EmailTaken`].

use async_trait::async_trait;

use crate::domain::{EmailAddress, User, UserDraft, UserId, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// Another stored user already holds the username.
        UsernameTaken { username: String } => "username already taken: {username}",
        /// Another stored user already holds the email address.
        EmailTaken { email: String } => "email already taken: {email}",
        /// The targeted row no longer exists.
        NotFound { id: UserId } => "user {id} not found",
    }
}

/// Persistence contract for [`User`] records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Whether any stored user has exactly this username.
    async fn exists_by_username(&self, username: &Username) -> Result<bool, UserPersistenceError>;

    /// Whether any stored user has exactly this email.
    async fn exists_by_email(&self, email: &EmailAddress) -> Result<bool, UserPersistenceError>;

    /// Whether a user with this identifier is stored.
    async fn exists_by_id(&self, id: UserId) -> Result<bool, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by exact username.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// All stored users in ascending identifier order.
    async fn find_all(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Persist a new user, assigning its identifier and timestamps.
    async fn insert(&self, draft: &UserDraft) -> Result<User, UserPersistenceError>;

    /// Overwrite the mutable fields of an existing user and refresh
    /// `updated_at`.
    async fn update(&self, user: &User) -> Result<User, UserPersistenceError>;

    /// Remove a user permanently.
    async fn delete_by_id(&self, id: UserId) -> Result<(), UserPersistenceError>;
}
