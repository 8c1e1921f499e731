//! Driving port for user mutations.

use async_trait::async_trait;

use crate::domain::{Error, User, UserDraft, UserId};

/// Domain use-case port for creating, updating, and deleting users.
///
/// Duplicate usernames or emails surface as
/// [`ErrorCode::InvalidRequest`](crate::domain::ErrorCode::InvalidRequest);
/// unknown identifiers as [`ErrorCode::NotFound`](crate::domain::ErrorCode::NotFound).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Register a new user.
    async fn create(&self, draft: UserDraft) -> Result<User, Error>;

    /// Replace the username, email, and name of an existing user.
    async fn update(&self, id: UserId, details: UserDraft) -> Result<User, Error>;

    /// Permanently remove a user.
    async fn delete(&self, id: UserId) -> Result<(), Error>;
}
