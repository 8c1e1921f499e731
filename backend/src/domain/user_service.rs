//! User management service.
//!
//! Layers the uniqueness and update rules over a [`UserRepository`]. The
//! existence checks performed here are not atomic with the following write;
//! the store's own uniqueness enforcement is the backstop and its violations
//! are reported as the same [`UserServiceError`] kinds.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::ports::{UserPersistenceError, UserRepository, UsersCommand, UsersQuery};
use crate::domain::{Error, User, UserDraft, UserId, Username};

/// Failures surfaced by [`UserService`] operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserServiceError {
    #[error("username already exists: {username}")]
    DuplicateUsername { username: String },
    #[error("email already exists: {email}")]
    DuplicateEmail { email: String },
    #[error("user not found with id: {id}")]
    UserNotFound { id: UserId },
    #[error(transparent)]
    Persistence(UserPersistenceError),
}

impl From<UserPersistenceError> for UserServiceError {
    fn from(value: UserPersistenceError) -> Self {
        match value {
            UserPersistenceError::UsernameTaken { username } => Self::DuplicateUsername { username },
            UserPersistenceError::EmailTaken { email } => Self::DuplicateEmail { email },
            UserPersistenceError::NotFound { id } => Self::UserNotFound { id },
            other => Self::Persistence(other),
        }
    }
}

impl From<UserServiceError> for Error {
    fn from(value: UserServiceError) -> Self {
        let message = value.to_string();
        match value {
            UserServiceError::DuplicateUsername { username } => {
                Error::invalid_request(message).with_details(json!({
                    "field": "username",
                    "value": username,
                    "code": "duplicate_username",
                }))
            }
            UserServiceError::DuplicateEmail { email } => {
                Error::invalid_request(message).with_details(json!({
                    "field": "email",
                    "value": email,
                    "code": "duplicate_email",
                }))
            }
            UserServiceError::UserNotFound { id } => {
                Error::not_found(message).with_details(json!({ "id": id }))
            }
            UserServiceError::Persistence(UserPersistenceError::Connection { message }) => {
                Error::service_unavailable(format!("user repository unavailable: {message}"))
            }
            UserServiceError::Persistence(err) => {
                Error::internal(format!("user repository error: {err}"))
            }
        }
    }
}

/// User service implementing the user driving ports.
#[derive(Clone)]
pub struct UserService<R> {
    repo: Arc<R>,
}

impl<R> UserService<R> {
    /// Create a new service over the given store.
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

impl<R> UserService<R>
where
    R: UserRepository,
{
    /// Register a new user after checking that the username and then the
    /// email are free.
    pub async fn create_user(&self, candidate: UserDraft) -> Result<User, UserServiceError> {
        if self.repo.exists_by_username(candidate.username()).await? {
            warn!(username = %candidate.username(), "rejected duplicate username");
            return Err(UserServiceError::DuplicateUsername {
                username: candidate.username().to_string(),
            });
        }
        if self.repo.exists_by_email(candidate.email()).await? {
            warn!(email = %candidate.email(), "rejected duplicate email");
            return Err(UserServiceError::DuplicateEmail {
                email: candidate.email().to_string(),
            });
        }

        let user = self.repo.insert(&candidate).await?;
        info!(user_id = %user.id(), username = %user.username(), "created user");
        Ok(user)
    }

    /// All users in ascending identifier order.
    pub async fn get_all_users(&self) -> Result<Vec<User>, UserServiceError> {
        Ok(self.repo.find_all().await?)
    }

    pub async fn get_user_by_id(&self, id: UserId) -> Result<Option<User>, UserServiceError> {
        debug!(user_id = %id, "looking up user");
        Ok(self.repo.find_by_id(id).await?)
    }

    pub async fn get_user_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserServiceError> {
        debug!(username = %username, "looking up user by username");
        Ok(self.repo.find_by_username(username).await?)
    }

    /// Replace the username, email, and name of user `id`.
    ///
    /// Only values that differ from the current record are checked for
    /// uniqueness, so resubmitting a user's own username or email succeeds.
    pub async fn update_user(
        &self,
        id: UserId,
        details: UserDraft,
    ) -> Result<User, UserServiceError> {
        let Some(mut user) = self.repo.find_by_id(id).await? else {
            warn!(user_id = %id, "update targeted unknown user");
            return Err(UserServiceError::UserNotFound { id });
        };

        if details.username() != user.username()
            && self.repo.exists_by_username(details.username()).await?
        {
            warn!(user_id = %id, username = %details.username(), "rejected duplicate username");
            return Err(UserServiceError::DuplicateUsername {
                username: details.username().to_string(),
            });
        }
        if details.email() != user.email() && self.repo.exists_by_email(details.email()).await? {
            warn!(user_id = %id, email = %details.email(), "rejected duplicate email");
            return Err(UserServiceError::DuplicateEmail {
                email: details.email().to_string(),
            });
        }

        user.apply(details);
        let updated = self.repo.update(&user).await?;
        info!(user_id = %id, username = %updated.username(), "updated user");
        Ok(updated)
    }

    /// Permanently remove user `id`.
    pub async fn delete_user(&self, id: UserId) -> Result<(), UserServiceError> {
        if !self.repo.exists_by_id(id).await? {
            warn!(user_id = %id, "delete targeted unknown user");
            return Err(UserServiceError::UserNotFound { id });
        }
        self.repo.delete_by_id(id).await?;
        info!(user_id = %id, "deleted user");
        Ok(())
    }
}

#[async_trait]
impl<R> UsersQuery for UserService<R>
where
    R: UserRepository,
{
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        Ok(self.get_all_users().await?)
    }

    async fn find_user(&self, id: UserId) -> Result<Option<User>, Error> {
        Ok(self.get_user_by_id(id).await?)
    }

    async fn find_user_by_username(&self, username: &Username) -> Result<Option<User>, Error> {
        Ok(self.get_user_by_username(username).await?)
    }
}

#[async_trait]
impl<R> UsersCommand for UserService<R>
where
    R: UserRepository,
{
    async fn create(&self, draft: UserDraft) -> Result<User, Error> {
        Ok(self.create_user(draft).await?)
    }

    async fn update(&self, id: UserId, details: UserDraft) -> Result<User, Error> {
        Ok(self.update_user(id, details).await?)
    }

    async fn delete(&self, id: UserId) -> Result<(), Error> {
        Ok(self.delete_user(id).await?)
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
