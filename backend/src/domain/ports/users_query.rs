//! Driving port for user lookups.
//!
//! Inbound adapters (HTTP handlers) read users through this port without
//! importing outbound persistence concerns.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId, Username};

/// Domain use-case port for reading users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Every stored user in ascending identifier order.
    async fn list_users(&self) -> Result<Vec<User>, Error>;

    /// The user with this identifier, if stored.
    async fn find_user(&self, id: UserId) -> Result<Option<User>, Error>;

    /// The user with this exact username, if stored.
    async fn find_user_by_username(&self, username: &Username) -> Result<Option<User>, Error>;
}
