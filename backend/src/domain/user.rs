//! User data model.
//!
//! A [`User`] is a stored account record. A [`UserDraft`] carries the
//! client-supplied fields (username, email, display name) before the store
//! assigns an identifier and timestamps.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Longest username the store accepts, in characters.
pub const USERNAME_MAX_LENGTH: usize = 50;
/// Longest email address the store accepts, in characters.
pub const EMAIL_MAX_LENGTH: usize = 100;
/// Longest display name the store accepts, in characters.
pub const NAME_MAX_LENGTH: usize = 100;

/// Validation errors returned by the user field constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyUsername,
    EmptyEmail,
    EmptyName,
    UsernameTooLong { max: usize },
    EmailTooLong { max: usize },
    NameTooLong { max: usize },
}

impl UserValidationError {
    /// Name of the request field that failed validation.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyUsername | Self::UsernameTooLong { .. } => "username",
            Self::EmptyEmail | Self::EmailTooLong { .. } => "email",
            Self::EmptyName | Self::NameTooLong { .. } => "name",
        }
    }

    /// Maximum length in characters when the value was too long.
    pub fn max_length(&self) -> Option<usize> {
        match self {
            Self::UsernameTooLong { max }
            | Self::EmailTooLong { max }
            | Self::NameTooLong { max } => Some(*max),
            Self::EmptyUsername | Self::EmptyEmail | Self::EmptyName => None,
        }
    }
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max_length() {
            Some(max) => write!(f, "{} must be at most {max} characters", self.field()),
            None => write!(f, "{} must not be empty", self.field()),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Store-assigned user identifier.
///
/// Identifiers are positive, never reused, and never change once assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Wrap a raw identifier.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw identifier value.
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for UserId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<UserId> for i64 {
    fn from(value: UserId) -> Self {
        value.0
    }
}

macro_rules! bounded_text {
    ($(#[$meta:meta])* $name:ident, $empty:ident, $too_long:ident, $max:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Validate and construct the value from owned input.
            pub fn new(value: impl Into<String>) -> Result<Self, UserValidationError> {
                let value = value.into();
                if value.trim().is_empty() {
                    return Err(UserValidationError::$empty);
                }
                if value.chars().count() > $max {
                    return Err(UserValidationError::$too_long { max: $max });
                }
                Ok(Self(value))
            }

            /// Borrow the underlying string.
            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = UserValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

bounded_text!(
    /// Unique login handle.
    Username,
    EmptyUsername,
    UsernameTooLong,
    USERNAME_MAX_LENGTH
);

bounded_text!(
    /// Unique email address. Only emptiness and length are checked.
    EmailAddress,
    EmptyEmail,
    EmailTooLong,
    EMAIL_MAX_LENGTH
);

bounded_text!(
    /// Human readable display name.
    DisplayName,
    EmptyName,
    NameTooLong,
    NAME_MAX_LENGTH
);

/// Candidate user details supplied by a client.
///
/// Used both for creating a user and as the new details of an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDraft {
    username: Username,
    email: EmailAddress,
    name: DisplayName,
}

impl UserDraft {
    /// Build a draft from validated components.
    pub fn new(username: Username, email: EmailAddress, name: DisplayName) -> Self {
        Self {
            username,
            email,
            name,
        }
    }

    /// Fallible constructor validating each field in declaration order.
    ///
    /// # Examples
    /// ```
    /// use user_registry::domain::{UserDraft, UserValidationError};
    ///
    /// let draft = UserDraft::try_from_strings("alice", "a@x.io", "Alice").expect("valid");
    /// assert_eq!(draft.username().as_str(), "alice");
    ///
    /// let err = UserDraft::try_from_strings("alice", " ", "Alice").unwrap_err();
    /// assert_eq!(err, UserValidationError::EmptyEmail);
    /// ```
    pub fn try_from_strings(
        username: impl Into<String>,
        email: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<Self, UserValidationError> {
        Ok(Self::new(
            Username::new(username)?,
            EmailAddress::new(email)?,
            DisplayName::new(name)?,
        ))
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn name(&self) -> &DisplayName {
        &self.name
    }
}

/// Stored application user.
///
/// ## Invariants
/// - `id` and `created_at` never change after the store assigns them.
/// - `username` and `email` are unique across all stored users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: Username,
    email: EmailAddress,
    name: DisplayName,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl User {
    /// Assemble a stored user from a draft and its store-assigned fields.
    pub fn new(
        id: UserId,
        draft: UserDraft,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        let UserDraft {
            username,
            email,
            name,
        } = draft;
        Self {
            id,
            username,
            email,
            name,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn name(&self) -> &DisplayName {
        &self.name
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Overwrite the mutable fields with `details`.
    ///
    /// The identifier and timestamps are left untouched; the store refreshes
    /// `updated_at` when the change is persisted.
    pub fn apply(&mut self, details: UserDraft) {
        let UserDraft {
            username,
            email,
            name,
        } = details;
        self.username = username;
        self.email = email;
        self.name = name;
    }

    /// Copy of this record with a new modification timestamp.
    pub fn touched(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = updated_at;
        self
    }
}
