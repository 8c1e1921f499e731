//! In-process `UserRepository` used when no database is configured and in
//! tests.
//!
//! Mirrors the PostgreSQL adapter's contract: identifiers increase
//! monotonically and are never reused, ordering is by identifier, and
//! uniqueness of username and email is enforced on every write.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use tracing::debug;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{EmailAddress, User, UserDraft, UserId, Username};

#[derive(Debug, Default)]
struct Store {
    users: BTreeMap<UserId, User>,
    last_id: i64,
}

impl Store {
    fn holder_of_username(&self, username: &Username) -> Option<UserId> {
        self.users
            .values()
            .find(|user| user.username() == username)
            .map(User::id)
    }

    fn holder_of_email(&self, email: &EmailAddress) -> Option<UserId> {
        self.users
            .values()
            .find(|user| user.email() == email)
            .map(User::id)
    }

    /// Reject the write if another user (other than `owner`) holds either
    /// value. Username is checked first.
    fn check_unique(
        &self,
        username: &Username,
        email: &EmailAddress,
        owner: Option<UserId>,
    ) -> Result<(), UserPersistenceError> {
        if self
            .holder_of_username(username)
            .is_some_and(|holder| Some(holder) != owner)
        {
            return Err(UserPersistenceError::username_taken(username.as_str()));
        }
        if self
            .holder_of_email(email)
            .is_some_and(|holder| Some(holder) != owner)
        {
            return Err(UserPersistenceError::email_taken(email.as_str()));
        }
        Ok(())
    }
}

/// Thread-safe in-memory user store.
///
/// # Examples
/// ```
/// use user_registry::domain::UserDraft;
/// use user_registry::domain::ports::UserRepository;
/// use user_registry::outbound::persistence::InMemoryUserRepository;
///
/// # tokio::runtime::Runtime::new().expect("runtime").block_on(async {
/// let repo = InMemoryUserRepository::default();
/// let draft = UserDraft::try_from_strings("alice", "a@x.com", "Alice").expect("valid");
/// let user = repo.insert(&draft).await.expect("insert");
/// assert_eq!(user.id().value(), 1);
/// # });
/// ```
pub struct InMemoryUserRepository {
    store: Mutex<Store>,
    clock: Arc<dyn Clock>,
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new(Arc::new(DefaultClock))
    }
}

impl InMemoryUserRepository {
    /// Create an empty store stamping records with `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            store: Mutex::new(Store::default()),
            clock,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Store>, UserPersistenceError> {
        self.store
            .lock()
            .map_err(|_| UserPersistenceError::query("in-memory user store poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn exists_by_username(&self, username: &Username) -> Result<bool, UserPersistenceError> {
        Ok(self.lock()?.holder_of_username(username).is_some())
    }

    async fn exists_by_email(&self, email: &EmailAddress) -> Result<bool, UserPersistenceError> {
        Ok(self.lock()?.holder_of_email(email).is_some())
    }

    async fn exists_by_id(&self, id: UserId) -> Result<bool, UserPersistenceError> {
        Ok(self.lock()?.users.contains_key(&id))
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.lock()?.users.get(&id).cloned())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        let store = self.lock()?;
        Ok(store
            .users
            .values()
            .find(|user| user.username() == username)
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        Ok(self.lock()?.users.values().cloned().collect())
    }

    async fn insert(&self, draft: &UserDraft) -> Result<User, UserPersistenceError> {
        let mut store = self.lock()?;
        store.check_unique(draft.username(), draft.email(), None)?;

        store.last_id += 1;
        let id = UserId::new(store.last_id);
        let now = self.clock.utc();
        let user = User::new(id, draft.clone(), now, now);
        store.users.insert(id, user.clone());
        debug!(user_id = %id, "stored user in memory");
        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<User, UserPersistenceError> {
        let mut store = self.lock()?;
        if !store.users.contains_key(&user.id()) {
            return Err(UserPersistenceError::not_found(user.id()));
        }
        store.check_unique(user.username(), user.email(), Some(user.id()))?;

        let updated = user.clone().touched(self.clock.utc());
        store.users.insert(user.id(), updated.clone());
        Ok(updated)
    }

    async fn delete_by_id(&self, id: UserId) -> Result<(), UserPersistenceError> {
        match self.lock()?.users.remove(&id) {
            Some(_) => Ok(()),
            None => Err(UserPersistenceError::not_found(id)),
        }
    }
}
