//! In-memory user repository implementation

use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use common::{AppError, AppResult};
use domain::User;

use super::UserRepository;

#[derive(Debug)]
struct Inner {
    users: BTreeMap<i32, User>,
    next_id: i32,
}

/// In-memory implementation of UserRepository.
///
/// Ids are assigned sequentially starting at 1; logins are unique.
#[derive(Debug)]
pub struct InMemoryUserStore {
    inner: RwLock<Inner>,
}

impl InMemoryUserStore {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                users: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.inner.read().await.users.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.users.is_empty()
    }
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserStore {
    async fn create(&self, user: &mut User) -> AppResult<()> {
        let mut inner = self.inner.write().await;

        if inner.users.values().any(|u| u.login == user.login) {
            return Err(AppError::conflict(format!("Login '{}'", user.login)));
        }

        let id = inner.next_id;
        inner.next_id = id
            .checked_add(1)
            .ok_or_else(|| AppError::internal("user id space exhausted"))?;

        let now = chrono::Utc::now();
        user.id = id;
        user.created_at = now;
        user.updated_at = now;
        inner.users.insert(id, user.clone());

        Ok(())
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner.users.get(&id).cloned())
    }

    async fn get_by_login(&self, login: &str) -> AppResult<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner.users.values().find(|u| u.login == login).cloned())
    }

    async fn get_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner.users.values().find(|u| u.email == email).cloned())
    }

    async fn update(&self, user: &mut User) -> AppResult<()> {
        let mut inner = self.inner.write().await;

        if !inner.users.contains_key(&user.id) {
            return Err(AppError::NotFound);
        }

        // Login must stay unique across other users
        if inner
            .users
            .values()
            .any(|u| u.id != user.id && u.login == user.login)
        {
            return Err(AppError::conflict(format!("Login '{}'", user.login)));
        }

        user.touch();
        inner.users.insert(user.id, user.clone());
        Ok(())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let mut inner = self.inner.write().await;
        inner.users.remove(&id);
        Ok(())
    }
}
