//! User repository contract and its SeaORM implementation.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use super::entities::{user, UserActiveModel, UserEntity};
use common::{AppError, AppResult};
use domain::User;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Lookups report a missing user as `Ok(None)`; errors are reserved for
/// storage failures.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user, writing the assigned id and timestamps back into it
    async fn create(&self, user: &mut User) -> AppResult<()>;

    /// Find user by ID
    async fn get_by_id(&self, id: i32) -> AppResult<Option<User>>;

    /// Find user by login
    async fn get_by_login(&self, login: &str) -> AppResult<Option<User>>;

    /// Find user by email address
    async fn get_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Persist changes to an existing user
    async fn update(&self, user: &mut User) -> AppResult<()>;

    /// Delete user by ID (no-op when absent)
    async fn delete(&self, id: i32) -> AppResult<()>;
}

/// Concrete implementation of UserRepository backed by SeaORM
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn create(&self, user: &mut User) -> AppResult<()> {
        let now = chrono::Utc::now();
        user.created_at = now;
        user.updated_at = now;

        let model = UserActiveModel::from(&*user)
            .insert(&self.db)
            .await
            .map_err(AppError::from)?;

        tracing::debug!(user_id = model.id, "User row inserted");
        *user = User::from(model);
        Ok(())
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn get_by_login(&self, login: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Login.eq(login))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn get_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn update(&self, user: &mut User) -> AppResult<()> {
        let existing = UserEntity::find_by_id(user.id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut changed = user.clone();
        changed.touch();

        let mut active: UserActiveModel = existing.into();
        active.login = Set(changed.login);
        active.first_name = Set(changed.first_name);
        active.last_name = Set(changed.last_name);
        active.birth_date = Set(changed.birth_date);
        active.password = Set(changed.password);
        active.email = Set(changed.email);
        active.updated_at = Set(changed.updated_at);

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        *user = User::from(model);
        Ok(())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = UserEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            tracing::debug!(user_id = id, "Delete matched no rows");
        }

        Ok(())
    }
}
