//! User service - Handles user-related business logic.
//!
//! SOLID (SRP): Validates account requests and delegates persistence.

use async_trait::async_trait;
use std::sync::Arc;

use common::{AppError, AppResult};
use domain::{is_email, validate_login, validate_password, User};

use crate::repository::UserRepository;

/// User service trait for dependency injection.
///
/// Input errors are reported before the repository is touched. A user that
/// does not exist is `None` or `false`, never an error.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Register a new user; the repository writes the assigned id back
    async fn register(&self, user: Option<&mut User>) -> AppResult<()>;

    /// Check a login/password pair against the stored user
    async fn login(&self, login: &str, password: &str) -> AppResult<bool>;

    /// Get user by ID
    async fn get_user(&self, id: i32) -> AppResult<Option<User>>;

    /// Get user by login
    async fn get_user_by_login(&self, login: &str) -> AppResult<Option<User>>;

    /// Delete user by ID
    async fn unregister(&self, id: i32) -> AppResult<()>;

    /// Check that the email is well formed and belongs to a user
    async fn check_user_by_email(&self, email: &str) -> AppResult<bool>;
}

/// Concrete implementation of UserService using repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
}

impl UserManager {
    /// Create new user service instance with repository
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn register(&self, user: Option<&mut User>) -> AppResult<()> {
        let user = user.ok_or_else(|| AppError::invalid_argument("user is required"))?;
        user.validate_for_registration()?;

        self.repo.create(user).await?;
        tracing::info!(user_id = user.id, login = %user.login, "User registered");
        Ok(())
    }

    async fn login(&self, login: &str, password: &str) -> AppResult<bool> {
        validate_login(login)?;
        validate_password(password)?;

        let authorized = self
            .repo
            .get_by_login(login)
            .await?
            .is_some_and(|user| user.password_matches(password));

        if !authorized {
            tracing::warn!(login = %login, "Login rejected");
        }
        Ok(authorized)
    }

    async fn get_user(&self, id: i32) -> AppResult<Option<User>> {
        tracing::debug!(user_id = id, "Looking up user by id");
        self.repo.get_by_id(id).await
    }

    async fn get_user_by_login(&self, login: &str) -> AppResult<Option<User>> {
        validate_login(login)?;
        tracing::debug!(login = %login, "Looking up user by login");
        self.repo.get_by_login(login).await
    }

    async fn unregister(&self, id: i32) -> AppResult<()> {
        self.repo.delete(id).await?;
        tracing::info!(user_id = id, "User unregistered");
        Ok(())
    }

    async fn check_user_by_email(&self, email: &str) -> AppResult<bool> {
        if !is_email(email) {
            tracing::debug!(email = %email, "Rejected malformed email");
            return Ok(false);
        }

        Ok(self.repo.get_by_email(email).await?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;

    use crate::repository::MockUserRepository;

    fn test_user() -> User {
        User::new("Hacker", "123").with_email("bendy@gmail.com")
    }

    fn service(repo: MockUserRepository) -> UserManager {
        UserManager::new(Arc::new(repo))
    }

    // =========================================================================
    // register
    // =========================================================================

    #[tokio::test]
    async fn register_creates_user_once() {
        let mut repo = MockUserRepository::new();
        repo.expect_create().times(1).returning(|user: &mut User| {
            user.id += 10;
            Ok(())
        });

        let mut user = test_user();
        let result = service(repo).register(Some(&mut user)).await;

        assert!(result.is_ok());
        assert_eq!(user.id, 10);
    }

    #[tokio::test]
    async fn register_rejects_empty_login() {
        let mut repo = MockUserRepository::new();
        repo.expect_create().never();

        let mut user = test_user();
        user.login = String::new();
        let result = service(repo).register(Some(&mut user)).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn register_rejects_short_password() {
        for password in ["g", "j6", "ff"] {
            let mut repo = MockUserRepository::new();
            repo.expect_create().never();

            let mut user = test_user();
            user.password = password.to_string();
            let result = service(repo).register(Some(&mut user)).await;

            assert!(matches!(result, Err(AppError::Validation(_))), "{password}");
        }
    }

    #[tokio::test]
    async fn register_rejects_missing_user() {
        let mut repo = MockUserRepository::new();
        repo.expect_create().never();

        let result = service(repo).register(None).await;

        assert!(matches!(result, Err(AppError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn register_propagates_repository_error() {
        let mut repo = MockUserRepository::new();
        repo.expect_create()
            .times(1)
            .returning(|_| Err(AppError::conflict("Login 'Hacker'")));

        let mut user = test_user();
        let result = service(repo).register(Some(&mut user)).await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    // =========================================================================
    // login
    // =========================================================================

    #[tokio::test]
    async fn login_succeeds_with_matching_password() {
        let cases = [
            ("SLawrence", "sheepsheep"),
            ("JoeyD", "bendyismybae"),
            ("Alice", "gimmemahboris"),
        ];

        for (login, password) in cases {
            let mut repo = MockUserRepository::new();
            repo.expect_get_by_login()
                .withf(move |l: &str| l == login)
                .times(1)
                .returning(move |l| Ok(Some(User::new(l, password))));

            let result = service(repo).login(login, password).await;

            assert!(result.unwrap(), "{login}");
        }
    }

    #[tokio::test]
    async fn login_fails_for_unknown_user() {
        for (login, password) in [("henry666", "bendeh"), ("jacksepticeye", "butismodeller")] {
            let mut repo = MockUserRepository::new();
            repo.expect_get_by_login().times(1).returning(|_| Ok(None));

            let result = service(repo).login(login, password).await;

            assert!(!result.unwrap());
        }
    }

    #[tokio::test]
    async fn login_fails_for_wrong_password() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_login()
            .times(1)
            .returning(|l| Ok(Some(User::new(l, "sheepsheep"))));

        let result = service(repo).login("SLawrence", "wolfwolf").await;

        assert!(!result.unwrap());
    }

    #[tokio::test]
    async fn login_rejects_empty_login() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_login().never();

        let result = service(repo).login("", "notcoolpassword").await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn login_rejects_empty_password() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_login().never();

        let result = service(repo).login("somecoollogin", "").await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    // =========================================================================
    // get_user / get_user_by_login
    // =========================================================================

    #[tokio::test]
    async fn get_user_returns_repository_result() {
        let mut stored = test_user();
        stored.id = 1;
        let expected = stored.clone();

        let mut repo = MockUserRepository::new();
        repo.expect_get_by_id()
            .with(eq(1))
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));

        let result = service(repo).get_user(1).await.unwrap();

        assert_eq!(result, Some(expected));
    }

    #[tokio::test]
    async fn get_user_returns_none_when_missing() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_id()
            .with(eq(6))
            .times(1)
            .returning(|_| Ok(None));

        let result = service(repo).get_user(6).await.unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn get_user_by_login_returns_repository_result() {
        let stored = test_user();
        let expected = stored.clone();

        let mut repo = MockUserRepository::new();
        repo.expect_get_by_login()
            .withf(|l: &str| l == "JoeyD")
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));

        let result = service(repo).get_user_by_login("JoeyD").await.unwrap();

        assert_eq!(result, Some(expected));
    }

    #[tokio::test]
    async fn get_user_by_login_rejects_empty_login() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_login().never();

        let result = service(repo).get_user_by_login("").await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn get_user_by_login_returns_none_when_missing() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_login()
            .withf(|l: &str| l == "itsmemario")
            .times(1)
            .returning(|_| Ok(None));

        let result = service(repo).get_user_by_login("itsmemario").await.unwrap();

        assert!(result.is_none());
    }

    // =========================================================================
    // unregister
    // =========================================================================

    #[tokio::test]
    async fn unregister_deletes_by_id() {
        let mut repo = MockUserRepository::new();
        repo.expect_delete()
            .with(eq(11))
            .times(1)
            .returning(|_| Ok(()));

        let result = service(repo).unregister(11).await;

        assert!(result.is_ok());
    }

    // =========================================================================
    // check_user_by_email
    // =========================================================================

    #[tokio::test]
    async fn check_user_by_email_finds_existing_user() {
        for email in ["bendeh@gmail.com", "funtimefreddy@mail.ru", "ballora87@yandex.ru"] {
            let mut repo = MockUserRepository::new();
            repo.expect_get_by_email()
                .withf(move |e: &str| e == email)
                .times(1)
                .returning(|e| Ok(Some(User::new("Hacker", "123").with_email(e))));

            let result = service(repo).check_user_by_email(email).await;

            assert!(result.unwrap(), "{email}");
        }
    }

    #[tokio::test]
    async fn check_user_by_email_returns_false_when_missing() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_email().times(1).returning(|_| Ok(None));

        let result = service(repo).check_user_by_email("user@example.com").await;

        assert!(!result.unwrap());
    }

    #[tokio::test]
    async fn check_user_by_email_skips_lookup_for_malformed_email() {
        for email in ["mrmeeseeks", "", "not-an-email"] {
            let mut repo = MockUserRepository::new();
            repo.expect_get_by_email().never();

            let result = service(repo).check_user_by_email(email).await;

            assert!(!result.unwrap(), "{email:?}");
        }
    }
}
