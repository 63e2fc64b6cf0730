//! User domain entity and field validation.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{MIN_PASSWORD_LENGTH, UNASSIGNED_USER_ID};
use crate::error::{DomainError, DomainResult};

/// User domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Assigned by the repository on creation
    pub id: i32,
    pub login: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    /// Stored as given; credentials are compared verbatim
    #[serde(skip_serializing, default)]
    pub password: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create an unpersisted user with the given credentials
    pub fn new(login: impl Into<String>, password: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: UNASSIGNED_USER_ID,
            login: login.into(),
            first_name: String::new(),
            last_name: String::new(),
            birth_date: None,
            password: password.into(),
            email: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn with_names(mut self, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        self.first_name = first_name.into();
        self.last_name = last_name.into();
        self
    }

    pub fn with_birth_date(mut self, birth_date: NaiveDate) -> Self {
        self.birth_date = Some(birth_date);
        self
    }

    /// Check if the repository has assigned an id
    pub fn is_persisted(&self) -> bool {
        self.id != UNASSIGNED_USER_ID
    }

    /// Compare the stored password with a candidate
    pub fn password_matches(&self, candidate: &str) -> bool {
        self.password == candidate
    }

    /// Validate the fields required for registration
    pub fn validate_for_registration(&self) -> DomainResult<()> {
        validate_login(&self.login)?;
        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(DomainError::validation(format!(
                "Incorrect password: must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }
        Ok(())
    }

    /// Mark the entity as modified
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Reject an empty login
pub fn validate_login(login: &str) -> DomainResult<()> {
    if login.is_empty() {
        return Err(DomainError::validation(format!("Incorrect login '{}'", login)));
    }
    Ok(())
}

/// Reject an empty password
pub fn validate_password(password: &str) -> DomainResult<()> {
    if password.is_empty() {
        return Err(DomainError::validation("Incorrect password: must not be empty"));
    }
    Ok(())
}
