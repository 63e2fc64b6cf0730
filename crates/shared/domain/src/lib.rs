//! Domain layer - Core business entities and validation rules.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! The user service and its repositories build on the types defined here.

pub mod constants;
pub mod email;
pub mod error;
pub mod user;

pub use constants::*;
pub use email::is_email;
pub use error::{DomainError, DomainResult};
pub use user::{validate_login, validate_password, User};
