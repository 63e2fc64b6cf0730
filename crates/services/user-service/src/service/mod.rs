//! Application services layer.
//!
//! Services validate caller input and delegate to repository abstractions
//! injected at construction.

mod user_service;

pub use user_service::{UserManager, UserService};
