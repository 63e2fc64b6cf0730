//! User Service Library
//!
//! Account registration, login checks, lookup and removal on top of a
//! pluggable [`UserRepository`](repository::UserRepository). The service can
//! run over PostgreSQL (SeaORM) or an in-memory store.

pub mod config;
pub mod infra;
pub mod repository;
pub mod service;

use std::sync::Arc;

use tracing::info;

use common::AppResult;

use crate::config::UserServiceConfig;
use crate::infra::Database;
use crate::repository::{InMemoryUserStore, UserRepository, UserStore};
use crate::service::{UserManager, UserService};

/// Connect to the configured database (applying pending migrations) and
/// build the user service over it.
pub async fn connect_service(config: &UserServiceConfig) -> AppResult<Arc<dyn UserService>> {
    let db = Database::connect(&config.database).await?;

    let user_repo: Arc<dyn UserRepository> = Arc::new(UserStore::new(db.into_connection()));
    Ok(Arc::new(UserManager::new(user_repo)))
}

/// Build the user service over a fresh in-memory store.
pub fn in_memory_service() -> Arc<dyn UserService> {
    let user_repo: Arc<dyn UserRepository> = Arc::new(InMemoryUserStore::new());
    Arc::new(UserManager::new(user_repo))
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(action: MigrateAction, config: &UserServiceConfig) -> AppResult<()> {
    let db = Database::connect_without_migrations(&config.database).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

/// Migration action type.
#[derive(Debug, Clone, Copy)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}
