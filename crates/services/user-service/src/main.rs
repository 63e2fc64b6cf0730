//! User Service - command-line front end for user account management.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use common::{AppError, AppResult};
use domain::User;
use user_service_lib::config::UserServiceConfig;
use user_service_lib::service::UserService;
use user_service_lib::MigrateAction;

#[derive(Parser)]
#[command(name = "user-service")]
#[command(about = "User account management")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Account(AccountCommands),
    /// Database migration commands
    Migrate {
        #[command(subcommand)]
        action: MigrateCommands,
    },
}

#[derive(Subcommand)]
enum AccountCommands {
    /// Register a new user and print its id
    Register {
        #[arg(long)]
        login: String,
        #[arg(long)]
        password: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        first_name: String,
        #[arg(long, default_value = "")]
        last_name: String,
        /// Birth date as YYYY-MM-DD
        #[arg(long)]
        birth_date: Option<NaiveDate>,
    },
    /// Check a login/password pair
    Login {
        #[arg(long)]
        login: String,
        #[arg(long)]
        password: String,
    },
    /// Show a user by id
    Get { id: i32 },
    /// Show a user by login
    GetByLogin { login: String },
    /// Delete a user by id
    Unregister { id: i32 },
    /// Check whether a well-formed email belongs to a user
    CheckEmail { email: String },
}

#[derive(Subcommand)]
enum MigrateCommands {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset database and run all migrations
    Fresh,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let config = UserServiceConfig::from_env();
    tracing::debug!(?config, "Configuration loaded");

    if let Err(e) = run(cli.command, config).await {
        if e.is_client_error() {
            tracing::warn!(code = e.code(), "Rejected: {}", e);
        } else {
            tracing::error!(code = e.code(), "Command failed: {}", e);
        }
        std::process::exit(1);
    }
}

async fn run(command: Commands, config: UserServiceConfig) -> AppResult<()> {
    match command {
        Commands::Migrate { action } => {
            let migrate_action = match action {
                MigrateCommands::Up => MigrateAction::Up,
                MigrateCommands::Down => MigrateAction::Down,
                MigrateCommands::Status => MigrateAction::Status,
                MigrateCommands::Fresh => MigrateAction::Fresh,
            };
            user_service_lib::run_migrations(migrate_action, &config).await
        }
        Commands::Account(command) => {
            let service = user_service_lib::connect_service(&config).await?;
            execute(service.as_ref(), command).await
        }
    }
}

async fn execute(service: &dyn UserService, command: AccountCommands) -> AppResult<()> {
    match command {
        AccountCommands::Register {
            login,
            password,
            email,
            first_name,
            last_name,
            birth_date,
        } => {
            let mut user = User::new(login, password)
                .with_email(email)
                .with_names(first_name, last_name);
            if let Some(date) = birth_date {
                user = user.with_birth_date(date);
            }
            service.register(Some(&mut user)).await?;
            println!("{}", user.id);
        }
        AccountCommands::Login { login, password } => {
            println!("{}", service.login(&login, &password).await?);
        }
        AccountCommands::Get { id } => print_user(service.get_user(id).await?)?,
        AccountCommands::GetByLogin { login } => {
            print_user(service.get_user_by_login(&login).await?)?
        }
        AccountCommands::Unregister { id } => service.unregister(id).await?,
        AccountCommands::CheckEmail { email } => {
            println!("{}", service.check_user_by_email(&email).await?);
        }
    }

    Ok(())
}

fn print_user(user: Option<User>) -> AppResult<()> {
    match user {
        Some(user) => {
            let json = serde_json::to_string_pretty(&user)
                .map_err(|e| AppError::internal(e.to_string()))?;
            println!("{}", json);
        }
        None => println!("not found"),
    }
    Ok(())
}

/// Initialize tracing subscriber
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
