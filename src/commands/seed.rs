//! Seed command - creates the initial admin account.
//!
//! There is no public registration endpoint, so the first (and usually only)
//! admin is created here. Running the command again with the same email is
//! a no-op.

use std::sync::Arc;

use crate::cli::args::SeedArgs;
use crate::config::Config;
use crate::domain::{Password, UserRole};
use crate::errors::{AppError, AppResult};
use crate::infra::repositories::{NewUser, UserRepository, UserStore};
use crate::infra::Database;

/// Execute the seed command
pub async fn execute(args: SeedArgs, config: Config) -> AppResult<()> {
    let db = Database::connect_without_migrations(&config)
        .await
        .map_err(|e| AppError::internal(format!("Database connection failed: {}", e)))?;

    let users: Arc<dyn UserRepository> = Arc::new(UserStore::new(db.get_connection()));

    if let Some(existing) = users.find_by_email(&args.email).await? {
        tracing::info!(email = %existing.email, "Admin user already exists, nothing to do");
        return Ok(());
    }

    let password_hash = Password::new(&args.password)?.into_string();
    let admin = users
        .create(NewUser {
            email: args.email,
            password_hash,
            name: args.name,
            role: UserRole::Admin,
        })
        .await?;

    tracing::info!(email = %admin.email, "Admin user created");
    Ok(())
}
