//! User repository - back-office account storage.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use super::entities::user;
use crate::domain::{User, UserRole};
use crate::errors::{AppError, AppResult};

/// Fields required to create an account; the password is already hashed
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub role: UserRole,
}

/// User repository trait for dependency injection
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by email
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Find a user by id
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Create a new account
    async fn create(&self, data: NewUser) -> AppResult<User>;
}

/// Concrete implementation of UserRepository over SeaORM
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
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let row = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;
        Ok(row.map(User::from))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let row = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;
        Ok(row.map(User::from))
    }

    async fn create(&self, data: NewUser) -> AppResult<User> {
        let now = Utc::now();
        let model = user::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(data.email),
            password_hash: Set(data.password_hash),
            name: Set(data.name),
            role: Set(data.role.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let stored = model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(User::from(stored))
    }
}
