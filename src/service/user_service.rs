use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, instrument};

use crate::model::user::{CreateUserInput, UpdateUserInput, User};
use crate::repository::user_repo::UserRepository;
use crate::util::error::ServiceError;
use crate::util::password::{PasswordUtils, PasswordUtilsImpl};

#[async_trait]
pub trait UserService: Send + Sync {
    async fn register(&self, input: CreateUserInput) -> Result<User, ServiceError>;
    async fn login(&self, email: String, password: String) -> Result<User, ServiceError>;
    async fn get(&self, id: &str) -> Result<User, ServiceError>;
    async fn update(&self, id: &str, input: UpdateUserInput) -> Result<User, ServiceError>;
    async fn delete(&self, id: &str) -> Result<(), ServiceError>;
    async fn list(&self) -> Result<Vec<User>, ServiceError>;
}

pub struct UserServiceImpl {
    pub user_repo: Arc<dyn UserRepository>,
}

impl UserServiceImpl {
    pub fn new(user_repo: Arc<dyn UserRepository>) -> Self {
        Self { user_repo }
    }
}

#[async_trait]
impl UserService for UserServiceImpl {
    /// Email uniqueness is enforced by lookup-then-create; two racing
    /// registrations with the same email can both pass the lookup. The
    /// store itself holds no uniqueness constraint.
    #[instrument(skip(self, input), fields(email = %input.email))]
    async fn register(&self, input: CreateUserInput) -> Result<User, ServiceError> {
        info!("Registering new user");
        if input.email.trim().is_empty() {
            return Err(ServiceError::InvalidInput(
                "Email is required".to_string(),
            ));
        }
        if input.password.is_empty() {
            return Err(ServiceError::InvalidInput(
                "Password is required".to_string(),
            ));
        }
        let existing = self.user_repo.find_by_email(&input.email).await?;
        if existing.is_some() {
            error!("User already exists: {}", input.email);
            return Err(ServiceError::Conflict("User already exists".to_string()));
        }
        let user = self.user_repo.create(input).await;
        match &user {
            Ok(_) => info!("User registered successfully"),
            Err(e) => error!("Failed to register user: {e}"),
        }
        Ok(user?)
    }

    #[instrument(skip(self, password), fields(email = %email))]
    async fn login(&self, email: String, password: String) -> Result<User, ServiceError> {
        info!("User login attempt");
        let user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or_else(|| ServiceError::Unauthorized("Invalid credentials".to_string()))?;
        let valid = PasswordUtilsImpl::verify_password(&password, &user.password_hash)
            .map_err(|e| ServiceError::InternalError(format!("Password verify error: {}", e)))?;
        if !valid {
            error!("Invalid credentials for user: {}", email);
            return Err(ServiceError::Unauthorized(
                "Invalid credentials".to_string(),
            ));
        }
        // Stamp the login; fall back to the record we already have if it
        // was deleted in between.
        let user = match self.user_repo.record_login(&user.id).await? {
            Some(updated) => updated,
            None => user,
        };
        info!("User logged in successfully");
        Ok(user)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn get(&self, id: &str) -> Result<User, ServiceError> {
        let user = self.user_repo.get_by_id(id).await?;
        user.ok_or_else(|| ServiceError::NotFound(format!("User not found: {}", id)))
    }

    #[instrument(skip(self, input), fields(id = %id))]
    async fn update(&self, id: &str, input: UpdateUserInput) -> Result<User, ServiceError> {
        // A changed email must stay unique across all users.
        if let Some(ref email) = input.email {
            if let Some(existing) = self.user_repo.find_by_email(email).await? {
                if existing.id != id {
                    return Err(ServiceError::Conflict(
                        "Email already in use".to_string(),
                    ));
                }
            }
        }
        let updated = self.user_repo.update(id, input).await;
        match &updated {
            Ok(Some(_)) => info!("User updated"),
            Ok(None) => info!("User not found for update"),
            Err(e) => error!("Failed to update user: {e}"),
        }
        updated?.ok_or_else(|| ServiceError::NotFound(format!("User not found: {}", id)))
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        let deleted = self.user_repo.delete(id).await?;
        if !deleted {
            return Err(ServiceError::NotFound(format!("User not found: {}", id)));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<User>, ServiceError> {
        Ok(self.user_repo.list().await?)
    }
}
