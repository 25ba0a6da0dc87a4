use std::sync::Arc;

use async_trait::async_trait;
use bson::doc;
use chrono::Utc;
use tracing::{error, info, warn};

use crate::model::user::{CreateUserInput, UpdateUserInput, User};
use crate::model::EntityKind;
use crate::repository::decode_tagged;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use crate::repository::store::{DocumentStore, ReplaceOutcome};
use crate::util::password::{PasswordUtils, PasswordUtilsImpl};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, input: CreateUserInput) -> RepositoryResult<User>;
    async fn get_by_id(&self, id: &str) -> RepositoryResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;
    async fn update(&self, id: &str, input: UpdateUserInput) -> RepositoryResult<Option<User>>;
    async fn record_login(&self, id: &str) -> RepositoryResult<Option<User>>;
    async fn delete(&self, id: &str) -> RepositoryResult<bool>;
    async fn list(&self) -> RepositoryResult<Vec<User>>;
}

pub struct MongoUserRepository {
    store: Arc<DocumentStore>,
}

impl MongoUserRepository {
    pub fn new(store: Arc<DocumentStore>) -> Self {
        MongoUserRepository { store }
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    #[tracing::instrument(skip(self, input), fields(email = %input.email))]
    async fn create(&self, input: CreateUserInput) -> RepositoryResult<User> {
        info!("Creating new user");
        // Hash before the record exists; a hashing failure must abort with
        // nothing persisted.
        let password_hash = PasswordUtilsImpl::hash_password(&input.password)
            .map_err(RepositoryError::generic)?;
        let now = Utc::now().to_rfc3339();
        let user = User::new(input.email, password_hash, input.settings, &now);
        let document = bson::to_document(&user)?;
        self.store.insert(document).await?;
        info!(user_id = %user.id, "User created successfully");
        Ok(user)
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn get_by_id(&self, id: &str) -> RepositoryResult<Option<User>> {
        let document = match self.store.read(id).await? {
            Some(document) => document,
            None => return Ok(None),
        };
        decode_tagged(document, EntityKind::User)
    }

    #[tracing::instrument(skip(self), fields(email = %email))]
    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        let filter = doc! { "email": email, "type": EntityKind::User.as_str() };
        let document = match self.store.find_one(filter).await? {
            Some(document) => document,
            None => return Ok(None),
        };
        decode_tagged(document, EntityKind::User)
    }

    #[tracing::instrument(skip(self, input), fields(id = %id))]
    async fn update(&self, id: &str, input: UpdateUserInput) -> RepositoryResult<Option<User>> {
        let mut user = match self.get_by_id(id).await? {
            Some(user) => user,
            None => {
                info!("No user found to update for ID: {}", id);
                return Ok(None);
            }
        };
        // A new raw password is hashed before it goes anywhere near the
        // merge.
        let password_hash = match input.password.as_deref() {
            Some(password) => Some(
                PasswordUtilsImpl::hash_password(password).map_err(RepositoryError::generic)?,
            ),
            None => None,
        };
        let expected_version = user.version;
        let now = Utc::now().to_rfc3339();
        user.apply_update(input, password_hash, &now);
        user.version = expected_version + 1;
        let document = bson::to_document(&user)?;
        match self.store.replace(id, expected_version, document).await? {
            ReplaceOutcome::Replaced => {
                info!("User updated successfully for ID: {}", id);
                Ok(Some(user))
            }
            ReplaceOutcome::Missing => Ok(None),
            ReplaceOutcome::VersionMismatch => {
                error!("Concurrent modification of user {}", id);
                Err(RepositoryError::conflict(format!(
                    "User {} was modified concurrently",
                    id
                )))
            }
        }
    }

    /// Refresh `lastLogin` after a successful credential check.
    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn record_login(&self, id: &str) -> RepositoryResult<Option<User>> {
        let mut user = match self.get_by_id(id).await? {
            Some(user) => user,
            None => return Ok(None),
        };
        let expected_version = user.version;
        let now = Utc::now().to_rfc3339();
        user.last_login = now.clone();
        user.updated_at = now;
        user.version = expected_version + 1;
        let document = bson::to_document(&user)?;
        match self.store.replace(id, expected_version, document).await? {
            ReplaceOutcome::Replaced => Ok(Some(user)),
            ReplaceOutcome::Missing => Ok(None),
            ReplaceOutcome::VersionMismatch => Err(RepositoryError::conflict(format!(
                "User {} was modified concurrently",
                id
            ))),
        }
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: &str) -> RepositoryResult<bool> {
        let deleted = self.store.delete(id).await?;
        if deleted {
            info!("User deleted successfully for ID: {}", id);
        } else {
            info!("No user found to delete for ID: {}", id);
        }
        Ok(deleted)
    }

    #[tracing::instrument(skip(self))]
    async fn list(&self) -> RepositoryResult<Vec<User>> {
        let filter = doc! { "type": EntityKind::User.as_str() };
        let documents = self.store.find(filter).await?;
        let mut users = Vec::with_capacity(documents.len());
        for document in documents {
            match bson::from_document::<User>(document) {
                Ok(user) => users.push(user),
                Err(e) => warn!("Skipping undecodable user document: {}", e),
            }
        }
        info!("Fetched {} users", users.len());
        Ok(users)
    }
}
