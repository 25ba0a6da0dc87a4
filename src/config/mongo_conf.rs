use serde::{Deserialize, Serialize};
use std::env;
use tracing::{debug, error, info, warn};

use crate::config::ConfigError;

/// Document store connection configuration.
///
/// All entity kinds share one physical collection; the collection name is
/// part of the connection identity and validated at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoConfig {
    /// MongoDB connection URI
    pub uri: String,
    /// Database name
    pub database: String,
    /// Name of the shared entity collection
    pub collection: String,
    /// Username for authentication (optional)
    pub username: Option<String>,
    /// Password for authentication (optional)
    pub password: Option<String>,
    /// Connection pool size
    pub pool_size: u32,
    /// Connection timeout in seconds
    pub connection_timeout_secs: u64,
}

impl MongoConfig {
    /// Load document store configuration from environment variables
    ///
    /// Expected environment variables:
    /// - MONGO_URI: MongoDB connection URI (required)
    /// - MONGO_DATABASE: Database name (required)
    /// - MONGO_ENTITY_COLLECTION: Shared entity collection (defaults to "entities")
    /// - MONGO_USERNAME / MONGO_PASSWORD: credentials (optional)
    /// - MONGO_POOL_SIZE: Connection pool size (defaults to 10)
    /// - MONGO_CONNECTION_TIMEOUT: Connection timeout in seconds (defaults to 5)
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading document store configuration from environment variables");

        let uri = env::var("MONGO_URI").map_err(|_| {
            error!("MONGO_URI environment variable not found");
            ConfigError::EnvVarNotFound("MONGO_URI".to_string())
        })?;

        let database = env::var("MONGO_DATABASE").map_err(|_| {
            error!("MONGO_DATABASE environment variable not found");
            ConfigError::EnvVarNotFound("MONGO_DATABASE".to_string())
        })?;
        debug!("Document store database: {}", database);

        let collection = env::var("MONGO_ENTITY_COLLECTION").unwrap_or_else(|_| {
            warn!("MONGO_ENTITY_COLLECTION not set, using default: entities");
            "entities".to_string()
        });
        debug!("Shared entity collection: {}", collection);

        let username = env::var("MONGO_USERNAME").ok();
        let password = env::var("MONGO_PASSWORD").ok();

        let pool_size = env::var("MONGO_POOL_SIZE")
            .unwrap_or_else(|_| {
                warn!("MONGO_POOL_SIZE not set, using default: 10");
                "10".to_string()
            })
            .parse::<u32>()
            .map_err(|_| {
                error!("Invalid MONGO_POOL_SIZE value");
                ConfigError::InvalidValue("Invalid MONGO_POOL_SIZE value".to_string())
            })?;

        let connection_timeout_secs = env::var("MONGO_CONNECTION_TIMEOUT")
            .unwrap_or_else(|_| {
                warn!("MONGO_CONNECTION_TIMEOUT not set, using default: 5 seconds");
                "5".to_string()
            })
            .parse::<u64>()
            .map_err(|_| {
                error!("Invalid MONGO_CONNECTION_TIMEOUT value");
                ConfigError::InvalidValue("Invalid MONGO_CONNECTION_TIMEOUT value".to_string())
            })?;

        let config = MongoConfig {
            uri,
            database,
            collection,
            username,
            password,
            pool_size,
            connection_timeout_secs,
        };

        config.validate()?;
        info!("Document store configuration loaded successfully");
        Ok(config)
    }

    /// Create MongoConfig for testing
    pub fn from_test_env() -> Self {
        MongoConfig {
            uri: "mongodb://localhost:27017".to_string(),
            database: "catalog_test".to_string(),
            collection: "entities_test".to_string(),
            username: None,
            password: None,
            pool_size: 2,
            connection_timeout_secs: 2,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.uri.is_empty() {
            error!("Document store URI is empty");
            return Err(ConfigError::ValidationError(
                "Document store URI cannot be empty".to_string(),
            ));
        }

        if self.database.is_empty() {
            error!("Document store database is empty");
            return Err(ConfigError::ValidationError(
                "Document store database cannot be empty".to_string(),
            ));
        }

        if self.collection.is_empty() {
            error!("Entity collection name is empty");
            return Err(ConfigError::ValidationError(
                "Entity collection name cannot be empty".to_string(),
            ));
        }

        if self.pool_size == 0 {
            return Err(ConfigError::ValidationError(
                "Connection pool size must be greater than 0".to_string(),
            ));
        }

        if self.connection_timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "Connection timeout must be greater than 0".to_string(),
            ));
        }

        if let Some(ref user) = self.username {
            if user.is_empty() {
                return Err(ConfigError::ValidationError(
                    "Username cannot be empty if set".to_string(),
                ));
            }
        }
        if let Some(ref pass) = self.password {
            if pass.is_empty() {
                return Err(ConfigError::ValidationError(
                    "Password cannot be empty if set".to_string(),
                ));
            }
        }
        Ok(())
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        MongoConfig {
            uri: "mongodb://localhost:27017".to_string(),
            database: "catalog".to_string(),
            collection: "entities".to_string(),
            username: None,
            password: None,
            pool_size: 10,
            connection_timeout_secs: 5,
        }
    }
}
