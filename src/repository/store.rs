use bson::{doc, Document};
use futures::stream::StreamExt;
use mongodb::options::{ClientOptions, Credential, ResolverConfig};
use mongodb::{Client, Collection};
use tracing::info;

use crate::config::mongo_conf::MongoConfig;
use crate::repository::repository_error::RepositoryResult;

/// Outcome of a versioned replace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplaceOutcome {
    Replaced,
    /// The id no longer exists.
    Missing,
    /// The document exists but its version moved past the one the caller
    /// read; the caller's copy is stale.
    VersionMismatch,
}

/// Handle to the shared entity collection.
///
/// Constructed once at startup and passed to every repository; read-only
/// after construction. All entity kinds live in this one collection,
/// distinguished by their `type` tag.
pub struct DocumentStore {
    collection: Collection<Document>,
}

impl DocumentStore {
    pub async fn connect(config: &MongoConfig) -> Result<Self, mongodb::error::Error> {
        let mut client_options =
            ClientOptions::parse_with_resolver_config(&config.uri, ResolverConfig::cloudflare())
                .await?;
        client_options.app_name = Some("CatalogBackend".to_string());
        client_options.max_pool_size = Some(config.pool_size);
        client_options.connect_timeout =
            Some(std::time::Duration::from_secs(config.connection_timeout_secs));

        if let (Some(ref username), Some(ref password)) = (&config.username, &config.password) {
            client_options.credential = Some(
                Credential::builder()
                    .username(username.clone())
                    .password(password.clone())
                    .build(),
            );
        }

        let client = Client::with_options(client_options)?;
        let db = client.database(&config.database);
        let collection = db.collection::<Document>(&config.collection);
        info!(
            database = %config.database,
            collection = %config.collection,
            "Connected to document store"
        );
        Ok(DocumentStore { collection })
    }

    /// Point read by id. `Ok(None)` means the id is genuinely absent;
    /// transport failures surface as errors, never as absence.
    pub async fn read(&self, id: &str) -> RepositoryResult<Option<Document>> {
        let document = self.collection.find_one(doc! { "_id": id }, None).await?;
        Ok(document)
    }

    pub async fn insert(&self, document: Document) -> RepositoryResult<()> {
        self.collection.insert_one(document, None).await?;
        Ok(())
    }

    /// Full replace guarded by the version the caller read. A concurrent
    /// writer that got in first is reported as `VersionMismatch`, never
    /// silently overwritten.
    pub async fn replace(
        &self,
        id: &str,
        expected_version: i64,
        document: Document,
    ) -> RepositoryResult<ReplaceOutcome> {
        let filter = doc! { "_id": id, "version": expected_version };
        let result = self.collection.replace_one(filter, document, None).await?;
        if result.matched_count > 0 {
            return Ok(ReplaceOutcome::Replaced);
        }
        // Zero matches: the document is either gone or already replaced.
        match self.read(id).await? {
            Some(_) => Ok(ReplaceOutcome::VersionMismatch),
            None => Ok(ReplaceOutcome::Missing),
        }
    }

    /// Hard delete by id. `Ok(false)` means the id did not exist.
    pub async fn delete(&self, id: &str) -> RepositoryResult<bool> {
        let result = self.collection.delete_one(doc! { "_id": id }, None).await?;
        Ok(result.deleted_count > 0)
    }

    /// First document matching the filter. Callers must include the
    /// discriminator tag in the filter.
    pub async fn find_one(&self, filter: Document) -> RepositoryResult<Option<Document>> {
        let document = self.collection.find_one(filter, None).await?;
        Ok(document)
    }

    /// All documents matching the filter, in no particular order.
    pub async fn find(&self, filter: Document) -> RepositoryResult<Vec<Document>> {
        let mut cursor = self.collection.find(filter, None).await?;
        let mut documents = Vec::new();
        while let Some(document) = cursor.next().await {
            documents.push(document?);
        }
        Ok(documents)
    }
}
