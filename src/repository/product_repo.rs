use std::sync::Arc;

use async_trait::async_trait;
use bson::doc;
use chrono::Utc;
use tracing::{error, info, warn};

use crate::model::product::{CreateProductInput, Product, UpdateProductInput};
use crate::model::EntityKind;
use crate::repository::decode_tagged;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use crate::repository::store::{DocumentStore, ReplaceOutcome};

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn create(&self, input: CreateProductInput) -> RepositoryResult<Product>;
    async fn get_by_id(&self, id: &str) -> RepositoryResult<Option<Product>>;
    async fn update(&self, id: &str, input: UpdateProductInput)
        -> RepositoryResult<Option<Product>>;
    async fn delete(&self, id: &str) -> RepositoryResult<bool>;
    async fn list(&self) -> RepositoryResult<Vec<Product>>;
}

pub struct MongoProductRepository {
    store: Arc<DocumentStore>,
}

impl MongoProductRepository {
    pub fn new(store: Arc<DocumentStore>) -> Self {
        MongoProductRepository { store }
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[tracing::instrument(skip(self, input), fields(name = %input.name))]
    async fn create(&self, input: CreateProductInput) -> RepositoryResult<Product> {
        info!("Creating new product");
        let now = Utc::now().to_rfc3339();
        let product = Product::new(input, &now);
        let document = bson::to_document(&product)?;
        self.store.insert(document).await?;
        info!(product_id = %product.id, "Product created successfully");
        Ok(product)
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn get_by_id(&self, id: &str) -> RepositoryResult<Option<Product>> {
        let document = match self.store.read(id).await? {
            Some(document) => document,
            None => return Ok(None),
        };
        decode_tagged(document, EntityKind::Product)
    }

    #[tracing::instrument(skip(self, input), fields(id = %id))]
    async fn update(
        &self,
        id: &str,
        input: UpdateProductInput,
    ) -> RepositoryResult<Option<Product>> {
        let mut product = match self.get_by_id(id).await? {
            Some(product) => product,
            None => {
                info!("No product found to update for ID: {}", id);
                return Ok(None);
            }
        };
        let expected_version = product.version;
        let now = Utc::now().to_rfc3339();
        product.apply_update(input, &now);
        product.version = expected_version + 1;
        let document = bson::to_document(&product)?;
        match self.store.replace(id, expected_version, document).await? {
            ReplaceOutcome::Replaced => {
                info!("Product updated successfully for ID: {}", id);
                Ok(Some(product))
            }
            ReplaceOutcome::Missing => Ok(None),
            ReplaceOutcome::VersionMismatch => {
                error!("Concurrent modification of product {}", id);
                Err(RepositoryError::conflict(format!(
                    "Product {} was modified concurrently",
                    id
                )))
            }
        }
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: &str) -> RepositoryResult<bool> {
        let deleted = self.store.delete(id).await?;
        if deleted {
            info!("Product deleted successfully for ID: {}", id);
        } else {
            info!("No product found to delete for ID: {}", id);
        }
        Ok(deleted)
    }

    #[tracing::instrument(skip(self))]
    async fn list(&self) -> RepositoryResult<Vec<Product>> {
        let filter = doc! { "type": EntityKind::Product.as_str() };
        let documents = self.store.find(filter).await?;
        let mut products = Vec::with_capacity(documents.len());
        for document in documents {
            match bson::from_document::<Product>(document) {
                Ok(product) => products.push(product),
                Err(e) => warn!("Skipping undecodable product document: {}", e),
            }
        }
        info!("Fetched {} products", products.len());
        Ok(products)
    }
}
