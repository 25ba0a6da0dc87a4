use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, instrument};

use crate::model::product::{CreateProductInput, Product, UpdateProductInput};
use crate::repository::product_repo::ProductRepository;
use crate::util::error::ServiceError;

#[async_trait]
pub trait ProductService: Send + Sync {
    async fn create(&self, input: CreateProductInput) -> Result<Product, ServiceError>;
    async fn get(&self, id: &str) -> Result<Product, ServiceError>;
    async fn update(&self, id: &str, input: UpdateProductInput) -> Result<Product, ServiceError>;
    async fn delete(&self, id: &str) -> Result<(), ServiceError>;
    async fn list(&self) -> Result<Vec<Product>, ServiceError>;
}

pub struct ProductServiceImpl {
    pub product_repo: Arc<dyn ProductRepository>,
}

impl ProductServiceImpl {
    pub fn new(product_repo: Arc<dyn ProductRepository>) -> Self {
        Self { product_repo }
    }
}

/// Required-field check applied before any store call.
fn check_create_preconditions(input: &CreateProductInput) -> Result<(), ServiceError> {
    if input.name.trim().is_empty() {
        return Err(ServiceError::InvalidInput(
            "Product name is required".to_string(),
        ));
    }
    if input.image.trim().is_empty() {
        return Err(ServiceError::InvalidInput(
            "Product image is required".to_string(),
        ));
    }
    if input.price.trim().is_empty() || input.price.trim().parse::<f64>().is_err() {
        return Err(ServiceError::InvalidInput(
            "Product price must be a numeric string".to_string(),
        ));
    }
    Ok(())
}

#[async_trait]
impl ProductService for ProductServiceImpl {
    #[instrument(skip(self, input), fields(name = %input.name))]
    async fn create(&self, input: CreateProductInput) -> Result<Product, ServiceError> {
        check_create_preconditions(&input)?;
        let product = self.product_repo.create(input).await?;
        info!(product_id = %product.id, "Product created");
        Ok(product)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn get(&self, id: &str) -> Result<Product, ServiceError> {
        let product = self.product_repo.get_by_id(id).await?;
        product.ok_or_else(|| ServiceError::NotFound(format!("Product not found: {}", id)))
    }

    #[instrument(skip(self, input), fields(id = %id))]
    async fn update(&self, id: &str, input: UpdateProductInput) -> Result<Product, ServiceError> {
        if let Some(ref price) = input.price {
            if price.trim().is_empty() || price.trim().parse::<f64>().is_err() {
                return Err(ServiceError::InvalidInput(
                    "Product price must be a numeric string".to_string(),
                ));
            }
        }
        let updated = self.product_repo.update(id, input).await;
        match &updated {
            Ok(Some(_)) => info!("Product updated"),
            Ok(None) => info!("Product not found for update"),
            Err(e) => error!("Failed to update product: {e}"),
        }
        updated?.ok_or_else(|| ServiceError::NotFound(format!("Product not found: {}", id)))
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        let deleted = self.product_repo.delete(id).await?;
        if !deleted {
            return Err(ServiceError::NotFound(format!("Product not found: {}", id)));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Product>, ServiceError> {
        Ok(self.product_repo.list().await?)
    }
}
