use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::model::product::{CreateProductInput, UpdateProductInput};

fn validate_price(price: &str) -> Result<(), ValidationError> {
    if price.trim().is_empty() || price.trim().parse::<f64>().is_err() {
        return Err(ValidationError::new("price_must_be_numeric"));
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,

    #[validate(url)]
    pub image: String,

    /// Numeric-as-string, e.g. "9.99"
    #[validate(custom = "validate_price")]
    pub price: String,

    pub description: Option<String>,

    pub category: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,

    #[validate(url)]
    pub image: Option<String>,

    #[validate(custom = "validate_price")]
    pub price: Option<String>,

    pub description: Option<String>,

    pub category: Option<String>,
}

impl From<CreateProductRequest> for CreateProductInput {
    fn from(request: CreateProductRequest) -> Self {
        CreateProductInput {
            name: request.name,
            image: request.image,
            price: request.price,
            description: request.description,
            category: request.category,
        }
    }
}

impl From<UpdateProductRequest> for UpdateProductInput {
    fn from(request: UpdateProductRequest) -> Self {
        UpdateProductInput {
            name: request.name,
            image: request.image,
            price: request.price,
            description: request.description,
            category: request.category,
        }
    }
}
