use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::EntityKind;

/// Catalog product stored in the shared entity collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: EntityKind,
    pub name: String,
    pub image: String,
    /// Price kept as a numeric string, exactly as the client submits it.
    pub price: String,
    pub description: Option<String>,
    pub category: Option<String>,
    /// Optimistic-concurrency token, bumped on every replace.
    pub version: i64,
    pub created_at: String,
    pub updated_at: String,
}

/// Fields a caller supplies at creation. Id, tag and timestamps are
/// generated by the repository.
#[derive(Debug, Clone, Default)]
pub struct CreateProductInput {
    pub name: String,
    pub image: String,
    pub price: String,
    pub description: Option<String>,
    pub category: Option<String>,
}

/// Partial update: fields left as `None` retain their stored values.
#[derive(Debug, Clone, Default)]
pub struct UpdateProductInput {
    pub name: Option<String>,
    pub image: Option<String>,
    pub price: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
}

impl Product {
    pub fn new(input: CreateProductInput, now: &str) -> Self {
        Product {
            id: Uuid::new_v4().to_string(),
            kind: EntityKind::Product,
            name: input.name,
            image: input.image,
            price: input.price,
            description: input.description,
            category: input.category,
            version: 1,
            created_at: now.to_string(),
            updated_at: now.to_string(),
        }
    }

    /// Merge a partial update into this record. `id`, `type` and
    /// `createdAt` are untouchable; `updatedAt` is always refreshed.
    pub fn apply_update(&mut self, update: UpdateProductInput, now: &str) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(image) = update.image {
            self.image = image;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        if let Some(category) = update.category {
            self.category = Some(category);
        }
        self.updated_at = now.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_input() -> CreateProductInput {
        CreateProductInput {
            name: "Mug".to_string(),
            image: "http://x/mug.png".to_string(),
            price: "9.99".to_string(),
            description: None,
            category: None,
        }
    }

    #[test]
    fn test_new_product_stamps_envelope() {
        let product = Product::new(sample_input(), "2025-01-01T00:00:00+00:00");
        assert!(!product.id.is_empty());
        assert_eq!(product.kind, EntityKind::Product);
        assert_eq!(product.price, "9.99");
        assert_eq!(product.version, 1);
        assert_eq!(product.created_at, product.updated_at);
    }

    #[test]
    fn test_new_products_get_distinct_ids() {
        let a = Product::new(sample_input(), "2025-01-01T00:00:00+00:00");
        let b = Product::new(sample_input(), "2025-01-01T00:00:00+00:00");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_apply_update_changes_only_named_fields() {
        let mut product = Product::new(sample_input(), "2025-01-01T00:00:00+00:00");
        let before = product.clone();
        product.apply_update(
            UpdateProductInput {
                price: Some("12.50".to_string()),
                ..Default::default()
            },
            "2025-01-02T00:00:00+00:00",
        );
        assert_eq!(product.price, "12.50");
        assert_eq!(product.name, before.name);
        assert_eq!(product.image, before.image);
        assert_eq!(product.description, before.description);
        assert_eq!(product.category, before.category);
        assert_eq!(product.id, before.id);
        assert_eq!(product.kind, before.kind);
        assert_eq!(product.created_at, before.created_at);
        assert!(product.updated_at > product.created_at);
    }

    #[test]
    fn test_wire_shape_uses_camel_case_and_type_tag() {
        let product = Product::new(sample_input(), "2025-01-01T00:00:00+00:00");
        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["type"], "product");
        assert_eq!(value["price"], "9.99");
        assert!(value.get("createdAt").is_some());
        assert!(value.get("updatedAt").is_some());
        assert!(value.get("_id").is_some());
    }
}
