pub mod product_repo;
pub mod repository_error;
pub mod store;
pub mod user_repo;

use bson::Document;
use serde::de::DeserializeOwned;

use crate::model::EntityKind;
use crate::repository::repository_error::RepositoryResult;

/// Decode a stored document as the given kind.
///
/// A document whose `type` tag does not match the expected kind is reported
/// as absent, never as a type mismatch; a document under the right tag that
/// fails to decode is a serialization error.
pub(crate) fn decode_tagged<T: DeserializeOwned>(
    document: Document,
    kind: EntityKind,
) -> RepositoryResult<Option<T>> {
    match document.get_str("type") {
        Ok(tag) if tag == kind.as_str() => Ok(Some(bson::from_document(document)?)),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::product::Product;
    use crate::model::user::User;
    use bson::doc;

    #[test]
    fn test_decode_tagged_rejects_wrong_kind_as_absent() {
        let document = doc! { "_id": "p-1", "type": "product", "name": "Mug" };
        let user: Option<User> = decode_tagged(document, EntityKind::User).unwrap();
        assert!(user.is_none());
    }

    #[test]
    fn test_decode_tagged_missing_tag_is_absent() {
        let document = doc! { "_id": "x-1", "name": "untyped" };
        let product: Option<Product> = decode_tagged(document, EntityKind::Product).unwrap();
        assert!(product.is_none());
    }

    #[test]
    fn test_decode_tagged_matching_kind() {
        let product = Product::new(
            crate::model::product::CreateProductInput {
                name: "Mug".to_string(),
                image: "http://x/mug.png".to_string(),
                price: "9.99".to_string(),
                description: None,
                category: None,
            },
            "2025-01-01T00:00:00+00:00",
        );
        let document = bson::to_document(&product).unwrap();
        let decoded: Option<Product> = decode_tagged(document, EntityKind::Product).unwrap();
        assert_eq!(decoded.unwrap().id, product.id);
    }

    #[test]
    fn test_decode_tagged_bad_payload_under_right_tag_is_error() {
        let document = doc! { "_id": "p-1", "type": "product" };
        let result: RepositoryResult<Option<Product>> =
            decode_tagged(document, EntityKind::Product);
        assert!(result.is_err());
    }
}
