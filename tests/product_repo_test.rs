use std::sync::Arc;

use catalog_backend::config::mongo_conf::MongoConfig;
use catalog_backend::model::product::{CreateProductInput, UpdateProductInput};
use catalog_backend::model::user::CreateUserInput;
use catalog_backend::model::EntityKind;
use catalog_backend::repository::product_repo::{MongoProductRepository, ProductRepository};
use catalog_backend::repository::repository_error::{RepositoryError, RepositoryResult};
use catalog_backend::repository::store::DocumentStore;
use catalog_backend::repository::user_repo::{MongoUserRepository, UserRepository};

async fn setup_store() -> RepositoryResult<Arc<DocumentStore>> {
    let _ = dotenv::dotenv();
    let config = MongoConfig::from_env()
        .map_err(|e| RepositoryError::database(format!("Failed to load MongoConfig: {}", e)))?;
    let store = DocumentStore::connect(&config)
        .await
        .map_err(|e| RepositoryError::database(format!("Failed to connect: {}", e)))?;
    Ok(Arc::new(store))
}

fn mug_input() -> CreateProductInput {
    CreateProductInput {
        name: "Mug".to_string(),
        image: "http://x/mug.png".to_string(),
        price: "9.99".to_string(),
        description: Some("A mug".to_string()),
        category: None,
    }
}

#[tokio::test]
#[ignore = "requires a running MongoDB instance"]
async fn test_product_repository_workflow() {
    let store = setup_store().await.expect("Failed to set up document store");
    let product_repo = MongoProductRepository::new(store);

    // Create
    let created = product_repo
        .create(mug_input())
        .await
        .expect("Failed to create product");
    assert!(!created.id.is_empty());
    assert_eq!(created.kind, EntityKind::Product);
    assert_eq!(created.price, "9.99");
    assert_eq!(created.created_at, created.updated_at);
    assert_eq!(created.version, 1);

    // Point read returns the same record
    let fetched = product_repo
        .get_by_id(&created.id)
        .await
        .expect("Failed to fetch product")
        .expect("Product should exist");
    assert_eq!(fetched.name, created.name);
    assert_eq!(fetched.price, created.price);
    assert_eq!(fetched.created_at, created.created_at);

    // Partial update changes exactly the named field
    let updated = product_repo
        .update(
            &created.id,
            UpdateProductInput {
                price: Some("12.50".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("Failed to update product")
        .expect("Product should exist for update");
    assert_eq!(updated.price, "12.50");
    assert_eq!(updated.name, created.name);
    assert_eq!(updated.image, created.image);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at >= updated.created_at);
    assert_eq!(updated.version, 2);

    // Update of a nonexistent id writes nothing and reports absence
    let missing = product_repo
        .update(
            "does-not-exist",
            UpdateProductInput {
                price: Some("1.00".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("Update of missing id should not error");
    assert!(missing.is_none());

    // Listing is filtered to the product tag
    let products = product_repo.list().await.expect("Failed to list products");
    assert!(products.iter().any(|p| p.id == created.id));
    assert!(products.iter().all(|p| p.kind == EntityKind::Product));

    // Hard delete, then absence
    let deleted = product_repo
        .delete(&created.id)
        .await
        .expect("Failed to delete product");
    assert!(deleted);
    let gone = product_repo
        .get_by_id(&created.id)
        .await
        .expect("Failed to fetch after delete");
    assert!(gone.is_none());
    let deleted_again = product_repo
        .delete(&created.id)
        .await
        .expect("Second delete should not error");
    assert!(!deleted_again);
}

#[tokio::test]
#[ignore = "requires a running MongoDB instance"]
async fn test_cross_kind_point_read_is_not_found() {
    let store = setup_store().await.expect("Failed to set up document store");
    let product_repo = MongoProductRepository::new(store.clone());
    let user_repo = MongoUserRepository::new(store);

    let email = format!("cross-kind-{}@test.com", uuid::Uuid::new_v4());
    let user = user_repo
        .create(CreateUserInput {
            email,
            password: "SomePassword1!".to_string(),
            settings: None,
        })
        .await
        .expect("Failed to create user");

    // A user id looked up through the product repository is absent, not a
    // type error.
    let not_a_product = product_repo
        .get_by_id(&user.id)
        .await
        .expect("Cross-kind read should not error");
    assert!(not_a_product.is_none());

    assert!(user_repo.delete(&user.id).await.expect("cleanup"));
}
