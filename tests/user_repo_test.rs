use std::sync::Arc;

use catalog_backend::config::mongo_conf::MongoConfig;
use catalog_backend::model::user::{CreateUserInput, Theme, UpdateUserInput, UserSettingsPatch};
use catalog_backend::model::EntityKind;
use catalog_backend::repository::repository_error::{RepositoryError, RepositoryResult};
use catalog_backend::repository::store::DocumentStore;
use catalog_backend::repository::user_repo::{MongoUserRepository, UserRepository};
use catalog_backend::util::password::{PasswordUtils, PasswordUtilsImpl};

async fn setup_user_repository() -> RepositoryResult<MongoUserRepository> {
    let _ = dotenv::dotenv();
    let config = MongoConfig::from_env()
        .map_err(|e| RepositoryError::database(format!("Failed to load MongoConfig: {}", e)))?;
    let store = DocumentStore::connect(&config)
        .await
        .map_err(|e| RepositoryError::database(format!("Failed to connect: {}", e)))?;
    Ok(MongoUserRepository::new(Arc::new(store)))
}

fn unique_email(prefix: &str) -> String {
    format!("{}-{}@test.com", prefix, uuid::Uuid::new_v4())
}

#[tokio::test]
#[ignore = "requires a running MongoDB instance"]
async fn test_user_repository_workflow() {
    let user_repo = setup_user_repository()
        .await
        .expect("Failed to set up user repository");
    let email = unique_email("workflow");
    let raw_password = "CorrectHorse1!";

    // Lookup before creation finds nothing
    let absent = user_repo
        .find_by_email(&email)
        .await
        .expect("Lookup should not error");
    assert!(absent.is_none());

    // Create: password is stored only as a hash, defaults applied
    let created = user_repo
        .create(CreateUserInput {
            email: email.clone(),
            password: raw_password.to_string(),
            settings: Some(UserSettingsPatch {
                theme: Some(Theme::Dark),
                ..Default::default()
            }),
        })
        .await
        .expect("Failed to create user");
    assert_eq!(created.kind, EntityKind::User);
    assert_ne!(created.password_hash, raw_password);
    assert!(created.password_hash.starts_with("$argon2"));
    assert!(created.is_active);
    assert_eq!(created.roles, vec!["user".to_string()]);
    assert_eq!(created.settings.theme, Theme::Dark);
    assert!(created.settings.notifications);
    assert_eq!(created.created_at, created.updated_at);

    // The stored hash verifies against the raw password
    assert!(
        PasswordUtilsImpl::verify_password(raw_password, &created.password_hash).unwrap()
    );

    // Secondary-field lookup now finds the user
    let by_email = user_repo
        .find_by_email(&email)
        .await
        .expect("Lookup should not error")
        .expect("User should be found by email");
    assert_eq!(by_email.id, created.id);

    // Partial settings update leaves the other settings fields alone
    let updated = user_repo
        .update(
            &created.id,
            UpdateUserInput {
                settings: Some(UserSettingsPatch {
                    notifications: Some(false),
                    ..Default::default()
                }),
                ..Default::default()
            },
        )
        .await
        .expect("Failed to update user")
        .expect("User should exist for update");
    assert!(!updated.settings.notifications);
    assert_eq!(updated.settings.theme, Theme::Dark);
    assert!(updated.settings.preferences.is_empty());
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at >= updated.created_at);

    // Password change is hashed before the merge
    let rehashed = user_repo
        .update(
            &created.id,
            UpdateUserInput {
                password: Some("AnotherSecret2!".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("Failed to update password")
        .expect("User should exist for update");
    assert_ne!(rehashed.password_hash, "AnotherSecret2!");
    assert_ne!(rehashed.password_hash, created.password_hash);
    assert!(
        PasswordUtilsImpl::verify_password("AnotherSecret2!", &rehashed.password_hash).unwrap()
    );

    // Login stamp moves lastLogin forward
    let logged_in = user_repo
        .record_login(&created.id)
        .await
        .expect("Failed to record login")
        .expect("User should exist");
    assert!(logged_in.last_login >= created.last_login);

    // Hard delete, then absence
    assert!(user_repo.delete(&created.id).await.expect("delete"));
    let gone = user_repo
        .get_by_id(&created.id)
        .await
        .expect("Fetch after delete should not error");
    assert!(gone.is_none());
}

#[tokio::test]
#[ignore = "requires a running MongoDB instance"]
async fn test_user_listing_is_filtered_to_user_tag() {
    let user_repo = setup_user_repository()
        .await
        .expect("Failed to set up user repository");
    let email = unique_email("listing");
    let created = user_repo
        .create(CreateUserInput {
            email,
            password: "ListingPass1!".to_string(),
            settings: None,
        })
        .await
        .expect("Failed to create user");

    let users = user_repo.list().await.expect("Failed to list users");
    assert!(users.iter().any(|u| u.id == created.id));
    assert!(users.iter().all(|u| u.kind == EntityKind::User));

    assert!(user_repo.delete(&created.id).await.expect("cleanup"));
}
