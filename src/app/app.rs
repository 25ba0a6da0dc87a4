use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, Router};
use tracing::info;

use crate::config::app_conf::AppConfig;
use crate::config::mongo_conf::MongoConfig;
use crate::repository::product_repo::{MongoProductRepository, ProductRepository};
use crate::repository::store::DocumentStore;
use crate::repository::user_repo::{MongoUserRepository, UserRepository};
use crate::router::product_router::product_router;
use crate::router::user_router::user_router;
use crate::service::product_service::ProductServiceImpl;
use crate::service::user_service::UserServiceImpl;

pub struct App {
    config: AppConfig,
    router: Router,
    pub product_service: Arc<ProductServiceImpl>,
    pub user_service: Arc<UserServiceImpl>,
}

impl App {
    pub async fn new() -> Self {
        let config = AppConfig::from_env();
        let mongo_config = MongoConfig::from_env().expect("Document store config error");

        // One handle to the shared collection, owned here and passed to
        // every repository.
        let store = Arc::new(
            DocumentStore::connect(&mongo_config)
                .await
                .expect("Document store connection error"),
        );

        let product_repo: Arc<dyn ProductRepository> =
            Arc::new(MongoProductRepository::new(store.clone()));
        let user_repo: Arc<dyn UserRepository> = Arc::new(MongoUserRepository::new(store));

        let product_service = Arc::new(ProductServiceImpl::new(product_repo));
        let user_service = Arc::new(UserServiceImpl::new(user_repo));

        let router = Router::new()
            .merge(product_router(product_service.clone()))
            .merge(user_router(user_service.clone()))
            .route("/health", get(|| async { "OK" }));

        App {
            config,
            router,
            product_service,
            user_service,
        }
    }

    pub async fn start(self) {
        let addr = SocketAddr::new(
            self.config.host.parse().expect("Invalid host"),
            self.config.port,
        );
        info!("🚀 Server running at http://{}", addr);
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .expect("Failed to bind address");
        axum::serve(listener, self.router)
            .await
            .expect("Failed to start server");
    }
}
