//! Application Startup
//!
//! Application building and server initialization.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{middleware, Router};
use sqlx::PgPool;
use tokio::net::TcpListener;

use crate::application::services::{
    AuthServiceImpl, CategoryServiceImpl, PostServiceImpl, QueryServiceImpl, ThreadServiceImpl,
};
use crate::config::{Settings, StorageBackend};
use crate::domain::{
    CategoryRepository, ContentRenderer, PostRepository, ThreadRepository, UserRepository,
};
use crate::infrastructure::database;
use crate::infrastructure::memory::InMemoryStore;
use crate::infrastructure::rendering::ComrakRenderer;
use crate::infrastructure::repositories::{
    PgCategoryRepository, PgPostRepository, PgThreadRepository, PgUserRepository,
};
use crate::presentation::http::{handlers, routes};
use crate::presentation::middleware::{cors, logging, metrics};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub threads: Arc<dyn ThreadRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub renderer: Arc<dyn ContentRenderer>,
    /// Present only with the Postgres backend
    pub db: Option<PgPool>,
    pub settings: Arc<Settings>,
}

impl AppState {
    /// State backed by PostgreSQL repositories.
    pub fn postgres(db: PgPool, settings: Settings) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(db.clone())),
            categories: Arc::new(PgCategoryRepository::new(db.clone())),
            threads: Arc::new(PgThreadRepository::new(db.clone())),
            posts: Arc::new(PgPostRepository::new(db.clone())),
            renderer: Arc::new(ComrakRenderer::new()),
            db: Some(db),
            settings: Arc::new(settings),
        }
    }

    /// State backed by a fresh in-memory store.
    pub fn in_memory(settings: Settings) -> Self {
        let store = Arc::new(InMemoryStore::new());
        Self {
            users: store.clone(),
            categories: store.clone(),
            threads: store.clone(),
            posts: store,
            renderer: Arc::new(ComrakRenderer::new()),
            db: None,
            settings: Arc::new(settings),
        }
    }

    pub fn auth_service(&self) -> AuthServiceImpl {
        AuthServiceImpl::new(self.users.clone(), self.settings.jwt.clone())
    }

    pub fn category_service(&self) -> CategoryServiceImpl {
        CategoryServiceImpl::new(self.categories.clone())
    }

    pub fn thread_service(&self) -> ThreadServiceImpl {
        ThreadServiceImpl::new(self.categories.clone(), self.threads.clone())
    }

    pub fn post_service(&self) -> PostServiceImpl {
        PostServiceImpl::new(self.threads.clone(), self.posts.clone(), self.renderer.clone())
    }

    pub fn query_service(&self) -> QueryServiceImpl {
        QueryServiceImpl::new(self.threads.clone(), self.posts.clone())
    }
}

/// Build the router with every middleware layer applied.
pub fn build_router(state: AppState) -> Router {
    let cors_layer = cors::create_cors_layer(&state.settings.cors);

    routes::create_router(state)
        .layer(middleware::from_fn(metrics::track_http_metrics))
        .layer(logging::create_trace_layer())
        .layer(cors_layer)
}

/// Application instance
pub struct Application {
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application from settings
    pub async fn build(settings: Settings) -> Result<Self> {
        handlers::health::init_server_start();

        let state = match settings.storage.backend {
            StorageBackend::Postgres => {
                let db = database::create_pool(&settings.database).await?;
                tracing::info!("Database connection pool created");

                database::run_migrations(&db).await?;
                tracing::info!("Database migrations applied");

                AppState::postgres(db, settings.clone())
            }
            StorageBackend::Memory => {
                tracing::warn!("Using the in-memory store; data is lost on shutdown");
                AppState::in_memory(settings.clone())
            }
        };

        let router = build_router(state);

        // Bind to address
        let listener = TcpListener::bind(settings.server_addr()).await?;
        tracing::info!("Listening on {}", listener.local_addr()?);

        Ok(Self { listener, router })
    }

    /// Run the server until stopped
    pub async fn run_until_stopped(self) -> Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }

    /// Get the bound address
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
