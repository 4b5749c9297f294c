//! HTTP server assembly.

use std::sync::Arc;

use axum::Router;
use axum::http::HeaderValue;
use sea_orm::DatabaseConnection;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::auth::JwtManager;
use crate::config::AppConfig;
use crate::error::Result;
use crate::store::Stores;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: Arc<AppConfig>,
    pub jwt: Arc<JwtManager>,
    pub stores: Stores,
}

impl AppState {
    pub fn new(config: Arc<AppConfig>, db: Arc<DatabaseConnection>) -> Self {
        let jwt = Arc::new(JwtManager::new(
            &config.jwt.secret,
            config.jwt.expires_in_minutes,
        ));
        let stores = Stores::sea_orm(db.clone());
        Self {
            db,
            config,
            jwt,
            stores,
        }
    }
}

/// The API server.
pub struct ApiServer {
    config: Arc<AppConfig>,
    router: Router,
}

impl ApiServer {
    pub fn new(config: Arc<AppConfig>, db: Arc<DatabaseConnection>) -> Self {
        let state = AppState::new(config.clone(), db);
        let router = Self::create_router(state, &config);
        Self { config, router }
    }

    fn create_router(state: AppState, config: &AppConfig) -> Router {
        let api_routes = super::routes::create_routes(state);

        let mut app = Router::new()
            .nest(&config.server.api_prefix, api_routes)
            .layer(TraceLayer::new_for_http());

        if config.server.enable_cors {
            app = app.layer(Self::cors_layer(config));
        }

        app
    }

    fn cors_layer(config: &AppConfig) -> CorsLayer {
        if config.server.cors_origins.iter().any(|o| o == "*") {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<HeaderValue> = config
                .server
                .cors_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    }

    /// Binds the configured address and serves requests until the
    /// process is stopped.
    pub async fn serve(self) -> Result<()> {
        let addr = format!(
            "{}:{}",
            self.config.server.bind_address, self.config.server.port
        );
        let listener = TcpListener::bind(&addr).await?;
        info!("API server listening on {addr}");
        axum::serve(listener, self.router).await?;
        Ok(())
    }

    /// The assembled router, for in-process testing.
    pub fn into_router(self) -> Router {
        self.router
    }
}
