//! Application state for the order service

use std::sync::Arc;

use shared::auth::{JwtConfig, JwtService};
use sqlx::SqlitePool;

use crate::catalog::{CatalogClient, HttpCatalogClient};
use crate::config::Config;
use crate::db;
use crate::orders::{OrderQuery, OrderWorkflow};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Local order store
    pub pool: SqlitePool,
    /// Verifies inbound bearer credentials
    pub jwt: Arc<JwtService>,
    pub workflow: OrderWorkflow,
    pub query: OrderQuery,
}

impl AppState {
    /// Connect the store and build the catalog client from configuration
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let pool = db::connect(&config.database_url).await?;
        let catalog = HttpCatalogClient::new(&config.catalog)?;
        tracing::info!(
            artwork_service = %catalog.base_url(),
            timeout_secs = config.catalog.timeout.as_secs(),
            "artwork service client ready"
        );

        Ok(Self::from_parts(
            pool,
            JwtService::with_config(JwtConfig {
                secret: config.jwt_secret.clone(),
                leeway_secs: config.jwt_leeway_secs,
            }),
            Arc::new(catalog),
        ))
    }

    /// Assemble state from already-built parts
    pub fn from_parts(pool: SqlitePool, jwt: JwtService, catalog: Arc<dyn CatalogClient>) -> Self {
        Self {
            workflow: OrderWorkflow::new(Arc::clone(&catalog), pool.clone()),
            query: OrderQuery::new(catalog, pool.clone()),
            jwt: Arc::new(jwt),
            pool,
        }
    }
}
