use std::sync::Arc;

use catalog_mock::{ArtworkStore, CatalogState, router};
use shared::auth::JwtService;
use tracing::info;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "catalog_mock=info,tower_http=info".into()),
        )
        .init();

    let port: u16 = std::env::var("HTTP_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(8000);
    let secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
        tracing::warn!("JWT_SECRET not set, using development fallback");
        "dev-JWT_SECRET-not-for-production".to_string()
    });

    let state = Arc::new(CatalogState::new(
        ArtworkStore::seeded(),
        JwtService::new(&secret),
    ));
    let app = router(state);

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("catalog-mock listening on {addr}");

    axum::serve(listener, app).await?;
    Ok(())
}
