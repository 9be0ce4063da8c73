use std::sync::Arc;
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
};
use serde::Deserialize;
use shared::auth::{JwtService, bearer_claims};
use shared::error::{AppError, AppResult};
use shared::models::{Artwork, ArtworkCreate, Role};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::store::{ArtworkStore, MarkSoldError};

/// Artificial latency per route, for exercising client timeouts
#[derive(Debug, Clone, Copy, Default)]
pub struct Latency {
    pub lookup: Duration,
    pub mark_sold: Duration,
    pub list: Duration,
}

pub struct CatalogState {
    pub store: ArtworkStore,
    pub jwt: JwtService,
    pub latency: Latency,
}

impl CatalogState {
    pub fn new(store: ArtworkStore, jwt: JwtService) -> Self {
        Self {
            store,
            jwt,
            latency: Latency::default(),
        }
    }

    pub fn with_latency(mut self, latency: Latency) -> Self {
        self.latency = latency;
        self
    }
}

async fn delay(d: Duration) {
    if !d.is_zero() {
        tokio::time::sleep(d).await;
    }
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    skip: Option<i64>,
    limit: Option<i64>,
}

async fn list_artworks(
    State(state): State<Arc<CatalogState>>,
    Query(query): Query<ListQuery>,
) -> Json<Vec<Artwork>> {
    delay(state.latency.list).await;
    let (skip, limit) = shared::util::page_bounds(query.skip, query.limit, 100, 1000);
    Json(state.store.list(skip as usize, limit as usize).await)
}

async fn get_artwork(
    State(state): State<Arc<CatalogState>>,
    Path(art_id): Path<i64>,
) -> AppResult<Json<Artwork>> {
    delay(state.latency.lookup).await;
    state
        .store
        .get(art_id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::not_found("Artwork"))
}

async fn mark_sold(
    State(state): State<Arc<CatalogState>>,
    headers: HeaderMap,
    Path(art_id): Path<i64>,
) -> AppResult<Json<Artwork>> {
    let (_, claims) = bearer_claims(&headers, &state.jwt)?;
    delay(state.latency.mark_sold).await;

    match state.store.mark_sold(art_id).await {
        Ok(artwork) => {
            tracing::info!(art_id, by = %claims.sub, "artwork marked sold");
            Ok(Json(artwork))
        }
        Err(MarkSoldError::NotFound) => Err(AppError::not_found("Artwork")),
        Err(MarkSoldError::AlreadySold) => Err(AppError::invalid_request("Artwork already sold")),
    }
}

async fn create_artwork(
    State(state): State<Arc<CatalogState>>,
    headers: HeaderMap,
    Json(req): Json<ArtworkCreate>,
) -> AppResult<(StatusCode, Json<Artwork>)> {
    let (_, claims) = bearer_claims(&headers, &state.jwt)?;
    match claims.role() {
        Role::Artist | Role::Admin => {}
        Role::User | Role::Unrecognized(_) => {
            return Err(AppError::forbidden("Only artists can create artworks"));
        }
    }

    let artwork = state.store.insert(req, &claims.sub).await;
    tracing::info!(art_id = artwork.id, owner = %artwork.owner, "artwork created");
    Ok((StatusCode::CREATED, Json(artwork)))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "catalog-mock",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub fn router(state: Arc<CatalogState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/artworks", get(list_artworks).post(create_artwork))
        .route("/artworks/{art_id}", get(get_artwork))
        .route("/artworks/{art_id}/mark_sold", post(mark_sold))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
