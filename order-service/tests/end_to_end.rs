//! Order service against a live catalog mock, both on ephemeral ports.

use std::sync::Arc;
use std::time::Duration;

use catalog_mock::{ArtworkStore, CatalogState, Latency};
use order_service::catalog::HttpCatalogClient;
use order_service::{AppState, CatalogConfig, api, db};
use reqwest::StatusCode;
use serde_json::{Value, json};
use shared::auth::JwtService;
use shared::models::Artwork;

const SECRET: &str = "end-to-end-secret";

struct Harness {
    catalog: Arc<CatalogState>,
    orders_url: String,
    http: reqwest::Client,
}

async fn serve(app: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn artwork(id: i64, owner: &str, is_sold: bool) -> Artwork {
    Artwork {
        id,
        title: format!("Piece {id}"),
        description: None,
        price: 120.0,
        owner: owner.to_string(),
        is_sold,
    }
}

async fn start_order_service(catalog_config: CatalogConfig) -> String {
    let pool = db::connect("sqlite::memory:").await.unwrap();
    let client = HttpCatalogClient::new(&catalog_config).unwrap();
    let state = AppState::from_parts(pool, JwtService::new(SECRET), Arc::new(client));
    serve(api::create_router(state)).await
}

async fn start(artworks: Vec<Artwork>, latency: Latency, timeout: Duration) -> Harness {
    let store = ArtworkStore::new();
    for a in artworks {
        store.put(a).await;
    }
    let catalog =
        Arc::new(CatalogState::new(store, JwtService::new(SECRET)).with_latency(latency));
    let catalog_url = serve(catalog_mock::router(catalog.clone())).await;

    let config = CatalogConfig::new(&catalog_url)
        .with_timeout(timeout)
        .with_page_size(1);
    let orders_url = start_order_service(config).await;

    Harness {
        catalog,
        orders_url,
        http: reqwest::Client::new(),
    }
}

async fn start_default(artworks: Vec<Artwork>) -> Harness {
    start(artworks, Latency::default(), Duration::from_secs(5)).await
}

fn token(subject: &str, role: &str) -> String {
    JwtService::new(SECRET)
        .generate_token(subject, role, chrono::Duration::minutes(5))
        .unwrap()
}

impl Harness {
    async fn place(&self, subject: &str, role: &str, art_id: i64) -> (StatusCode, Value) {
        let resp = self
            .http
            .post(format!("{}/orders", self.orders_url))
            .bearer_auth(token(subject, role))
            .json(&json!({ "art_id": art_id }))
            .send()
            .await
            .unwrap();
        let status = resp.status();
        (status, resp.json().await.unwrap())
    }

    async fn list(&self, subject: &str, role: &str) -> (StatusCode, Value) {
        let resp = self
            .http
            .get(format!("{}/orders", self.orders_url))
            .bearer_auth(token(subject, role))
            .send()
            .await
            .unwrap();
        let status = resp.status();
        (status, resp.json().await.unwrap())
    }

    async fn all_orders(&self) -> Vec<Value> {
        let (status, body) = self.list("root", "admin").await;
        assert_eq!(status, StatusCode::OK);
        body.as_array().unwrap().clone()
    }
}

#[tokio::test]
async fn user_buys_available_artwork() {
    let h = start_default(vec![artwork(7, "artist1", false)]).await;

    let (status, order) = h.place("dave", "user", 7).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(order["art_id"], 7);
    assert_eq!(order["buyer"], "dave");
    assert_eq!(order["status"], "confirmed");
    assert!(h.catalog.store.get(7).await.unwrap().is_sold);

    let id = order["id"].as_i64().unwrap();
    let fetched: Value = h
        .http
        .get(format!("{}/orders/{id}", h.orders_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched, order);
}

#[tokio::test]
async fn artist_cannot_buy() {
    let h = start_default(vec![artwork(7, "bob", false)]).await;

    let (status, body) = h.place("bob", "artist", 7).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["kind"], "forbidden");
    assert_eq!(h.catalog.store.reserve_calls(), 0);
    assert!(!h.catalog.store.get(7).await.unwrap().is_sold);
}

#[tokio::test]
async fn sold_artwork_is_not_reserved_again() {
    let h = start_default(vec![artwork(7, "artist1", true)]).await;

    let (status, body) = h.place("dave", "user", 7).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["kind"], "already_sold");
    assert_eq!(h.catalog.store.reserve_calls(), 0);
    assert!(h.all_orders().await.is_empty());
}

#[tokio::test]
async fn unknown_artwork() {
    let h = start_default(vec![artwork(7, "artist1", false)]).await;

    let (status, body) = h.place("dave", "user", 999).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "artwork_not_found");
    assert_eq!(body["details"]["upstream_status"], 404);
    assert_eq!(h.catalog.store.reserve_calls(), 0);
}

#[tokio::test]
async fn list_visibility_by_role() {
    let h = start_default(vec![
        artwork(1, "bob", false),
        artwork(2, "carol", false),
        artwork(3, "bob", false),
    ])
    .await;
    assert_eq!(h.place("alice", "user", 1).await.0, StatusCode::CREATED);
    assert_eq!(h.place("dave", "user", 2).await.0, StatusCode::CREATED);
    assert_eq!(h.place("alice", "admin", 3).await.0, StatusCode::CREATED);

    let (_, alice) = h.list("alice", "user").await;
    let alice = alice.as_array().unwrap();
    assert_eq!(alice.len(), 2);
    assert!(alice.iter().all(|o| o["buyer"] == "alice"));

    // Page size 1 forces the listing walk across three catalog pages.
    let (status, bob) = h.list("bob", "artist").await;
    assert_eq!(status, StatusCode::OK);
    let mut bob_art: Vec<i64> = bob
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["art_id"].as_i64().unwrap())
        .collect();
    bob_art.sort_unstable();
    assert_eq!(bob_art, vec![1, 3]);

    let (status, guest) = h.list("mallory", "guest").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(guest, json!([]));

    assert_eq!(h.all_orders().await.len(), 3);
}

#[tokio::test]
async fn artist_listing_surfaces_catalog_outage() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let config = CatalogConfig::new(&format!("http://127.0.0.1:{port}"))
        .with_timeout(Duration::from_secs(2));
    let orders_url = start_order_service(config).await;

    let resp = reqwest::Client::new()
        .get(format!("{orders_url}/orders"))
        .bearer_auth(token("bob", "artist"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::FAILED_DEPENDENCY);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["kind"], "upstream_unavailable");
    assert_eq!(body["details"]["retry_safe"], true);
}

#[tokio::test]
async fn slow_lookup_times_out() {
    let latency = Latency {
        lookup: Duration::from_secs(3),
        ..Latency::default()
    };
    let h = start(
        vec![artwork(7, "artist1", false)],
        latency,
        Duration::from_millis(300),
    )
    .await;

    let (status, body) = h.place("dave", "user", 7).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "artwork_not_found");
    assert_eq!(body["details"]["retry_safe"], true);
    assert_eq!(h.catalog.store.reserve_calls(), 0);
}

#[tokio::test]
async fn slow_reservation_times_out_without_order() {
    let latency = Latency {
        mark_sold: Duration::from_secs(3),
        ..Latency::default()
    };
    let h = start(
        vec![artwork(7, "artist1", false)],
        latency,
        Duration::from_millis(300),
    )
    .await;

    let (status, body) = h.place("dave", "user", 7).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "reservation_failed");
    assert!(h.all_orders().await.is_empty());
}

#[tokio::test]
async fn concurrent_purchases_confirm_once() {
    let h = start_default(vec![artwork(7, "artist1", false)]).await;

    let (a, b) = tokio::join!(h.place("dave", "user", 7), h.place("alice", "user", 7));

    let created = [&a, &b]
        .iter()
        .filter(|(status, _)| *status == StatusCode::CREATED)
        .count();
    assert_eq!(created, 1);

    // The loser either saw the artwork sold or lost the mark_sold race.
    for (status, body) in [&a, &b] {
        if *status != StatusCode::CREATED {
            assert!(
                body["kind"] == "already_sold" || body["kind"] == "reservation_failed",
                "{body}"
            );
        }
    }
    assert_eq!(h.all_orders().await.len(), 1);
}

#[tokio::test]
async fn reservation_reply_body_is_not_required() {
    use axum::routing::{get, post};

    // An artwork service that acknowledges the sale with a plain message.
    let catalog = axum::Router::new()
        .route(
            "/artworks/7",
            get(|| async { axum::Json(artwork(7, "artist1", false)) }),
        )
        .route(
            "/artworks/7/mark_sold",
            post(|| async { axum::Json(json!({ "detail": "ok" })) }),
        );
    let catalog_url = serve(catalog).await;
    let orders_url = start_order_service(CatalogConfig::new(&catalog_url)).await;
    let http = reqwest::Client::new();

    let resp = http
        .post(format!("{orders_url}/orders"))
        .bearer_auth(token("dave", "user"))
        .json(&json!({ "art_id": 7 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let order: Value = resp.json().await.unwrap();
    assert_eq!(order["status"], "confirmed");

    let stored: Value = http
        .get(format!("{orders_url}/orders"))
        .bearer_auth(token("root", "admin"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(stored.as_array().unwrap().len(), 1);
    assert_eq!(stored[0]["art_id"], 7);
}

#[tokio::test]
async fn order_is_recorded_after_client_disconnects() {
    let latency = Latency {
        mark_sold: Duration::from_millis(500),
        ..Latency::default()
    };
    let h = start(
        vec![artwork(7, "artist1", false)],
        latency,
        Duration::from_secs(5),
    )
    .await;

    // Give up while the reservation is still in flight.
    let impatient = reqwest::Client::builder()
        .timeout(Duration::from_millis(100))
        .build()
        .unwrap();
    let result = impatient
        .post(format!("{}/orders", h.orders_url))
        .bearer_auth(token("dave", "user"))
        .json(&json!({ "art_id": 7 }))
        .send()
        .await;
    assert!(result.is_err());

    let mut orders = Vec::new();
    for _ in 0..60 {
        orders = h.all_orders().await;
        if !orders.is_empty() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0]["buyer"], "dave");
    assert_eq!(orders[0]["status"], "confirmed");
    assert!(h.catalog.store.get(7).await.unwrap().is_sold);
    assert_eq!(h.catalog.store.reserve_calls(), 1);
}
