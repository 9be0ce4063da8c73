//! In-memory artwork store

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use shared::models::{Artwork, ArtworkCreate};
use tokio::sync::RwLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkSoldError {
    NotFound,
    AlreadySold,
}

#[derive(Default)]
pub struct ArtworkStore {
    artworks: RwLock<BTreeMap<i64, Artwork>>,
    reserve_calls: AtomicUsize,
}

impl ArtworkStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store with the demo artworks owned by `artist1`
    pub fn seeded() -> Self {
        let seed = [
            (1, "Sunset", "A warm sunset over the sea", 100.0),
            (2, "Cityscape", "City lights at night", 250.0),
        ];
        let artworks = seed
            .into_iter()
            .map(|(id, title, description, price)| {
                let artwork = Artwork {
                    id,
                    title: title.to_string(),
                    description: Some(description.to_string()),
                    price,
                    owner: "artist1".to_string(),
                    is_sold: false,
                };
                (id, artwork)
            })
            .collect();

        Self {
            artworks: RwLock::new(artworks),
            reserve_calls: AtomicUsize::new(0),
        }
    }

    pub async fn insert(&self, req: ArtworkCreate, owner: &str) -> Artwork {
        let mut artworks = self.artworks.write().await;
        let id = artworks.keys().next_back().map_or(1, |last| last + 1);
        let artwork = Artwork {
            id,
            title: req.title,
            description: req.description,
            price: req.price,
            owner: owner.to_string(),
            is_sold: false,
        };
        artworks.insert(id, artwork.clone());
        artwork
    }

    /// Insert or replace an artwork with a fixed id
    pub async fn put(&self, artwork: Artwork) {
        self.artworks.write().await.insert(artwork.id, artwork);
    }

    pub async fn get(&self, id: i64) -> Option<Artwork> {
        self.artworks.read().await.get(&id).cloned()
    }

    pub async fn list(&self, skip: usize, limit: usize) -> Vec<Artwork> {
        self.artworks
            .read()
            .await
            .values()
            .skip(skip)
            .take(limit)
            .cloned()
            .collect()
    }

    /// Flip `is_sold` from false to true. The check and the write happen under
    /// one write lock, so concurrent calls for one artwork succeed at most once.
    pub async fn mark_sold(&self, id: i64) -> Result<Artwork, MarkSoldError> {
        self.reserve_calls.fetch_add(1, Ordering::SeqCst);
        let mut artworks = self.artworks.write().await;
        let artwork = artworks.get_mut(&id).ok_or(MarkSoldError::NotFound)?;
        if artwork.is_sold {
            return Err(MarkSoldError::AlreadySold);
        }
        artwork.is_sold = true;
        Ok(artwork.clone())
    }

    /// Number of `mark_sold` attempts seen so far
    pub fn reserve_calls(&self) -> usize {
        self.reserve_calls.load(Ordering::SeqCst)
    }
}
