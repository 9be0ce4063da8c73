//! In-memory catalog used by the engine unit tests

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use shared::models::Artwork;

use super::{CatalogClient, CatalogError};

#[derive(Default)]
pub(crate) struct StubCatalog {
    artworks: Mutex<BTreeMap<i64, Artwork>>,
    get_failure: Mutex<Option<CatalogError>>,
    reserve_failure: Mutex<Option<CatalogError>>,
    list_failure: Mutex<Option<CatalogError>>,
    pub get_calls: AtomicUsize,
    pub reserve_calls: AtomicUsize,
    pub list_calls: AtomicUsize,
    pub tokens: Mutex<Vec<String>>,
}

pub(crate) fn artwork(id: i64, owner: &str, is_sold: bool) -> Artwork {
    Artwork {
        id,
        title: format!("Artwork {id}"),
        description: None,
        price: 100.0,
        owner: owner.to_string(),
        is_sold,
    }
}

impl StubCatalog {
    pub fn with_artworks(artworks: impl IntoIterator<Item = Artwork>) -> Self {
        let stub = Self::default();
        {
            let mut map = stub.artworks.lock().unwrap();
            for a in artworks {
                map.insert(a.id, a);
            }
        }
        stub
    }

    pub fn fail_get(&self, err: CatalogError) {
        *self.get_failure.lock().unwrap() = Some(err);
    }

    pub fn fail_reserve(&self, err: CatalogError) {
        *self.reserve_failure.lock().unwrap() = Some(err);
    }

    pub fn fail_list(&self, err: CatalogError) {
        *self.list_failure.lock().unwrap() = Some(err);
    }

    pub fn is_sold(&self, id: i64) -> bool {
        self.artworks
            .lock()
            .unwrap()
            .get(&id)
            .is_some_and(|a| a.is_sold)
    }

    pub fn count(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }

    fn record(&self, counter: &AtomicUsize, token: &str) {
        counter.fetch_add(1, Ordering::SeqCst);
        self.tokens.lock().unwrap().push(token.to_string());
    }
}

#[async_trait]
impl CatalogClient for StubCatalog {
    async fn get_artwork(&self, token: &str, art_id: i64) -> Result<Artwork, CatalogError> {
        self.record(&self.get_calls, token);
        if let Some(err) = self.get_failure.lock().unwrap().clone() {
            return Err(err);
        }
        self.artworks
            .lock()
            .unwrap()
            .get(&art_id)
            .cloned()
            .ok_or(CatalogError::NotFound)
    }

    async fn mark_sold(&self, token: &str, art_id: i64) -> Result<(), CatalogError> {
        self.record(&self.reserve_calls, token);
        if let Some(err) = self.reserve_failure.lock().unwrap().clone() {
            return Err(err);
        }
        let mut map = self.artworks.lock().unwrap();
        let art = map.get_mut(&art_id).ok_or(CatalogError::NotFound)?;
        if art.is_sold {
            return Err(CatalogError::Rejected {
                status: 400,
                body: "Artwork already sold".to_string(),
            });
        }
        art.is_sold = true;
        Ok(())
    }

    async fn list_artworks(&self, token: &str) -> Result<Vec<Artwork>, CatalogError> {
        self.record(&self.list_calls, token);
        if let Some(err) = self.list_failure.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(self.artworks.lock().unwrap().values().cloned().collect())
    }
}
