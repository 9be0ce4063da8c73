//! reqwest-backed catalog client

use std::collections::HashSet;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use shared::models::Artwork;

use super::{CatalogClient, CatalogError};
use crate::config::{CatalogConfig, MAX_PAGE_SIZE};

/// Longest upstream error body kept in a [`CatalogError::Rejected`]
const MAX_ERROR_BODY: usize = 256;

/// HTTP client for the artwork service
#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    client: Client,
    base_url: String,
    page_size: usize,
}

impl HttpCatalogClient {
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            page_size: config.page_size.clamp(1, MAX_PAGE_SIZE),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, CatalogError> {
        let response = Self::check_status(req.send().await?).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| CatalogError::Decode(e.to_string()))
    }

    /// Map non-success statuses to errors and hand back the response otherwise
    async fn check_status(response: Response) -> Result<Response, CatalogError> {
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound);
        }
        if !status.is_success() {
            let mut body = response.text().await.unwrap_or_default();
            if body.len() > MAX_ERROR_BODY {
                let cut = (0..=MAX_ERROR_BODY)
                    .rev()
                    .find(|i| body.is_char_boundary(*i))
                    .unwrap_or(0);
                body.truncate(cut);
            }
            return Err(CatalogError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl CatalogClient for HttpCatalogClient {
    async fn get_artwork(&self, token: &str, art_id: i64) -> Result<Artwork, CatalogError> {
        let req = self
            .client
            .get(self.url(&format!("artworks/{art_id}")))
            .bearer_auth(token);
        self.send(req).await
    }

    async fn mark_sold(&self, token: &str, art_id: i64) -> Result<(), CatalogError> {
        let response = self
            .client
            .post(self.url(&format!("artworks/{art_id}/mark_sold")))
            .bearer_auth(token)
            .send()
            .await?;
        // The artwork is reserved once a success status comes back, whatever
        // the body says.
        Self::check_status(response).await?;
        Ok(())
    }

    async fn list_artworks(&self, token: &str) -> Result<Vec<Artwork>, CatalogError> {
        let mut all = Vec::new();
        let mut seen = HashSet::new();
        let mut skip = 0usize;

        loop {
            let req = self
                .client
                .get(self.url("artworks"))
                .query(&[("skip", skip), ("limit", self.page_size)])
                .bearer_auth(token);
            let page: Vec<Artwork> = self.send(req).await?;
            let page_len = page.len();

            let before = all.len();
            for artwork in page {
                if seen.insert(artwork.id) {
                    all.push(artwork);
                }
            }

            // A short page ends the listing; a page with nothing new means the
            // server ignores paging and already gave us everything.
            if page_len < self.page_size || all.len() == before {
                break;
            }
            skip += page_len;
        }

        tracing::debug!(count = all.len(), "fetched artwork listing");
        Ok(all)
    }
}
