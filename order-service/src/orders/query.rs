//! Order visibility
//!
//! Which orders a caller may list depends on the role. Artists see orders
//! for the artworks they own, which only the catalog knows.

use std::collections::BTreeSet;
use std::sync::Arc;

use shared::models::{Order, Role};
use sqlx::SqlitePool;

use crate::auth::Caller;
use crate::catalog::CatalogClient;
use crate::db::{self, Page};
use crate::error::{OrderError, OrderResult};

#[derive(Clone)]
pub struct OrderQuery {
    catalog: Arc<dyn CatalogClient>,
    pool: SqlitePool,
}

impl OrderQuery {
    pub fn new(catalog: Arc<dyn CatalogClient>, pool: SqlitePool) -> Self {
        Self { catalog, pool }
    }

    pub async fn list_orders(&self, caller: &Caller, page: Page) -> OrderResult<Vec<Order>> {
        let orders = match &caller.role {
            Role::User => db::orders::list_by_buyer(&self.pool, &caller.subject, page).await?,
            Role::Artist => {
                let owned = self.owned_art_ids(caller).await?;
                db::orders::list_by_art_ids(&self.pool, &owned, page).await?
            }
            Role::Admin => db::orders::list_all(&self.pool, page).await?,
            Role::Unrecognized(raw) => {
                tracing::debug!(subject = %caller.subject, role = %raw, "unrecognized role sees no orders");
                Vec::new()
            }
        };

        tracing::debug!(subject = %caller.subject, role = %caller.role, count = orders.len(), "listed orders");
        Ok(orders)
    }

    /// Any caller may fetch any order by id.
    pub async fn get_order(&self, order_id: i64) -> OrderResult<Order> {
        db::orders::find_by_id(&self.pool, order_id)
            .await?
            .ok_or(OrderError::NotFound { order_id })
    }

    async fn owned_art_ids(&self, caller: &Caller) -> OrderResult<BTreeSet<i64>> {
        let artworks = self
            .catalog
            .list_artworks(&caller.token)
            .await
            .map_err(|source| {
                tracing::warn!(subject = %caller.subject, error = %source, "artwork listing failed");
                OrderError::UpstreamUnavailable { source }
            })?;

        Ok(artworks
            .into_iter()
            .filter(|a| a.owner == caller.subject)
            .map(|a| a.id)
            .collect())
    }
}
