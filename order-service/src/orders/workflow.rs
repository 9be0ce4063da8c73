//! Order placement
//!
//! Check the artwork on the catalog, reserve it there, then commit the local
//! order row. The two stores commit independently: once the reservation
//! succeeds it is never undone, so a failed local insert leaves an orphaned
//! reservation that is logged for manual reconciliation.

use std::sync::Arc;

use shared::models::{Order, OrderStatus, Role};
use sqlx::SqlitePool;

use crate::auth::Caller;
use crate::catalog::CatalogClient;
use crate::db;
use crate::error::{OrderError, OrderResult};

#[derive(Clone)]
pub struct OrderWorkflow {
    catalog: Arc<dyn CatalogClient>,
    pool: SqlitePool,
}

impl OrderWorkflow {
    pub fn new(catalog: Arc<dyn CatalogClient>, pool: SqlitePool) -> Self {
        Self { catalog, pool }
    }

    /// Place an order for `art_id` on behalf of `caller`.
    ///
    /// Concurrent calls for the same artwork are not serialized here; the
    /// catalog's `mark_sold` is the only gate.
    pub async fn place_order(&self, caller: &Caller, art_id: i64) -> OrderResult<Order> {
        match &caller.role {
            Role::User | Role::Admin => {}
            Role::Artist | Role::Unrecognized(_) => {
                tracing::info!(buyer = %caller.subject, role = %caller.role, art_id, "order refused for role");
                return Err(OrderError::Forbidden {
                    role: caller.role.clone(),
                });
            }
        }

        let artwork = self
            .catalog
            .get_artwork(&caller.token, art_id)
            .await
            .map_err(|source| {
                tracing::warn!(art_id, error = %source, retry_safe = source.is_transient(), "artwork lookup failed");
                OrderError::ArtworkNotFound { art_id, source }
            })?;

        if artwork.is_sold {
            tracing::info!(art_id, buyer = %caller.subject, "artwork already sold");
            return Err(OrderError::AlreadySold { art_id });
        }

        // Reserve and commit on a detached task: once mark_sold is on the wire
        // the local insert must still run if the client goes away.
        let catalog = Arc::clone(&self.catalog);
        let pool = self.pool.clone();
        let token = caller.token.clone();
        let buyer = caller.subject.clone();

        tokio::spawn(async move {
            reserve_and_commit(catalog.as_ref(), &pool, &token, art_id, &buyer).await
        })
        .await?
    }
}

async fn reserve_and_commit(
    catalog: &dyn CatalogClient,
    pool: &SqlitePool,
    token: &str,
    art_id: i64,
    buyer: &str,
) -> OrderResult<Order> {
    catalog.mark_sold(token, art_id).await.map_err(|source| {
        tracing::warn!(art_id, buyer, error = %source, "artwork reservation failed");
        OrderError::ReservationFailed { art_id, source }
    })?;

    match db::orders::insert(pool, art_id, buyer, OrderStatus::Confirmed).await {
        Ok(order) => {
            tracing::info!(order_id = order.id, art_id, buyer, "order confirmed");
            Ok(order)
        }
        Err(e) => {
            tracing::error!(
                orphaned_reservation = true,
                art_id,
                buyer,
                error = %e,
                "artwork reserved but order insert failed"
            );
            Err(OrderError::Storage(e))
        }
    }
}
