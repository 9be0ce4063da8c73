//! Order queries

use std::collections::BTreeSet;

use shared::models::{Order, OrderStatus};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use super::Page;

const COLUMNS: &str = "id, art_id, buyer, status";

pub async fn insert(
    pool: &SqlitePool,
    art_id: i64,
    buyer: &str,
    status: OrderStatus,
) -> Result<Order, sqlx::Error> {
    sqlx::query_as::<_, Order>(&format!(
        "INSERT INTO orders (art_id, buyer, status) VALUES (?, ?, ?) RETURNING {COLUMNS}"
    ))
    .bind(art_id)
    .bind(buyer)
    .bind(status)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(pool: &SqlitePool, order_id: i64) -> Result<Option<Order>, sqlx::Error> {
    sqlx::query_as::<_, Order>(&format!("SELECT {COLUMNS} FROM orders WHERE id = ?"))
        .bind(order_id)
        .fetch_optional(pool)
        .await
}

pub async fn list_all(pool: &SqlitePool, page: Page) -> Result<Vec<Order>, sqlx::Error> {
    sqlx::query_as::<_, Order>(&format!(
        "SELECT {COLUMNS} FROM orders ORDER BY id LIMIT ? OFFSET ?"
    ))
    .bind(page.limit)
    .bind(page.skip)
    .fetch_all(pool)
    .await
}

pub async fn list_by_buyer(
    pool: &SqlitePool,
    buyer: &str,
    page: Page,
) -> Result<Vec<Order>, sqlx::Error> {
    sqlx::query_as::<_, Order>(&format!(
        "SELECT {COLUMNS} FROM orders WHERE buyer = ? ORDER BY id LIMIT ? OFFSET ?"
    ))
    .bind(buyer)
    .bind(page.limit)
    .bind(page.skip)
    .fetch_all(pool)
    .await
}

/// Orders for any of the given artworks. An empty id set matches nothing.
pub async fn list_by_art_ids(
    pool: &SqlitePool,
    art_ids: &BTreeSet<i64>,
    page: Page,
) -> Result<Vec<Order>, sqlx::Error> {
    if art_ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut qb: QueryBuilder<Sqlite> =
        QueryBuilder::new(format!("SELECT {COLUMNS} FROM orders WHERE art_id IN ("));
    let mut ids = qb.separated(", ");
    for id in art_ids {
        ids.push_bind(*id);
    }
    ids.push_unseparated(") ORDER BY id LIMIT ");
    qb.push_bind(page.limit);
    qb.push(" OFFSET ");
    qb.push_bind(page.skip);

    qb.build_query_as::<Order>().fetch_all(pool).await
}
