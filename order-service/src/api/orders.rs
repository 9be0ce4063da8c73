//! Order routes

use axum::Json;
use axum::extract::{Path, Query, State};
use http::StatusCode;
use serde::Deserialize;
use shared::models::{Order, OrderCreate};

use crate::auth::Caller;
use crate::db::Page;
use crate::error::OrderResult;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

/// POST /orders
pub async fn create_order(
    State(state): State<AppState>,
    caller: Caller,
    Json(req): Json<OrderCreate>,
) -> OrderResult<(StatusCode, Json<Order>)> {
    let order = state.workflow.place_order(&caller, req.art_id).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// GET /orders
pub async fn list_orders(
    State(state): State<AppState>,
    caller: Caller,
    Query(query): Query<ListQuery>,
) -> OrderResult<Json<Vec<Order>>> {
    let page = Page::new(query.skip, query.limit);
    let orders = state.query.list_orders(&caller, page).await?;
    Ok(Json(orders))
}

/// GET /orders/{order_id}
pub async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<i64>,
) -> OrderResult<Json<Order>> {
    let order = state.query.get_order(order_id).await?;
    Ok(Json(order))
}
