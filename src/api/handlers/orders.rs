//! Order handlers
//!
//! These routes are tagged for HTTP logging in `routes.rs`; inside, the
//! total is computed through the call interceptor and the save is timed.

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use tracing::info;

use crate::api::server::AppState;
use crate::error::Error;
use crate::models::Order;

/// Create an order
pub async fn create_order(
    State(state): State<AppState>,
    Json(order): Json<Order>,
) -> Result<impl IntoResponse, Error> {
    let total = state
        .interceptors
        .call("compute_total()", || order.compute_total())?;

    let id = order.id;
    let store = state.orders.clone();
    state
        .interceptors
        .time_async("save_order()", async move { store.insert(order) })
        .await?;

    info!("Order {} accepted, total {} cents", id, total);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/orders/{}", id))],
        Json(json!({ "status": "ok" })),
    ))
}

/// Get a single order
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<impl IntoResponse, Error> {
    let order = state
        .interceptors
        .call("find_order()", || {
            state
                .orders
                .get(id)
                .ok_or_else(|| Error::NotFound(format!("Order with id {} not found", id)))
        })?;

    Ok(Json(order))
}
