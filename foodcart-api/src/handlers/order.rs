use axum::{
    Router,
    extract::State,
    response::Json,
    routing::{get, post},
};
use foodcart_catalog::intake::{self, IntakeError};
use serde_json::Value;
use tracing::instrument;

use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath};
use crate::models::*;

use super::{AppState, with_store};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/order/", post(register_order))
        .route("/api/order/{id}", get(get_order))
}

#[utoipa::path(
    post,
    path = "/api/order/",
    request_body = RegisterOrderRequest,
    responses(
        (status = 200, description = "Order registered; the submitted payload is echoed back with the new order `id`", body = RegisterOrderResponse),
        (status = 404, description = "A product does not exist", body = ApiErrorResponse),
        (status = 406, description = "Payload rejected", body = ApiErrorResponse),
        (status = 500, description = "Internal server error", body = ApiErrorResponse),
    ),
    tag = "orders"
)]
#[instrument(skip(state))]
pub async fn register_order(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<Value>,
) -> Result<Json<Value>, ApiError> {
    let (mut payload, order_id) = with_store(&state, move |store| {
        let (order, _) = intake::register_order(store, &payload)?;
        Ok::<_, IntakeError>((payload, order.id))
    })
    .await?;

    // Only objects get past intake.
    if let Some(fields) = payload.as_object_mut() {
        fields.insert("id".to_string(), Value::from(order_id));
    }
    Ok(Json(payload))
}

#[utoipa::path(
    get,
    path = "/api/order/{id}",
    responses(
        (status = 200, description = "Order with its line items", body = OrderResponse),
        (status = 404, description = "Order not found", body = ApiErrorResponse),
        (status = 500, description = "Internal server error", body = ApiErrorResponse),
    ),
    params(
        ("id" = i32, Path, description = "Order ID")
    ),
    tag = "orders"
)]
#[instrument(skip(state))]
pub async fn get_order(
    State(state): State<AppState>,
    ApiPath(order_id): ApiPath<i32>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order = with_store(&state, move |store| store.get_order(order_id)).await?;
    Ok(Json(OrderResponse::from(order)))
}
