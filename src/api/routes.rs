//--------------------------------------------------------------------------------------------------
// FUNCTIONS
//--------------------------------------------------------------------------------------------------
// | Name                  | Description                            | Return Type         |
// |-----------------------|----------------------------------------|---------------------|
// | health                | Health check endpoint                  | Response            |
// | place_order           | Place a limit or market order          | ApiResult<Response> |
// | cancel_order          | Cancel a resting order                 | ApiResult<Response> |
// | get_book              | Snapshot of a market's book            | ApiResult<Response> |
// | get_bids / get_asks   | Price levels of one side               | ApiResult<Response> |
// | get_best_bid / _ask   | Best price of one side                 | ApiResult<Response> |
//--------------------------------------------------------------------------------------------------

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;

use super::{
    ApiError, ApiResult, AppState, CancelOrderResponse, LevelResponse, MatchedOrder,
    PlaceOrderRequest, PlaceOrderResponse, PriceResponse,
};
use crate::types::{Market, OrderId, OrderType, Side};

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Place a limit or market order.
pub async fn place_order(
    Extension(state): Extension<Arc<AppState>>,
    Json(req): Json<PlaceOrderRequest>,
) -> ApiResult<Response> {
    if req.size <= Decimal::ZERO {
        return Err(ApiError::BadRequest("size must be positive".to_string()));
    }

    let market = req.market.clone();
    let taker_side = req.side;

    match req.order_type {
        OrderType::Limit => {
            let Some(price) = req.price else {
                return Err(ApiError::BadRequest(
                    "limit order requires a price".to_string(),
                ));
            };
            let order = req.into_order();
            let order_id = state
                .exchange
                .place_limit_order(&market, price, order)
                .await?;

            let response = PlaceOrderResponse {
                order_id,
                message: "limit order placed".to_string(),
                matches: Vec::new(),
            };
            Ok((StatusCode::CREATED, Json(response)).into_response())
        }
        OrderType::Market => {
            let order = req.into_order();
            let (order, matches) = state.exchange.place_market_order(&market, order).await?;

            // The book mutation is committed and its lock released; transfers
            // are best-effort downstream.
            state.settler.settle(&state.exchange, &matches).await;

            let response = PlaceOrderResponse {
                order_id: order.id,
                message: "market order executed".to_string(),
                matches: matches
                    .iter()
                    .map(|m| MatchedOrder::from_match(m, taker_side))
                    .collect(),
            };
            Ok((StatusCode::CREATED, Json(response)).into_response())
        }
    }
}

/// Cancel a resting order. The market is addressed via the `market` query
/// parameter.
pub async fn cancel_order(
    Extension(state): Extension<Arc<AppState>>,
    Path(order_id): Path<OrderId>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Response> {
    let market = params
        .get("market")
        .map(|m| Market::from(m.as_str()))
        .ok_or_else(|| ApiError::BadRequest("market query parameter is required".to_string()))?;

    let order = state.exchange.cancel_order(&market, order_id).await?;

    let response = CancelOrderResponse {
        order_id: order.id,
        message: "order cancelled".to_string(),
    };
    Ok((StatusCode::OK, Json(response)).into_response())
}

/// Snapshot of a market's book.
pub async fn get_book(
    Extension(state): Extension<Arc<AppState>>,
    Path(market): Path<String>,
) -> ApiResult<Response> {
    let snapshot = state.exchange.snapshot(&Market::from(market.as_str())).await?;
    Ok((StatusCode::OK, Json(snapshot)).into_response())
}

async fn side_levels(state: &AppState, market: &str, side: Side) -> ApiResult<Response> {
    let levels = state
        .exchange
        .side_levels(&Market::from(market), side)
        .await?;
    let response: Vec<LevelResponse> = levels
        .into_iter()
        .map(|(price, total_volume)| LevelResponse {
            price,
            total_volume,
        })
        .collect();
    Ok((StatusCode::OK, Json(response)).into_response())
}

/// Bid levels, descending by price.
pub async fn get_bids(
    Extension(state): Extension<Arc<AppState>>,
    Path(market): Path<String>,
) -> ApiResult<Response> {
    side_levels(&state, &market, Side::Bid).await
}

/// Ask levels, ascending by price.
pub async fn get_asks(
    Extension(state): Extension<Arc<AppState>>,
    Path(market): Path<String>,
) -> ApiResult<Response> {
    side_levels(&state, &market, Side::Ask).await
}

async fn best_price(state: &AppState, market: &str, side: Side) -> ApiResult<Response> {
    let price = state.exchange.best(&Market::from(market), side).await?;
    Ok((StatusCode::OK, Json(PriceResponse { price })).into_response())
}

/// Best (highest) bid price.
pub async fn get_best_bid(
    Extension(state): Extension<Arc<AppState>>,
    Path(market): Path<String>,
) -> ApiResult<Response> {
    best_price(&state, &market, Side::Bid).await
}

/// Best (lowest) ask price.
pub async fn get_best_ask(
    Extension(state): Extension<Arc<AppState>>,
    Path(market): Path<String>,
) -> ApiResult<Response> {
    best_price(&state, &market, Side::Ask).await
}
