use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::exchange::ExchangeError;
use crate::orderbook::OrderBookError;

/// Type alias for Result with ApiError.
pub type ApiResult<T> = Result<T, ApiError>;

/// API-facing error types.
#[derive(Error, Debug, Clone)]
pub enum ApiError {
    /// The requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// The request was invalid.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(json!({
            "error": {
                "message": message,
                "code": status.as_u16()
            }
        }));

        (status, body).into_response()
    }
}

impl From<ExchangeError> for ApiError {
    fn from(err: ExchangeError) -> Self {
        match err {
            ExchangeError::UnknownMarket(market) => {
                Self::NotFound(format!("market {} not found", market))
            }
            ExchangeError::Book(OrderBookError::OrderNotFound(id)) => {
                Self::NotFound(format!("order {} not found", id))
            }
            ExchangeError::Book(OrderBookError::EmptyBook(side)) => {
                Self::NotFound(format!("no resting {:?} orders", side))
            }
            ExchangeError::Book(err @ OrderBookError::Inconsistent(_)) => {
                // A book invariant broke; surface it loudly.
                error!(%err, "order book reported an inconsistency");
                Self::Internal(err.to_string())
            }
        }
    }
}
