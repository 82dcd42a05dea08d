//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// This module implements the REST API over the exchange using Axum.
// It decodes place/cancel/query requests, routes them to the addressed
// market's book, triggers settlement of market-order fills, and serializes
// responses.
//
// | Component      | Description                                                |
// |----------------|-----------------------------------------------------------|
// | Api            | Server wrapper binding the router to an address            |
// | AppState       | Shared exchange and settler handles                        |
// | Routes         | Handler functions for the endpoints                        |
// | DTOs           | Wire request/response shapes                               |
//--------------------------------------------------------------------------------------------------

mod dto;
mod error;
mod routes;

pub mod client;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Extension, Router,
    http::Method,
    routing::{delete, get, post},
};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::exchange::Exchange;
use crate::settlement::Settler;

pub use dto::*;
pub use error::{ApiError, ApiResult};

/// Shared application state accessible by all handlers.
pub struct AppState {
    pub exchange: Arc<Exchange>,
    pub settler: Arc<Settler>,
}

impl AppState {
    pub fn new(exchange: Arc<Exchange>, settler: Arc<Settler>) -> Self {
        Self { exchange, settler }
    }
}

/// HTTP server for the exchange.
pub struct Api {
    addr: SocketAddr,
    state: Arc<AppState>,
}

impl Api {
    pub fn new(addr: SocketAddr, exchange: Arc<Exchange>, settler: Arc<Settler>) -> Self {
        Self {
            addr,
            state: Arc::new(AppState::new(exchange, settler)),
        }
    }

    /// Builds the router with all endpoints and shared state attached.
    pub fn routes(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::DELETE])
            .allow_headers(Any);

        Router::new()
            .route("/health", get(routes::health))
            // Order management
            .route("/order", post(routes::place_order))
            .route("/order/:id", delete(routes::cancel_order))
            // Book queries
            .route("/book/:market", get(routes::get_book))
            .route("/book/:market/bids", get(routes::get_bids))
            .route("/book/:market/asks", get(routes::get_asks))
            .route("/book/:market/best-bid", get(routes::get_best_bid))
            .route("/book/:market/best-ask", get(routes::get_best_ask))
            .layer(Extension(self.state.clone()))
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }

    /// Starts the API server and runs until shutdown.
    pub async fn serve(self) -> std::io::Result<()> {
        let app = self.routes();
        info!(addr = %self.addr, "api listening");
        let listener = TcpListener::bind(self.addr).await?;
        axum::serve(listener, app).await
    }
}
