pub mod api;
pub mod config;
pub mod depth;
pub mod exchange;
pub mod orderbook;
pub mod settlement;
pub mod types;

// Re-export key types for easier usage
pub use api::Api;
pub use config::Config;
pub use depth::{BookEntry, BookSnapshot};
pub use exchange::{Exchange, ExchangeError};
pub use orderbook::{OrderBook, OrderBookError, PriceLevel};
pub use settlement::{Ledger, SettlementBackend, SettlementError, Settler};
pub use types::{Market, Match, Order, OrderId, OrderType, OwnerId, Side};
