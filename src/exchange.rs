//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// The exchange layer: one order book per configured market, each behind its
// own single-writer lock, plus order-to-owner attribution so settlement can
// resolve the parties of a match after filled orders have left the book.
//
// Matching never suspends and performs no I/O, so each book's lock is held
// for the whole mutation. Independent markets share no state and run in
// parallel. Settlement consumes the returned match sequence only after the
// lock has been released.
//--------------------------------------------------------------------------------------------------

use std::collections::HashMap;
use std::sync::Arc;

use rust_decimal::Decimal;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::info;

use crate::depth::BookSnapshot;
use crate::orderbook::{OrderBook, OrderBookError};
use crate::types::{Market, Match, Order, OrderId, OwnerId, Side};

/// Errors raised by the exchange layer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExchangeError {
    /// The requested market has no order book.
    #[error("unknown market: {0}")]
    UnknownMarket(Market),

    /// An error from the market's order book.
    #[error(transparent)]
    Book(#[from] OrderBookError),
}

/// Type alias for Result with ExchangeError.
pub type ExchangeResult<T> = Result<T, ExchangeError>;

/// Routes orders, cancellations and queries to per-market order books.
pub struct Exchange {
    books: HashMap<Market, Arc<RwLock<OrderBook>>>,
    /// Order id -> submitting owner, recorded at placement. Filled orders
    /// are removed from the book but settlement still needs their owner.
    owners: parking_lot::RwLock<HashMap<OrderId, OwnerId>>,
}

impl Exchange {
    /// Creates an exchange with one empty order book per market.
    pub fn new(markets: impl IntoIterator<Item = Market>) -> Self {
        let books = markets
            .into_iter()
            .map(|market| {
                let book = OrderBook::new(market.clone());
                (market, Arc::new(RwLock::new(book)))
            })
            .collect();
        Self {
            books,
            owners: parking_lot::RwLock::new(HashMap::new()),
        }
    }

    fn book(&self, market: &Market) -> ExchangeResult<&Arc<RwLock<OrderBook>>> {
        self.books
            .get(market)
            .ok_or_else(|| ExchangeError::UnknownMarket(market.clone()))
    }

    /// The markets this exchange serves.
    pub fn markets(&self) -> Vec<Market> {
        self.books.keys().cloned().collect()
    }

    /// Places a limit order, which always rests at its price.
    pub async fn place_limit_order(
        &self,
        market: &Market,
        price: Decimal,
        order: Order,
    ) -> ExchangeResult<OrderId> {
        let book = self.book(market)?;
        let id = order.id;
        self.owners.write().insert(id, order.owner);

        info!(
            %market,
            side = ?order.side,
            %price,
            size = %order.size,
            order_id = id,
            "new limit order"
        );
        book.write().await.place_limit(price, order);
        Ok(id)
    }

    /// Executes a market order against the market's book. Returns the order
    /// (with any unfilled remainder, which has been discarded, not rested)
    /// and the ordered match sequence for settlement.
    pub async fn place_market_order(
        &self,
        market: &Market,
        mut order: Order,
    ) -> ExchangeResult<(Order, Vec<Match>)> {
        let book = self.book(market)?;
        self.owners.write().insert(order.id, order.owner);

        let matches = book.write().await.place_market(&mut order);

        let filled: Decimal = matches.iter().map(|m| m.size_filled).sum();
        if filled > Decimal::ZERO {
            let notional: Decimal = matches.iter().map(|m| m.price * m.size_filled).sum();
            info!(
                %market,
                side = ?order.side,
                order_id = order.id,
                %filled,
                avg_price = %(notional / filled),
                "filled market order"
            );
        } else {
            info!(%market, side = ?order.side, order_id = order.id, "market order found no liquidity");
        }
        Ok((order, matches))
    }

    /// Cancels a resting order in the market's book.
    pub async fn cancel_order(&self, market: &Market, id: OrderId) -> ExchangeResult<Order> {
        let book = self.book(market)?;
        let order = book.write().await.cancel(id)?;
        self.owners.write().remove(&id);
        info!(%market, order_id = id, "order cancelled");
        Ok(order)
    }

    /// Captures a consistent snapshot of the market's book.
    pub async fn snapshot(&self, market: &Market) -> ExchangeResult<BookSnapshot> {
        let book = self.book(market)?;
        let book = book.read().await;
        Ok(BookSnapshot::capture(&book))
    }

    /// The best price on one side of the market's book.
    pub async fn best(&self, market: &Market, side: Side) -> ExchangeResult<Decimal> {
        let book = self.book(market)?;
        let price = book.read().await.best(side)?;
        Ok(price)
    }

    /// The total resting volume on one side of the market's book.
    pub async fn side_volume(&self, market: &Market, side: Side) -> ExchangeResult<Decimal> {
        let book = self.book(market)?;
        Ok(book.read().await.side_volume(side))
    }

    /// Priority-ordered (price, total volume) pairs for one side.
    pub async fn side_levels(
        &self,
        market: &Market,
        side: Side,
    ) -> ExchangeResult<Vec<(Decimal, Decimal)>> {
        let book = self.book(market)?;
        let book = book.read().await;
        Ok(book
            .levels(side)
            .map(|l| (l.price(), l.total_volume()))
            .collect())
    }

    /// Resolves the owner an order was submitted by.
    pub fn owner_of(&self, id: OrderId) -> Option<OwnerId> {
        self.owners.read().get(&id).copied()
    }
}
