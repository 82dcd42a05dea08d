//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// Read-only snapshot of an order book, in the wire shape served by the API:
// asks ascending and bids descending by price, FIFO order within a price,
// plus per-side volume totals.
//--------------------------------------------------------------------------------------------------

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::orderbook::OrderBook;
use crate::types::{Market, Order, OrderId, Side};

/// One resting order as exposed in a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookEntry {
    /// Price of the level the order rests at.
    pub price: Decimal,
    /// Remaining size of the order.
    pub size: Decimal,
    /// Side of the order.
    pub side: Side,
    /// Creation instant of the order.
    pub timestamp: DateTime<Utc>,
    /// Order id.
    pub id: OrderId,
}

impl BookEntry {
    fn from_resting(price: Decimal, order: &Order) -> Self {
        Self {
            price,
            size: order.size,
            side: order.side,
            timestamp: order.timestamp,
            id: order.id,
        }
    }
}

/// A consistent point-in-time view of one market's book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookSnapshot {
    pub market: Market,
    /// Resting asks, ascending by price, FIFO within a price.
    pub asks: Vec<BookEntry>,
    /// Resting bids, descending by price, FIFO within a price.
    pub bids: Vec<BookEntry>,
    pub total_bid_volume: Decimal,
    pub total_ask_volume: Decimal,
}

impl BookSnapshot {
    /// Captures a snapshot of the given book. The caller must hold the
    /// book's lock for the duration of the capture.
    pub fn capture(book: &OrderBook) -> Self {
        let collect = |side: Side| -> Vec<BookEntry> {
            book.levels(side)
                .flat_map(|level| {
                    level
                        .orders()
                        .map(move |order| BookEntry::from_resting(level.price(), order))
                })
                .collect()
        };

        Self {
            market: book.market().clone(),
            asks: collect(Side::Ask),
            bids: collect(Side::Bid),
            total_bid_volume: book.side_volume(Side::Bid),
            total_ask_volume: book.side_volume(Side::Ask),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Order;
    use rust_decimal_macros::dec;

    #[test]
    fn test_snapshot_ordering_and_totals() {
        let mut book = OrderBook::new(Market::from("ETH"));
        book.place_limit(dec!(10_100), Order::new(Side::Ask, dec!(2), 1));
        book.place_limit(dec!(10_000), Order::new(Side::Ask, dec!(3), 1));
        book.place_limit(dec!(9_900), Order::new(Side::Bid, dec!(4), 2));
        book.place_limit(dec!(9_800), Order::new(Side::Bid, dec!(1), 2));
        book.place_limit(dec!(9_900), Order::new(Side::Bid, dec!(2), 3));

        let snapshot = BookSnapshot::capture(&book);

        assert_eq!(snapshot.market, Market::from("ETH"));
        let ask_prices: Vec<Decimal> = snapshot.asks.iter().map(|e| e.price).collect();
        assert_eq!(ask_prices, vec![dec!(10_000), dec!(10_100)]);
        let bid_prices: Vec<Decimal> = snapshot.bids.iter().map(|e| e.price).collect();
        assert_eq!(bid_prices, vec![dec!(9_900), dec!(9_900), dec!(9_800)]);
        // FIFO within the 9_900 level: owner 2 placed before owner 3.
        assert_eq!(snapshot.bids[0].size, dec!(4));
        assert_eq!(snapshot.bids[1].size, dec!(2));
        assert_eq!(snapshot.total_ask_volume, dec!(5));
        assert_eq!(snapshot.total_bid_volume, dec!(7));
    }

    #[test]
    fn test_snapshot_of_empty_book() {
        let book = OrderBook::new(Market::from("BTC"));
        let snapshot = BookSnapshot::capture(&book);
        assert!(snapshot.asks.is_empty());
        assert!(snapshot.bids.is_empty());
        assert_eq!(snapshot.total_bid_volume, Decimal::ZERO);
        assert_eq!(snapshot.total_ask_volume, Decimal::ZERO);
    }
}
