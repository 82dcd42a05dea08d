//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// This module implements a limit order book for a single market.
// It maintains bid and ask orders in price-time priority (FIFO) order and
// exposes the matching walk used by market orders.
//
// | Component     | Description                                                               |
// |--------------|---------------------------------------------------------------------------|
// | OrderBook    | Main order book structure managing bids and asks                          |
// | PriceLevel   | Groups orders resting at the same price                                   |
// | FIFO Queue   | Orders within each price level are consumed first-in-first-out            |
//
//--------------------------------------------------------------------------------------------------
// FUNCTIONS
//--------------------------------------------------------------------------------------------------
// | Name                  | Description                               | Return Type             |
// |-----------------------|-------------------------------------------|------------------------|
// | place_limit           | Rests a limit order in the book           | ()                     |
// | place_market          | Executes a market order, returns fills    | Vec<Match>             |
// | cancel                | Removes a resting order by id             | Result<Order>          |
// | best                  | Best price on a side                      | Result<Decimal>        |
// | side_volume           | Total resting volume on a side            | Decimal                |
// | levels                | Priority-ordered level view               | iterator               |
//--------------------------------------------------------------------------------------------------

use std::collections::{BTreeMap, HashMap, VecDeque};

use rust_decimal::Decimal;
use thiserror::Error;

use crate::types::{Market, Match, Order, OrderId, Side};

/// Errors raised by order book operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OrderBookError {
    /// The order id is not resting in this book.
    #[error("order {0} not found")]
    OrderNotFound(OrderId),

    /// A best-price query was made against a side with no resting orders.
    #[error("no resting {0:?} orders")]
    EmptyBook(Side),

    /// The book's indexes disagree. This is a bug in the book itself and is
    /// fatal to the affected instance.
    #[error("order book inconsistency: {0}")]
    Inconsistent(String),
}

/// Type alias for Result with OrderBookError.
pub type OrderBookResult<T> = Result<T, OrderBookError>;

/// A price level: the FIFO queue of all orders resting at one exact price on
/// one side, plus a running volume total.
#[derive(Debug, Clone)]
pub struct PriceLevel {
    price: Decimal,
    orders: VecDeque<Order>,
    total_volume: Decimal,
}

impl PriceLevel {
    fn new(price: Decimal) -> Self {
        Self {
            price,
            orders: VecDeque::new(),
            total_volume: Decimal::ZERO,
        }
    }

    /// Appends an order to the tail of the queue.
    fn add(&mut self, order: Order) {
        self.total_volume += order.size;
        self.orders.push_back(order);
    }

    /// Removes an order by id, preserving the FIFO order of the remainder.
    ///
    /// Callers reach this through the book's global index, which has already
    /// verified membership; a miss here means the indexes disagree.
    fn remove(&mut self, id: OrderId) -> OrderBookResult<Order> {
        let position = self.orders.iter().position(|o| o.id == id).ok_or_else(|| {
            OrderBookError::Inconsistent(format!(
                "order {} indexed at price {} but absent from the level",
                id, self.price
            ))
        })?;
        let order = self.orders.remove(position).ok_or_else(|| {
            OrderBookError::Inconsistent(format!("level {} shrank during removal", self.price))
        })?;
        self.total_volume -= order.size;
        Ok(order)
    }

    /// Fills up to `want` against the front (earliest) order. Returns the
    /// resting order's id, the filled quantity, and the order itself if it
    /// was fully consumed and removed.
    fn fill_front(&mut self, want: Decimal) -> Option<(OrderId, Decimal, Option<Order>)> {
        let resting = self.orders.front_mut()?;
        let fill = want.min(resting.size);
        resting.size -= fill;
        let id = resting.id;
        self.total_volume -= fill;
        let consumed = if self.orders.front().is_some_and(Order::is_filled) {
            self.orders.pop_front()
        } else {
            None
        };
        Some((id, fill, consumed))
    }

    /// The exact price this level represents.
    pub fn price(&self) -> Decimal {
        self.price
    }

    /// Sum of the sizes of all orders resting at this level.
    pub fn total_volume(&self) -> Decimal {
        self.total_volume
    }

    /// Orders at this level in FIFO priority order.
    pub fn orders(&self) -> impl Iterator<Item = &Order> {
        self.orders.iter()
    }

    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

/// The order book for one market. Owns both side indexes, keyed by exact
/// price, plus a global order-id index for O(1) cancellation.
///
/// All mutating operations must be serialized by the caller; the exchange
/// layer wraps each book in a single-writer lock.
#[derive(Debug)]
pub struct OrderBook {
    market: Market,
    /// Ask levels; ascending key iteration is matching priority.
    asks: BTreeMap<Decimal, PriceLevel>,
    /// Bid levels; descending key iteration is matching priority.
    bids: BTreeMap<Decimal, PriceLevel>,
    /// Order id -> (side, resting price). An id is present here if and only
    /// if the order rests in exactly one price level.
    index: HashMap<OrderId, (Side, Decimal)>,
    ask_volume: Decimal,
    bid_volume: Decimal,
    /// Insertion sequence, the FIFO tie-break for colliding timestamps.
    next_sequence: u64,
}

impl OrderBook {
    /// Creates a new empty order book for a market.
    pub fn new(market: Market) -> Self {
        Self {
            market,
            asks: BTreeMap::new(),
            bids: BTreeMap::new(),
            index: HashMap::new(),
            ask_volume: Decimal::ZERO,
            bid_volume: Decimal::ZERO,
            next_sequence: 1,
        }
    }

    /// Rests a limit order at `price` on the side matching its `side` field.
    ///
    /// The order always rests, even if it would cross the spread; crossing
    /// limit orders are matched only by subsequent market orders.
    pub fn place_limit(&mut self, price: Decimal, mut order: Order) {
        // Zero-size orders never rest.
        if order.size <= Decimal::ZERO {
            return;
        }

        order.sequence = self.next_sequence;
        self.next_sequence += 1;

        self.index.insert(order.id, (order.side, price));
        match order.side {
            Side::Bid => self.bid_volume += order.size,
            Side::Ask => self.ask_volume += order.size,
        }

        let levels = match order.side {
            Side::Bid => &mut self.bids,
            Side::Ask => &mut self.asks,
        };
        levels
            .entry(price)
            .or_insert_with(|| PriceLevel::new(price))
            .add(order);
    }

    /// Executes a market order against the opposite side, walking levels in
    /// priority order and consuming resting orders FIFO within each level.
    ///
    /// The incoming order is never added to the book: any remainder after
    /// liquidity is exhausted is discarded. An empty opposite side yields an
    /// empty match list, not an error. Returned matches are in priority
    /// order: best price first, then FIFO within price.
    pub fn place_market(&mut self, order: &mut Order) -> Vec<Match> {
        let taker_side = order.side;
        let mut matches = Vec::new();

        while order.size > Decimal::ZERO {
            let (levels, volume) = match taker_side.opposite() {
                Side::Ask => (&mut self.asks, &mut self.ask_volume),
                Side::Bid => (&mut self.bids, &mut self.bid_volume),
            };
            // Best price: cheapest ask, richest bid.
            let best = match taker_side.opposite() {
                Side::Ask => levels.keys().next().copied(),
                Side::Bid => levels.keys().next_back().copied(),
            };
            let Some(price) = best else {
                break;
            };
            let Some(level) = levels.get_mut(&price) else {
                break;
            };

            while order.size > Decimal::ZERO {
                let Some((resting_id, fill, consumed)) = level.fill_front(order.size) else {
                    break;
                };
                order.size -= fill;
                *volume -= fill;

                let (ask, bid) = match taker_side {
                    Side::Bid => (resting_id, order.id),
                    Side::Ask => (order.id, resting_id),
                };
                matches.push(Match {
                    ask,
                    bid,
                    price,
                    size_filled: fill,
                });

                if let Some(done) = consumed {
                    self.index.remove(&done.id);
                }
            }

            if level.is_empty() {
                levels.remove(&price);
            }
        }

        matches
    }

    /// Cancels a resting order, removing it from its level, the side map and
    /// the global index. The level is deleted if it becomes empty.
    pub fn cancel(&mut self, id: OrderId) -> OrderBookResult<Order> {
        let Some(&(side, price)) = self.index.get(&id) else {
            return Err(OrderBookError::OrderNotFound(id));
        };

        let levels = match side {
            Side::Bid => &mut self.bids,
            Side::Ask => &mut self.asks,
        };
        let level = levels.get_mut(&price).ok_or_else(|| {
            OrderBookError::Inconsistent(format!("order {} indexed at missing level {}", id, price))
        })?;
        let order = level.remove(id)?;
        if level.is_empty() {
            levels.remove(&price);
        }

        match side {
            Side::Bid => self.bid_volume -= order.size,
            Side::Ask => self.ask_volume -= order.size,
        }
        self.index.remove(&id);
        Ok(order)
    }

    /// The best price on a side: highest bid or lowest ask.
    pub fn best(&self, side: Side) -> OrderBookResult<Decimal> {
        let best = match side {
            Side::Bid => self.bids.keys().next_back(),
            Side::Ask => self.asks.keys().next(),
        };
        best.copied().ok_or(OrderBookError::EmptyBook(side))
    }

    /// The total resting volume on a side, maintained incrementally.
    pub fn side_volume(&self, side: Side) -> Decimal {
        match side {
            Side::Bid => self.bid_volume,
            Side::Ask => self.ask_volume,
        }
    }

    /// Difference between the best ask and the best bid, when both exist.
    pub fn spread(&self) -> Option<Decimal> {
        match (self.best(Side::Ask), self.best(Side::Bid)) {
            (Ok(ask), Ok(bid)) => Some(ask - bid),
            _ => None,
        }
    }

    /// Ask levels in matching priority order (ascending price).
    pub fn asks(&self) -> impl Iterator<Item = &PriceLevel> {
        self.asks.values()
    }

    /// Bid levels in matching priority order (descending price).
    pub fn bids(&self) -> impl Iterator<Item = &PriceLevel> {
        self.bids.values().rev()
    }

    /// Priority-ordered read-only view of one side's levels.
    pub fn levels(&self, side: Side) -> Box<dyn Iterator<Item = &PriceLevel> + '_> {
        match side {
            Side::Ask => Box::new(self.asks()),
            Side::Bid => Box::new(self.bids()),
        }
    }

    /// Looks up a resting order by id.
    pub fn order(&self, id: OrderId) -> Option<&Order> {
        let &(side, price) = self.index.get(&id)?;
        let levels = match side {
            Side::Bid => &self.bids,
            Side::Ask => &self.asks,
        };
        levels.get(&price)?.orders().find(|o| o.id == id)
    }

    /// Number of orders currently resting in the book.
    pub fn order_count(&self) -> usize {
        self.index.len()
    }

    /// The market this book belongs to.
    pub fn market(&self) -> &Market {
        &self.market
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn book() -> OrderBook {
        OrderBook::new(Market::from("ETH"))
    }

    fn order(side: Side, size: Decimal) -> Order {
        Order::new(side, size, 1)
    }

    /// Recomputes a side's volume from its levels, for checking against the
    /// incrementally maintained total.
    fn recomputed_volume(book: &OrderBook, side: Side) -> Decimal {
        book.levels(side)
            .flat_map(|l| l.orders())
            .map(|o| o.size)
            .sum()
    }

    fn assert_side_invariants(book: &OrderBook, side: Side) {
        // No empty level is ever observable.
        assert!(book.levels(side).all(|l| l.order_count() > 0));
        // Level volume equals the sum of its orders' sizes.
        for level in book.levels(side) {
            let sum: Decimal = level.orders().map(|o| o.size).sum();
            assert_eq!(level.total_volume(), sum);
        }
        // Incremental side volume equals the recomputed sum.
        assert_eq!(book.side_volume(side), recomputed_volume(book, side));
        // Priority order: asks ascending, bids descending, no duplicates.
        let prices: Vec<Decimal> = book.levels(side).map(|l| l.price()).collect();
        for pair in prices.windows(2) {
            match side {
                Side::Ask => assert!(pair[0] < pair[1]),
                Side::Bid => assert!(pair[0] > pair[1]),
            }
        }
    }

    #[test]
    fn test_empty_book() {
        let book = book();
        assert_eq!(book.best(Side::Bid), Err(OrderBookError::EmptyBook(Side::Bid)));
        assert_eq!(book.best(Side::Ask), Err(OrderBookError::EmptyBook(Side::Ask)));
        assert_eq!(book.side_volume(Side::Bid), Decimal::ZERO);
        assert_eq!(book.side_volume(Side::Ask), Decimal::ZERO);
        assert_eq!(book.order_count(), 0);
    }

    #[test]
    fn test_place_limit_order() {
        let mut book = book();
        let sell_a = order(Side::Ask, dec!(10));
        let sell_b = order(Side::Ask, dec!(5));
        let (id_a, id_b) = (sell_a.id, sell_b.id);

        book.place_limit(dec!(10_000), sell_a);
        book.place_limit(dec!(9_000), sell_b);

        assert_eq!(book.asks().count(), 2);
        assert_eq!(book.order_count(), 2);
        assert!(book.order(id_a).is_some());
        assert!(book.order(id_b).is_some());
        assert_eq!(book.best(Side::Ask), Ok(dec!(9_000)));
        assert_side_invariants(&book, Side::Ask);
    }

    #[test]
    fn test_limit_orders_merge_at_same_price() {
        let mut book = book();
        book.place_limit(dec!(10_000), order(Side::Bid, dec!(5)));
        book.place_limit(dec!(10_000), order(Side::Bid, dec!(10)));
        book.place_limit(dec!(10_000), order(Side::Bid, dec!(25)));

        assert_eq!(book.bids().count(), 1);
        assert_eq!(book.side_volume(Side::Bid), dec!(40));
        assert_side_invariants(&book, Side::Bid);
    }

    #[test]
    fn test_zero_size_limit_order_never_rests() {
        let mut book = book();
        book.place_limit(dec!(10_000), order(Side::Bid, dec!(0)));
        assert_eq!(book.order_count(), 0);
        assert_eq!(book.bids().count(), 0);
    }

    #[test]
    fn test_place_market_order() {
        let mut book = book();
        let sell = order(Side::Ask, dec!(20));
        let sell_id = sell.id;
        book.place_limit(dec!(10_000), sell);

        let mut buy = order(Side::Bid, dec!(10));
        let buy_id = buy.id;
        let matches = book.place_market(&mut buy);

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].ask, sell_id);
        assert_eq!(matches[0].bid, buy_id);
        assert_eq!(matches[0].price, dec!(10_000));
        assert_eq!(matches[0].size_filled, dec!(10));
        assert!(buy.is_filled());

        assert_eq!(book.side_volume(Side::Ask), dec!(10));
        assert_eq!(book.asks().count(), 1);
        assert_eq!(book.bids().count(), 0);
        assert_side_invariants(&book, Side::Ask);
    }

    #[test]
    fn test_market_order_multi_fill() {
        let mut book = book();
        let buy_d = order(Side::Bid, dec!(1));
        let buy_c = order(Side::Bid, dec!(10));
        let buy_b = order(Side::Bid, dec!(8));
        let buy_a = order(Side::Bid, dec!(5));
        let (id_a, id_b, id_c, id_d) = (buy_a.id, buy_b.id, buy_c.id, buy_d.id);

        book.place_limit(dec!(5_000), buy_d);
        book.place_limit(dec!(5_000), buy_c);
        book.place_limit(dec!(9_000), buy_b);
        book.place_limit(dec!(10_000), buy_a);

        assert_eq!(book.side_volume(Side::Bid), dec!(24));
        assert_eq!(book.bids().count(), 3);

        let mut sell = order(Side::Ask, dec!(22));
        let matches = book.place_market(&mut sell);

        // Best price first, then FIFO: A(5), B(8), D(1), C(8 of 10).
        assert_eq!(matches.len(), 4);
        assert_eq!(matches[0].bid, id_a);
        assert_eq!(matches[0].size_filled, dec!(5));
        assert_eq!(matches[1].bid, id_b);
        assert_eq!(matches[1].size_filled, dec!(8));
        assert_eq!(matches[2].bid, id_d);
        assert_eq!(matches[2].size_filled, dec!(1));
        assert_eq!(matches[3].bid, id_c);
        assert_eq!(matches[3].size_filled, dec!(8));
        assert!(sell.is_filled());

        assert_eq!(book.side_volume(Side::Bid), dec!(2));
        assert_eq!(book.bids().count(), 1);
        let level = book.bids().next().unwrap();
        assert_eq!(level.price(), dec!(5_000));
        assert_eq!(level.order_count(), 1);
        let remaining = level.orders().next().unwrap();
        assert_eq!(remaining.id, id_c);
        assert_eq!(remaining.size, dec!(2));
        assert_side_invariants(&book, Side::Bid);
    }

    #[test]
    fn test_market_order_residual_discarded() {
        let mut book = book();
        book.place_limit(dec!(9_000), order(Side::Ask, dec!(4)));
        book.place_limit(dec!(10_000), order(Side::Ask, dec!(6)));

        let mut buy = order(Side::Bid, dec!(25));
        let matches = book.place_market(&mut buy);

        let filled: Decimal = matches.iter().map(|m| m.size_filled).sum();
        assert_eq!(filled, dec!(10));
        assert_eq!(buy.size, dec!(15));

        // All opposite liquidity consumed; the remainder is not resting.
        assert_eq!(book.side_volume(Side::Ask), Decimal::ZERO);
        assert_eq!(book.asks().count(), 0);
        assert_eq!(book.bids().count(), 0);
        assert_eq!(book.order_count(), 0);
    }

    #[test]
    fn test_market_order_against_empty_book() {
        let mut book = book();
        let mut buy = order(Side::Bid, dec!(3));
        let matches = book.place_market(&mut buy);

        assert!(matches.is_empty());
        assert_eq!(buy.size, dec!(3));
        assert_eq!(book.order_count(), 0);
    }

    #[test]
    fn test_fifo_within_price_level() {
        let mut book = book();
        let first = order(Side::Ask, dec!(5));
        let second = order(Side::Ask, dec!(5));
        let (first_id, second_id) = (first.id, second.id);
        book.place_limit(dec!(10_000), first);
        book.place_limit(dec!(10_000), second);

        // The earlier order is fully consumed before the later one is touched.
        let mut buy = order(Side::Bid, dec!(7));
        let matches = book.place_market(&mut buy);

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].ask, first_id);
        assert_eq!(matches[0].size_filled, dec!(5));
        assert_eq!(matches[1].ask, second_id);
        assert_eq!(matches[1].size_filled, dec!(2));
        assert!(book.order(first_id).is_none());
        assert_eq!(book.order(second_id).unwrap().size, dec!(3));
    }

    #[test]
    fn test_price_priority_across_levels() {
        let mut book = book();
        let cheap = order(Side::Ask, dec!(5));
        let rich = order(Side::Ask, dec!(5));
        let (cheap_id, rich_id) = (cheap.id, rich.id);
        book.place_limit(dec!(11_000), rich);
        book.place_limit(dec!(9_000), cheap);

        let mut buy = order(Side::Bid, dec!(6));
        let matches = book.place_market(&mut buy);

        // The best-priced level is fully consumed before the next-best.
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].ask, cheap_id);
        assert_eq!(matches[0].price, dec!(9_000));
        assert_eq!(matches[0].size_filled, dec!(5));
        assert_eq!(matches[1].ask, rich_id);
        assert_eq!(matches[1].price, dec!(11_000));
        assert_eq!(matches[1].size_filled, dec!(1));
    }

    #[test]
    fn test_cancel_order() {
        let mut book = book();
        let buy_d = order(Side::Bid, dec!(1));
        let buy_c = order(Side::Bid, dec!(10));
        let buy_b = order(Side::Bid, dec!(8));
        let buy_a = order(Side::Bid, dec!(5));
        let id_b = buy_b.id;

        book.place_limit(dec!(5_000), buy_d);
        book.place_limit(dec!(5_000), buy_c);
        book.place_limit(dec!(9_000), buy_b);
        book.place_limit(dec!(10_000), buy_a);

        assert_eq!(book.bids().count(), 3);
        assert_eq!(book.side_volume(Side::Bid), dec!(24));
        assert_eq!(book.order_count(), 4);

        let cancelled = book.cancel(id_b).unwrap();
        assert_eq!(cancelled.id, id_b);
        assert_eq!(cancelled.size, dec!(8));

        assert_eq!(book.bids().count(), 2);
        assert_eq!(book.side_volume(Side::Bid), dec!(16));
        assert_eq!(book.order_count(), 3);
        assert!(book.order(id_b).is_none());
        assert!(book.levels(Side::Bid).all(|l| l.price() != dec!(9_000)));
        assert_side_invariants(&book, Side::Bid);
    }

    #[test]
    fn test_cancel_sole_occupant_removes_level() {
        let mut book = book();
        let sell = order(Side::Ask, dec!(5));
        let id = sell.id;
        book.place_limit(dec!(10_000), sell);

        assert_eq!(book.asks().count(), 1);
        assert_eq!(book.side_volume(Side::Ask), dec!(5));

        book.cancel(id).unwrap();

        assert_eq!(book.asks().count(), 0);
        assert_eq!(book.side_volume(Side::Ask), Decimal::ZERO);
        assert_eq!(book.order_count(), 0);
        assert!(book.order(id).is_none());
    }

    #[test]
    fn test_cancel_unknown_order() {
        let mut book = book();
        book.place_limit(dec!(10_000), order(Side::Bid, dec!(5)));
        let before = book.side_volume(Side::Bid);

        let result = book.cancel(424242);
        assert_eq!(result, Err(OrderBookError::OrderNotFound(424242)));

        // Book state unchanged.
        assert_eq!(book.side_volume(Side::Bid), before);
        assert_eq!(book.order_count(), 1);
    }

    #[test]
    fn test_limit_order_rests_even_when_crossing() {
        let mut book = book();
        book.place_limit(dec!(9_000), order(Side::Ask, dec!(5)));
        // A bid above the best ask still rests; limit orders never match on
        // entry in this book.
        book.place_limit(dec!(10_000), order(Side::Bid, dec!(5)));

        assert_eq!(book.asks().count(), 1);
        assert_eq!(book.bids().count(), 1);
        assert_eq!(book.best(Side::Ask), Ok(dec!(9_000)));
        assert_eq!(book.best(Side::Bid), Ok(dec!(10_000)));
    }

    #[test]
    fn test_partial_fill_keeps_order_resting() {
        let mut book = book();
        let sell = order(Side::Ask, dec!(10));
        let id = sell.id;
        book.place_limit(dec!(10_000), sell);

        let mut buy = order(Side::Bid, dec!(4));
        book.place_market(&mut buy);

        let resting = book.order(id).unwrap();
        assert_eq!(resting.size, dec!(6));
        assert_eq!(book.side_volume(Side::Ask), dec!(6));
        assert_side_invariants(&book, Side::Ask);
    }

    #[test]
    fn test_cancel_after_partial_fill_releases_remaining_size() {
        let mut book = book();
        let sell = order(Side::Ask, dec!(10));
        let id = sell.id;
        book.place_limit(dec!(10_000), sell);

        let mut buy = order(Side::Bid, dec!(4));
        book.place_market(&mut buy);

        let cancelled = book.cancel(id).unwrap();
        assert_eq!(cancelled.size, dec!(6));
        assert_eq!(book.side_volume(Side::Ask), Decimal::ZERO);
        assert_eq!(book.asks().count(), 0);
    }

    #[test]
    fn test_volume_invariant_over_mixed_mutations() {
        let mut book = book();
        let mut cancel_ids = Vec::new();

        for i in 0..20u32 {
            let price = dec!(9_000) + Decimal::from(i % 5) * dec!(100);
            let bid = order(Side::Bid, Decimal::from(i % 7 + 1));
            if i % 3 == 0 {
                cancel_ids.push(bid.id);
            }
            book.place_limit(price, bid);

            let price = dec!(10_000) + Decimal::from(i % 4) * dec!(100);
            book.place_limit(price, order(Side::Ask, Decimal::from(i % 5 + 1)));
        }
        for id in cancel_ids {
            book.cancel(id).unwrap();
        }
        let mut sell = order(Side::Ask, dec!(13));
        book.place_market(&mut sell);
        let mut buy = order(Side::Bid, dec!(9));
        book.place_market(&mut buy);

        assert_side_invariants(&book, Side::Bid);
        assert_side_invariants(&book, Side::Ask);
    }

    #[test]
    fn test_level_remove_preserves_fifo() {
        let mut book = book();
        let a = order(Side::Bid, dec!(5));
        let b = order(Side::Bid, dec!(10));
        let c = order(Side::Bid, dec!(25));
        let (id_a, id_b, id_c) = (a.id, b.id, c.id);

        book.place_limit(dec!(10_000), a);
        book.place_limit(dec!(10_000), b);
        book.place_limit(dec!(10_000), c);
        book.cancel(id_b).unwrap();

        let level = book.bids().next().unwrap();
        let remaining: Vec<OrderId> = level.orders().map(|o| o.id).collect();
        assert_eq!(remaining, vec![id_a, id_c]);
        assert_eq!(level.total_volume(), dec!(30));
    }
}
