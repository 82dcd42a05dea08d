//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// Settlement of matched trades: moving value from each ask owner to each bid
// owner, in match order, sized by the filled quantity converted into the
// settlement asset's smallest unit.
//
// Settlement runs strictly after the book mutation has committed and the book
// lock has been released. The book is the source of truth for whether a trade
// happened; a failed transfer is reported and never rolls the book back.
//
// | Component           | Description                                                      |
// |---------------------|------------------------------------------------------------------|
// | SettlementBackend   | Trait over the value-moving backend                              |
// | Ledger              | In-memory backend with per-owner balances in base units          |
// | Settler             | Consumes a match sequence and drives transfers                   |
//--------------------------------------------------------------------------------------------------

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use thiserror::Error;
use tracing::{info, warn};

use crate::exchange::Exchange;
use crate::types::{Match, OwnerId};

/// Number of base units per whole unit of the settlement asset.
pub const DEFAULT_DECIMALS: u32 = 18;

/// Errors raised while settling a match.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SettlementError {
    /// No account exists for the owner.
    #[error("no account for owner {0}")]
    UnknownAccount(OwnerId),

    /// The paying account does not hold the transfer amount.
    #[error("owner {owner} holds {balance} base units, needs {required}")]
    InsufficientFunds {
        owner: OwnerId,
        balance: u128,
        required: u128,
    },

    /// The order could not be attributed to an owner.
    #[error("no owner recorded for order {0}")]
    UnattributedOrder(u64),

    /// The filled size does not convert to a base-unit amount.
    #[error("size {0} is not representable in base units")]
    UnrepresentableAmount(Decimal),
}

/// Type alias for Result with SettlementError.
pub type SettlementResult<T> = Result<T, SettlementError>;

/// Converts a decimal quantity into the settlement asset's smallest unit,
/// truncating any precision beyond `decimals` places.
pub fn to_base_units(size: Decimal, decimals: u32) -> Option<u128> {
    let scale = Decimal::from_u128(10u128.checked_pow(decimals)?)?;
    let scaled = size.checked_mul(scale)?;
    if scaled.is_sign_negative() {
        return None;
    }
    scaled.trunc().to_u128()
}

/// A backend capable of moving value between two owners.
#[async_trait]
pub trait SettlementBackend: Send + Sync {
    /// Moves `amount` base units from `from` to `to`.
    async fn transfer(&self, from: OwnerId, to: OwnerId, amount: u128) -> SettlementResult<()>;
}

/// In-memory settlement backend holding per-owner balances in base units.
#[derive(Debug, Default)]
pub struct Ledger {
    accounts: RwLock<HashMap<OwnerId, u128>>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens (or tops up) an account with a starting balance in base units.
    pub fn open_account(&self, owner: OwnerId, balance: u128) {
        *self.accounts.write().entry(owner).or_insert(0) += balance;
    }

    /// Current balance of an owner, if an account exists.
    pub fn balance(&self, owner: OwnerId) -> Option<u128> {
        self.accounts.read().get(&owner).copied()
    }
}

#[async_trait]
impl SettlementBackend for Ledger {
    async fn transfer(&self, from: OwnerId, to: OwnerId, amount: u128) -> SettlementResult<()> {
        let mut accounts = self.accounts.write();
        let balance = *accounts
            .get(&from)
            .ok_or(SettlementError::UnknownAccount(from))?;
        if !accounts.contains_key(&to) {
            return Err(SettlementError::UnknownAccount(to));
        }
        if balance < amount {
            return Err(SettlementError::InsufficientFunds {
                owner: from,
                balance,
                required: amount,
            });
        }
        if let Some(b) = accounts.get_mut(&from) {
            *b -= amount;
        }
        if let Some(b) = accounts.get_mut(&to) {
            *b += amount;
        }
        Ok(())
    }
}

/// Outcome of settling one match sequence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettlementReport {
    /// Matches whose transfer completed.
    pub settled: usize,
    /// Matches whose transfer failed and was skipped.
    pub failed: usize,
}

/// Drives settlement of match sequences against a backend.
pub struct Settler {
    backend: Arc<dyn SettlementBackend>,
    decimals: u32,
}

impl Settler {
    pub fn new(backend: Arc<dyn SettlementBackend>, decimals: u32) -> Self {
        Self { backend, decimals }
    }

    /// Settles a match sequence in order: value moves from each ask owner to
    /// each bid owner, sized by `size_filled` in base units. Failures are
    /// logged and skipped; the remaining matches are still attempted.
    pub async fn settle(&self, exchange: &Exchange, matches: &[Match]) -> SettlementReport {
        let mut report = SettlementReport::default();
        for m in matches {
            match self.settle_one(exchange, m).await {
                Ok(()) => report.settled += 1,
                Err(err) => {
                    warn!(ask = m.ask, bid = m.bid, %err, "settlement failed for match");
                    report.failed += 1;
                }
            }
        }
        if report.settled > 0 {
            info!(
                settled = report.settled,
                failed = report.failed,
                "settled match sequence"
            );
        }
        report
    }

    async fn settle_one(&self, exchange: &Exchange, m: &Match) -> SettlementResult<()> {
        let from = exchange
            .owner_of(m.ask)
            .ok_or(SettlementError::UnattributedOrder(m.ask))?;
        let to = exchange
            .owner_of(m.bid)
            .ok_or(SettlementError::UnattributedOrder(m.bid))?;
        let amount = to_base_units(m.size_filled, self.decimals)
            .ok_or(SettlementError::UnrepresentableAmount(m.size_filled))?;
        self.backend.transfer(from, to, amount).await
    }
}
