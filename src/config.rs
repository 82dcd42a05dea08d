use std::net::SocketAddr;

use dotenv::dotenv;
use rust_decimal::Decimal;
use std::env;

use crate::settlement::DEFAULT_DECIMALS;
use crate::types::{Market, OwnerId};

const LISTEN_ADDR: &str = "LISTEN_ADDR";
const MARKETS: &str = "MARKETS";
const SETTLEMENT_DECIMALS: &str = "SETTLEMENT_DECIMALS";
const SEED_ACCOUNTS: &str = "SEED_ACCOUNTS";

#[derive(Clone, Debug)]
pub struct Config {
    /// Address the HTTP API binds to.
    pub listen_addr: SocketAddr,
    /// Markets to open a book for at startup.
    pub markets: Vec<Market>,
    /// Decimal places of the settlement asset's smallest unit.
    pub settlement_decimals: u32,
    /// Ledger accounts seeded at startup, balances in whole units.
    pub seed_accounts: Vec<(OwnerId, Decimal)>,
}

impl Config {
    pub fn from_env() -> Config {
        match Self::try_from_env() {
            Ok(config) => config,
            Err(err) => panic!("{}", err),
        }
    }

    pub fn try_from_env() -> Result<Config, String> {
        // Load .env file if present
        dotenv().ok();

        let defaults = Config::default();

        let listen_addr = match env::var(LISTEN_ADDR) {
            Ok(raw) => raw
                .parse()
                .map_err(|_| format!("failed to parse {}: {}", LISTEN_ADDR, raw))?,
            Err(_) => defaults.listen_addr,
        };

        let markets = match env::var(MARKETS) {
            Ok(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(Market::from)
                .collect(),
            Err(_) => defaults.markets,
        };

        let settlement_decimals = match env::var(SETTLEMENT_DECIMALS) {
            Ok(raw) => raw
                .parse()
                .map_err(|_| format!("failed to parse {}: {}", SETTLEMENT_DECIMALS, raw))?,
            Err(_) => defaults.settlement_decimals,
        };

        // Comma-separated "owner:balance" pairs, e.g. "1:1000,2:500"
        let seed_accounts = match env::var(SEED_ACCOUNTS) {
            Ok(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|pair| {
                    let (owner, balance) = pair
                        .split_once(':')
                        .ok_or_else(|| format!("malformed {} entry: {}", SEED_ACCOUNTS, pair))?;
                    let owner = owner
                        .trim()
                        .parse::<OwnerId>()
                        .map_err(|_| format!("failed to parse owner id: {}", owner))?;
                    let balance = balance
                        .trim()
                        .parse::<Decimal>()
                        .map_err(|_| format!("failed to parse balance: {}", balance))?;
                    Ok((owner, balance))
                })
                .collect::<Result<Vec<_>, String>>()?,
            Err(_) => defaults.seed_accounts,
        };

        Ok(Config {
            listen_addr,
            markets,
            settlement_decimals,
            seed_accounts,
        })
    }
}

impl Default for Config {
    fn default() -> Config {
        Config {
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            markets: vec![Market::from("ETH")],
            settlement_decimals: DEFAULT_DECIMALS,
            seed_accounts: (1..=9).map(|id| (id, Decimal::from(1_000))).collect(),
        }
    }
}
