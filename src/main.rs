use std::sync::Arc;

use matchbook::settlement::to_base_units;
use matchbook::{Api, Config, Exchange, Ledger, Settler};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt::init();

    let config = Config::from_env();

    let ledger = Arc::new(Ledger::new());
    for &(owner, balance) in &config.seed_accounts {
        match to_base_units(balance, config.settlement_decimals) {
            Some(units) => {
                ledger.open_account(owner, units);
                info!(owner, %balance, "seeded account");
            }
            None => warn!(owner, %balance, "seed balance not representable, skipped"),
        }
    }

    let exchange = Arc::new(Exchange::new(config.markets.clone()));
    let settler = Arc::new(Settler::new(ledger, config.settlement_decimals));

    info!(markets = ?config.markets, "exchange ready");

    let api = Api::new(config.listen_addr, exchange, settler);
    api.serve().await
}
