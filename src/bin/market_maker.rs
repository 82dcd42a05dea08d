//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// A simple demo market maker driving the exchange over its HTTP API.
// Each tick it re-quotes both sides around a mid price and, with some
// probability, fires a market order from a second account to generate
// fills against its own quotes.
//--------------------------------------------------------------------------------------------------

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use rand::Rng;
use rust_decimal::Decimal;
use tokio::time::sleep;
use tracing::{info, warn};

use matchbook::api::client::ApiClient;
use matchbook::types::{Market, OrderId, OwnerId, Side};

#[derive(Parser, Debug)]
#[command(name = "market_maker", about = "Quotes both sides of a market")]
struct Args {
    /// Base URL of the exchange API
    #[arg(long, default_value = "http://127.0.0.1:3000")]
    endpoint: String,

    /// Market to quote
    #[arg(long, default_value = "ETH")]
    market: String,

    /// Account the quotes are placed from
    #[arg(long, default_value_t = 8)]
    maker: OwnerId,

    /// Account the random market orders are placed from
    #[arg(long, default_value_t = 9)]
    taker: OwnerId,

    /// Mid price to quote around
    #[arg(long, default_value = "10000")]
    mid: Decimal,

    /// Distance between the bid and ask quotes
    #[arg(long, default_value = "100")]
    spread: Decimal,

    /// Quote size per side
    #[arg(long, default_value = "1")]
    size: Decimal,

    /// Milliseconds between re-quotes
    #[arg(long, default_value_t = 1000)]
    interval_ms: u64,

    /// Probability of firing a market order each tick, in percent
    #[arg(long, default_value_t = 30)]
    taker_chance: u32,
}

struct Quotes {
    bid: OrderId,
    ask: OrderId,
}

async fn requote(client: &ApiClient, market: &Market, args: &Args) -> Result<Quotes> {
    let half = args.spread / Decimal::TWO;
    let bid = client
        .place_limit_order(args.maker, market, Side::Bid, args.mid - half, args.size)
        .await?;
    let ask = client
        .place_limit_order(args.maker, market, Side::Ask, args.mid + half, args.size)
        .await?;
    Ok(Quotes {
        bid: bid.order_id,
        ask: ask.order_id,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let market = Market::from(args.market.as_str());
    let client = ApiClient::new(&args.endpoint)?;

    let mut quotes: Option<Quotes> = None;

    loop {
        // Pull stale quotes before re-quoting. A quote that was consumed by a
        // taker is already gone; a failed cancel is expected then.
        if let Some(q) = quotes.take() {
            for id in [q.bid, q.ask] {
                if let Err(err) = client.cancel_order(id, &market).await {
                    info!(order_id = id, %err, "quote already gone");
                }
            }
        }

        match requote(&client, &market, &args).await {
            Ok(q) => {
                info!(bid = q.bid, ask = q.ask, "quotes placed");
                quotes = Some(q);
            }
            Err(err) => warn!(%err, "failed to quote"),
        }

        let fire = rand::thread_rng().gen_range(0..100) < args.taker_chance;
        if fire {
            let side = if rand::thread_rng().gen_bool(0.5) {
                Side::Bid
            } else {
                Side::Ask
            };
            match client
                .place_market_order(args.taker, &market, side, args.size)
                .await
            {
                Ok(resp) => info!(
                    order_id = resp.order_id,
                    fills = resp.matches.len(),
                    ?side,
                    "market order executed"
                ),
                Err(err) => warn!(%err, "market order failed"),
            }
        }

        if let Ok(Some(best_bid)) = client.best_bid(&market).await {
            if let Ok(Some(best_ask)) = client.best_ask(&market).await {
                info!(%best_bid, %best_ask, spread = %(best_ask - best_bid), "top of book");
            }
        }

        sleep(Duration::from_millis(args.interval_ms)).await;
    }
}
