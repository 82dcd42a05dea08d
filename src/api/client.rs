use std::time::Duration;

use anyhow::{Result, anyhow};
use reqwest::{Client, StatusCode};
use rust_decimal::Decimal;

use crate::api::dto::{CancelOrderResponse, PlaceOrderRequest, PlaceOrderResponse, PriceResponse};
use crate::depth::BookSnapshot;
use crate::types::{Market, OrderId, OrderType, OwnerId, Side};

/// HTTP client for the exchange API, used by the market maker and by
/// external consumers.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .pool_max_idle_per_host(100)
            .pool_idle_timeout(Some(Duration::from_secs(30)))
            .timeout(Duration::from_secs(5))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Places a limit order that rests at `price`.
    pub async fn place_limit_order(
        &self,
        owner: OwnerId,
        market: &Market,
        side: Side,
        price: Decimal,
        size: Decimal,
    ) -> Result<PlaceOrderResponse> {
        let req = PlaceOrderRequest {
            owner,
            market: market.clone(),
            side,
            order_type: OrderType::Limit,
            price: Some(price),
            size,
        };
        self.place_order(&req).await
    }

    /// Places a market order executing against resting liquidity.
    pub async fn place_market_order(
        &self,
        owner: OwnerId,
        market: &Market,
        side: Side,
        size: Decimal,
    ) -> Result<PlaceOrderResponse> {
        let req = PlaceOrderRequest {
            owner,
            market: market.clone(),
            side,
            order_type: OrderType::Market,
            price: None,
            size,
        };
        self.place_order(&req).await
    }

    async fn place_order(&self, req: &PlaceOrderRequest) -> Result<PlaceOrderResponse> {
        let url = format!("{}/order", self.base_url);
        let resp = self.client.post(&url).json(req).send().await?;

        match resp.status() {
            StatusCode::CREATED => Ok(resp.json().await?),
            status => {
                let body = resp.text().await.unwrap_or_default();
                Err(anyhow!("failed to place order: {} - {}", status, body))
            }
        }
    }

    /// Cancels a resting order.
    pub async fn cancel_order(
        &self,
        order_id: OrderId,
        market: &Market,
    ) -> Result<CancelOrderResponse> {
        let url = format!("{}/order/{}", self.base_url, order_id);
        let resp = self
            .client
            .delete(&url)
            .query(&[("market", market.as_str())])
            .send()
            .await?;

        match resp.status() {
            StatusCode::OK => Ok(resp.json().await?),
            status => {
                let body = resp.text().await.unwrap_or_default();
                Err(anyhow!("failed to cancel order: {} - {}", status, body))
            }
        }
    }

    /// Fetches a snapshot of the market's book.
    pub async fn get_book(&self, market: &Market) -> Result<BookSnapshot> {
        let url = format!("{}/book/{}", self.base_url, market);
        let resp = self.client.get(&url).send().await?;

        match resp.status() {
            StatusCode::OK => Ok(resp.json().await?),
            status => {
                let body = resp.text().await.unwrap_or_default();
                Err(anyhow!("failed to get book: {} - {}", status, body))
            }
        }
    }

    /// Best bid price, or None if the bid side is empty.
    pub async fn best_bid(&self, market: &Market) -> Result<Option<Decimal>> {
        self.best(market, "best-bid").await
    }

    /// Best ask price, or None if the ask side is empty.
    pub async fn best_ask(&self, market: &Market) -> Result<Option<Decimal>> {
        self.best(market, "best-ask").await
    }

    async fn best(&self, market: &Market, endpoint: &str) -> Result<Option<Decimal>> {
        let url = format!("{}/book/{}/{}", self.base_url, market, endpoint);
        let resp = self.client.get(&url).send().await?;

        match resp.status() {
            StatusCode::OK => {
                let price: PriceResponse = resp.json().await?;
                Ok(Some(price.price))
            }
            StatusCode::NOT_FOUND => Ok(None),
            status => {
                let body = resp.text().await.unwrap_or_default();
                Err(anyhow!("failed to get {}: {} - {}", endpoint, status, body))
            }
        }
    }
}
