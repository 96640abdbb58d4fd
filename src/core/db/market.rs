use std::future::Future;

use serde::Serialize;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct MarketPrice {
    pub state: String,
    pub crop: String,
    pub price: f64,
    pub unit: String,
    #[serde(skip)]
    #[sqlx(skip)]
    pub(super) _guard: (),
}

#[derive(Debug, Clone)]
pub struct NewMarketPrice {
    pub state: String,
    pub crop: String,
    pub price: f64,
    pub unit: String,
}

pub trait MarketRepository {
    fn get_market_prices(&self, crop: Option<&str>) -> impl Future<Output = anyhow::Result<Vec<MarketPrice>>>;
    /// Insert today's price, replacing an earlier price recorded today.
    fn save_market_price(&self, price: &NewMarketPrice) -> impl Future<Output = anyhow::Result<MarketPrice>>;
}
