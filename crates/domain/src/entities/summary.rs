use serde::{Deserialize, Serialize};

/// Aggregate counters returned by `GET /stats`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketSummary {
    pub users: i64,
    pub items: i64,
    pub orders: i64,
    pub buy_orders: i64,
    pub sell_orders: i64,
    pub order_volume: f64,
}
