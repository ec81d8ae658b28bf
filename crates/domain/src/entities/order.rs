use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    Buy,
    Sell,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Buy => "buy",
            OrderType::Sell => "sell",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "buy" => Some(OrderType::Buy),
            "sell" => Some(OrderType::Sell),
            _ => None,
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settlement currencies accepted on orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Eth,
    Btc,
    Sol,
}

impl Currency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::Eth => "ETH",
            Currency::Btc => "BTC",
            Currency::Sol => "SOL",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ETH" => Some(Currency::Eth),
            "BTC" => Some(Currency::Btc),
            "SOL" => Some(Currency::Sol),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i32,
    pub item_id: Option<i32>, // cleared when the item is deleted
    pub order_type: OrderType,
    pub price: f64,
    pub crypto: Currency,
    pub wallet: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderListing {
    #[serde(flatten)]
    pub order: Order,
    pub item_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub item_id: i32,
    pub order_type: OrderType,
    pub price: f64,
    pub crypto: Currency,
    pub wallet: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderChanges {
    pub item_id: Option<i32>,
    pub order_type: Option<OrderType>,
    pub price: Option<f64>,
    pub crypto: Option<Currency>,
    pub wallet: Option<String>,
}

impl OrderChanges {
    pub fn is_empty(&self) -> bool {
        self.item_id.is_none()
            && self.order_type.is_none()
            && self.price.is_none()
            && self.crypto.is_none()
            && self.wallet.is_none()
    }
}
