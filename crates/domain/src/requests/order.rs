use super::fields::{self, Body};
use crate::entities::{Currency, NewOrder, OrderChanges, OrderType};
use crate::errors::DomainError;
use serde_json::Value;

pub const ITEM_KEY: &str = "item_id";
pub const TYPE_KEY: &str = "order_type";
pub const CRYPTO_KEY: &str = "crypto";
pub const PRICE_KEY: &str = "price";
pub const WALLET_KEY: &str = "wallet";

const REQUIRED: [&str; 5] = [ITEM_KEY, TYPE_KEY, CRYPTO_KEY, PRICE_KEY, WALLET_KEY];
const MAX_WALLET_LEN: usize = 128;

pub fn new_order(body: &Body) -> Result<NewOrder, DomainError> {
    fields::require_all(body, &REQUIRED)?;

    Ok(NewOrder {
        item_id: fields::required_id(body, ITEM_KEY)?,
        order_type: order_type(&body[TYPE_KEY])?,
        crypto: currency(&body[CRYPTO_KEY])?,
        price: fields::required_price(body, PRICE_KEY)?,
        wallet: wallet(&body[WALLET_KEY])?,
    })
}

pub fn order_changes(body: &Body) -> Result<OrderChanges, DomainError> {
    Ok(OrderChanges {
        item_id: fields::optional(body, ITEM_KEY)
            .map(|v| fields::positive_id(ITEM_KEY, v))
            .transpose()?,
        order_type: fields::optional(body, TYPE_KEY).map(order_type).transpose()?,
        crypto: fields::optional(body, CRYPTO_KEY).map(currency).transpose()?,
        price: fields::optional(body, PRICE_KEY)
            .map(|v| fields::price(PRICE_KEY, v))
            .transpose()?,
        wallet: fields::optional(body, WALLET_KEY).map(wallet).transpose()?,
    })
}

fn order_type(value: &Value) -> Result<OrderType, DomainError> {
    value
        .as_str()
        .and_then(|s| OrderType::parse(&s.trim().to_ascii_lowercase()))
        .ok_or_else(|| DomainError::validation("order_type must be buy or sell"))
}

fn currency(value: &Value) -> Result<Currency, DomainError> {
    value
        .as_str()
        .and_then(|s| Currency::parse(&s.trim().to_ascii_uppercase()))
        .ok_or_else(|| DomainError::validation("crypto must be ETH, BTC or SOL"))
}

fn wallet(value: &Value) -> Result<String, DomainError> {
    let wallet = fields::string(WALLET_KEY, value)?;
    if wallet.len() > MAX_WALLET_LEN {
        return Err(DomainError::validation(format!(
            "wallet must be at most {MAX_WALLET_LEN} characters"
        )));
    }
    Ok(wallet)
}
