use super::fields::{self, Body};
use super::Query;
use crate::entities::{ItemChanges, ItemFilter, NewItem};
use crate::errors::DomainError;

pub const OWNER_KEY: &str = "UID";
pub const NAME_KEY: &str = "Name";
pub const PRICE_KEY: &str = "Price";
pub const DESCRIPTION_KEY: &str = "Description";

const REQUIRED: [&str; 3] = [OWNER_KEY, NAME_KEY, PRICE_KEY];

pub const MIN_PRICE_PARAM: &str = "minPrice";
pub const MAX_PRICE_PARAM: &str = "maxPrice";

/// Price bounds from the query string. Unknown parameters are ignored.
pub fn item_filter(query: &Query) -> Result<ItemFilter, DomainError> {
    let bound = |key: &str| -> Result<Option<f64>, DomainError> {
        match query.get(key).map(|raw| raw.trim()).filter(|raw| !raw.is_empty()) {
            None => Ok(None),
            Some(raw) => raw
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .map(Some)
                .ok_or_else(|| DomainError::validation(format!("{key} must be a number"))),
        }
    };

    Ok(ItemFilter {
        min_price: bound(MIN_PRICE_PARAM)?,
        max_price: bound(MAX_PRICE_PARAM)?,
    })
}

pub fn new_item(body: &Body) -> Result<NewItem, DomainError> {
    fields::require_all(body, &REQUIRED)?;

    let owner_id = fields::required_id(body, OWNER_KEY)?;
    let name = fields::required_string(body, NAME_KEY)?;
    let price = fields::required_price(body, PRICE_KEY)?;
    let description = fields::optional(body, DESCRIPTION_KEY)
        .map(|v| fields::string(DESCRIPTION_KEY, v))
        .transpose()?;

    Ok(NewItem {
        owner_id: Some(owner_id),
        name,
        price,
        description,
    })
}

pub fn item_changes(body: &Body) -> Result<ItemChanges, DomainError> {
    let owner_id = match fields::nullable(body, OWNER_KEY) {
        Some(Some(v)) => Some(Some(fields::positive_id(OWNER_KEY, v)?)),
        Some(None) => Some(None),
        None => None,
    };
    let description = match fields::nullable(body, DESCRIPTION_KEY) {
        Some(Some(v)) => Some(Some(fields::string(DESCRIPTION_KEY, v)?)),
        Some(None) => Some(None),
        None => None,
    };

    Ok(ItemChanges {
        owner_id,
        name: fields::optional(body, NAME_KEY)
            .map(|v| fields::string(NAME_KEY, v))
            .transpose()?,
        price: fields::optional(body, PRICE_KEY)
            .map(|v| fields::price(PRICE_KEY, v))
            .transpose()?,
        description,
    })
}
