use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(rename = "IID")]
    pub id: i32,
    #[serde(rename = "UID")]
    pub owner_id: Option<i32>,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Price")]
    pub price: f64,
    #[serde(rename = "Description")]
    pub description: Option<String>,
    #[serde(rename = "creatTime")]
    pub created_at: NaiveDateTime,
}

/// Item row enriched with the owning user's display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemListing {
    #[serde(flatten)]
    pub item: Item,
    #[serde(rename = "OwnerName")]
    pub owner_name: Option<String>,
    #[serde(rename = "OwnerSurname")]
    pub owner_surname: Option<String>,
}

/// Inclusive price bounds for item listings.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ItemFilter {
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl ItemFilter {
    pub fn matches(&self, price: f64) -> bool {
        self.min_price.map_or(true, |min| price >= min)
            && self.max_price.map_or(true, |max| price <= max)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    pub owner_id: Option<i32>,
    pub name: String,
    pub price: f64,
    pub description: Option<String>,
}

/// `Some(None)` on a nullable column writes NULL.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemChanges {
    pub owner_id: Option<Option<i32>>,
    pub name: Option<String>,
    pub price: Option<f64>,
    pub description: Option<Option<String>>,
}

impl ItemChanges {
    pub fn is_empty(&self) -> bool {
        self.owner_id.is_none()
            && self.name.is_none()
            && self.price.is_none()
            && self.description.is_none()
    }
}
