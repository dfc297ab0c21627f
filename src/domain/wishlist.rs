use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A saved product, with the price and stock it had when saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItem {
    pub product_id: String,
    pub title: String,
    pub price: f64,
    pub discount: f64,
    pub seller_id: String,
    pub stock: u32,
    pub units: Option<String>,
    pub added_at: DateTime<Utc>,
}

/// A user's server-side wishlist document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wishlist {
    pub user_id: String,
    pub items: Vec<WishlistItem>,
    pub updated_at: DateTime<Utc>,
}

impl Wishlist {
    pub fn contains(&self, product_id: &str) -> bool {
        self.items.iter().any(|item| item.product_id == product_id)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct WishlistCreate {
    pub user_id: String,
}
