use serde::{Deserialize, Serialize};

use crate::pricing::display_price;

/// A catalog entry. Read-only from the storefront's side apart from stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub title: String,
    pub seller_id: String,
    pub price: f64,
    pub final_price: Option<f64>,
    pub discount: f64,
    pub stock: u32,
    pub units: Option<String>,
}

/// Payload for listing a new product.
#[derive(Debug, Clone)]
pub struct ProductCreate {
    pub title: String,
    pub seller_id: String,
    pub price: f64,
    pub final_price: Option<f64>,
    pub discount: f64,
    pub stock: u32,
    pub units: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub price: Option<f64>,
    pub final_price: Option<Option<f64>>,
    pub discount: Option<f64>,
    pub stock: Option<u32>,
}

impl Product {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        seller_id: impl Into<String>,
        price: f64,
        stock: u32,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            seller_id: seller_id.into(),
            price,
            final_price: None,
            discount: 0.0,
            stock,
            units: None,
        }
    }

    /// The price a buyer actually pays for one unit.
    pub fn display_price(&self) -> f64 {
        display_price(self.price, self.final_price)
    }
}

impl ProductCreate {
    pub fn new(title: impl Into<String>, seller_id: impl Into<String>, price: f64, stock: u32) -> Self {
        Self {
            title: title.into(),
            seller_id: seller_id.into(),
            price,
            final_price: None,
            discount: 0.0,
            stock,
            units: None,
        }
    }

    pub fn with_final_price(mut self, final_price: f64) -> Self {
        self.final_price = Some(final_price);
        self
    }
}
