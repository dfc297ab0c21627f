use serde::{Deserialize, Serialize};

use crate::domain::CartItem;

/// Fresh catalog facts for one product.
#[derive(Debug, Clone, PartialEq)]
pub struct LiveStock {
    pub product_id: String,
    pub stock: u32,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CartAction {
    /// Adds one unit, creating the line when the product is new to the cart.
    AddItem(CartItem),
    Increase(String),
    Decrease(String),
    Remove(String),
    Clear,
    /// Subtracts quantities that were just ordered.
    DecrementOrdered(Vec<(String, u32)>),
    Reconcile(Vec<LiveStock>),
}

/// A change made to the cart behind the buyer's back, reported so the UI can tell them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum StockAdjustment {
    Removed { product_id: String, title: String },
    Clamped { product_id: String, title: String, from: u32, to: u32 },
    PriceChanged { product_id: String, title: String, from: f64, to: f64 },
}

impl StockAdjustment {
    pub fn notice(&self) -> String {
        match self {
            StockAdjustment::Removed { title, .. } => {
                format!("\"{title}\" is out of stock and has been removed from your cart.")
            }
            StockAdjustment::Clamped { title, to, .. } => {
                format!("Only {to} units of \"{title}\" are available. Quantity has been adjusted.")
            }
            StockAdjustment::PriceChanged { title, from, to, .. } => {
                format!("The price of \"{title}\" changed from ₹{from:.2} to ₹{to:.2}.")
            }
        }
    }
}

/// Cart lines after the action, plus any adjustments it made.
#[derive(Debug, Clone, PartialEq)]
pub struct CartUpdate {
    pub items: Vec<CartItem>,
    pub adjustments: Vec<StockAdjustment>,
}
