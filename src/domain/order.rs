use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::pricing::OrderTotals;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Processing => "PROCESSING",
            OrderStatus::Shipped => "SHIPPED",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts any casing; stored documents mix `PENDING` and `pending`.
impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Ok(OrderStatus::Pending),
            "PROCESSING" => Ok(OrderStatus::Processing),
            "SHIPPED" => Ok(OrderStatus::Shipped),
            "DELIVERED" => Ok(OrderStatus::Delivered),
            "CANCELLED" => Ok(OrderStatus::Cancelled),
            other => Err(format!("invalid order status: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentMethod {
    Cod,
    Online,
}

/// Gateway references captured after an online payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    pub payment_id: String,
    pub order_id: String,
    pub signature: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingDetails {
    pub first_name: String,
    pub last_name: String,
    pub company_name: Option<String>,
    pub address: String,
    pub country: String,
    pub state: String,
    pub city: String,
    pub zip_code: String,
    pub email: String,
    pub phone_number: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub product_id: String,
    pub seller_id: String,
    pub title: String,
    pub quantity: u32,
    pub price: f64,
}

impl OrderLine {
    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

/// Represents a placed order. Lines never change after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub buyer_id: String,
    pub lines: Vec<OrderLine>,
    pub billing: BillingDetails,
    pub totals: OrderTotals,
    pub warehouse_id: Option<String>,
    pub logistics_id: Option<String>,
    pub payment_method: PaymentMethod,
    pub payment_details: Option<PaymentDetails>,
    pub coupon_code: Option<String>,
    pub additional_notes: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    pub fn has_seller(&self, seller_id: &str) -> bool {
        self.lines.iter().any(|line| line.seller_id == seller_id)
    }

    /// Sum of the lines belonging to one seller.
    pub fn seller_subtotal(&self, seller_id: &str) -> f64 {
        self.lines
            .iter()
            .filter(|line| line.seller_id == seller_id)
            .map(OrderLine::line_total)
            .sum()
    }
}

/// Resolved payload stored by the order actor.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub buyer_id: String,
    pub lines: Vec<OrderLine>,
    pub billing: BillingDetails,
    pub totals: OrderTotals,
    pub warehouse_id: Option<String>,
    pub logistics_id: Option<String>,
    pub payment_method: PaymentMethod,
    pub payment_details: Option<PaymentDetails>,
    pub coupon_code: Option<String>,
    pub additional_notes: String,
}

/// A line as the buyer's cart sees it, before catalog resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftLine {
    pub product_id: String,
    pub title: String,
    pub quantity: u32,
    pub price: f64,
}

/// What checkout hands to the order client.
#[derive(Debug, Clone)]
pub struct OrderDraft {
    pub buyer_id: String,
    pub lines: Vec<DraftLine>,
    pub billing: BillingDetails,
    pub coupon_code: Option<String>,
    pub coupon_discount: f64,
    pub shipping: f64,
    pub warehouse_id: Option<String>,
    pub logistics_id: Option<String>,
    pub payment_method: PaymentMethod,
    pub payment_details: Option<PaymentDetails>,
    pub additional_notes: String,
}
