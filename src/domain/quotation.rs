use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where a quotation sits in its negotiation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuotationStatus {
    Pending,
    Responded,
    Accepted,
    Rejected,
}

impl QuotationStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, QuotationStatus::Accepted | QuotationStatus::Rejected)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            QuotationStatus::Pending => "pending",
            QuotationStatus::Responded => "responded",
            QuotationStatus::Accepted => "accepted",
            QuotationStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for QuotationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuotationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(QuotationStatus::Pending),
            "responded" => Ok(QuotationStatus::Responded),
            "accepted" => Ok(QuotationStatus::Accepted),
            "rejected" => Ok(QuotationStatus::Rejected),
            other => Err(format!("unknown quotation status: {other}")),
        }
    }
}

/// A buyer's request for a custom price on one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quotation {
    pub id: String,
    pub product_id: String,
    pub product_title: String,
    pub seller_id: String,
    pub user_id: Option<String>,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub requested_price: f64,
    pub message: String,
    pub status: QuotationStatus,
    pub seller_response: Option<String>,
    pub seller_quoted_price: Option<f64>,
    pub rejection_reason: Option<String>,
    pub admin_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for a new quotation request.
#[derive(Debug, Clone, Default)]
pub struct QuotationCreate {
    pub product_id: String,
    pub product_title: String,
    pub seller_id: String,
    pub user_id: Option<String>,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub requested_price: f64,
    pub message: Option<String>,
}
