use serde::{Deserialize, Serialize};
use std::fmt;

/// Checkout stages in the order the buyer walks through them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CheckoutStep {
    Billing = 1,
    AdditionalServices = 2,
    Warehouse = 3,
    Logistics = 4,
    Payment = 5,
    AdditionalInfo = 6,
    Review = 7,
}

impl CheckoutStep {
    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn title(self) -> &'static str {
        match self {
            CheckoutStep::Billing => "Billing Details",
            CheckoutStep::AdditionalServices => "Additional Services",
            CheckoutStep::Warehouse => "Warehouse Selection",
            CheckoutStep::Logistics => "Logistics Selection",
            CheckoutStep::Payment => "Payment Method",
            CheckoutStep::AdditionalInfo => "Additional Information",
            CheckoutStep::Review => "Review Order",
        }
    }
}

impl fmt::Display for CheckoutStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.number(), self.title())
    }
}
