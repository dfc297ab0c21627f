//! Money arithmetic shared by the cart, checkout and order placement.
//!
//! Amounts are rupees held in `f64` and rounded to paise at every boundary
//! that a buyer can see.

use serde::{Deserialize, Serialize};

pub const DEFAULT_TAX_RATE: f64 = 0.18;
pub const DEFAULT_MOQ_AMOUNT: f64 = 5000.0;

pub fn round2(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// `final_price` wins when set and positive; otherwise the list price.
pub fn display_price(price: f64, final_price: Option<f64>) -> f64 {
    match final_price {
        Some(final_price) if final_price > 0.0 => final_price,
        _ => price.max(0.0),
    }
}

/// Tax rate and minimum order value applied at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingPolicy {
    pub tax_rate: f64,
    pub moq_amount: f64,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            tax_rate: DEFAULT_TAX_RATE,
            moq_amount: DEFAULT_MOQ_AMOUNT,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderTotals {
    pub subtotal: f64,
    pub discount: f64,
    pub tax: f64,
    pub shipping: f64,
    pub total: f64,
}

impl OrderTotals {
    /// Tax applies to the discounted subtotal; shipping is added untaxed.
    pub fn compute<I>(lines: I, coupon_discount: f64, shipping: f64, tax_rate: f64) -> Self
    where
        I: IntoIterator<Item = (f64, u32)>,
    {
        let subtotal: f64 = lines
            .into_iter()
            .map(|(price, quantity)| price * f64::from(quantity))
            .sum();
        let discount = coupon_discount.max(0.0).min(subtotal);
        let taxable = subtotal - discount;
        let tax = taxable * tax_rate;
        let shipping = shipping.max(0.0);
        Self {
            subtotal: round2(subtotal),
            discount: round2(discount),
            tax: round2(tax),
            shipping: round2(shipping),
            total: round2(taxable + tax + shipping),
        }
    }
}

/// Result of checking a cart against the minimum order value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoqStatus {
    pub is_valid: bool,
    pub current_amount: f64,
    pub required_amount: f64,
    pub shortfall: f64,
    pub message: String,
}

impl MoqStatus {
    pub fn evaluate(cart_total: f64, required: f64) -> Self {
        let is_valid = cart_total >= required;
        let shortfall = round2((required - cart_total).max(0.0));
        let message = if is_valid {
            format!("Minimum order requirement met (₹{})", format_rupees(required))
        } else {
            format!(
                "Add ₹{} more to reach minimum order of ₹{}",
                format_rupees(shortfall),
                format_rupees(required)
            )
        };
        Self {
            is_valid,
            current_amount: cart_total,
            required_amount: required,
            shortfall,
            message,
        }
    }
}

/// Thousands-grouped amount, dropping paise when the amount is whole.
pub fn format_rupees(amount: f64) -> String {
    let amount = round2(amount);
    let whole = amount.trunc() as i64;
    let paise = ((amount - amount.trunc()).abs() * 100.0).round() as i64;

    let digits = whole.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if whole < 0 {
        grouped.insert(0, '-');
    }
    if paise > 0 {
        grouped.push_str(&format!(".{paise:02}"));
    }
    grouped
}
