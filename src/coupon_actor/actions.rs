use chrono::{DateTime, Utc};

use crate::domain::CouponQuote;

#[derive(Debug, Clone, PartialEq)]
pub enum CouponAction {
    /// Works out the discount for an order without consuming the coupon.
    Quote { order_value: f64, now: DateTime<Utc> },
    /// Counts one use against the usage limit.
    Redeem,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CouponActionResult {
    Quote(CouponQuote),
    Redeemed { used_count: u32 },
}
