use thiserror::Error;

use crate::pricing::format_rupees;

fn rupees(amount: &f64) -> String {
    format_rupees(*amount)
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CouponError {
    #[error("Invalid coupon code: {0}")]
    NotFound(String),
    #[error("Coupon code already exists: {0}")]
    AlreadyExists(String),
    #[error("Coupon validation error: {0}")]
    ValidationError(String),
    #[error("Valid order value is required")]
    InvalidOrderValue,
    #[error("This coupon is no longer active")]
    Inactive,
    #[error("This coupon is not yet valid")]
    NotYetValid,
    #[error("This coupon has expired")]
    Expired,
    #[error("This coupon has reached its usage limit")]
    UsageLimitReached,
    #[error("Minimum order value of ₹{} required for this coupon", rupees(.0))]
    BelowMinimumOrder(f64),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl_from_framework_error!(CouponError);
