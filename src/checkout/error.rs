use thiserror::Error;

use crate::cart_actor::CartError;
use crate::coupon_actor::CouponError;
use crate::order_actor::OrderError;
use super::session::SessionError;
use super::step::CheckoutStep;

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("{attempted} is not the active step (currently at {current})")]
    StepNotActive { attempted: CheckoutStep, current: CheckoutStep },
    #[error("{attempted} has not been completed yet")]
    StepNotCompleted { attempted: CheckoutStep },
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Pincode(String),
    #[error("Unknown service partner: {0}")]
    UnknownPartner(String),
    #[error("Payment details are required for online payment")]
    PaymentDetailsRequired,
    #[error("Please complete all required steps before placing your order")]
    Incomplete,
    #[error("Your cart is empty")]
    EmptyCart,
    #[error("{0}")]
    BelowMinimumOrder(String),
    #[error(transparent)]
    Cart(#[from] CartError),
    #[error(transparent)]
    Coupon(#[from] CouponError),
    #[error(transparent)]
    Order(#[from] OrderError),
    #[error(transparent)]
    Session(#[from] SessionError),
}
