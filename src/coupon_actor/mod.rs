//! Discount coupons: validation against an order value and usage counting.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use entity::normalize_code;
pub use error::*;
