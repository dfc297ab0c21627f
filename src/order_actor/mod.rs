//! Placed orders and their status changes.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::domain::OrderStatus;

/// Status text as admin and seller tools send it, in any casing.
pub fn parse_status(raw: &str) -> Result<OrderStatus, OrderError> {
    raw.parse().map_err(|_| OrderError::InvalidStatus(raw.trim().to_string()))
}
