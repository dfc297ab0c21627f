//! Per-user carts and best-effort stock reconciliation against the catalog.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;
