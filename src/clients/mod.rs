//! Typed clients wrapping each resource actor's request channel.

#[macro_use]
mod macros;

pub mod cart_client;
pub mod coupon_client;
pub mod order_client;
pub mod product_client;
pub mod quotation_client;
pub mod wishlist_client;

pub use cart_client::*;
pub use coupon_client::*;
pub use order_client::*;
pub use product_client::*;
pub use quotation_client::*;
pub use wishlist_client::*;
