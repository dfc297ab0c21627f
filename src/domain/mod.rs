pub mod cart;
pub mod coupon;
pub mod order;
pub mod product;
pub mod quotation;
pub mod wishlist;

pub use cart::*;
pub use coupon::*;
pub use order::*;
pub use product::*;
pub use quotation::*;
pub use wishlist::*;
