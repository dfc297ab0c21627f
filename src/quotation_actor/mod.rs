//! Quotation requests and their pending → responded → accepted/rejected lifecycle.

mod actions;
pub mod entity;
pub mod error;
pub mod query;

pub use actions::*;
pub use error::*;
pub use query::*;
