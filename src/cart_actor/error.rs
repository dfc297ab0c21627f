use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("Cart not found: {0}")]
    NotFound(String),
    #[error("Cart already exists: {0}")]
    AlreadyExists(String),
    #[error("Item not in cart: {0}")]
    ItemNotInCart(String),
    #[error("\"{title}\" is out of stock")]
    OutOfStock { title: String },
    #[error("Only {stock} units of \"{title}\" are available")]
    StockLimitReached { title: String, stock: u32 },
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl_from_framework_error!(CartError);
