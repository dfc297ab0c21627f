use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    NotFound(String),
    #[error("Order already exists: {0}")]
    AlreadyExists(String),
    #[error("Invalid product: {0}")]
    InvalidProduct(String),
    #[error("Insufficient stock: {0}")]
    InsufficientStock(String),
    #[error("Order validation error: {0}")]
    ValidationError(String),
    #[error("Order {order_id} has no items from seller {seller_id}")]
    NotSellerOrder { order_id: String, seller_id: String },
    #[error("Invalid status: {0}")]
    InvalidStatus(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl_from_framework_error!(OrderError);
