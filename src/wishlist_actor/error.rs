use thiserror::Error;

use crate::cart_actor::CartError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum WishlistError {
    #[error("Wishlist not found: {0}")]
    NotFound(String),
    #[error("Wishlist already exists: {0}")]
    AlreadyExists(String),
    #[error("Invalid item data: {0}")]
    InvalidItem(String),
    #[error("Product not found: {0}")]
    InvalidProduct(String),
    #[error(transparent)]
    Cart(#[from] CartError),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl_from_framework_error!(WishlistError);
