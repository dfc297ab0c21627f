use thiserror::Error;

use crate::domain::QuotationStatus;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum QuotationError {
    #[error("Quotation request not found: {0}")]
    NotFound(String),
    #[error("Quotation already exists: {0}")]
    AlreadyExists(String),
    #[error("Quotation validation error: {0}")]
    ValidationError(String),
    #[error("Cannot {action} a quotation that is {status}")]
    InvalidTransition {
        action: &'static str,
        status: QuotationStatus,
    },
    #[error("Quotation {0} belongs to someone else")]
    NotOwner(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl_from_framework_error!(QuotationError);
