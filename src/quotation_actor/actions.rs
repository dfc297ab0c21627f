use crate::domain::QuotationStatus;

/// Lifecycle transitions of a quotation.
#[derive(Debug, Clone, PartialEq)]
pub enum QuotationAction {
    /// The owning seller quotes a price. `seller_id: None` is an admin answering on the seller's behalf.
    Respond {
        seller_id: Option<String>,
        quoted_price: f64,
        response: String,
    },
    /// The requesting buyer takes the quoted price.
    Accept { user_id: String },
    /// The requesting buyer turns the quote down.
    Reject { user_id: String, reason: Option<String> },
    /// Admin sets any status directly.
    Override {
        status: QuotationStatus,
        admin_notes: Option<String>,
    },
}
