use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::actor_framework::Entity;
use crate::domain::{Quotation, QuotationCreate, QuotationStatus};
use super::actions::QuotationAction;
use super::error::QuotationError;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

const MIN_PHONE_LEN: usize = 10;

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

fn validate_request(params: &QuotationCreate) -> Result<(), QuotationError> {
    let required = [
        ("productId", &params.product_id),
        ("productTitle", &params.product_title),
        ("sellerId", &params.seller_id),
        ("customerName", &params.customer_name),
        ("customerEmail", &params.customer_email),
        ("customerPhone", &params.customer_phone),
    ];
    let missing: Vec<&str> = required
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();
    if !missing.is_empty() {
        return Err(QuotationError::ValidationError(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )));
    }
    if !is_valid_email(&params.customer_email) {
        return Err(QuotationError::ValidationError("Invalid email format".into()));
    }
    if params.customer_phone.trim().len() < MIN_PHONE_LEN {
        return Err(QuotationError::ValidationError("Invalid phone number".into()));
    }
    if !(params.requested_price > 0.0) {
        return Err(QuotationError::ValidationError("Invalid price".into()));
    }
    Ok(())
}

impl Quotation {
    /// Guest requests (`user_id: None`) have no buyer to match, so only an
    /// admin override can settle them.
    fn ensure_buyer(&self, user_id: &str) -> Result<(), QuotationError> {
        match &self.user_id {
            Some(owner) if owner == user_id => Ok(()),
            _ => Err(QuotationError::NotOwner(self.id.clone())),
        }
    }

    fn respond(
        &mut self,
        seller_id: Option<&str>,
        quoted_price: f64,
        response: String,
    ) -> Result<(), QuotationError> {
        if let Some(seller_id) = seller_id {
            if seller_id != self.seller_id {
                return Err(QuotationError::NotOwner(self.id.clone()));
            }
        }
        if self.status.is_terminal() {
            return Err(QuotationError::InvalidTransition { action: "respond to", status: self.status });
        }
        if !(quoted_price > 0.0) {
            return Err(QuotationError::ValidationError("Valid quoted price is required".into()));
        }
        self.status = QuotationStatus::Responded;
        self.seller_quoted_price = Some(quoted_price);
        self.seller_response = Some(response);
        Ok(())
    }

    fn accept(&mut self, user_id: &str) -> Result<(), QuotationError> {
        self.ensure_buyer(user_id)?;
        if self.status != QuotationStatus::Responded {
            return Err(QuotationError::InvalidTransition { action: "accept", status: self.status });
        }
        self.status = QuotationStatus::Accepted;
        Ok(())
    }

    fn reject(&mut self, user_id: &str, reason: Option<String>) -> Result<(), QuotationError> {
        self.ensure_buyer(user_id)?;
        if self.status != QuotationStatus::Responded {
            return Err(QuotationError::InvalidTransition { action: "reject", status: self.status });
        }
        self.status = QuotationStatus::Rejected;
        self.rejection_reason = Some(reason.unwrap_or_default());
        Ok(())
    }
}

impl Entity for Quotation {
    type Id = String;
    type CreatePayload = QuotationCreate;
    type Patch = ();
    type Action = QuotationAction;
    type ActionResult = Quotation;
    type Error = QuotationError;

    fn id(&self) -> &String {
        &self.id
    }

    /// New requests always start out `pending`.
    fn from_create(id: String, params: QuotationCreate) -> Result<Self, QuotationError> {
        validate_request(&params)?;
        let now = Utc::now();
        Ok(Self {
            id,
            product_id: params.product_id,
            product_title: params.product_title,
            seller_id: params.seller_id,
            user_id: params.user_id,
            customer_name: params.customer_name,
            customer_email: params.customer_email,
            customer_phone: params.customer_phone,
            requested_price: params.requested_price,
            message: params.message.unwrap_or_default(),
            status: QuotationStatus::Pending,
            seller_response: None,
            seller_quoted_price: None,
            rejection_reason: None,
            admin_notes: None,
            created_at: now,
            updated_at: now,
        })
    }

    fn on_update(&mut self, _patch: ()) -> Result<(), QuotationError> {
        Ok(())
    }

    fn handle_action(&mut self, action: QuotationAction) -> Result<Quotation, QuotationError> {
        match action {
            QuotationAction::Respond { seller_id, quoted_price, response } => {
                self.respond(seller_id.as_deref(), quoted_price, response)?
            }
            QuotationAction::Accept { user_id } => self.accept(&user_id)?,
            QuotationAction::Reject { user_id, reason } => self.reject(&user_id, reason)?,
            QuotationAction::Override { status, admin_notes } => {
                self.status = status;
                if admin_notes.is_some() {
                    self.admin_notes = admin_notes;
                }
            }
        }
        self.updated_at = Utc::now();
        Ok(self.clone())
    }
}
