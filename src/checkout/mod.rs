//! Multi-step checkout: the wizard state machine, its persistence, and the
//! final hand-off that turns a cart into an order.

pub mod error;
pub mod partners;
pub mod session;
pub mod step;
pub mod wizard;

pub use error::*;
pub use session::*;
pub use step::*;
pub use wizard::*;

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, instrument, warn};

use crate::clients::{CartClient, CouponClient, OrderClient};
use crate::domain::{BillingDetails, CouponQuote, Order, PaymentDetails, PaymentMethod};
use crate::pricing::MoqStatus;

/// The clients checkout talks to.
#[derive(Clone)]
pub struct CheckoutContext {
    pub carts: CartClient,
    pub orders: OrderClient,
    pub coupons: CouponClient,
}

/// A buyer's checkout, mirrored to session storage after every change so a
/// reload picks up where it left off.
pub struct CheckoutSession<S: SessionStore> {
    buyer_id: String,
    store: Arc<S>,
    wizard: CheckoutWizard,
}

impl<S: SessionStore> CheckoutSession<S> {
    /// Restores saved progress for the buyer, or starts fresh.
    pub fn resume(store: Arc<S>, buyer_id: impl Into<String>) -> Result<Self, CheckoutError> {
        let buyer_id = buyer_id.into();
        let wizard = store.load(&buyer_id)?.unwrap_or_default();
        Ok(Self { buyer_id, store, wizard })
    }

    pub fn buyer_id(&self) -> &str {
        &self.buyer_id
    }

    pub fn wizard(&self) -> &CheckoutWizard {
        &self.wizard
    }

    fn apply<R>(
        &mut self,
        change: impl FnOnce(&mut CheckoutWizard) -> Result<R, CheckoutError>,
    ) -> Result<R, CheckoutError> {
        // in-memory state only moves once the store has the new copy
        let mut next = self.wizard.clone();
        let result = change(&mut next)?;
        self.store.save(&self.buyer_id, &next)?;
        self.wizard = next;
        Ok(result)
    }

    pub fn submit_billing(&mut self, details: BillingDetails) -> Result<CheckoutStep, CheckoutError> {
        self.apply(|w| w.submit_billing(details))
    }

    pub fn submit_services(&mut self, warehouse: bool, logistics: bool) -> Result<CheckoutStep, CheckoutError> {
        self.apply(|w| w.submit_services(warehouse, logistics))
    }

    pub fn select_warehouse(&mut self, id: &str) -> Result<CheckoutStep, CheckoutError> {
        self.apply(|w| w.select_warehouse(id))
    }

    pub fn select_logistics(&mut self, id: &str) -> Result<CheckoutStep, CheckoutError> {
        self.apply(|w| w.select_logistics(id))
    }

    pub fn select_payment(
        &mut self,
        method: PaymentMethod,
        details: Option<PaymentDetails>,
    ) -> Result<CheckoutStep, CheckoutError> {
        self.apply(|w| w.select_payment(method, details))
    }

    pub fn submit_additional_info(&mut self, notes: impl Into<String>) -> Result<CheckoutStep, CheckoutError> {
        let notes = notes.into();
        self.apply(|w| w.submit_additional_info(notes))
    }

    pub fn toggle_section(&mut self, step: CheckoutStep) -> Result<bool, CheckoutError> {
        self.apply(|w| w.toggle_section(step))
    }

    /// Quotes the code against the current cart subtotal and keeps the quote.
    #[instrument(skip(self, ctx), fields(buyer_id = %self.buyer_id))]
    pub async fn apply_coupon(&mut self, ctx: &CheckoutContext, code: &str) -> Result<CouponQuote, CheckoutError> {
        let cart = ctx.carts.cart_for(self.buyer_id.clone()).await?;
        let quote = ctx.coupons.quote(code.to_string(), cart.subtotal(), Utc::now()).await?;
        self.apply(|w| {
            w.apply_coupon(quote.clone());
            Ok(())
        })?;
        info!(code = %quote.code, discount = quote.discount_amount, "Coupon applied");
        Ok(quote)
    }

    pub fn remove_coupon(&mut self) -> Result<Option<CouponQuote>, CheckoutError> {
        self.apply(|w| Ok(w.remove_coupon()))
    }

    /// Places the order for the buyer's cart. Nothing after the order exists
    /// can fail the call; until then the wizard is left as it was so the buyer
    /// can retry.
    #[instrument(skip(self, ctx), fields(buyer_id = %self.buyer_id))]
    pub async fn place_order(&mut self, ctx: &CheckoutContext) -> Result<Order, CheckoutError> {
        if !self.wizard.can_place_order() {
            return Err(CheckoutError::Incomplete);
        }

        let cart = ctx.carts.cart_for(self.buyer_id.clone()).await?;
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        let moq = MoqStatus::evaluate(cart.subtotal(), ctx.orders.policy().moq_amount);
        if !moq.is_valid {
            return Err(CheckoutError::BelowMinimumOrder(moq.message));
        }

        let draft = self.wizard.to_draft(&self.buyer_id, &cart.items)?;
        let order = ctx.orders.place_order(draft).await?;
        info!(order_id = %order.id, total = order.totals.total, "Checkout complete");

        if let Some(code) = order.coupon_code.clone() {
            if let Err(e) = ctx.coupons.redeem(code).await {
                warn!(order_id = %order.id, error = %e, "Coupon redeem failed");
            }
        }
        let ordered = order.lines.iter().map(|line| (line.product_id.clone(), line.quantity)).collect();
        if let Err(e) = ctx.carts.decrement_ordered(self.buyer_id.clone(), ordered).await {
            warn!(order_id = %order.id, error = %e, "Cart cleanup failed");
        }
        if let Err(e) = self.store.clear(&self.buyer_id) {
            warn!(order_id = %order.id, error = %e, "Session cleanup failed");
        }
        self.wizard.reset();
        Ok(order)
    }
}
