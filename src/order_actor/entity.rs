use chrono::Utc;

use crate::actor_framework::Entity;
use crate::domain::{Order, OrderCreate, OrderStatus};
use super::actions::OrderAction;
use super::error::OrderError;

impl Entity for Order {
    type Id = String;
    type CreatePayload = OrderCreate;
    // Lines and totals are fixed once placed; only the status moves.
    type Patch = ();
    type Action = OrderAction;
    type ActionResult = OrderStatus;
    type Error = OrderError;

    fn id(&self) -> &String {
        &self.id
    }

    /// The order starts out `PENDING`.
    fn from_create(id: String, params: OrderCreate) -> Result<Self, OrderError> {
        if params.buyer_id.trim().is_empty() {
            return Err(OrderError::ValidationError("buyer is required".into()));
        }
        if params.lines.is_empty() {
            return Err(OrderError::ValidationError("order has no items".into()));
        }
        if let Some(line) = params.lines.iter().find(|line| line.quantity == 0) {
            return Err(OrderError::ValidationError(format!("zero quantity for {}", line.product_id)));
        }
        let now = Utc::now();
        Ok(Self {
            id,
            buyer_id: params.buyer_id,
            lines: params.lines,
            billing: params.billing,
            totals: params.totals,
            warehouse_id: params.warehouse_id,
            logistics_id: params.logistics_id,
            payment_method: params.payment_method,
            payment_details: params.payment_details,
            coupon_code: params.coupon_code,
            additional_notes: params.additional_notes,
            status: OrderStatus::Pending,
            created_at: now,
            updated_at: now,
        })
    }

    fn on_update(&mut self, _patch: ()) -> Result<(), OrderError> {
        Ok(())
    }

    fn handle_action(&mut self, action: OrderAction) -> Result<OrderStatus, OrderError> {
        let status = match action {
            OrderAction::UpdateStatus(status) => status,
            OrderAction::SellerUpdateStatus { seller_id, status } => {
                if !self.has_seller(&seller_id) {
                    return Err(OrderError::NotSellerOrder { order_id: self.id.clone(), seller_id });
                }
                status
            }
        };
        self.status = status;
        self.updated_at = Utc::now();
        Ok(status)
    }
}
