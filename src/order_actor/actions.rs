use crate::domain::OrderStatus;

#[derive(Debug, Clone, PartialEq)]
pub enum OrderAction {
    /// Admin status change; any status is accepted.
    UpdateStatus(OrderStatus),
    /// Allowed only for a seller owning at least one line of the order.
    SellerUpdateStatus { seller_id: String, status: OrderStatus },
}
