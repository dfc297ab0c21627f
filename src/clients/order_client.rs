use std::collections::HashMap;

use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;
use tracing::{debug, error, info, instrument, warn};

use crate::actor_framework::{Filter, ResourceClient};
use crate::clients::ProductClient;
use crate::domain::{Order, OrderCreate, OrderDraft, OrderLine, OrderStatus};
use crate::order_actor::{OrderAction, OrderError};
use crate::pricing::{round2, OrderTotals, PricingPolicy};
use crate::product_actor::ProductError;

/// Client for interacting with the Order actor.
///
/// Placing an order is orchestrated here: products are resolved and stock
/// reserved through the product client before the order actor stores anything.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
    products: ProductClient,
    policy: PricingPolicy,
}

impl_client_methods!(OrderClient, Order, OrderError, order);

/// Per-seller figures for the seller portal.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerDashboard {
    pub product_count: usize,
    pub inventory_value: f64,
    pub orders_this_month: usize,
    pub revenue_this_month: f64,
    pub status_counts: HashMap<OrderStatus, usize>,
}

fn newest_first(orders: &mut [Order]) {
    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>, products: ProductClient, policy: PricingPolicy) -> Self {
        Self { inner, products, policy }
    }

    pub fn policy(&self) -> PricingPolicy {
        self.policy
    }

    #[instrument(skip(self, draft), fields(buyer_id = %draft.buyer_id, lines = draft.lines.len()))]
    pub async fn place_order(&self, draft: OrderDraft) -> Result<Order, OrderError> {
        info!("Processing place_order request (Client Side)");

        if draft.lines.is_empty() {
            return Err(OrderError::ValidationError("order has no items".into()));
        }

        let mut lines = Vec::with_capacity(draft.lines.len());
        let mut reserved: Vec<(String, u32)> = Vec::new();
        for item in &draft.lines {
            match self.resolve_line(&item.product_id, item.quantity).await {
                Ok(line) => {
                    reserved.push((line.product_id.clone(), line.quantity));
                    lines.push(line);
                }
                Err(e) => {
                    error!(product_id = %item.product_id, error = %e, "Line could not be resolved");
                    self.release_all(&reserved).await;
                    return Err(e);
                }
            }
        }
        info!("Stock reserved successfully");

        let totals = OrderTotals::compute(
            lines.iter().map(|line| (line.price, line.quantity)),
            draft.coupon_discount,
            draft.shipping,
            self.policy.tax_rate,
        );

        let payload = OrderCreate {
            buyer_id: draft.buyer_id,
            lines,
            billing: draft.billing,
            totals,
            warehouse_id: draft.warehouse_id,
            logistics_id: draft.logistics_id,
            payment_method: draft.payment_method,
            payment_details: draft.payment_details,
            coupon_code: draft.coupon_code,
            additional_notes: draft.additional_notes,
        };

        let id = match self.inner.create(payload).await {
            Ok(id) => id,
            Err(e) => {
                error!(error = %e, "Order could not be stored");
                self.release_all(&reserved).await;
                return Err(e.into());
            }
        };
        info!(order_id = %id, total = totals.total, "Order placed");
        self.require_order(id).await
    }

    async fn resolve_line(&self, product_id: &str, quantity: u32) -> Result<OrderLine, OrderError> {
        if quantity == 0 {
            return Err(OrderError::ValidationError(format!("zero quantity for {product_id}")));
        }
        let product = match self.products.get_product(product_id.to_string()).await {
            Ok(Some(product)) => product,
            Ok(None) => return Err(OrderError::InvalidProduct(product_id.to_string())),
            Err(e) => return Err(OrderError::InvalidProduct(format!("Product validation failed: {e}"))),
        };
        match self.products.reserve_stock(product.id.clone(), quantity).await {
            Ok(_) => {}
            Err(e @ ProductError::InsufficientStock { .. }) => {
                return Err(OrderError::InsufficientStock(format!("{}: {e}", product.title)));
            }
            Err(e) => return Err(OrderError::ActorCommunicationError(e.to_string())),
        }
        Ok(OrderLine {
            price: product.display_price(),
            product_id: product.id,
            seller_id: product.seller_id,
            title: product.title,
            quantity,
        })
    }

    async fn release_all(&self, reserved: &[(String, u32)]) {
        for (product_id, quantity) in reserved {
            if let Err(e) = self.products.release_stock(product_id.clone(), *quantity).await {
                warn!(product_id = %product_id, error = %e, "Stock release failed");
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn update_status(&self, id: String, status: OrderStatus) -> Result<OrderStatus, OrderError> {
        debug!("Sending request");
        Ok(self.inner.perform_action(id, OrderAction::UpdateStatus(status)).await?)
    }

    #[instrument(skip(self))]
    pub async fn seller_update_status(
        &self,
        id: String,
        seller_id: String,
        status: OrderStatus,
    ) -> Result<OrderStatus, OrderError> {
        debug!("Sending request");
        Ok(self
            .inner
            .perform_action(id, OrderAction::SellerUpdateStatus { seller_id, status })
            .await?)
    }

    #[instrument(skip(self))]
    pub async fn orders_for_buyer(&self, buyer_id: String) -> Result<Vec<Order>, OrderError> {
        debug!("Sending request");
        let mut orders = self.inner.list(Filter::new(move |o: &Order| o.buyer_id == buyer_id)).await?;
        newest_first(&mut orders);
        Ok(orders)
    }

    #[instrument(skip(self))]
    pub async fn orders_for_seller(&self, seller_id: String) -> Result<Vec<Order>, OrderError> {
        debug!("Sending request");
        let mut orders = self.inner.list(Filter::new(move |o: &Order| o.has_seller(&seller_id))).await?;
        newest_first(&mut orders);
        Ok(orders)
    }

    #[instrument(skip(self))]
    pub async fn seller_dashboard(&self, seller_id: String, now: DateTime<Utc>) -> Result<SellerDashboard, OrderError> {
        let products = self
            .products
            .list_seller_products(seller_id.clone())
            .await
            .map_err(|e| OrderError::ActorCommunicationError(e.to_string()))?;
        let orders = self.orders_for_seller(seller_id.clone()).await?;

        let inventory_value = products.iter().map(|p| p.price * f64::from(p.stock)).sum();

        let mut status_counts: HashMap<OrderStatus, usize> =
            OrderStatus::ALL.iter().map(|status| (*status, 0)).collect();
        let mut orders_this_month = 0;
        let mut revenue_this_month = 0.0;
        for order in &orders {
            *status_counts.entry(order.status).or_default() += 1;
            if order.created_at.year() == now.year() && order.created_at.month() == now.month() {
                orders_this_month += 1;
                revenue_this_month += order.seller_subtotal(&seller_id);
            }
        }

        Ok(SellerDashboard {
            product_count: products.len(),
            inventory_value: round2(inventory_value),
            orders_this_month,
            revenue_this_month: round2(revenue_this_month),
            status_counts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor_framework::{sequential_ids, ResourceActor};
    use crate::domain::{BillingDetails, DraftLine, PaymentMethod, ProductCreate};

    fn spawn() -> (OrderClient, ProductClient) {
        let (product_actor, products) = ResourceActor::new("product", 16, sequential_ids("product"));
        let (order_actor, orders) = ResourceActor::new("order", 16, sequential_ids("order"));
        tokio::spawn(product_actor.run());
        tokio::spawn(order_actor.run());
        let products = ProductClient::new(products);
        (OrderClient::new(orders, products.clone(), PricingPolicy::default()), products)
    }

    fn draft(lines: Vec<(String, u32)>) -> OrderDraft {
        OrderDraft {
            buyer_id: "buyer_1".into(),
            lines: lines
                .into_iter()
                .map(|(product_id, quantity)| DraftLine { product_id, title: String::new(), quantity, price: 0.0 })
                .collect(),
            billing: BillingDetails::default(),
            coupon_code: None,
            coupon_discount: 0.0,
            shipping: 0.0,
            warehouse_id: None,
            logistics_id: None,
            payment_method: PaymentMethod::Cod,
            payment_details: None,
            additional_notes: String::new(),
        }
    }

    #[tokio::test]
    async fn place_order_prices_lines_from_the_catalog() {
        let (orders, products) = spawn();
        let cement = products
            .create_product(ProductCreate::new("Cement", "seller_1", 450.0, 100).with_final_price(400.0))
            .await
            .unwrap();
        let steel = products.create_product(ProductCreate::new("Steel", "seller_2", 1000.0, 10)).await.unwrap();

        let mut request = draft(vec![(cement.clone(), 5), (steel.clone(), 3)]);
        request.coupon_discount = 500.0;
        let order = orders.place_order(request).await.unwrap();

        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.lines[0].price, 400.0);
        assert_eq!(order.lines[1].seller_id, "seller_2");
        assert_eq!(order.totals.subtotal, 5000.0);
        assert_eq!(order.totals.tax, 810.0);
        assert_eq!(order.totals.total, 5310.0);

        assert_eq!(products.check_stock(cement).await.unwrap(), 95);
        assert_eq!(products.check_stock(steel).await.unwrap(), 7);
    }

    #[tokio::test]
    async fn failed_line_releases_earlier_reservations() {
        let (orders, products) = spawn();
        let cement = products.create_product(ProductCreate::new("Cement", "seller_1", 400.0, 100)).await.unwrap();
        let steel = products.create_product(ProductCreate::new("Steel", "seller_2", 1000.0, 2)).await.unwrap();

        let err = orders
            .place_order(draft(vec![(cement.clone(), 5), (steel.clone(), 3)]))
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::InsufficientStock(_)));
        assert_eq!(products.check_stock(cement).await.unwrap(), 100);
        assert_eq!(products.check_stock(steel).await.unwrap(), 2);
        assert!(orders.orders_for_buyer("buyer_1".into()).await.unwrap().is_empty());

        let err = orders.place_order(draft(vec![("missing".into(), 1)])).await.unwrap_err();
        assert_eq!(err, OrderError::InvalidProduct("missing".into()));
    }

    #[tokio::test]
    async fn seller_views_and_status_changes() {
        let (orders, products) = spawn();
        let cement = products.create_product(ProductCreate::new("Cement", "seller_1", 400.0, 100)).await.unwrap();
        let steel = products.create_product(ProductCreate::new("Steel", "seller_2", 1000.0, 10)).await.unwrap();
        let order = orders.place_order(draft(vec![(cement, 2), (steel, 1)])).await.unwrap();

        assert_eq!(orders.orders_for_seller("seller_1".into()).await.unwrap().len(), 1);
        assert!(orders.orders_for_seller("seller_9".into()).await.unwrap().is_empty());

        let status = orders
            .seller_update_status(order.id.clone(), "seller_1".into(), OrderStatus::Processing)
            .await
            .unwrap();
        assert_eq!(status, OrderStatus::Processing);
        assert!(matches!(
            orders.seller_update_status(order.id.clone(), "seller_9".into(), OrderStatus::Shipped).await,
            Err(OrderError::NotSellerOrder { .. })
        ));

        let dashboard = orders.seller_dashboard("seller_1".into(), Utc::now()).await.unwrap();
        assert_eq!(dashboard.product_count, 1);
        assert_eq!(dashboard.inventory_value, 39_200.0);
        assert_eq!(dashboard.orders_this_month, 1);
        assert_eq!(dashboard.revenue_this_month, 800.0);
        assert_eq!(dashboard.status_counts[&OrderStatus::Processing], 1);
        assert_eq!(dashboard.status_counts[&OrderStatus::Pending], 0);
    }

    #[tokio::test]
    async fn admin_sets_any_status() {
        let (orders, products) = spawn();
        let cement = products.create_product(ProductCreate::new("Cement", "seller_1", 400.0, 100)).await.unwrap();
        let order = orders.place_order(draft(vec![(cement, 1)])).await.unwrap();

        assert_eq!(orders.update_status(order.id.clone(), OrderStatus::Delivered).await.unwrap(), OrderStatus::Delivered);
        assert_eq!(orders.update_status(order.id.clone(), OrderStatus::Pending).await.unwrap(), OrderStatus::Pending);
        assert_eq!(orders.require_order(order.id).await.unwrap().status, OrderStatus::Pending);
        assert_eq!(
            orders.update_status("order_404".into(), OrderStatus::Shipped).await.unwrap_err(),
            OrderError::NotFound("order_404".into())
        );
    }
}
