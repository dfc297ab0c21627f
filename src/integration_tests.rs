#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{Duration, Utc};

    use crate::actor_framework::{sequential_ids, Entity, FrameworkError, ResourceActor, ResourceClient};
    use crate::app_system::StorefrontSystem;
    use crate::checkout::{CheckoutContext, CheckoutError, CheckoutSession, CheckoutStep, MemorySessionStore};
    use crate::clients::{CartClient, CouponClient, OrderClient, ProductClient};
    use crate::config::{CliArgs, StorefrontConfig};
    use crate::domain::{
        BillingDetails, CouponCreate, DiscountType, DraftLine, Order, OrderDraft, OrderStatus, PaymentMethod, Product,
        ProductCreate,
    };
    use crate::mock_framework::{create_mock_client, expect_action, expect_create, expect_get};
    use crate::order_actor::OrderError;
    use crate::pricing::PricingPolicy;
    use crate::product_actor::{ProductAction, ProductActionResult, ProductError};

    fn billing() -> BillingDetails {
        BillingDetails {
            first_name: "Arjun".into(),
            last_name: "Rao".into(),
            company_name: None,
            address: "4 Park Street".into(),
            country: "India".into(),
            state: "West Bengal".into(),
            city: "Kolkata".into(),
            zip_code: "700016".into(),
            email: "arjun@example.com".into(),
            phone_number: "9830012345".into(),
        }
    }

    fn draft(product_id: &str, quantity: u32) -> OrderDraft {
        OrderDraft {
            buyer_id: "buyer_1".into(),
            lines: vec![DraftLine { product_id: product_id.into(), title: "Tiles".into(), quantity, price: 0.0 }],
            billing: billing(),
            coupon_code: None,
            coupon_discount: 0.0,
            shipping: 6000.0,
            warehouse_id: None,
            logistics_id: Some("gati1".into()),
            payment_method: PaymentMethod::Cod,
            payment_details: None,
            additional_notes: String::new(),
        }
    }

    #[tokio::test]
    async fn test_order_creation_flow() {
        // 1. Setup Mocks
        let (product_client_inner, mut product_rx) = create_mock_client::<Product>(10);
        let (order_client_inner, mut order_rx) = create_mock_client::<Order>(10);
        let product_client = ProductClient::new(product_client_inner);
        let order_client = OrderClient::new(order_client_inner, product_client, PricingPolicy::default());

        // 2. Place the order in the background
        let order_task = tokio::spawn(async move { order_client.place_order(draft("product_1", 5)).await });

        // 3. Verify Interactions
        let (product_id, responder) = expect_get(&mut product_rx).await.expect("Expected Product Get");
        assert_eq!(product_id, "product_1");
        let mut product = Product::new("product_1", "Vitrified Tiles", "seller_7", 1200.0, 100);
        product.final_price = Some(1000.0);
        responder.send(Ok(Some(product))).unwrap();

        let (product_id, action, responder) = expect_action(&mut product_rx).await.expect("Expected Product Action");
        assert_eq!(product_id, "product_1");
        assert_eq!(action, ProductAction::ReserveStock(5));
        responder.send(Ok(ProductActionResult::Reserved { remaining: 95 })).unwrap();

        let (payload, responder) = expect_create(&mut order_rx).await.expect("Expected Order Create");
        assert_eq!(payload.lines[0].seller_id, "seller_7");
        assert_eq!(payload.lines[0].price, 1000.0);
        assert_eq!(payload.totals.subtotal, 5000.0);
        assert_eq!(payload.totals.tax, 900.0);
        assert_eq!(payload.totals.total, 11900.0);
        responder.send(Ok("order_1".to_string())).unwrap();

        let (order_id, responder) = expect_get(&mut order_rx).await.expect("Expected Order Get");
        assert_eq!(order_id, "order_1");
        responder.send(Ok(Some(Order::from_create(order_id, payload).unwrap()))).unwrap();

        // 4. Verify Result
        let order = order_task.await.unwrap().unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
    }

    #[tokio::test]
    async fn test_rejected_reservation_stores_nothing() {
        let (product_client_inner, mut product_rx) = create_mock_client::<Product>(10);
        let (order_client_inner, mut order_rx) = create_mock_client::<Order>(10);
        let order_client =
            OrderClient::new(order_client_inner, ProductClient::new(product_client_inner), PricingPolicy::default());

        let order_task = tokio::spawn(async move { order_client.place_order(draft("product_1", 500)).await });

        let (_, responder) = expect_get(&mut product_rx).await.expect("Expected Product Get");
        responder.send(Ok(Some(Product::new("product_1", "Tiles", "seller_7", 10.0, 3)))).unwrap();
        let (_, _, responder) = expect_action(&mut product_rx).await.expect("Expected Product Action");
        responder
            .send(Err(FrameworkError::Entity(ProductError::InsufficientStock { requested: 500, available: 3 })))
            .unwrap();

        let result = order_task.await.unwrap();
        assert!(matches!(result, Err(OrderError::InsufficientStock(_))));
        // the order client is gone, so the order actor saw no request at all
        assert!(order_rx.recv().await.is_none());
    }

    fn spawn_actor<T: Entity<Id = String>>(name: &'static str) -> ResourceClient<T> {
        let (actor, client) = ResourceActor::new(name, 16, sequential_ids(name));
        tokio::spawn(actor.run());
        client
    }

    fn test_config(dir: &std::path::Path) -> StorefrontConfig {
        let mut config = StorefrontConfig::from_args(CliArgs::default()).unwrap();
        config.session_dir = dir.join("sessions");
        config
    }

    async fn seed(system: &StorefrontSystem) -> (String, String) {
        let cement = system
            .product_client
            .create_product(ProductCreate::new("Cement", "seller_1", 450.0, 40).with_final_price(400.0))
            .await
            .unwrap();
        let steel = system
            .product_client
            .create_product(ProductCreate::new("Steel", "seller_2", 900.0, 10))
            .await
            .unwrap();
        (cement, steel)
    }

    async fn fill_cart(carts: &CartClient, products: &ProductClient, id: &str, quantity: u32) {
        let product = products.require_product(id.to_string()).await.unwrap();
        carts.add_item("buyer_1".into(), &product).await.unwrap();
        for _ in 1..quantity {
            carts.increase("buyer_1".into(), id.to_string()).await.unwrap();
        }
    }

    fn walk_to_review<S: crate::checkout::SessionStore>(session: &mut CheckoutSession<S>) {
        session.submit_billing(billing()).unwrap();
        session.submit_services(true, true).unwrap();
        session.select_warehouse("aaj1").unwrap();
        session.select_logistics("bluedart1").unwrap();
        session.select_payment(PaymentMethod::Cod, None).unwrap();
        session.submit_additional_info("Call before delivery").unwrap();
        assert_eq!(session.wizard().current_step(), CheckoutStep::Review);
    }

    #[tokio::test]
    async fn test_full_checkout_flow() {
        let dir = tempfile::tempdir().unwrap();
        let system = StorefrontSystem::new(&test_config(dir.path())).unwrap();
        let (cement, steel) = seed(&system).await;
        system
            .coupon_client
            .create_coupon(CouponCreate {
                code: "FLAT500".into(),
                name: "Flat 500".into(),
                discount_type: DiscountType::Fixed,
                discount_value: 500.0,
                valid_from: Utc::now() - Duration::hours(1),
                valid_until: Utc::now() + Duration::days(1),
                is_active: true,
                usage_limit: Some(1),
                min_order_value: None,
                max_discount_amount: None,
            })
            .await
            .unwrap();

        fill_cart(&system.cart_client, &system.product_client, &cement, 10).await;
        fill_cart(&system.cart_client, &system.product_client, &steel, 2).await;

        let ctx = system.checkout_context();
        let mut session = system.checkout_session("buyer_1").unwrap();
        walk_to_review(&mut session);
        session.apply_coupon(&ctx, "flat500").await.unwrap();

        // a reload picks the session back up from disk
        let mut session = system.checkout_session("buyer_1").unwrap();
        assert!(session.wizard().can_place_order());

        let order = session.place_order(&ctx).await.unwrap();
        assert_eq!(order.totals.subtotal, 5800.0);
        assert_eq!(order.totals.discount, 500.0);
        assert_eq!(order.totals.tax, 954.0);
        assert_eq!(order.totals.shipping, 14000.0);
        assert_eq!(order.totals.total, 20254.0);
        assert_eq!(order.coupon_code.as_deref(), Some("FLAT500"));

        assert_eq!(system.product_client.check_stock(cement).await.unwrap(), 30);
        assert_eq!(system.product_client.check_stock(steel).await.unwrap(), 8);
        assert!(system.cart_client.cart_for("buyer_1".into()).await.unwrap().is_empty());
        assert_eq!(
            system.coupon_client.require_coupon("FLAT500".into()).await.unwrap().used_count,
            1
        );
        assert_eq!(session.wizard().current_step(), CheckoutStep::Billing);
        assert_eq!(
            system.checkout_session("buyer_1").unwrap().wizard().current_step(),
            CheckoutStep::Billing
        );
        assert_eq!(system.order_client.orders_for_buyer("buyer_1".into()).await.unwrap().len(), 1);

        drop(ctx);
        drop(session);
        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_checkout_blocks_below_minimum_order() {
        let dir = tempfile::tempdir().unwrap();
        let system = StorefrontSystem::new(&test_config(dir.path())).unwrap();
        let (cement, _) = seed(&system).await;
        fill_cart(&system.cart_client, &system.product_client, &cement, 2).await;

        let ctx = system.checkout_context();
        let mut session = system.checkout_session("buyer_1").unwrap();
        walk_to_review(&mut session);

        let err = session.place_order(&ctx).await.unwrap_err();
        match err {
            CheckoutError::BelowMinimumOrder(message) => {
                assert_eq!(message, "Add ₹4,200 more to reach minimum order of ₹5,000")
            }
            other => panic!("unexpected error: {other}"),
        }
        // nothing moved, so the buyer can top up and retry
        assert!(session.wizard().can_place_order());
        assert_eq!(system.product_client.check_stock(cement).await.unwrap(), 40);
    }

    #[tokio::test]
    async fn test_stock_race_leaves_wizard_intact() {
        let products = ProductClient::new(spawn_actor("product"));
        let ctx = CheckoutContext {
            carts: CartClient::new(spawn_actor("cart")),
            orders: OrderClient::new(spawn_actor("order"), products.clone(), PricingPolicy::default()),
            coupons: CouponClient::new(spawn_actor("coupon")),
        };

        let steel = products.create_product(ProductCreate::new("Steel", "seller_2", 900.0, 10)).await.unwrap();
        fill_cart(&ctx.carts, &products, &steel, 8).await;
        // someone else buys most of the stock after the cart was filled
        products.reserve_stock(steel.clone(), 5).await.unwrap();

        let mut session = CheckoutSession::resume(Arc::new(MemorySessionStore::new()), "buyer_1").unwrap();
        walk_to_review(&mut session);

        let err = session.place_order(&ctx).await.unwrap_err();
        assert!(matches!(err, CheckoutError::Order(OrderError::InsufficientStock(_))));
        assert!(session.wizard().can_place_order());
        assert_eq!(products.check_stock(steel.clone()).await.unwrap(), 5);

        let adjustments = ctx.carts.reconcile_stock("buyer_1".into(), &products).await.unwrap();
        assert_eq!(adjustments.len(), 1);
        assert_eq!(ctx.carts.cart_for("buyer_1".into()).await.unwrap().item(&steel).unwrap().quantity, 5);
    }
}
