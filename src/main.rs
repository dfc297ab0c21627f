#[macro_use]
mod clients;

mod actor_framework;
mod app_system;
mod cart_actor;
mod checkout;
mod config;
mod coupon_actor;
mod domain;
mod order_actor;
mod pricing;
mod product_actor;
mod quotation_actor;
mod wishlist_actor;

#[cfg(test)]
mod integration_tests;
#[cfg(test)]
mod mock_framework;

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use clap::Parser;
use tracing::{info, warn, Instrument};

use crate::app_system::{setup_tracing, StorefrontSystem};
use crate::config::{CliArgs, StorefrontConfig};
use crate::domain::{BillingDetails, CouponCreate, DiscountType, PaymentMethod, ProductCreate, QuotationCreate};
use crate::order_actor::parse_status;

#[tokio::main]
async fn main() -> Result<()> {
    let config = StorefrontConfig::from_args(CliArgs::parse())?;
    setup_tracing(&config.log_filter);

    info!("Starting storefront system");
    let system = StorefrontSystem::new(&config).context("failed to start storefront")?;

    let (cement, steel) = async {
        let cement = system
            .product_client
            .create_product(ProductCreate::new("OPC Cement 53 Grade", "seller_1", 450.0, 200).with_final_price(420.0))
            .await?;
        let steel = system
            .product_client
            .create_product(ProductCreate::new("TMT Steel Bar 12mm", "seller_2", 780.0, 50))
            .await?;
        system
            .coupon_client
            .create_coupon(CouponCreate {
                code: "build10".into(),
                name: "Builder's 10%".into(),
                discount_type: DiscountType::Percentage,
                discount_value: 10.0,
                valid_from: Utc::now() - Duration::days(1),
                valid_until: Utc::now() + Duration::days(30),
                is_active: true,
                usage_limit: Some(100),
                min_order_value: Some(5000.0),
                max_discount_amount: Some(2000.0),
            })
            .await?;
        anyhow::Ok((cement, steel))
    }
    .instrument(tracing::info_span!("catalog_seed"))
    .await?;

    async {
        let quotation = system
            .quotation_client
            .request_quotation(QuotationCreate {
                product_id: steel.clone(),
                product_title: "TMT Steel Bar 12mm".into(),
                seller_id: "seller_2".into(),
                user_id: Some("buyer_1".into()),
                customer_name: "Meera Iyer".into(),
                customer_email: "meera@example.com".into(),
                customer_phone: "9876501234".into(),
                requested_price: 700.0,
                message: Some("Need 40 bars monthly".into()),
            })
            .await?;
        system
            .quotation_client
            .respond(quotation.id.clone(), "seller_2".into(), 740.0, "Can do 740 for monthly orders".into())
            .await?;
        let accepted = system.quotation_client.accept(quotation.id, "buyer_1".into()).await?;
        info!(quotation_id = %accepted.id, status = %accepted.status, "Quotation settled");
        anyhow::Ok(())
    }
    .instrument(tracing::info_span!("quotation"))
    .await?;

    let order = async {
        let carts = &system.cart_client;
        let cement_product = system.product_client.require_product(cement.clone()).await?;
        let steel_product = system.product_client.require_product(steel.clone()).await?;
        carts.add_item("buyer_1".into(), &cement_product).await?;
        for _ in 0..9 {
            carts.increase("buyer_1".into(), cement.clone()).await?;
        }
        system.wishlist_client.add("buyer_1".into(), &steel_product).await?;
        system
            .wishlist_client
            .move_to_cart("buyer_1".into(), steel.clone(), carts, &system.product_client)
            .await?;
        carts.increase("buyer_1".into(), steel.clone()).await?;

        let adjustments = carts
            .schedule_reconcile("buyer_1".into(), system.product_client.clone(), config.reconcile_debounce)
            .await?;
        for adjustment in &adjustments {
            warn!(notice = %adjustment.notice(), "Cart adjusted");
        }

        let ctx = system.checkout_context();
        let mut session = system.checkout_session("buyer_1")?;
        session.submit_billing(BillingDetails {
            first_name: "Meera".into(),
            last_name: "Iyer".into(),
            company_name: Some("Iyer Constructions".into()),
            address: "12 MG Road".into(),
            country: "India".into(),
            state: "Karnataka".into(),
            city: "Bengaluru".into(),
            zip_code: "560001".into(),
            email: "meera@example.com".into(),
            phone_number: "9876501234".into(),
        })?;
        session.submit_services(false, true)?;
        session.select_logistics("delhivery1")?;
        session.select_payment(PaymentMethod::Cod, None)?;
        session.submit_additional_info("Unload at site gate 2")?;
        session.apply_coupon(&ctx, "BUILD10").await?;
        let order = session.place_order(&ctx).await?;
        anyhow::Ok(order)
    }
    .instrument(tracing::info_span!("checkout"))
    .await?;

    info!(order_id = %order.id, total = order.totals.total, "Order placed");

    system
        .order_client
        .seller_update_status(order.id.clone(), "seller_1".into(), parse_status("processing")?)
        .await?;
    let dashboard = system.order_client.seller_dashboard("seller_1".into(), Utc::now()).await?;
    info!(
        products = dashboard.product_count,
        orders = dashboard.orders_this_month,
        revenue = dashboard.revenue_this_month,
        "Seller dashboard"
    );

    system.shutdown().await?;
    info!("Application completed successfully");
    Ok(())
}
