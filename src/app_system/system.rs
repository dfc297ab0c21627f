use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::actor_framework::{sequential_ids, Entity, ResourceActor, ResourceClient};
use crate::checkout::{CheckoutContext, CheckoutError, CheckoutSession, FileSessionStore};
use crate::clients::{CartClient, CouponClient, OrderClient, ProductClient, QuotationClient, WishlistClient};
use crate::config::StorefrontConfig;
use super::error::SystemError;

/// Every actor of the storefront, wired together.
///
/// Responsible for starting up actors, wiring them together, and handling shutdown.
pub struct StorefrontSystem {
    pub product_client: ProductClient,
    pub quotation_client: QuotationClient,
    pub cart_client: CartClient,
    pub coupon_client: CouponClient,
    pub order_client: OrderClient,
    pub wishlist_client: WishlistClient,
    sessions: Arc<FileSessionStore>,
    handles: Vec<(&'static str, JoinHandle<()>)>,
}

fn spawn_actor<T: Entity<Id = String>>(
    name: &'static str,
    buffer: usize,
    handles: &mut Vec<(&'static str, JoinHandle<()>)>,
) -> ResourceClient<T> {
    let (actor, client) = ResourceActor::<T>::new(name, buffer, sequential_ids(name));
    handles.push((name, tokio::spawn(actor.run())));
    client
}

impl StorefrontSystem {
    pub fn new(config: &StorefrontConfig) -> Result<Self, SystemError> {
        let sessions = Arc::new(FileSessionStore::open(&config.session_dir)?);
        let buffer = config.channel_buffer;
        let mut handles = Vec::new();

        let product_client = ProductClient::new(spawn_actor("product", buffer, &mut handles));
        let quotation_client = QuotationClient::new(spawn_actor("quotation", buffer, &mut handles));
        let cart_client = CartClient::new(spawn_actor("cart", buffer, &mut handles));
        let coupon_client = CouponClient::new(spawn_actor("coupon", buffer, &mut handles));
        let order_client = OrderClient::new(
            spawn_actor("order", buffer, &mut handles),
            product_client.clone(),
            config.pricing(),
        );
        let wishlist_client = WishlistClient::new(spawn_actor("wishlist", buffer, &mut handles));

        info!(actors = handles.len(), "Storefront system started");
        Ok(Self {
            product_client,
            quotation_client,
            cart_client,
            coupon_client,
            order_client,
            wishlist_client,
            sessions,
            handles,
        })
    }

    pub fn checkout_context(&self) -> CheckoutContext {
        CheckoutContext {
            carts: self.cart_client.clone(),
            orders: self.order_client.clone(),
            coupons: self.coupon_client.clone(),
        }
    }

    pub fn checkout_session(&self, buyer_id: &str) -> Result<CheckoutSession<FileSessionStore>, CheckoutError> {
        CheckoutSession::resume(self.sessions.clone(), buyer_id)
    }

    /// Drops every client so the actors' channels close, then waits for them.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down system...");
        let Self {
            product_client,
            quotation_client,
            cart_client,
            coupon_client,
            order_client,
            wishlist_client,
            sessions,
            handles,
        } = self;
        drop((product_client, quotation_client, cart_client, coupon_client, order_client, wishlist_client, sessions));

        for (actor, handle) in handles {
            if let Err(e) = handle.await {
                error!(actor, error = ?e, "Actor task failed");
                return Err(SystemError::ActorTaskFailed { actor, reason: e.to_string() });
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
