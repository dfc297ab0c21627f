use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use crate::actor_framework::ResourceClient;
use crate::cart_actor::{CartAction, CartError, CartUpdate, LiveStock, StockAdjustment};
use crate::clients::ProductClient;
use crate::domain::{Cart, CartCreate, CartItem, Product};

/// Client for the cart actor. Every method addresses the cart of one user,
/// creating it on first use.
#[derive(Clone)]
pub struct CartClient {
    inner: ResourceClient<Cart>,
}

impl_basic_client!(CartClient, Cart, CartError, cart);

/// The cart line a product turns into, priced at what the buyer pays.
pub fn cart_snapshot(product: &Product) -> CartItem {
    CartItem {
        product_id: product.id.clone(),
        title: product.title.clone(),
        price: product.display_price(),
        discount: product.discount,
        stock: product.stock,
        quantity: 1,
        units: product.units.clone(),
    }
}

impl CartClient {
    #[instrument(skip(self))]
    pub async fn cart_for(&self, user_id: String) -> Result<Cart, CartError> {
        debug!("Sending request");
        if let Some(cart) = self.inner.get(user_id.clone()).await? {
            return Ok(cart);
        }
        match self.inner.create(CartCreate { user_id: user_id.clone() }).await {
            // lost a race with another first use; either way the cart now exists
            Ok(_) | Err(crate::actor_framework::FrameworkError::AlreadyExists(_)) => {}
            Err(e) => return Err(e.into()),
        }
        self.require_cart(user_id).await
    }

    async fn apply(&self, user_id: String, action: CartAction) -> Result<CartUpdate, CartError> {
        self.cart_for(user_id.clone()).await?;
        Ok(self.inner.perform_action(user_id, action).await?)
    }

    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub async fn add_item(&self, user_id: String, product: &Product) -> Result<CartUpdate, CartError> {
        debug!("Sending request");
        self.apply(user_id, CartAction::AddItem(cart_snapshot(product))).await
    }

    #[instrument(skip(self))]
    pub async fn increase(&self, user_id: String, product_id: String) -> Result<CartUpdate, CartError> {
        debug!("Sending request");
        self.apply(user_id, CartAction::Increase(product_id)).await
    }

    #[instrument(skip(self))]
    pub async fn decrease(&self, user_id: String, product_id: String) -> Result<CartUpdate, CartError> {
        debug!("Sending request");
        self.apply(user_id, CartAction::Decrease(product_id)).await
    }

    #[instrument(skip(self))]
    pub async fn remove(&self, user_id: String, product_id: String) -> Result<CartUpdate, CartError> {
        debug!("Sending request");
        self.apply(user_id, CartAction::Remove(product_id)).await
    }

    #[instrument(skip(self))]
    pub async fn clear(&self, user_id: String) -> Result<CartUpdate, CartError> {
        debug!("Sending request");
        self.apply(user_id, CartAction::Clear).await
    }

    #[instrument(skip(self))]
    pub async fn decrement_ordered(&self, user_id: String, ordered: Vec<(String, u32)>) -> Result<CartUpdate, CartError> {
        debug!("Sending request");
        self.apply(user_id, CartAction::DecrementOrdered(ordered)).await
    }

    /// One reconciliation pass against the current catalog. Products that
    /// cannot be fetched are skipped rather than failing the pass.
    #[instrument(skip(self, products))]
    pub async fn reconcile_stock(
        &self,
        user_id: String,
        products: &ProductClient,
    ) -> Result<Vec<StockAdjustment>, CartError> {
        let cart = self.cart_for(user_id.clone()).await?;
        if cart.is_empty() {
            return Ok(Vec::new());
        }

        let mut live = Vec::with_capacity(cart.items.len());
        for item in &cart.items {
            match products.get_product(item.product_id.clone()).await {
                Ok(Some(product)) => live.push(LiveStock {
                    product_id: product.id.clone(),
                    stock: product.stock,
                    price: product.display_price(),
                }),
                Ok(None) => debug!(product_id = %item.product_id, "Product gone from catalog, line kept"),
                Err(e) => warn!(product_id = %item.product_id, error = %e, "Stock lookup failed"),
            }
        }

        let update = self.inner.perform_action(user_id, CartAction::Reconcile(live)).await?;
        for adjustment in &update.adjustments {
            info!(notice = %adjustment.notice(), "Cart adjusted");
        }
        Ok(update.adjustments)
    }

    /// Runs a single reconciliation pass after `delay` in the background.
    /// Failures are logged and yield no adjustments.
    pub fn schedule_reconcile(
        &self,
        user_id: String,
        products: ProductClient,
        delay: Duration,
    ) -> JoinHandle<Vec<StockAdjustment>> {
        let carts = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            match carts.reconcile_stock(user_id.clone(), &products).await {
                Ok(adjustments) => adjustments,
                Err(e) => {
                    warn!(user_id = %user_id, error = %e, "Stock reconciliation failed");
                    Vec::new()
                }
            }
        })
    }
}
