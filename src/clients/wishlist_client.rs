use chrono::Utc;
use tracing::{debug, info, instrument};

use crate::actor_framework::{FrameworkError, ResourceClient};
use crate::cart_actor::CartUpdate;
use crate::clients::{CartClient, ProductClient};
use crate::domain::{Product, Wishlist, WishlistCreate, WishlistItem};
use crate::wishlist_actor::{WishlistAction, WishlistError};

/// Client for the wishlist actor. Like the cart, a user's wishlist is
/// created on first use.
#[derive(Clone)]
pub struct WishlistClient {
    inner: ResourceClient<Wishlist>,
}

impl_basic_client!(WishlistClient, Wishlist, WishlistError, wishlist);

/// The wishlist entry a product turns into.
pub fn wishlist_snapshot(product: &Product) -> WishlistItem {
    WishlistItem {
        product_id: product.id.clone(),
        title: product.title.clone(),
        price: product.display_price(),
        discount: product.discount,
        seller_id: product.seller_id.clone(),
        stock: product.stock,
        units: product.units.clone(),
        added_at: Utc::now(),
    }
}

impl WishlistClient {
    #[instrument(skip(self))]
    pub async fn wishlist_for(&self, user_id: String) -> Result<Wishlist, WishlistError> {
        debug!("Sending request");
        if let Some(wishlist) = self.inner.get(user_id.clone()).await? {
            return Ok(wishlist);
        }
        match self.inner.create(WishlistCreate { user_id: user_id.clone() }).await {
            Ok(_) | Err(FrameworkError::AlreadyExists(_)) => {}
            Err(e) => return Err(e.into()),
        }
        self.require_wishlist(user_id).await
    }

    async fn apply(&self, user_id: String, action: WishlistAction) -> Result<Vec<WishlistItem>, WishlistError> {
        self.wishlist_for(user_id.clone()).await?;
        Ok(self.inner.perform_action(user_id, action).await?)
    }

    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub async fn add(&self, user_id: String, product: &Product) -> Result<Vec<WishlistItem>, WishlistError> {
        debug!("Sending request");
        self.apply(user_id, WishlistAction::Add(wishlist_snapshot(product))).await
    }

    #[instrument(skip(self))]
    pub async fn remove(&self, user_id: String, product_id: String) -> Result<Vec<WishlistItem>, WishlistError> {
        debug!("Sending request");
        self.apply(user_id, WishlistAction::Remove(product_id)).await
    }

    #[instrument(skip(self))]
    pub async fn clear(&self, user_id: String) -> Result<Vec<WishlistItem>, WishlistError> {
        debug!("Sending request");
        self.apply(user_id, WishlistAction::Clear).await
    }

    /// Overwrites the stored list with a client's local copy.
    #[instrument(skip(self, items), fields(count = items.len()))]
    pub async fn sync(&self, user_id: String, items: Vec<WishlistItem>) -> Result<Vec<WishlistItem>, WishlistError> {
        debug!("Sending request");
        self.apply(user_id, WishlistAction::Replace(items)).await
    }

    /// Adds the saved product to the cart at today's catalog price, then
    /// drops it from the wishlist. A cart refusal leaves the wishlist alone.
    #[instrument(skip(self, carts, products))]
    pub async fn move_to_cart(
        &self,
        user_id: String,
        product_id: String,
        carts: &CartClient,
        products: &ProductClient,
    ) -> Result<CartUpdate, WishlistError> {
        let product = products
            .get_product(product_id.clone())
            .await
            .map_err(|e| WishlistError::ActorCommunicationError(e.to_string()))?
            .ok_or_else(|| WishlistError::InvalidProduct(product_id.clone()))?;
        let update = carts.add_item(user_id.clone(), &product).await?;
        self.remove(user_id, product_id.clone()).await?;
        info!(product_id = %product_id, "Moved from wishlist to cart");
        Ok(update)
    }
}
