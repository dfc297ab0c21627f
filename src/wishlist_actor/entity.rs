use chrono::Utc;

use crate::actor_framework::Entity;
use crate::domain::{Wishlist, WishlistCreate, WishlistItem};
use super::actions::WishlistAction;
use super::error::WishlistError;

fn validate_item(item: &WishlistItem) -> Result<(), WishlistError> {
    if item.product_id.trim().is_empty() {
        return Err(WishlistError::InvalidItem("productId is required".into()));
    }
    if item.title.trim().is_empty() {
        return Err(WishlistError::InvalidItem(format!("title is required for {}", item.product_id)));
    }
    if !item.price.is_finite() || item.price < 0.0 {
        return Err(WishlistError::InvalidItem(format!("invalid price for {}", item.product_id)));
    }
    Ok(())
}

impl Wishlist {
    fn add(&mut self, item: WishlistItem) -> Result<(), WishlistError> {
        validate_item(&item)?;
        if !self.contains(&item.product_id) {
            self.items.push(item);
        }
        Ok(())
    }

    /// Later duplicates of a product id are dropped.
    fn replace(&mut self, items: Vec<WishlistItem>) -> Result<(), WishlistError> {
        let mut next: Vec<WishlistItem> = Vec::with_capacity(items.len());
        for item in items {
            validate_item(&item)?;
            if !next.iter().any(|kept| kept.product_id == item.product_id) {
                next.push(item);
            }
        }
        self.items = next;
        Ok(())
    }
}

impl Entity for Wishlist {
    type Id = String;
    type CreatePayload = WishlistCreate;
    type Patch = ();
    type Action = WishlistAction;
    type ActionResult = Vec<WishlistItem>;
    type Error = WishlistError;

    fn id(&self) -> &String {
        &self.user_id
    }

    /// One wishlist per user, keyed by the user id.
    fn natural_key(payload: &WishlistCreate) -> Option<String> {
        Some(payload.user_id.clone())
    }

    fn from_create(id: String, _payload: WishlistCreate) -> Result<Self, WishlistError> {
        Ok(Self { user_id: id, items: Vec::new(), updated_at: Utc::now() })
    }

    fn on_update(&mut self, _patch: ()) -> Result<(), WishlistError> {
        Ok(())
    }

    fn handle_action(&mut self, action: WishlistAction) -> Result<Vec<WishlistItem>, WishlistError> {
        match action {
            WishlistAction::Add(item) => self.add(item)?,
            // removing something that is not saved is not an error
            WishlistAction::Remove(product_id) => self.items.retain(|item| item.product_id != product_id),
            WishlistAction::Clear => self.items.clear(),
            WishlistAction::Replace(items) => self.replace(items)?,
        }
        self.updated_at = Utc::now();
        Ok(self.items.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(product_id: &str) -> WishlistItem {
        WishlistItem {
            product_id: product_id.into(),
            title: format!("Title {product_id}"),
            price: 250.0,
            discount: 0.0,
            seller_id: "seller_1".into(),
            stock: 4,
            units: None,
            added_at: Utc::now(),
        }
    }

    fn empty() -> Wishlist {
        Wishlist::from_create("buyer_1".into(), WishlistCreate { user_id: "buyer_1".into() }).unwrap()
    }

    #[test]
    fn adding_twice_keeps_one_entry() {
        let mut wishlist = empty();
        wishlist.handle_action(WishlistAction::Add(item("p1"))).unwrap();
        let items = wishlist.handle_action(WishlistAction::Add(item("p1"))).unwrap();
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn remove_and_clear() {
        let mut wishlist = empty();
        wishlist.handle_action(WishlistAction::Add(item("p1"))).unwrap();
        wishlist.handle_action(WishlistAction::Add(item("p2"))).unwrap();

        let items = wishlist.handle_action(WishlistAction::Remove("p1".into())).unwrap();
        assert_eq!(items.iter().map(|i| i.product_id.as_str()).collect::<Vec<_>>(), ["p2"]);
        assert_eq!(wishlist.handle_action(WishlistAction::Remove("p9".into())).unwrap().len(), 1);

        assert!(wishlist.handle_action(WishlistAction::Clear).unwrap().is_empty());
    }

    #[test]
    fn replace_drops_duplicates_and_rejects_bad_items() {
        let mut wishlist = empty();
        let items = wishlist
            .handle_action(WishlistAction::Replace(vec![item("p1"), item("p2"), item("p1")]))
            .unwrap();
        assert_eq!(items.len(), 2);

        let mut nameless = item("p3");
        nameless.title = " ".into();
        assert_eq!(
            wishlist.handle_action(WishlistAction::Replace(vec![item("p4"), nameless])).unwrap_err(),
            WishlistError::InvalidItem("title is required for p3".into())
        );
    }
}
