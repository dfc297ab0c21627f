use chrono::Utc;

use crate::actor_framework::Entity;
use crate::domain::{Cart, CartCreate, CartItem};
use super::actions::{CartAction, CartUpdate, LiveStock, StockAdjustment};
use super::error::CartError;

impl Cart {
    fn line_mut(&mut self, product_id: &str) -> Result<&mut CartItem, CartError> {
        self.items
            .iter_mut()
            .find(|item| item.product_id == product_id)
            .ok_or_else(|| CartError::ItemNotInCart(product_id.to_string()))
    }

    fn add_item(&mut self, snapshot: CartItem) -> Result<(), CartError> {
        if snapshot.stock == 0 {
            return Err(CartError::OutOfStock { title: snapshot.title });
        }
        if let Some(existing) = self.items.iter_mut().find(|i| i.product_id == snapshot.product_id) {
            existing.stock = snapshot.stock;
            existing.price = snapshot.price;
            if existing.quantity >= existing.stock {
                return Err(CartError::StockLimitReached {
                    title: existing.title.clone(),
                    stock: existing.stock,
                });
            }
            existing.quantity += 1;
            return Ok(());
        }
        self.items.push(CartItem { quantity: 1, ..snapshot });
        Ok(())
    }

    fn increase(&mut self, product_id: &str) -> Result<(), CartError> {
        let line = self.line_mut(product_id)?;
        if line.quantity >= line.stock {
            return Err(CartError::StockLimitReached { title: line.title.clone(), stock: line.stock });
        }
        line.quantity += 1;
        Ok(())
    }

    /// Never drops below one; removal is explicit.
    fn decrease(&mut self, product_id: &str) -> Result<(), CartError> {
        let line = self.line_mut(product_id)?;
        if line.quantity > 1 {
            line.quantity -= 1;
        }
        Ok(())
    }

    fn remove(&mut self, product_id: &str) -> Result<(), CartError> {
        let before = self.items.len();
        self.items.retain(|item| item.product_id != product_id);
        if self.items.len() == before {
            return Err(CartError::ItemNotInCart(product_id.to_string()));
        }
        Ok(())
    }

    fn decrement_ordered(&mut self, ordered: &[(String, u32)]) {
        for (product_id, quantity) in ordered {
            if let Some(line) = self.items.iter_mut().find(|i| &i.product_id == product_id) {
                line.quantity = line.quantity.saturating_sub(*quantity);
            }
        }
        self.items.retain(|item| item.quantity > 0);
    }

    /// Brings cached stock and price in line with the catalog. Lines the
    /// catalog does not know about are left alone.
    pub fn reconcile(&mut self, live: &[LiveStock]) -> Vec<StockAdjustment> {
        let mut adjustments = Vec::new();
        self.items.retain_mut(|item| {
            let Some(fresh) = live.iter().find(|l| l.product_id == item.product_id) else {
                return true;
            };
            item.stock = fresh.stock;
            if fresh.stock == 0 {
                adjustments.push(StockAdjustment::Removed {
                    product_id: item.product_id.clone(),
                    title: item.title.clone(),
                });
                return false;
            }
            if item.quantity > fresh.stock {
                adjustments.push(StockAdjustment::Clamped {
                    product_id: item.product_id.clone(),
                    title: item.title.clone(),
                    from: item.quantity,
                    to: fresh.stock,
                });
                item.quantity = fresh.stock;
            }
            if (item.price - fresh.price).abs() > f64::EPSILON {
                adjustments.push(StockAdjustment::PriceChanged {
                    product_id: item.product_id.clone(),
                    title: item.title.clone(),
                    from: item.price,
                    to: fresh.price,
                });
                item.price = fresh.price;
            }
            true
        });
        adjustments
    }
}

impl Entity for Cart {
    type Id = String;
    type CreatePayload = CartCreate;
    type Patch = ();
    type Action = CartAction;
    type ActionResult = CartUpdate;
    type Error = CartError;

    fn id(&self) -> &String {
        &self.user_id
    }

    /// One cart per user, keyed by the user id.
    fn natural_key(payload: &CartCreate) -> Option<String> {
        Some(payload.user_id.clone())
    }

    fn from_create(id: String, _payload: CartCreate) -> Result<Self, CartError> {
        Ok(Self { user_id: id, items: Vec::new(), updated_at: Utc::now() })
    }

    fn on_update(&mut self, _patch: ()) -> Result<(), CartError> {
        Ok(())
    }

    fn handle_action(&mut self, action: CartAction) -> Result<CartUpdate, CartError> {
        let mut adjustments = Vec::new();
        match action {
            CartAction::AddItem(snapshot) => self.add_item(snapshot)?,
            CartAction::Increase(product_id) => self.increase(&product_id)?,
            CartAction::Decrease(product_id) => self.decrease(&product_id)?,
            CartAction::Remove(product_id) => self.remove(&product_id)?,
            CartAction::Clear => self.items.clear(),
            CartAction::DecrementOrdered(ordered) => self.decrement_ordered(&ordered),
            CartAction::Reconcile(live) => adjustments = self.reconcile(&live),
        }
        self.updated_at = Utc::now();
        Ok(CartUpdate { items: self.items.clone(), adjustments })
    }
}
