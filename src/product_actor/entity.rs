use crate::actor_framework::Entity;
use crate::domain::{Product, ProductCreate, ProductPatch};
use super::actions::{ProductAction, ProductActionResult};
use super::error::ProductError;

fn validate_price(price: f64) -> Result<(), ProductError> {
    if !price.is_finite() || price < 0.0 {
        return Err(ProductError::ValidationError(format!("price must be non-negative, got {price}")));
    }
    Ok(())
}

impl Entity for Product {
    type Id = String;
    type CreatePayload = ProductCreate;
    type Patch = ProductPatch;
    type Action = ProductAction;
    type ActionResult = ProductActionResult;
    type Error = ProductError;

    fn id(&self) -> &String {
        &self.id
    }

    fn from_create(id: String, params: ProductCreate) -> Result<Self, ProductError> {
        if params.title.trim().is_empty() {
            return Err(ProductError::ValidationError("title is required".into()));
        }
        if params.seller_id.trim().is_empty() {
            return Err(ProductError::ValidationError("seller is required".into()));
        }
        validate_price(params.price)?;
        if let Some(final_price) = params.final_price {
            validate_price(final_price)?;
        }
        Ok(Self {
            id,
            title: params.title,
            seller_id: params.seller_id,
            price: params.price,
            final_price: params.final_price,
            discount: params.discount,
            stock: params.stock,
            units: params.units,
        })
    }

    /// Updates pricing and stock.
    fn on_update(&mut self, patch: ProductPatch) -> Result<(), ProductError> {
        if let Some(price) = patch.price {
            validate_price(price)?;
            self.price = price;
        }
        if let Some(final_price) = patch.final_price {
            if let Some(value) = final_price {
                validate_price(value)?;
            }
            self.final_price = final_price;
        }
        if let Some(discount) = patch.discount {
            self.discount = discount;
        }
        if let Some(stock) = patch.stock {
            self.stock = stock;
        }
        Ok(())
    }

    /// # Errors
    /// Reserving more than the available stock, or a zero quantity.
    fn handle_action(&mut self, action: ProductAction) -> Result<ProductActionResult, ProductError> {
        match action {
            ProductAction::CheckStock => Ok(ProductActionResult::StockLevel(self.stock)),
            ProductAction::ReserveStock(0) | ProductAction::ReleaseStock(0) => {
                Err(ProductError::InvalidQuantity(0))
            }
            ProductAction::ReserveStock(amount) => {
                if amount > self.stock {
                    return Err(ProductError::InsufficientStock {
                        requested: amount,
                        available: self.stock,
                    });
                }
                self.stock -= amount;
                Ok(ProductActionResult::Reserved { remaining: self.stock })
            }
            ProductAction::ReleaseStock(amount) => {
                self.stock = self.stock.saturating_add(amount);
                Ok(ProductActionResult::Released { remaining: self.stock })
            }
        }
    }
}
