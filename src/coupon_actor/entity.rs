use chrono::{DateTime, Utc};

use crate::actor_framework::Entity;
use crate::domain::{Coupon, CouponCreate, CouponPatch, CouponQuote, DiscountType};
use crate::pricing::round2;
use super::actions::{CouponAction, CouponActionResult};
use super::error::CouponError;

pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

fn validate_discount(discount_type: DiscountType, value: f64) -> Result<(), CouponError> {
    match discount_type {
        DiscountType::Percentage if !(0.0..=100.0).contains(&value) => Err(CouponError::ValidationError(
            "Percentage discount must be between 0 and 100".into(),
        )),
        DiscountType::Fixed if !(value >= 0.0) => Err(CouponError::ValidationError(
            "Fixed discount cannot be negative".into(),
        )),
        _ => Ok(()),
    }
}

fn validate_window(from: DateTime<Utc>, until: DateTime<Utc>) -> Result<(), CouponError> {
    if from >= until {
        return Err(CouponError::ValidationError("validFrom must be before validUntil".into()));
    }
    Ok(())
}

impl Coupon {
    fn check_usable(&self, now: DateTime<Utc>) -> Result<(), CouponError> {
        if !self.is_active {
            return Err(CouponError::Inactive);
        }
        if now < self.valid_from {
            return Err(CouponError::NotYetValid);
        }
        if now > self.valid_until {
            return Err(CouponError::Expired);
        }
        if let Some(limit) = self.usage_limit {
            if self.used_count >= limit {
                return Err(CouponError::UsageLimitReached);
            }
        }
        Ok(())
    }

    /// Percentage or fixed discount, capped by the coupon's maximum and then
    /// by the order value itself.
    pub fn quote(&self, order_value: f64, now: DateTime<Utc>) -> Result<CouponQuote, CouponError> {
        if !(order_value > 0.0) {
            return Err(CouponError::InvalidOrderValue);
        }
        self.check_usable(now)?;
        if let Some(min) = self.min_order_value {
            if order_value < min {
                return Err(CouponError::BelowMinimumOrder(min));
            }
        }

        let mut discount = match self.discount_type {
            DiscountType::Percentage => order_value * self.discount_value / 100.0,
            DiscountType::Fixed => self.discount_value,
        };
        if let Some(max) = self.max_discount_amount {
            discount = discount.min(max);
        }
        discount = discount.min(order_value);

        Ok(CouponQuote {
            code: self.code.clone(),
            name: self.name.clone(),
            discount_type: self.discount_type,
            discount_value: self.discount_value,
            discount_amount: round2(discount),
        })
    }
}

impl Entity for Coupon {
    type Id = String;
    type CreatePayload = CouponCreate;
    type Patch = CouponPatch;
    type Action = CouponAction;
    type ActionResult = CouponActionResult;
    type Error = CouponError;

    fn id(&self) -> &String {
        &self.code
    }

    fn natural_key(payload: &CouponCreate) -> Option<String> {
        Some(normalize_code(&payload.code))
    }

    fn from_create(code: String, params: CouponCreate) -> Result<Self, CouponError> {
        if code.is_empty() || params.name.trim().is_empty() {
            return Err(CouponError::ValidationError("Missing required fields".into()));
        }
        validate_discount(params.discount_type, params.discount_value)?;
        validate_window(params.valid_from, params.valid_until)?;
        Ok(Self {
            code,
            name: params.name,
            discount_type: params.discount_type,
            discount_value: params.discount_value,
            valid_from: params.valid_from,
            valid_until: params.valid_until,
            is_active: params.is_active,
            usage_limit: params.usage_limit,
            used_count: 0,
            min_order_value: params.min_order_value,
            max_discount_amount: params.max_discount_amount,
        })
    }

    fn on_update(&mut self, patch: CouponPatch) -> Result<(), CouponError> {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(is_active) = patch.is_active {
            self.is_active = is_active;
        }
        if let Some(valid_from) = patch.valid_from {
            self.valid_from = valid_from;
        }
        if let Some(valid_until) = patch.valid_until {
            self.valid_until = valid_until;
        }
        if let Some(usage_limit) = patch.usage_limit {
            self.usage_limit = usage_limit;
        }
        if let Some(min_order_value) = patch.min_order_value {
            self.min_order_value = min_order_value;
        }
        if let Some(max_discount_amount) = patch.max_discount_amount {
            self.max_discount_amount = max_discount_amount;
        }
        validate_window(self.valid_from, self.valid_until)
    }

    fn handle_action(&mut self, action: CouponAction) -> Result<CouponActionResult, CouponError> {
        match action {
            CouponAction::Quote { order_value, now } => Ok(CouponActionResult::Quote(self.quote(order_value, now)?)),
            CouponAction::Redeem => {
                if let Some(limit) = self.usage_limit {
                    if self.used_count >= limit {
                        return Err(CouponError::UsageLimitReached);
                    }
                }
                self.used_count += 1;
                Ok(CouponActionResult::Redeemed { used_count: self.used_count })
            }
        }
    }
}
