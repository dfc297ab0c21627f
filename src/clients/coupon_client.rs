use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument};

use crate::actor_framework::{Filter, ResourceClient};
use crate::coupon_actor::{normalize_code, CouponAction, CouponActionResult, CouponError};
use crate::domain::{Coupon, CouponCreate, CouponPatch, CouponQuote};

#[derive(Clone)]
pub struct CouponClient {
    inner: ResourceClient<Coupon>,
}

impl_basic_client!(CouponClient, Coupon, CouponError, coupon);

fn unexpected(result: CouponActionResult) -> CouponError {
    CouponError::ActorCommunicationError(format!("Unexpected result: {result:?}"))
}

impl CouponClient {
    #[instrument(skip(self, payload), fields(code = %payload.code))]
    pub async fn create_coupon(&self, payload: CouponCreate) -> Result<String, CouponError> {
        debug!("Sending request");
        let code = self.inner.create(payload).await?;
        info!(code = %code, "Coupon created");
        Ok(code)
    }

    /// Checks a code against an order value without using it up.
    #[instrument(skip(self))]
    pub async fn quote(&self, code: String, order_value: f64, now: DateTime<Utc>) -> Result<CouponQuote, CouponError> {
        debug!("Sending request");
        if !(order_value > 0.0) {
            return Err(CouponError::InvalidOrderValue);
        }
        let code = normalize_code(&code);
        if code.is_empty() {
            return Err(CouponError::ValidationError("Coupon code is required".into()));
        }
        match self.inner.perform_action(code, CouponAction::Quote { order_value, now }).await? {
            CouponActionResult::Quote(quote) => Ok(quote),
            other => Err(unexpected(other)),
        }
    }

    /// Counts one use; returns the new usage count.
    #[instrument(skip(self))]
    pub async fn redeem(&self, code: String) -> Result<u32, CouponError> {
        debug!("Sending request");
        match self.inner.perform_action(normalize_code(&code), CouponAction::Redeem).await? {
            CouponActionResult::Redeemed { used_count } => Ok(used_count),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn update_coupon(&self, code: String, patch: CouponPatch) -> Result<Coupon, CouponError> {
        debug!("Sending request");
        Ok(self.inner.update(normalize_code(&code), patch).await?)
    }

    #[instrument(skip(self))]
    pub async fn list_coupons(&self, active_only: bool) -> Result<Vec<Coupon>, CouponError> {
        debug!("Sending request");
        let filter = if active_only { Filter::new(|c: &Coupon| c.is_active) } else { Filter::all() };
        let mut coupons = self.inner.list(filter).await?;
        coupons.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(coupons)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor_framework::{sequential_ids, ResourceActor};
    use crate::domain::DiscountType;
    use chrono::Duration;

    fn spawn() -> CouponClient {
        let (actor, client) = ResourceActor::new("coupon", 16, sequential_ids("coupon"));
        tokio::spawn(actor.run());
        CouponClient::new(client)
    }

    fn welcome(code: &str) -> CouponCreate {
        let now = Utc::now();
        CouponCreate {
            code: code.into(),
            name: "Welcome".into(),
            discount_type: DiscountType::Percentage,
            discount_value: 5.0,
            valid_from: now - Duration::days(1),
            valid_until: now + Duration::days(30),
            is_active: true,
            usage_limit: Some(2),
            min_order_value: None,
            max_discount_amount: None,
        }
    }

    #[tokio::test]
    async fn codes_are_case_insensitive_and_unique() {
        let coupons = spawn();
        assert_eq!(coupons.create_coupon(welcome("welcome5")).await.unwrap(), "WELCOME5");
        assert_eq!(
            coupons.create_coupon(welcome("Welcome5")).await.unwrap_err(),
            CouponError::AlreadyExists("WELCOME5".into())
        );

        let quote = coupons.quote("welcome5".into(), 10_000.0, Utc::now()).await.unwrap();
        assert_eq!(quote.discount_amount, 500.0);
    }

    #[tokio::test]
    async fn redeem_stops_at_the_limit() {
        let coupons = spawn();
        coupons.create_coupon(welcome("TWICE")).await.unwrap();
        assert_eq!(coupons.redeem("twice".into()).await.unwrap(), 1);
        assert_eq!(coupons.redeem("twice".into()).await.unwrap(), 2);
        assert_eq!(coupons.redeem("twice".into()).await.unwrap_err(), CouponError::UsageLimitReached);
    }

    #[tokio::test]
    async fn unknown_codes_and_deactivation() {
        let coupons = spawn();
        assert_eq!(
            coupons.quote("NOPE".into(), 100.0, Utc::now()).await.unwrap_err(),
            CouponError::NotFound("NOPE".into())
        );

        coupons.create_coupon(welcome("PAUSED")).await.unwrap();
        coupons
            .update_coupon("paused".into(), CouponPatch { is_active: Some(false), ..Default::default() })
            .await
            .unwrap();
        assert_eq!(coupons.quote("PAUSED".into(), 100.0, Utc::now()).await.unwrap_err(), CouponError::Inactive);
        assert!(coupons.list_coupons(true).await.unwrap().is_empty());
        assert_eq!(coupons.list_coupons(false).await.unwrap().len(), 1);
    }
}
