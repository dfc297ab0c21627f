use tracing::{debug, info, instrument};

use crate::actor_framework::{Filter, ResourceClient};
use crate::domain::{Quotation, QuotationCreate, QuotationStatus};
use crate::quotation_actor::{newest_first, run_query, QuotationAction, QuotationError, QuotationPage, QuotationQuery};

/// Client for the quotation actor. Buyers request and settle quotes, sellers
/// respond, admins can do either and override the status outright.
#[derive(Clone)]
pub struct QuotationClient {
    inner: ResourceClient<Quotation>,
}

impl_basic_client!(QuotationClient, Quotation, QuotationError, quotation);

impl QuotationClient {
    #[instrument(skip(self, request), fields(product_id = %request.product_id))]
    pub async fn request_quotation(&self, request: QuotationCreate) -> Result<Quotation, QuotationError> {
        debug!("Sending request");
        let id = self.inner.create(request).await?;
        info!(quotation_id = %id, "Quotation requested");
        self.require_quotation(id).await
    }

    #[instrument(skip(self, response))]
    pub async fn respond(
        &self,
        id: String,
        seller_id: String,
        quoted_price: f64,
        response: String,
    ) -> Result<Quotation, QuotationError> {
        debug!("Sending request");
        let action = QuotationAction::Respond { seller_id: Some(seller_id), quoted_price, response };
        Ok(self.inner.perform_action(id, action).await?)
    }

    /// Admin answering on the seller's behalf.
    #[instrument(skip(self, response))]
    pub async fn admin_respond(&self, id: String, quoted_price: f64, response: String) -> Result<Quotation, QuotationError> {
        debug!("Sending request");
        let action = QuotationAction::Respond { seller_id: None, quoted_price, response };
        Ok(self.inner.perform_action(id, action).await?)
    }

    #[instrument(skip(self))]
    pub async fn accept(&self, id: String, user_id: String) -> Result<Quotation, QuotationError> {
        debug!("Sending request");
        Ok(self.inner.perform_action(id, QuotationAction::Accept { user_id }).await?)
    }

    #[instrument(skip(self))]
    pub async fn reject(&self, id: String, user_id: String, reason: Option<String>) -> Result<Quotation, QuotationError> {
        debug!("Sending request");
        Ok(self.inner.perform_action(id, QuotationAction::Reject { user_id, reason }).await?)
    }

    #[instrument(skip(self))]
    pub async fn override_status(
        &self,
        id: String,
        status: QuotationStatus,
        admin_notes: Option<String>,
    ) -> Result<Quotation, QuotationError> {
        debug!("Sending request");
        Ok(self.inner.perform_action(id, QuotationAction::Override { status, admin_notes }).await?)
    }

    #[instrument(skip(self))]
    pub async fn list_for_customer(&self, user_id: String) -> Result<Vec<Quotation>, QuotationError> {
        debug!("Sending request");
        let filter = Filter::new(move |q: &Quotation| q.user_id.as_deref() == Some(user_id.as_str()));
        let mut items = self.inner.list(filter).await?;
        newest_first(&mut items);
        Ok(items)
    }

    #[instrument(skip(self))]
    pub async fn list_for_seller(&self, seller_id: String) -> Result<Vec<Quotation>, QuotationError> {
        debug!("Sending request");
        let mut items = self.inner.list(Filter::new(move |q: &Quotation| q.seller_id == seller_id)).await?;
        newest_first(&mut items);
        Ok(items)
    }

    #[instrument(skip(self))]
    pub async fn admin_query(&self, query: QuotationQuery) -> Result<QuotationPage, QuotationError> {
        debug!("Sending request");
        let all = self.inner.list(Filter::all()).await?;
        Ok(run_query(all, &query))
    }
}
