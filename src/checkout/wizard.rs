use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::{BillingDetails, CartItem, CouponQuote, DraftLine, OrderDraft, PaymentDetails, PaymentMethod};
use crate::pricing::OrderTotals;
use super::error::CheckoutError;
use super::partners::{find_partner, PartnerKind};
use super::step::CheckoutStep;

static BILLING_EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern is valid"));

const METRO_PREFIXES: &[(&str, &str)] = &[
    ("110", "Delhi"),
    ("400", "Mumbai"),
    ("560", "Bengaluru"),
    ("600", "Chennai"),
    ("700", "Kolkata"),
    ("500", "Hyderabad"),
    ("411", "Pune"),
    ("380", "Ahmedabad"),
];

/// Returns the metro city a pincode delivers to.
pub fn serviceable_city(pincode: &str) -> Result<&'static str, CheckoutError> {
    let pincode = pincode.trim();
    if pincode.len() != 6 || !pincode.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CheckoutError::Pincode("Please enter a valid 6-digit pincode.".into()));
    }
    METRO_PREFIXES
        .iter()
        .find(|(prefix, _)| pincode.starts_with(prefix))
        .map(|(_, city)| *city)
        .ok_or_else(|| {
            CheckoutError::Pincode(
                "Pincode is not available for delivery of products. We will start service soon.".into(),
            )
        })
}

fn validate_billing(details: &BillingDetails) -> Result<(), CheckoutError> {
    let required = [
        ("firstName", &details.first_name),
        ("lastName", &details.last_name),
        ("address", &details.address),
        ("country", &details.country),
        ("state", &details.state),
        ("city", &details.city),
        ("zipCode", &details.zip_code),
        ("email", &details.email),
        ("phoneNumber", &details.phone_number),
    ];
    let missing: Vec<&str> = required
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();
    if !missing.is_empty() {
        return Err(CheckoutError::Validation(format!("Missing required fields: {}", missing.join(", "))));
    }
    if !BILLING_EMAIL_RE.is_match(&details.email) {
        return Err(CheckoutError::Validation("Email is invalid".into()));
    }
    Ok(())
}

/// Explicit checkout state: which stage is active, which sections are open,
/// and everything the buyer has entered so far.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutWizard {
    current_step: CheckoutStep,
    expanded: BTreeSet<CheckoutStep>,
    billing: Option<BillingDetails>,
    delivery_city: Option<String>,
    wants_warehouse: bool,
    wants_logistics: bool,
    warehouse_id: Option<String>,
    logistics_id: Option<String>,
    payment_method: Option<PaymentMethod>,
    payment_details: Option<PaymentDetails>,
    additional_notes: String,
    coupon: Option<CouponQuote>,
}

impl Default for CheckoutWizard {
    fn default() -> Self {
        Self {
            current_step: CheckoutStep::Billing,
            expanded: BTreeSet::from([CheckoutStep::Billing]),
            billing: None,
            delivery_city: None,
            wants_warehouse: false,
            wants_logistics: false,
            warehouse_id: None,
            logistics_id: None,
            payment_method: None,
            payment_details: None,
            additional_notes: String::new(),
            coupon: None,
        }
    }
}

impl CheckoutWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_step(&self) -> CheckoutStep {
        self.current_step
    }

    pub fn is_expanded(&self, step: CheckoutStep) -> bool {
        self.expanded.contains(&step)
    }

    pub fn billing(&self) -> Option<&BillingDetails> {
        self.billing.as_ref()
    }

    pub fn delivery_city(&self) -> Option<&str> {
        self.delivery_city.as_deref()
    }

    pub fn warehouse_id(&self) -> Option<&str> {
        self.warehouse_id.as_deref()
    }

    pub fn logistics_id(&self) -> Option<&str> {
        self.logistics_id.as_deref()
    }

    pub fn payment_method(&self) -> Option<PaymentMethod> {
        self.payment_method
    }

    pub fn additional_notes(&self) -> &str {
        &self.additional_notes
    }

    pub fn coupon(&self) -> Option<&CouponQuote> {
        self.coupon.as_ref()
    }

    fn ensure_active(&self, step: CheckoutStep) -> Result<(), CheckoutError> {
        if self.current_step != step {
            return Err(CheckoutError::StepNotActive { attempted: step, current: self.current_step });
        }
        Ok(())
    }

    // The finished section folds away and the next one opens.
    fn advance(&mut self, next: CheckoutStep) {
        self.expanded.remove(&self.current_step);
        self.expanded.insert(next);
        self.current_step = next;
    }

    fn step_after_services(&self) -> CheckoutStep {
        if self.wants_warehouse {
            CheckoutStep::Warehouse
        } else if self.wants_logistics {
            CheckoutStep::Logistics
        } else {
            CheckoutStep::Payment
        }
    }

    pub fn submit_billing(&mut self, details: BillingDetails) -> Result<CheckoutStep, CheckoutError> {
        self.ensure_active(CheckoutStep::Billing)?;
        validate_billing(&details)?;
        let city = serviceable_city(&details.zip_code)?;
        self.delivery_city = Some(city.to_string());
        self.billing = Some(details);
        self.advance(CheckoutStep::AdditionalServices);
        Ok(self.current_step)
    }

    pub fn submit_services(&mut self, warehouse: bool, logistics: bool) -> Result<CheckoutStep, CheckoutError> {
        self.ensure_active(CheckoutStep::AdditionalServices)?;
        self.wants_warehouse = warehouse;
        self.wants_logistics = logistics;
        if !warehouse {
            self.warehouse_id = None;
        }
        if !logistics {
            self.logistics_id = None;
        }
        self.advance(self.step_after_services());
        Ok(self.current_step)
    }

    pub fn select_warehouse(&mut self, id: &str) -> Result<CheckoutStep, CheckoutError> {
        self.ensure_active(CheckoutStep::Warehouse)?;
        let partner = find_partner(PartnerKind::Warehouse, id).ok_or_else(|| CheckoutError::UnknownPartner(id.into()))?;
        self.warehouse_id = Some(partner.id.to_string());
        let next = if self.wants_logistics { CheckoutStep::Logistics } else { CheckoutStep::Payment };
        self.advance(next);
        Ok(self.current_step)
    }

    pub fn select_logistics(&mut self, id: &str) -> Result<CheckoutStep, CheckoutError> {
        self.ensure_active(CheckoutStep::Logistics)?;
        let partner = find_partner(PartnerKind::Logistics, id).ok_or_else(|| CheckoutError::UnknownPartner(id.into()))?;
        self.logistics_id = Some(partner.id.to_string());
        self.advance(CheckoutStep::Payment);
        Ok(self.current_step)
    }

    /// Online payment only counts once the gateway references are in hand.
    pub fn select_payment(
        &mut self,
        method: PaymentMethod,
        details: Option<PaymentDetails>,
    ) -> Result<CheckoutStep, CheckoutError> {
        self.ensure_active(CheckoutStep::Payment)?;
        if method == PaymentMethod::Online && details.is_none() {
            return Err(CheckoutError::PaymentDetailsRequired);
        }
        self.payment_method = Some(method);
        self.payment_details = match method {
            PaymentMethod::Online => details,
            PaymentMethod::Cod => None,
        };
        self.advance(CheckoutStep::AdditionalInfo);
        Ok(self.current_step)
    }

    pub fn submit_additional_info(&mut self, notes: impl Into<String>) -> Result<CheckoutStep, CheckoutError> {
        self.ensure_active(CheckoutStep::AdditionalInfo)?;
        self.additional_notes = notes.into();
        self.advance(CheckoutStep::Review);
        Ok(self.current_step)
    }

    /// Opens or folds a section the buyer already finished.
    pub fn toggle_section(&mut self, step: CheckoutStep) -> Result<bool, CheckoutError> {
        if step >= self.current_step {
            return Err(CheckoutError::StepNotCompleted { attempted: step });
        }
        if !self.expanded.remove(&step) {
            self.expanded.insert(step);
        }
        Ok(self.expanded.contains(&step))
    }

    pub fn apply_coupon(&mut self, quote: CouponQuote) {
        self.coupon = Some(quote);
    }

    pub fn remove_coupon(&mut self) -> Option<CouponQuote> {
        self.coupon.take()
    }

    pub fn is_complete(&self) -> bool {
        self.billing.is_some()
            && (!self.wants_warehouse || self.warehouse_id.is_some())
            && (!self.wants_logistics || self.logistics_id.is_some())
            && self.payment_method.is_some()
    }

    pub fn can_place_order(&self) -> bool {
        self.is_complete() && self.current_step == CheckoutStep::Review
    }

    /// Charges of the selected warehouse and logistics partners.
    pub fn service_charges(&self) -> f64 {
        let warehouse = self
            .warehouse_id
            .as_deref()
            .and_then(|id| find_partner(PartnerKind::Warehouse, id))
            .map_or(0.0, |p| p.charge);
        let logistics = self
            .logistics_id
            .as_deref()
            .and_then(|id| find_partner(PartnerKind::Logistics, id))
            .map_or(0.0, |p| p.charge);
        warehouse + logistics
    }

    fn coupon_discount(&self) -> f64 {
        self.coupon.as_ref().map_or(0.0, |quote| quote.discount_amount)
    }

    pub fn totals(&self, items: &[CartItem], tax_rate: f64) -> OrderTotals {
        OrderTotals::compute(
            items.iter().map(|item| (item.price, item.quantity)),
            self.coupon_discount(),
            self.service_charges(),
            tax_rate,
        )
    }

    /// The order request for the current cart. Fails unless the wizard has
    /// reached review with every required stage filled in.
    pub fn to_draft(&self, buyer_id: &str, items: &[CartItem]) -> Result<OrderDraft, CheckoutError> {
        if !self.can_place_order() {
            return Err(CheckoutError::Incomplete);
        }
        let (Some(billing), Some(payment_method)) = (self.billing.clone(), self.payment_method) else {
            return Err(CheckoutError::Incomplete);
        };
        Ok(OrderDraft {
            buyer_id: buyer_id.to_string(),
            lines: items
                .iter()
                .map(|item| DraftLine {
                    product_id: item.product_id.clone(),
                    title: item.title.clone(),
                    quantity: item.quantity,
                    price: item.price,
                })
                .collect(),
            billing,
            coupon_code: self.coupon.as_ref().map(|quote| quote.code.clone()),
            coupon_discount: self.coupon_discount(),
            shipping: self.service_charges(),
            warehouse_id: self.warehouse_id.clone(),
            logistics_id: self.logistics_id.clone(),
            payment_method,
            payment_details: self.payment_details.clone(),
            additional_notes: self.additional_notes.clone(),
        })
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::DiscountType;

    pub(crate) fn billing(zip: &str) -> BillingDetails {
        BillingDetails {
            first_name: "Meera".into(),
            last_name: "Iyer".into(),
            company_name: Some("Iyer Constructions".into()),
            address: "12 MG Road".into(),
            country: "India".into(),
            state: "Karnataka".into(),
            city: "Bengaluru".into(),
            zip_code: zip.into(),
            email: "meera@example.com".into(),
            phone_number: "9876501234".into(),
        }
    }

    fn item(price: f64, quantity: u32) -> CartItem {
        CartItem {
            product_id: "p1".into(),
            title: "Tiles".into(),
            price,
            discount: 0.0,
            stock: 100,
            quantity,
            units: None,
        }
    }

    #[test]
    fn happy_path_with_both_services() {
        let mut wizard = CheckoutWizard::new();
        assert_eq!(wizard.submit_billing(billing("560001")).unwrap(), CheckoutStep::AdditionalServices);
        assert_eq!(wizard.delivery_city(), Some("Bengaluru"));
        assert!(!wizard.is_expanded(CheckoutStep::Billing));
        assert!(wizard.is_expanded(CheckoutStep::AdditionalServices));

        assert_eq!(wizard.submit_services(true, true).unwrap(), CheckoutStep::Warehouse);
        assert_eq!(wizard.select_warehouse("tvs1").unwrap(), CheckoutStep::Logistics);
        assert_eq!(wizard.select_logistics("dhl1").unwrap(), CheckoutStep::Payment);
        assert!(!wizard.can_place_order());
        assert_eq!(wizard.select_payment(PaymentMethod::Cod, None).unwrap(), CheckoutStep::AdditionalInfo);
        assert!(wizard.is_complete());
        assert_eq!(wizard.submit_additional_info("Deliver after 10am").unwrap(), CheckoutStep::Review);
        assert!(wizard.can_place_order());
        assert_eq!(wizard.service_charges(), 14000.0);
    }

    #[test]
    fn services_skip_unrequested_steps() {
        let mut wizard = CheckoutWizard::new();
        wizard.submit_billing(billing("110001")).unwrap();
        assert_eq!(wizard.submit_services(false, true).unwrap(), CheckoutStep::Logistics);

        let mut wizard = CheckoutWizard::new();
        wizard.submit_billing(billing("110001")).unwrap();
        assert_eq!(wizard.submit_services(true, false).unwrap(), CheckoutStep::Warehouse);
        assert_eq!(wizard.select_warehouse("pingo1").unwrap(), CheckoutStep::Payment);

        let mut wizard = CheckoutWizard::new();
        wizard.submit_billing(billing("110001")).unwrap();
        assert_eq!(wizard.submit_services(false, false).unwrap(), CheckoutStep::Payment);
        assert_eq!(wizard.service_charges(), 0.0);
    }

    #[test]
    fn stages_only_accept_input_while_active() {
        let mut wizard = CheckoutWizard::new();
        assert!(matches!(
            wizard.select_payment(PaymentMethod::Cod, None),
            Err(CheckoutError::StepNotActive { attempted: CheckoutStep::Payment, current: CheckoutStep::Billing })
        ));
        wizard.submit_billing(billing("400001")).unwrap();
        assert!(matches!(wizard.submit_billing(billing("400001")), Err(CheckoutError::StepNotActive { .. })));
    }

    #[test]
    fn pincode_rules() {
        assert_eq!(serviceable_city("411045").unwrap(), "Pune");
        assert!(matches!(serviceable_city("41104"), Err(CheckoutError::Pincode(_))));
        assert!(matches!(serviceable_city("12345a"), Err(CheckoutError::Pincode(_))));
        let err = serviceable_city("682001").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Pincode is not available for delivery of products. We will start service soon."
        );
    }

    #[test]
    fn billing_validation() {
        let mut wizard = CheckoutWizard::new();
        let mut missing = billing("560001");
        missing.city = String::new();
        missing.phone_number = " ".into();
        assert_eq!(
            wizard.submit_billing(missing).unwrap_err().to_string(),
            "Missing required fields: city, phoneNumber"
        );

        let mut bad_email = billing("560001");
        bad_email.email = "meera.example.com".into();
        assert!(matches!(wizard.submit_billing(bad_email), Err(CheckoutError::Validation(_))));
        assert_eq!(wizard.current_step(), CheckoutStep::Billing);
    }

    #[test]
    fn online_payment_needs_details() {
        let mut wizard = CheckoutWizard::new();
        wizard.submit_billing(billing("600001")).unwrap();
        wizard.submit_services(false, false).unwrap();
        assert!(matches!(
            wizard.select_payment(PaymentMethod::Online, None),
            Err(CheckoutError::PaymentDetailsRequired)
        ));
        let details = PaymentDetails { payment_id: "pay_1".into(), order_id: "gw_1".into(), signature: "sig".into() };
        assert_eq!(wizard.select_payment(PaymentMethod::Online, Some(details)).unwrap(), CheckoutStep::AdditionalInfo);
    }

    #[test]
    fn only_finished_sections_toggle() {
        let mut wizard = CheckoutWizard::new();
        assert!(matches!(wizard.toggle_section(CheckoutStep::Billing), Err(CheckoutError::StepNotCompleted { .. })));
        wizard.submit_billing(billing("700001")).unwrap();
        assert!(wizard.toggle_section(CheckoutStep::Billing).unwrap());
        assert!(!wizard.toggle_section(CheckoutStep::Billing).unwrap());
        assert!(wizard.toggle_section(CheckoutStep::Payment).is_err());
    }

    #[test]
    fn totals_include_coupon_and_services() {
        let mut wizard = CheckoutWizard::new();
        wizard.submit_billing(billing("500001")).unwrap();
        wizard.submit_services(true, false).unwrap();
        wizard.select_warehouse("etrezi1").unwrap();
        wizard.apply_coupon(CouponQuote {
            code: "SAVE".into(),
            name: "Save".into(),
            discount_type: DiscountType::Fixed,
            discount_value: 1000.0,
            discount_amount: 1000.0,
        });

        let totals = wizard.totals(&[item(2500.0, 4)], 0.18);
        assert_eq!(totals.subtotal, 10000.0);
        assert_eq!(totals.tax, 1620.0);
        assert_eq!(totals.shipping, 8000.0);
        assert_eq!(totals.total, 18620.0);

        assert!(wizard.remove_coupon().is_some());
        assert_eq!(wizard.totals(&[item(2500.0, 4)], 0.18).discount, 0.0);
    }

    #[test]
    fn draft_requires_review() {
        let mut wizard = CheckoutWizard::new();
        assert!(matches!(wizard.to_draft("buyer_1", &[item(10.0, 1)]), Err(CheckoutError::Incomplete)));
        wizard.submit_billing(billing("380001")).unwrap();
        wizard.submit_services(false, false).unwrap();
        wizard.select_payment(PaymentMethod::Cod, None).unwrap();
        wizard.submit_additional_info("").unwrap();

        let draft = wizard.to_draft("buyer_1", &[item(10.0, 2)]).unwrap();
        assert_eq!(draft.lines[0].quantity, 2);
        assert_eq!(draft.shipping, 0.0);
        assert_eq!(draft.payment_method, PaymentMethod::Cod);
    }

    #[test]
    fn survives_a_json_round_trip() {
        let mut wizard = CheckoutWizard::new();
        wizard.submit_billing(billing("560001")).unwrap();
        let json = serde_json::to_string(&wizard).unwrap();
        let restored: CheckoutWizard = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, wizard);
    }
}
