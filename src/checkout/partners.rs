//! Warehouse and logistics partners offered at checkout, with their flat charges.

use serde::Serialize;

pub const WAREHOUSE_CHARGE: f64 = 8000.0;
pub const LOGISTICS_CHARGE: f64 = 6000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PartnerKind {
    Warehouse,
    Logistics,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ServicePartner {
    pub id: &'static str,
    pub name: &'static str,
    pub kind: PartnerKind,
    pub charge: f64,
}

const fn warehouse(id: &'static str, name: &'static str) -> ServicePartner {
    ServicePartner { id, name, kind: PartnerKind::Warehouse, charge: WAREHOUSE_CHARGE }
}

const fn logistics(id: &'static str, name: &'static str) -> ServicePartner {
    ServicePartner { id, name, kind: PartnerKind::Logistics, charge: LOGISTICS_CHARGE }
}

pub const WAREHOUSE_PARTNERS: &[ServicePartner] = &[
    warehouse("aaj1", "AAJ Supply Chain"),
    warehouse("mahindra1", "Mahindra Logistics"),
    warehouse("shiprocket1", "Shiprocket"),
    warehouse("holisol1", "Holisol Logistics"),
    warehouse("pingo1", "Pingo"),
    warehouse("tvs1", "TVS Supply Chain"),
    warehouse("warehousing1", "Warehousing Express"),
    warehouse("warehouse-now1", "Warehouse Now"),
    warehouse("etrezi1", "Etrezi"),
];

pub const LOGISTICS_PARTNERS: &[ServicePartner] = &[
    logistics("bluedart1", "Blue Dart"),
    logistics("delhivery1", "Delhivery"),
    logistics("fedex1", "FedEx"),
    logistics("ekart1", "Ekart"),
    logistics("ecomexpress1", "Ecom Express"),
    logistics("dhl1", "DHL"),
    logistics("shadowfax1", "Shadowfax"),
    logistics("gati1", "GATI"),
    logistics("safeexpress1", "Safeexpress"),
    logistics("fmlogistic1", "FM Logistic"),
    logistics("dtdc1", "DTDC"),
    logistics("xpressbees1", "Xpressbees"),
];

pub fn find_partner(kind: PartnerKind, id: &str) -> Option<&'static ServicePartner> {
    let partners = match kind {
        PartnerKind::Warehouse => WAREHOUSE_PARTNERS,
        PartnerKind::Logistics => LOGISTICS_PARTNERS,
    };
    partners.iter().find(|partner| partner.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_are_scoped_by_kind() {
        assert_eq!(find_partner(PartnerKind::Warehouse, "tvs1").map(|p| p.charge), Some(8000.0));
        assert_eq!(find_partner(PartnerKind::Logistics, "dhl1").map(|p| p.charge), Some(6000.0));
        assert!(find_partner(PartnerKind::Logistics, "tvs1").is_none());
    }
}
