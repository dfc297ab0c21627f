use serde::{Deserialize, Serialize};

use crate::domain::{Quotation, QuotationStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuotationSortKey {
    #[default]
    CreatedAt,
    UpdatedAt,
    RequestedPrice,
}

/// Admin listing parameters. `page` is 1-based.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotationQuery {
    pub status: Option<QuotationStatus>,
    pub search: Option<String>,
    pub sort_by: QuotationSortKey,
    pub sort_order: SortOrder,
    pub page: usize,
    pub limit: usize,
}

impl Default for QuotationQuery {
    fn default() -> Self {
        Self {
            status: None,
            search: None,
            sort_by: QuotationSortKey::default(),
            sort_order: SortOrder::default(),
            page: 1,
            limit: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub total_pages: usize,
}

/// Counts across the whole collection; `total` is the filtered count.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuotationStats {
    pub total: usize,
    pub pending: usize,
    pub responded: usize,
    pub accepted: usize,
    pub rejected: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotationPage {
    pub items: Vec<Quotation>,
    pub pagination: Pagination,
    pub statistics: QuotationStats,
}

fn matches_search(quotation: &Quotation, needle: &str) -> bool {
    [
        &quotation.product_title,
        &quotation.customer_name,
        &quotation.customer_email,
        &quotation.customer_phone,
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(needle))
}

/// Newest first, ties broken by id so listings are stable.
pub fn newest_first(items: &mut [Quotation]) {
    items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
}

pub fn run_query(all: Vec<Quotation>, query: &QuotationQuery) -> QuotationPage {
    let mut statistics = QuotationStats::default();
    for quotation in &all {
        match quotation.status {
            QuotationStatus::Pending => statistics.pending += 1,
            QuotationStatus::Responded => statistics.responded += 1,
            QuotationStatus::Accepted => statistics.accepted += 1,
            QuotationStatus::Rejected => statistics.rejected += 1,
        }
    }

    let needle = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    let mut filtered: Vec<Quotation> = all
        .into_iter()
        .filter(|q| query.status.map_or(true, |status| q.status == status))
        .filter(|q| needle.as_deref().map_or(true, |needle| matches_search(q, needle)))
        .collect();

    filtered.sort_by(|a, b| {
        let ordering = match query.sort_by {
            QuotationSortKey::CreatedAt => a.created_at.cmp(&b.created_at),
            QuotationSortKey::UpdatedAt => a.updated_at.cmp(&b.updated_at),
            QuotationSortKey::RequestedPrice => a.requested_price.total_cmp(&b.requested_price),
        }
        .then_with(|| a.id.cmp(&b.id));
        match query.sort_order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });

    let limit = query.limit.max(1);
    let page = query.page.max(1);
    let total = filtered.len();
    statistics.total = total;
    let items = filtered.into_iter().skip((page - 1) * limit).take(limit).collect();

    QuotationPage {
        items,
        pagination: Pagination {
            page,
            limit,
            total,
            total_pages: total.div_ceil(limit),
        },
        statistics,
    }
}
