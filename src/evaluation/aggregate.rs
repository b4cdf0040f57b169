//! Sales aggregation by product line over the trailing window

use super::window::TrailingWindow;
use crate::catalog::CostCatalog;
use crate::params::EvaluationParams;
use crate::records::SalesRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Accumulated sales figures for one product line in the window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductAggregate {
    pub product_code: String,
    pub product_name: String,

    /// Total volume over the window
    pub volume_6m: f64,

    /// Average monthly volume (window total / window months)
    pub volume_month_avg: f64,

    /// Total revenue over the window
    pub revenue_6m: f64,

    /// Average monthly revenue
    pub revenue_month_avg: f64,

    /// Average realized unit price (0 when no volume)
    pub unit_price_avg: f64,

    /// (unit_price_avg - unit_cost) / unit_price_avg, 0 when price is 0
    pub direct_margin_pct: f64,
}

/// Aggregation output, flagging whether the window fallback was taken
#[derive(Debug, Clone)]
pub struct SalesAggregation {
    pub lines: Vec<ProductAggregate>,

    /// True when no records fell inside the window and the client's full
    /// history was used instead
    pub used_fallback: bool,
}

/// Aggregate a client's sales into per-product-line figures.
///
/// Records are filtered to the client and window first; when that yields
/// nothing the window filter is dropped and the client's entire history is
/// used (the fallback is judged before the finished-good prefix filter).
/// Only finished-good product codes enter the result set; other codes are
/// omitted entirely. Monthly averages always divide by the window length.
pub fn aggregate_sales(
    records: &[SalesRecord],
    client_key: &str,
    window: &TrailingWindow,
    catalog: &dyn CostCatalog,
    params: &EvaluationParams,
) -> SalesAggregation {
    let client_records: Vec<&SalesRecord> = records
        .iter()
        .filter(|r| r.client_key == client_key)
        .collect();

    let windowed: Vec<&SalesRecord> = client_records
        .iter()
        .copied()
        .filter(|r| window.contains(r.document_date))
        .collect();

    let used_fallback = windowed.is_empty() && !client_records.is_empty();
    if used_fallback {
        log::debug!(
            "client {client_key}: no sales in [{}, {}), falling back to full history ({} records)",
            window.start,
            window.end,
            client_records.len()
        );
    }
    let selected = if used_fallback { client_records } else { windowed };

    // Group by product code, accumulating volume and revenue
    let mut groups: BTreeMap<String, (String, f64, f64)> = BTreeMap::new();
    for record in selected {
        if !params.is_finished_good(&record.product_code) {
            continue;
        }
        let entry = groups
            .entry(record.product_code.clone())
            .or_insert_with(|| (record.product_name.clone(), 0.0, 0.0));
        entry.1 += record.volume_kg;
        entry.2 += record.revenue;
    }

    let months = window.months as f64;
    let lines = groups
        .into_iter()
        .map(|(product_code, (product_name, volume, revenue))| {
            let unit_price_avg = if volume > 0.0 { revenue / volume } else { 0.0 };
            let unit_cost = match catalog.unit_cost(&product_code) {
                Some(cost) => cost,
                None if params.use_list_price_as_cost => unit_price_avg,
                None => 0.0,
            };
            let direct_margin_pct = if unit_price_avg > 0.0 {
                (unit_price_avg - unit_cost) / unit_price_avg
            } else {
                0.0
            };

            ProductAggregate {
                product_code,
                product_name,
                volume_6m: volume,
                volume_month_avg: volume / months,
                revenue_6m: revenue,
                revenue_month_avg: revenue / months,
                unit_price_avg,
                direct_margin_pct,
            }
        })
        .collect();

    SalesAggregation {
        lines,
        used_fallback,
    }
}
