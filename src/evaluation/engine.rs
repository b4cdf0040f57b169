//! Core evaluation engine: allocation, commission feedback, margin cascade,
//! viability decision
//!
//! The stages form a strict pipeline: totalize the comodato cost, allocate
//! it across lines by volume share, derive the effective commission from the
//! client totals, then apply the cascade per line and decide. The commission
//! depends on totals only, so the computation stays an acyclic function of
//! its inputs.

use super::aggregate::{aggregate_sales, ProductAggregate};
use super::comodato::total_monthly_cost;
use super::result::{ClientEvaluation, ProductLineResult};
use super::window::TrailingWindow;
use crate::catalog::CostCatalog;
use crate::params::EvaluationParams;
use crate::records::{ComodatoContract, ProposedEquipmentLine, SalesRecord};
use chrono::NaiveDate;

/// Everything one evaluation consumes, already materialized by collaborators
#[derive(Debug, Clone, Copy)]
pub struct EvaluationInput<'a> {
    /// Client under evaluation
    pub client_key: &'a str,

    /// Date the evaluation is run for; its month is excluded from the window
    pub eval_date: NaiveDate,

    /// Sales feed (all clients; the engine filters)
    pub sales_records: &'a [SalesRecord],

    /// Active historical contracts for the client
    pub contracts: &'a [ComodatoContract],

    /// Equipment lines being simulated on top of the contracts
    pub proposed_lines: &'a [ProposedEquipmentLine],
}

/// Main evaluation engine
#[derive(Debug)]
pub struct EvaluationEngine {
    params: EvaluationParams,
}

impl EvaluationEngine {
    /// Create an engine with the given parameters
    pub fn new(params: EvaluationParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &EvaluationParams {
        &self.params
    }

    /// Run one evaluation. Never fails: sparse or missing data degrades to
    /// zeros, and an unmatched client yields an empty line set with a zero
    /// (not viable) ratio.
    pub fn evaluate(
        &self,
        input: &EvaluationInput<'_>,
        catalog: &dyn CostCatalog,
    ) -> ClientEvaluation {
        let window =
            TrailingWindow::trailing(input.eval_date, self.params.effective_window_months());

        let aggregation = aggregate_sales(
            input.sales_records,
            input.client_key,
            &window,
            catalog,
            &self.params,
        );

        let total_comodato =
            total_monthly_cost(input.contracts, input.proposed_lines, input.eval_date);
        let allocated = allocate_costs(total_comodato, &aggregation.lines);

        let avg_monthly_revenue: f64 = aggregation
            .lines
            .iter()
            .map(|l| l.revenue_month_avg)
            .sum();

        let comodato_to_revenue_ratio = if avg_monthly_revenue > 0.0 {
            total_comodato / avg_monthly_revenue
        } else {
            0.0
        };

        let commission = effective_commission_rate(
            self.params.base_commission_rate,
            total_comodato,
            avg_monthly_revenue,
        );

        let product_lines: Vec<ProductLineResult> = aggregation
            .lines
            .into_iter()
            .zip(allocated)
            .map(|(line, allocated_cost)| cascade_line(line, allocated_cost, commission))
            .collect();

        let total_margin3: f64 = product_lines.iter().map(|l| l.margin3).sum();
        let viability_ratio = if avg_monthly_revenue > 0.0 {
            total_margin3 / avg_monthly_revenue
        } else {
            0.0
        };
        let is_viable = viability_ratio >= self.params.viability_threshold;

        log::debug!(
            "client {}: comodato {:.2}/month against revenue {:.2}/month, \
             commission {:.4}, viability {:.4} -> {}",
            input.client_key,
            total_comodato,
            avg_monthly_revenue,
            commission,
            viability_ratio,
            if is_viable { "viable" } else { "not viable" }
        );

        ClientEvaluation {
            client_key: input.client_key.to_string(),
            window_start: window.start,
            window_end: window.end,
            used_fallback: aggregation.used_fallback,
            product_lines,
            avg_monthly_revenue,
            total_monthly_comodato_cost: total_comodato,
            comodato_to_revenue_ratio,
            effective_commission_rate: commission,
            viability_ratio,
            is_viable,
        }
    }
}

/// Distribute the monthly comodato cost across lines in proportion to each
/// line's share of total monthly volume. All zeros when there is no volume;
/// otherwise the allocations sum back to the total.
fn allocate_costs(total_monthly_comodato: f64, lines: &[ProductAggregate]) -> Vec<f64> {
    let total_volume: f64 = lines.iter().map(|l| l.volume_month_avg).sum();

    lines
        .iter()
        .map(|line| {
            if total_volume > 0.0 {
                total_monthly_comodato * (line.volume_month_avg / total_volume)
            } else {
                0.0
            }
        })
        .collect()
}

/// Effective commission after the comodato burden penalty.
///
/// As the comodato cost approaches average monthly revenue the rate is
/// driven toward zero, and it never goes negative: loading a client with
/// equipment beyond their sales volume costs the salesperson their
/// commission.
pub fn effective_commission_rate(
    base_commission_rate: f64,
    total_monthly_comodato: f64,
    avg_monthly_revenue: f64,
) -> f64 {
    let ratio = if avg_monthly_revenue > 0.0 {
        total_monthly_comodato / avg_monthly_revenue
    } else {
        0.0
    };
    base_commission_rate * (1.0 - ratio).max(0.0)
}

/// Apply the three-stage margin cascade to one line
fn cascade_line(
    line: ProductAggregate,
    allocated_cost: f64,
    effective_commission_rate: f64,
) -> ProductLineResult {
    let revenue = line.revenue_month_avg;

    let margin1 = revenue * line.direct_margin_pct;
    let margin2 = margin1 - allocated_cost;
    let margin3 = margin2 - effective_commission_rate * revenue;

    let pct = |margin: f64| if revenue > 0.0 { margin / revenue } else { 0.0 };

    ProductLineResult {
        product_code: line.product_code,
        product_name: line.product_name,
        volume_6m: line.volume_6m,
        volume_month_avg: line.volume_month_avg,
        revenue_6m: line.revenue_6m,
        revenue_month_avg: revenue,
        unit_price_avg: line.unit_price_avg,
        direct_margin_pct: line.direct_margin_pct,
        margin1,
        allocated_cost,
        margin2,
        margin2_pct: pct(margin2),
        margin3,
        margin3_pct: pct(margin3),
    }
}
