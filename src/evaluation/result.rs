//! Evaluation output structures

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One product line enriched with the margin cascade figures
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductLineResult {
    pub product_code: String,
    pub product_name: String,
    pub volume_6m: f64,
    pub volume_month_avg: f64,
    pub revenue_6m: f64,
    pub revenue_month_avg: f64,
    pub unit_price_avg: f64,
    pub direct_margin_pct: f64,

    /// Gross margin before shared costs
    pub margin1: f64,

    /// Share of the monthly comodato cost carried by this line
    pub allocated_cost: f64,

    /// Margin after the comodato allocation
    pub margin2: f64,
    pub margin2_pct: f64,

    /// Margin after the commission deduction
    pub margin3: f64,
    pub margin3_pct: f64,
}

/// Complete per-client evaluation result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientEvaluation {
    /// Client the evaluation was run for
    pub client_key: String,

    /// Sales window bounds (half-open)
    pub window_start: NaiveDate,
    pub window_end: NaiveDate,

    /// True when the window held no sales and the full history was used
    pub used_fallback: bool,

    /// Product lines with the margin cascade applied
    pub product_lines: Vec<ProductLineResult>,

    /// Sum of revenue_month_avg across lines
    pub avg_monthly_revenue: f64,

    /// Historical installments plus proposed fees
    pub total_monthly_comodato_cost: f64,

    /// Comodato cost over average monthly revenue (0 when revenue is 0)
    pub comodato_to_revenue_ratio: f64,

    /// Base commission after the comodato burden penalty
    pub effective_commission_rate: f64,

    /// Total margin3 over total monthly revenue (0 when revenue is 0)
    pub viability_ratio: f64,

    /// Whether the ratio meets the threshold (inclusive)
    pub is_viable: bool,
}

impl ClientEvaluation {
    /// Sum of margin3 across all lines
    pub fn total_margin3(&self) -> f64 {
        self.product_lines.iter().map(|l| l.margin3).sum()
    }
}

/// Round a monetary amount to the nearest currency unit.
/// Used at the presentation edge only; the pipeline keeps full precision.
pub fn round_currency(amount: f64) -> f64 {
    amount.round()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_currency() {
        assert_eq!(round_currency(1234.49), 1234.0);
        assert_eq!(round_currency(1234.50), 1235.0);
        assert_eq!(round_currency(-10.6), -11.0);
    }
}
