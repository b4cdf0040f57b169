//! Configuration for an evaluation run

use serde::{Deserialize, Serialize};

/// Parameters controlling a viability evaluation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationParams {
    /// Number of complete calendar months in the trailing sales window
    pub window_months: u32,

    /// Commission rate before the comodato burden penalty
    pub base_commission_rate: f64,

    /// When the catalog has no cost entry: use the average list price as the
    /// cost (zeroing the direct margin) instead of a cost of zero
    pub use_list_price_as_cost: bool,

    /// Minimum margin3-to-revenue ratio for a viable verdict (inclusive)
    pub viability_threshold: f64,

    /// Product-code prefixes identifying finished goods; only these lines
    /// enter the margin computation, everything else is omitted
    pub finished_good_prefixes: Vec<String>,
}

impl Default for EvaluationParams {
    fn default() -> Self {
        Self {
            window_months: 6,
            base_commission_rate: 0.02,
            use_list_price_as_cost: false,
            viability_threshold: 0.5,
            finished_good_prefixes: vec!["PA".to_string()],
        }
    }
}

impl EvaluationParams {
    /// Window length with invalid values clamped to a single month
    pub fn effective_window_months(&self) -> u32 {
        self.window_months.max(1)
    }

    /// Whether a product code is eligible for margin computation
    pub fn is_finished_good(&self, product_code: &str) -> bool {
        self.finished_good_prefixes
            .iter()
            .any(|prefix| product_code.starts_with(prefix.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = EvaluationParams::default();
        assert_eq!(params.window_months, 6);
        assert_eq!(params.base_commission_rate, 0.02);
        assert_eq!(params.viability_threshold, 0.5);
        assert!(!params.use_list_price_as_cost);
    }

    #[test]
    fn test_window_clamp() {
        let params = EvaluationParams {
            window_months: 0,
            ..Default::default()
        };
        assert_eq!(params.effective_window_months(), 1);
    }

    #[test]
    fn test_finished_good_prefix() {
        let params = EvaluationParams::default();
        assert!(params.is_finished_good("PA100"));
        assert!(!params.is_finished_good("MP050"));
        assert!(!params.is_finished_good(""));
    }
}
