//! Record structures matching the normalized feed shapes

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single sales transaction line from the billing feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesRecord {
    /// Client identifier the line was billed to
    pub client_key: String,

    /// Product code (finished goods carry a dedicated prefix)
    pub product_code: String,

    /// Product description
    pub product_name: String,

    /// Billed volume in kilograms
    pub volume_kg: f64,

    /// Billed revenue for the line
    pub revenue: f64,

    /// Document issue date
    pub document_date: NaiveDate,
}

/// An equipment-loan contract already installed at the client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComodatoContract {
    /// Equipment product code
    pub product_code: String,

    /// Equipment description
    pub product_name: String,

    /// Total contracted equipment value
    pub total_value: f64,

    /// Contract length in months
    pub contract_months: u32,

    /// Date the equipment was installed at the client
    pub install_date: NaiveDate,
}

impl ComodatoContract {
    /// Monthly installment amortized over the contract length.
    /// Zero-length contracts are treated as one month.
    pub fn monthly_installment(&self) -> f64 {
        self.total_value / self.contract_months.max(1) as f64
    }

    /// Installments left as of the evaluation date, floored at 0.
    /// Elapsed time is counted in whole calendar months, ignoring day-of-month.
    pub fn remaining_installments(&self, eval_date: NaiveDate) -> u32 {
        let elapsed = months_elapsed(self.install_date, eval_date);
        self.contract_months.saturating_sub(elapsed)
    }
}

/// An equipment line being simulated for a new comodato proposal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProposedEquipmentLine {
    /// Equipment product code
    pub product_code: String,

    /// Equipment description
    pub product_name: String,

    /// Number of units proposed
    pub quantity: u32,

    /// Unit price of the equipment
    pub unit_price: f64,

    /// Proposed contract length in months (clamped to at least 1)
    pub contract_months: u32,
}

impl ProposedEquipmentLine {
    /// Total equipment value of the line
    pub fn total(&self) -> f64 {
        self.quantity as f64 * self.unit_price
    }

    /// Monthly fee amortized over the proposed contract length
    pub fn monthly_fee(&self) -> f64 {
        self.total() / self.contract_months.max(1) as f64
    }
}

/// Whole calendar months elapsed between two dates, ignoring day-of-month.
/// Returns 0 when `to` precedes `from`.
pub fn months_elapsed(from: NaiveDate, to: NaiveDate) -> u32 {
    use chrono::Datelike;
    let months = (to.year() as i64 - from.year() as i64) * 12
        + (to.month() as i64 - from.month() as i64);
    months.max(0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_monthly_installment() {
        let contract = ComodatoContract {
            product_code: "EQ001".to_string(),
            product_name: "Freezer 400L".to_string(),
            total_value: 24_000.0,
            contract_months: 24,
            install_date: date(2024, 1, 10),
        };
        assert_eq!(contract.monthly_installment(), 1_000.0);
    }

    #[test]
    fn test_zero_length_contract_clamped() {
        let contract = ComodatoContract {
            product_code: "EQ001".to_string(),
            product_name: "Freezer 400L".to_string(),
            total_value: 5_000.0,
            contract_months: 0,
            install_date: date(2024, 1, 10),
        };
        assert_eq!(contract.monthly_installment(), 5_000.0);
    }

    #[test]
    fn test_remaining_installments() {
        let contract = ComodatoContract {
            product_code: "EQ001".to_string(),
            product_name: "Freezer 400L".to_string(),
            total_value: 24_000.0,
            contract_months: 24,
            install_date: date(2024, 1, 10),
        };

        // 14 whole months elapsed between 2024-01 and 2025-03
        assert_eq!(contract.remaining_installments(date(2025, 3, 15)), 10);

        // Past the term: floored at 0, never negative
        assert_eq!(contract.remaining_installments(date(2030, 1, 1)), 0);

        // Install date in the future: nothing elapsed yet
        assert_eq!(contract.remaining_installments(date(2023, 6, 1)), 24);
    }

    #[test]
    fn test_months_elapsed_ignores_day() {
        assert_eq!(months_elapsed(date(2024, 1, 31), date(2024, 2, 1)), 1);
        assert_eq!(months_elapsed(date(2024, 3, 1), date(2024, 3, 31)), 0);
        assert_eq!(months_elapsed(date(2023, 11, 5), date(2025, 1, 5)), 14);
    }

    #[test]
    fn test_proposed_line_fee() {
        let line = ProposedEquipmentLine {
            product_code: "EQ002".to_string(),
            product_name: "Display case".to_string(),
            quantity: 3,
            unit_price: 4_000.0,
            contract_months: 12,
        };
        assert_eq!(line.total(), 12_000.0);
        assert_eq!(line.monthly_fee(), 1_000.0);

        let clamped = ProposedEquipmentLine {
            contract_months: 0,
            ..line
        };
        assert_eq!(clamped.monthly_fee(), 12_000.0);
    }
}
