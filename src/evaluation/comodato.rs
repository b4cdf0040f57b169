//! Monthly comodato cost totalization

use crate::records::{ComodatoContract, ProposedEquipmentLine};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Per-contract installment figures, for display alongside the evaluation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractCharge {
    pub product_code: String,
    pub product_name: String,
    pub monthly_installment: f64,

    /// Installments left as of the evaluation date. Informational only: the
    /// monthly total keeps charging the full installment even at 0, matching
    /// the billing source, which treats the obligation as ongoing until the
    /// contract is explicitly closed.
    pub remaining_installments: u32,
}

impl ContractCharge {
    pub fn from_contract(contract: &ComodatoContract, eval_date: NaiveDate) -> Self {
        Self {
            product_code: contract.product_code.clone(),
            product_name: contract.product_name.clone(),
            monthly_installment: contract.monthly_installment(),
            remaining_installments: contract.remaining_installments(eval_date),
        }
    }
}

/// Total monthly comodato cost: full installments of every historical
/// contract plus the amortized fee of each proposed line.
pub fn total_monthly_cost(
    contracts: &[ComodatoContract],
    proposed: &[ProposedEquipmentLine],
    _eval_date: NaiveDate,
) -> f64 {
    let historical: f64 = contracts.iter().map(|c| c.monthly_installment()).sum();
    let simulated: f64 = proposed.iter().map(|p| p.monthly_fee()).sum();
    historical + simulated
}

/// Installment schedule for every historical contract
pub fn contract_charges(
    contracts: &[ComodatoContract],
    eval_date: NaiveDate,
) -> Vec<ContractCharge> {
    contracts
        .iter()
        .map(|c| ContractCharge::from_contract(c, eval_date))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn contract(code: &str, total: f64, months: u32, installed: NaiveDate) -> ComodatoContract {
        ComodatoContract {
            product_code: code.to_string(),
            product_name: format!("Equipment {code}"),
            total_value: total,
            contract_months: months,
            install_date: installed,
        }
    }

    #[test]
    fn test_total_combines_historical_and_proposed() {
        let contracts = vec![
            contract("EQ001", 24_000.0, 24, date(2024, 1, 10)), // 1000/month
            contract("EQ002", 6_000.0, 12, date(2024, 6, 1)),   // 500/month
        ];
        let proposed = vec![ProposedEquipmentLine {
            product_code: "EQ003".to_string(),
            product_name: "Display case".to_string(),
            quantity: 2,
            unit_price: 3_000.0,
            contract_months: 12, // 500/month
        }];

        let total = total_monthly_cost(&contracts, &proposed, date(2025, 3, 15));
        assert_eq!(total, 2_000.0);
    }

    #[test]
    fn test_expired_contract_still_charged() {
        // Contract installed in 2020, long past its 12-month term: the full
        // installment still counts toward the monthly total
        let contracts = vec![contract("EQ001", 12_000.0, 12, date(2020, 1, 1))];
        let eval = date(2025, 3, 15);

        let charges = contract_charges(&contracts, eval);
        assert_eq!(charges[0].remaining_installments, 0);

        let total = total_monthly_cost(&contracts, &[], eval);
        assert_eq!(total, 1_000.0);
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(total_monthly_cost(&[], &[], date(2025, 3, 15)), 0.0);
    }
}
