//! Evaluation runner for repeated evaluations over pre-loaded feeds
//!
//! Loads the sales feed, contract feed, and cost catalog once, then allows
//! running many evaluations (different clients, dates, or parameters)
//! without re-reading CSV files.

use crate::catalog::{load_catalog, InMemoryCatalog};
use crate::evaluation::{ClientEvaluation, EvaluationEngine, EvaluationInput};
use crate::params::EvaluationParams;
use crate::records::{
    load_contracts, load_sales_records, ComodatoContract, FeedError, ProposedEquipmentLine,
    SalesRecord,
};
use chrono::NaiveDate;
use std::collections::BTreeSet;
use std::path::Path;

/// Pre-loaded feeds plus an engine, for repeated evaluation
///
/// # Example
/// ```ignore
/// let runner = EvaluationRunner::from_csv("sales.csv", "contracts.csv", "catalog.csv")?;
///
/// for date in candidate_dates {
///     let evaluation = runner.evaluate("C001", date, &[]);
/// }
/// ```
#[derive(Debug)]
pub struct EvaluationRunner {
    sales_records: Vec<SalesRecord>,
    contracts: Vec<ComodatoContract>,
    catalog: InMemoryCatalog,
    engine: EvaluationEngine,
}

impl EvaluationRunner {
    /// Build a runner from already-materialized feeds
    pub fn new(
        sales_records: Vec<SalesRecord>,
        contracts: Vec<ComodatoContract>,
        catalog: InMemoryCatalog,
        params: EvaluationParams,
    ) -> Self {
        Self {
            sales_records,
            contracts,
            catalog,
            engine: EvaluationEngine::new(params),
        }
    }

    /// Load all three feeds from CSV files with default parameters
    pub fn from_csv<P: AsRef<Path>>(
        sales_path: P,
        contracts_path: P,
        catalog_path: P,
    ) -> Result<Self, FeedError> {
        Ok(Self::new(
            load_sales_records(sales_path)?,
            load_contracts(contracts_path)?,
            load_catalog(catalog_path)?,
            EvaluationParams::default(),
        ))
    }

    /// Replace the evaluation parameters, keeping the loaded feeds
    pub fn with_params(mut self, params: EvaluationParams) -> Self {
        self.engine = EvaluationEngine::new(params);
        self
    }

    /// Evaluate one client at a given date, optionally simulating proposed
    /// equipment lines on top of the historical contracts
    pub fn evaluate(
        &self,
        client_key: &str,
        eval_date: NaiveDate,
        proposed_lines: &[ProposedEquipmentLine],
    ) -> ClientEvaluation {
        let input = EvaluationInput {
            client_key,
            eval_date,
            sales_records: &self.sales_records,
            contracts: &self.contracts,
            proposed_lines,
        };
        self.engine.evaluate(&input, &self.catalog)
    }

    /// Distinct client keys present in the sales feed, sorted
    pub fn client_keys(&self) -> Vec<String> {
        let keys: BTreeSet<&str> = self
            .sales_records
            .iter()
            .map(|r| r.client_key.as_str())
            .filter(|k| !k.is_empty())
            .collect();
        keys.into_iter().map(String::from).collect()
    }

    pub fn sales_records(&self) -> &[SalesRecord] {
        &self.sales_records
    }

    pub fn contracts(&self) -> &[ComodatoContract] {
        &self.contracts
    }

    pub fn params(&self) -> &EvaluationParams {
        self.engine.params()
    }
}
