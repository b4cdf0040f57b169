//! Product cost catalog lookup
//!
//! The unit cost feeding the direct margin comes from an external catalog.
//! The engine only depends on the lookup trait; a missing entry is handled
//! by the configured fallback, never treated as an error.

use crate::records::FeedError;
use std::collections::HashMap;
use std::path::Path;

/// Lookup seam for product unit costs
pub trait CostCatalog {
    /// Unit cost for a product code, if the catalog has an entry
    fn unit_cost(&self, product_code: &str) -> Option<f64>;
}

/// In-memory cost catalog backed by a map
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    costs: HashMap<String, f64>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from (product_code, unit_cost) pairs
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, f64)>,
    {
        Self {
            costs: entries.into_iter().collect(),
        }
    }

    pub fn insert(&mut self, product_code: impl Into<String>, unit_cost: f64) {
        self.costs.insert(product_code.into(), unit_cost);
    }

    pub fn len(&self) -> usize {
        self.costs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }
}

impl CostCatalog for InMemoryCatalog {
    fn unit_cost(&self, product_code: &str) -> Option<f64> {
        self.costs.get(product_code).copied()
    }
}

/// Load a cost catalog from a two-column CSV (product code, unit cost)
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<InMemoryCatalog, FeedError> {
    let file = std::fs::File::open(path)?;
    load_catalog_from_reader(file)
}

/// Load a cost catalog from any reader
pub fn load_catalog_from_reader<R: std::io::Read>(reader: R) -> Result<InMemoryCatalog, FeedError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut catalog = InMemoryCatalog::new();

    for (i, result) in csv_reader.records().enumerate() {
        let record = result?;
        let code = record.get(0).unwrap_or("").trim();
        let raw_cost = record.get(1).unwrap_or("").trim();
        let cost = raw_cost.parse::<f64>().map_err(|_| FeedError::InvalidNumber {
            row: i + 2,
            field: "unit_cost",
            value: raw_cost.to_string(),
        })?;
        catalog.insert(code, cost);
    }

    Ok(catalog)
}
