//! Comodato Engine - Financial viability engine for client equipment-loan evaluations
//!
//! This library provides:
//! - Canonical record shapes for sales and comodato (equipment-loan) feeds
//! - Trailing-window sales aggregation by product line
//! - Monthly comodato cost totalization and volume-proportional allocation
//! - Three-stage margin cascade with commission feedback
//! - Client-level viability decision against a fixed threshold

pub mod records;
pub mod catalog;
pub mod params;
pub mod evaluation;
pub mod runner;

// Re-export commonly used types
pub use records::{SalesRecord, ComodatoContract, ProposedEquipmentLine};
pub use catalog::{CostCatalog, InMemoryCatalog};
pub use params::EvaluationParams;
pub use evaluation::{EvaluationEngine, ClientEvaluation, ProductLineResult, TrailingWindow};
pub use runner::EvaluationRunner;
